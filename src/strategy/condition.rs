use crate::strategy::{Signal, Thresholds};

/// Indicator readings at a single step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub rsi: Option<f64>,
}

/// Relative position of the short moving average against the long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaOrdering {
    Above,
    Below,
    Level,
    Unknown,
}

impl Snapshot {
    pub fn ordering(&self) -> MaOrdering {
        match (self.short_ma, self.long_ma) {
            (Some(short), Some(long)) if short > long => MaOrdering::Above,
            (Some(short), Some(long)) if short < long => MaOrdering::Below,
            (Some(_), Some(_)) => MaOrdering::Level,
            _ => MaOrdering::Unknown,
        }
    }
}

/// Decide from the instantaneous ordering and RSI level at one step.
///
/// Any undefined reading holds. Ties in the averages hold.
pub fn evaluate_level(snapshot: &Snapshot, thresholds: &Thresholds) -> Signal {
    let Some(rsi) = snapshot.rsi else {
        return Signal::Hold;
    };
    match snapshot.ordering() {
        MaOrdering::Above if rsi < thresholds.oversold => Signal::Buy,
        MaOrdering::Below if rsi > thresholds.overbought => Signal::Sell,
        _ => Signal::Hold,
    }
}

/// Decide only when the ordering changed since `previous`.
///
/// Moving into `Above` from `Below` or `Level` can buy; moving into `Below`
/// from `Above` or `Level` can sell. Nothing fires coming out of `Unknown`.
pub fn evaluate_crossover(
    snapshot: &Snapshot,
    previous: MaOrdering,
    thresholds: &Thresholds,
) -> Signal {
    let Some(rsi) = snapshot.rsi else {
        return Signal::Hold;
    };
    let crossed_up = matches!(previous, MaOrdering::Below | MaOrdering::Level);
    let crossed_down = matches!(previous, MaOrdering::Above | MaOrdering::Level);
    match snapshot.ordering() {
        MaOrdering::Above if crossed_up && rsi < thresholds.oversold => Signal::Buy,
        MaOrdering::Below if crossed_down && rsi > thresholds.overbought => Signal::Sell,
        _ => Signal::Hold,
    }
}
