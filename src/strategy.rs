pub mod condition;

use std::fmt;

use error_stack::Report;
use serde::Serialize;

use crate::error::IndicatorError;
use crate::indicator::{Indicator, checked_period};
use crate::indicator::ma::Sma;
use crate::indicator::rsi::{Rsi, ZeroLossPolicy};
use crate::strategy::condition::{MaOrdering, Snapshot, evaluate_crossover, evaluate_level};

/// Trading decision for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// RSI levels used as the momentum leg of the signal rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// How the moving-average leg of the rule is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Current ordering of the averages at each step.
    #[default]
    Level,
    /// Only the step at which the ordering changes.
    Crossover,
}

impl TriggerMode {
    /// Parse a config-format string into a `TriggerMode`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "level" => Some(Self::Level),
            "crossover" => Some(Self::Crossover),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalParams {
    pub short_period: i64,
    pub long_period: i64,
    pub rsi_period: i64,
    pub thresholds: Thresholds,
    pub mode: TriggerMode,
    pub zero_loss: ZeroLossPolicy,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            short_period: 5,
            long_period: 20,
            rsi_period: 14,
            thresholds: Thresholds::default(),
            mode: TriggerMode::default(),
            zero_loss: ZeroLossPolicy::default(),
        }
    }
}

/// Combines a short SMA, a long SMA and an RSI into one decision per step.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    short_ma: Sma,
    long_ma: Sma,
    rsi: Rsi,
    thresholds: Thresholds,
    mode: TriggerMode,
}

impl SignalGenerator {
    pub fn new(params: &SignalParams) -> Result<Self, Report<IndicatorError>> {
        let short_ma = Sma::new(checked_period(params.short_period, "short moving average")?)?;
        let long_ma = Sma::new(checked_period(params.long_period, "long moving average")?)?;
        let rsi =
            Rsi::new(checked_period(params.rsi_period, "rsi")?)?.with_zero_loss(params.zero_loss);
        Ok(Self {
            short_ma,
            long_ma,
            rsi,
            thresholds: params.thresholds,
            mode: params.mode,
        })
    }

    /// Number of prices needed before any step can carry a defined decision.
    pub fn warmup_len(&self) -> usize {
        self.short_ma
            .required_len()
            .max(self.long_ma.required_len())
            .max(self.rsi.required_len())
    }

    /// Produce one signal per price, aligned index-for-index.
    pub fn generate(&self, prices: &[f64]) -> Result<Vec<Signal>, Report<IndicatorError>> {
        let short_ma = self.short_ma.compute(prices)?;
        let long_ma = self.long_ma.compute(prices)?;
        let rsi = self.rsi.compute(prices)?;

        let mut previous = MaOrdering::Unknown;
        let signals: Vec<Signal> = (0..prices.len())
            .map(|i| {
                let snapshot = Snapshot {
                    short_ma: short_ma[i],
                    long_ma: long_ma[i],
                    rsi: rsi[i],
                };
                match self.mode {
                    TriggerMode::Level => evaluate_level(&snapshot, &self.thresholds),
                    TriggerMode::Crossover => {
                        let current = snapshot.ordering();
                        let signal = evaluate_crossover(&snapshot, previous, &self.thresholds);
                        previous = current;
                        signal
                    }
                }
            })
            .collect();

        let summary = SignalSummary::from_signals(&signals);
        tracing::debug!(
            len = prices.len(),
            mode = ?self.mode,
            buy = summary.buy,
            sell = summary.sell,
            hold = summary.hold,
            "signals generated"
        );
        Ok(signals)
    }
}

/// Counts of each decision in a signal series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalSummary {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

impl SignalSummary {
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals.iter().fold(Self::default(), |mut acc, signal| {
            match signal {
                Signal::Buy => acc.buy += 1,
                Signal::Sell => acc.sell += 1,
                Signal::Hold => acc.hold += 1,
            }
            acc
        })
    }
}

/// Level-mode signals with the default RSI zero-loss behavior.
pub fn signals(
    series: &[f64],
    short_period: i64,
    long_period: i64,
    rsi_period: i64,
    oversold: f64,
    overbought: f64,
) -> Result<Vec<Signal>, Report<IndicatorError>> {
    let params = SignalParams {
        short_period,
        long_period,
        rsi_period,
        thresholds: Thresholds {
            oversold,
            overbought,
        },
        ..SignalParams::default()
    };
    SignalGenerator::new(&params)?.generate(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(short: i64, long: i64, rsi: i64, mode: TriggerMode) -> SignalGenerator {
        SignalGenerator::new(&SignalParams {
            short_period: short,
            long_period: long,
            rsi_period: rsi,
            mode,
            ..SignalParams::default()
        })
        .unwrap()
    }

    #[test]
    fn signal_display_matches_wire_names() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Sell.to_string(), "SELL");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
    }

    #[test]
    fn signal_serializes_upper_case() {
        let json = serde_json::to_string(&[Signal::Buy, Signal::Hold]).unwrap();
        assert_eq!(json, r#"["BUY","HOLD"]"#);
    }

    #[test]
    fn invalid_periods_rejected() {
        for (short, long, rsi) in [(0, 20, 14), (5, -1, 14), (5, 20, 0)] {
            let params = SignalParams {
                short_period: short,
                long_period: long,
                rsi_period: rsi,
                ..SignalParams::default()
            };
            assert!(SignalGenerator::new(&params).is_err());
        }
    }

    #[test]
    fn constant_prices_hold_everywhere() {
        let prices = [10.0; 10];
        let out = signals(&prices, 2, 4, 3, 30.0, 70.0).unwrap();
        assert_eq!(out, vec![Signal::Hold; 10]);
    }

    #[test]
    fn rising_prices_buy_once_warmed_up() {
        // all-gains run reports RSI 0, short MA above long MA
        let prices: Vec<f64> = (1..=10).map(f64::from).collect();
        let out = signals(&prices, 2, 4, 3, 30.0, 70.0).unwrap();
        assert_eq!(&out[..3], &[Signal::Hold; 3]);
        assert_eq!(&out[3..], &[Signal::Buy; 7]);
    }

    #[test]
    fn rising_prices_hold_with_saturating_rsi() {
        let prices: Vec<f64> = (1..=10).map(f64::from).collect();
        let params = SignalParams {
            short_period: 2,
            long_period: 4,
            rsi_period: 3,
            zero_loss: ZeroLossPolicy::Saturate,
            ..SignalParams::default()
        };
        let out = SignalGenerator::new(&params)
            .unwrap()
            .generate(&prices)
            .unwrap();
        assert_eq!(out, vec![Signal::Hold; 10]);
    }

    #[test]
    fn rebound_after_dip_sells() {
        let prices = [
            100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 90.0, 89.0, 99.0,
        ];
        let out = generator(2, 8, 2, TriggerMode::Level)
            .generate(&prices)
            .unwrap();
        let mut expected = vec![Signal::Hold; 10];
        expected.push(Signal::Sell);
        assert_eq!(out, expected);
    }

    #[test]
    fn crossover_mode_fires_only_on_transition() {
        let prices = [10.0, 9.0, 8.0, 7.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let level = generator(2, 4, 1, TriggerMode::Level)
            .generate(&prices)
            .unwrap();
        let crossover = generator(2, 4, 1, TriggerMode::Crossover)
            .generate(&prices)
            .unwrap();

        let mut expected_level = vec![Signal::Hold; 6];
        expected_level.extend([Signal::Buy; 3]);
        assert_eq!(level, expected_level);

        let mut expected_crossover = vec![Signal::Hold; 9];
        expected_crossover[6] = Signal::Buy;
        assert_eq!(crossover, expected_crossover);
    }

    #[test]
    fn crossover_mode_tracks_ordering_while_rsi_warms_up() {
        // averages cross upward at index 2, rsi first defined at index 5
        let prices = [10.0, 9.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let out = generator(1, 2, 5, TriggerMode::Crossover)
            .generate(&prices)
            .unwrap();
        assert_eq!(out, vec![Signal::Hold; 7]);

        // rsi reads 0 once defined, so level mode buys where crossover holds
        let prices = [10.0, 10.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let crossover = generator(1, 2, 5, TriggerMode::Crossover)
            .generate(&prices)
            .unwrap();
        assert_eq!(crossover, vec![Signal::Hold; 7]);

        let level = generator(1, 2, 5, TriggerMode::Level)
            .generate(&prices)
            .unwrap();
        let mut expected = vec![Signal::Hold; 5];
        expected.extend([Signal::Buy; 2]);
        assert_eq!(level, expected);
    }

    #[test]
    fn crossover_mode_ignores_first_defined_step() {
        let prices: Vec<f64> = (1..=10).map(f64::from).collect();
        let out = generator(2, 4, 3, TriggerMode::Crossover)
            .generate(&prices)
            .unwrap();
        assert_eq!(out, vec![Signal::Hold; 10]);
    }

    #[test]
    fn short_series_holds_everywhere() {
        let out = signals(&[1.0, 2.0, 3.0], 5, 20, 14, 30.0, 70.0).unwrap();
        assert_eq!(out, vec![Signal::Hold; 3]);
    }

    #[test]
    fn empty_series_gives_empty_signals() {
        assert!(signals(&[], 5, 20, 14, 30.0, 70.0).unwrap().is_empty());
    }

    #[test]
    fn warmup_len_is_longest_lookback() {
        assert_eq!(generator(5, 20, 14, TriggerMode::Level).warmup_len(), 20);
        assert_eq!(generator(5, 10, 14, TriggerMode::Level).warmup_len(), 15);
    }

    #[test]
    fn summary_counts_each_signal() {
        let summary =
            SignalSummary::from_signals(&[Signal::Buy, Signal::Hold, Signal::Hold, Signal::Sell]);
        assert_eq!(
            summary,
            SignalSummary {
                buy: 1,
                sell: 1,
                hold: 2
            }
        );
    }

    #[test]
    fn trigger_mode_parse() {
        assert_eq!(TriggerMode::from_str("level"), Some(TriggerMode::Level));
        assert_eq!(TriggerMode::from_str("crossover"), Some(TriggerMode::Crossover));
        assert_eq!(TriggerMode::from_str("edge"), None);
    }
}
