use error_stack::{Report, ResultExt};
use serde::Serialize;

use crate::error::OutputError;
use crate::strategy::Signal;

/// One displayed step of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRow {
    pub index: usize,
    pub price: f64,
    pub signal: Signal,
}

/// Pair the first `count` prices with their signals.
pub fn rows(prices: &[f64], signals: &[Signal], count: usize) -> Vec<SignalRow> {
    prices
        .iter()
        .zip(signals)
        .take(count)
        .enumerate()
        .map(|(index, (&price, &signal))| SignalRow {
            index,
            price,
            signal,
        })
        .collect()
}

pub fn render_text(rows: &[SignalRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "Index {:02} - Price: {:.2} -> Signal: {}",
                row.index, row.price, row.signal
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(rows: &[SignalRow]) -> Result<String, Report<OutputError>> {
    serde_json::to_string_pretty(rows)
        .change_context(OutputError::Serialize)
        .attach_with(|| format!("rows: {}", rows.len()))
}
