pub mod ma;
pub mod rsi;

use error_stack::{Report, bail};

use crate::error::IndicatorError;

/// Indicator output aligned index-for-index with the input prices.
///
/// `None` marks a step without enough lookback to be computed.
pub type IndicatorSeries = Vec<Option<f64>>;

/// A technical analysis indicator over a price series.
///
/// Prices must be in ascending chronological order (oldest first).
pub trait Indicator: Send + Sync {
    /// Unique name of this indicator (e.g., "rsi", "sma").
    fn name(&self) -> &str;

    /// Minimum number of prices required to produce at least one defined value.
    fn required_len(&self) -> usize;

    /// Calculate indicator values from prices.
    ///
    /// The result always has the same length as `prices`. Steps lacking
    /// lookback are `None`; a series that is too short is all `None`.
    fn compute(&self, prices: &[f64]) -> Result<IndicatorSeries, Report<IndicatorError>>;
}

/// Simple moving average of `series` over `period` steps.
pub fn moving_average(
    series: &[f64],
    period: i64,
) -> Result<IndicatorSeries, Report<IndicatorError>> {
    ma::Sma::new(checked_period(period, "moving average")?)?.compute(series)
}

/// Wilder-smoothed RSI of `series` over `period` steps.
pub fn rsi(series: &[f64], period: i64) -> Result<IndicatorSeries, Report<IndicatorError>> {
    rsi::Rsi::new(checked_period(period, "rsi")?)?.compute(series)
}

/// Convert a signed period into a lookback length, rejecting anything below 1.
pub fn checked_period(period: i64, indicator: &str) -> Result<usize, Report<IndicatorError>> {
    if period <= 0 {
        bail!(IndicatorError::InvalidParameter {
            name: format!("{indicator} period must be > 0, got {period}"),
        });
    }
    usize::try_from(period).map_err(|_| {
        Report::new(IndicatorError::InvalidParameter {
            name: format!("{indicator} period {period} does not fit in usize"),
        })
    })
}

/// Place `values` at the tail of a `total_len` series, padding the head with `None`.
pub(crate) fn align_series(total_len: usize, values: Vec<f64>) -> IndicatorSeries {
    let offset = total_len.saturating_sub(values.len());
    let mut output = vec![None; total_len];
    for (index, value) in values.into_iter().enumerate() {
        output[offset + index] = Some(value);
    }
    output
}
