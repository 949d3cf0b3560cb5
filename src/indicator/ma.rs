use error_stack::{Report, bail};

use crate::error::IndicatorError;
use crate::indicator::{Indicator, IndicatorSeries, align_series};

/// Simple Moving Average.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, Report<IndicatorError>> {
        if period == 0 {
            bail!(IndicatorError::InvalidParameter {
                name: "period must be > 0".into(),
            });
        }
        Ok(Self { period })
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        "sma"
    }

    fn required_len(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> Result<IndicatorSeries, Report<IndicatorError>> {
        // windows() yields nothing when prices.len() < period, leaving the series all None
        let means = prices
            .windows(self.period)
            .map(|w| w.iter().sum::<f64>() / self.period as f64)
            .collect();
        Ok(align_series(prices.len(), means))
    }
}
