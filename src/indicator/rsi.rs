use error_stack::{Report, bail};

use crate::error::IndicatorError;
use crate::indicator::{Indicator, IndicatorSeries};

/// How RSI is reported when the smoothed average loss is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroLossPolicy {
    /// RS is taken as 0, so an all-gains run reports RSI = 0.
    #[default]
    Zero,
    /// RSI saturates at 100, the conventional reading.
    ///
    /// A flat run with no gains either still reports 0.
    Saturate,
}

impl ZeroLossPolicy {
    /// Parse a config-format string into a `ZeroLossPolicy`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "zero" => Some(Self::Zero),
            "saturate" => Some(Self::Saturate),
            _ => None,
        }
    }
}

/// RSI (Relative Strength Index) using Wilder's smoothing method.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    zero_loss: ZeroLossPolicy,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, Report<IndicatorError>> {
        if period == 0 {
            bail!(IndicatorError::InvalidParameter {
                name: "period must be > 0".into(),
            });
        }
        Ok(Self {
            period,
            zero_loss: ZeroLossPolicy::default(),
        })
    }

    pub fn with_zero_loss(mut self, policy: ZeroLossPolicy) -> Self {
        self.zero_loss = policy;
        self
    }

    fn value(&self, avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return match self.zero_loss {
                ZeroLossPolicy::Zero => 0.0,
                ZeroLossPolicy::Saturate if avg_gain > 0.0 => 100.0,
                ZeroLossPolicy::Saturate => 0.0,
            };
        }
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "rsi"
    }

    fn required_len(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn compute(&self, prices: &[f64]) -> Result<IndicatorSeries, Report<IndicatorError>> {
        let mut results: IndicatorSeries = vec![None; prices.len()];
        if prices.len() < self.required_len() {
            tracing::debug!(
                period = self.period,
                available = prices.len(),
                "insufficient history for rsi, returning undefined series"
            );
            return Ok(results);
        }

        let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let period = self.period as f64;

        // Seed using simple average of first `period` gains/losses
        let mut avg_gain = deltas[..self.period]
            .iter()
            .map(|&d| d.max(0.0))
            .sum::<f64>()
            / period;
        let mut avg_loss = deltas[..self.period]
            .iter()
            .map(|&d| (-d).max(0.0))
            .sum::<f64>()
            / period;

        results[self.period] = Some(self.value(avg_gain, avg_loss));

        // Wilder smoothing; delta[i - 1] feeds price index i
        for (offset, &delta) in deltas[self.period..].iter().enumerate() {
            let gain = delta.max(0.0);
            let loss = (-delta).max(0.0);
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            results[self.period + 1 + offset] = Some(self.value(avg_gain, avg_loss));
        }

        Ok(results)
    }
}
