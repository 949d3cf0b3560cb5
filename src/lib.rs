//! Moving-average and RSI signal pipeline.
//!
//! Turns a price series into one BUY / SELL / HOLD decision per step by
//! combining a short and a long simple moving average with a
//! Wilder-smoothed RSI.

pub mod config;
pub mod demo;
pub mod error;
pub mod indicator;
pub mod output;
pub mod strategy;

pub use error::IndicatorError;
pub use indicator::{IndicatorSeries, moving_average, rsi};
pub use strategy::{Signal, SignalGenerator, SignalParams, signals};
