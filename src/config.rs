use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::indicator::rsi::ZeroLossPolicy;
use crate::strategy::{SignalParams, Thresholds, TriggerMode};

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_length() -> usize {
    100
}

fn default_base_price() -> f64 {
    100.0
}

fn default_jitter() -> f64 {
    1.0
}

fn default_display_count() -> usize {
    20
}

fn default_output() -> String {
    "text".into()
}

fn default_short_period() -> i64 {
    5
}

fn default_long_period() -> i64 {
    20
}

fn default_rsi_period() -> i64 {
    14
}

fn default_oversold() -> f64 {
    30.0
}

fn default_overbought() -> f64 {
    70.0
}

fn default_mode() -> String {
    "level".into()
}

fn default_rsi_zero_loss() -> String {
    "zero".into()
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    /// Seed for the synthetic price source; drawn from entropy when absent.
    pub seed: Option<u64>,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    #[serde(default = "default_display_count")]
    pub display_count: usize,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            length: default_length(),
            base_price: default_base_price(),
            jitter: default_jitter(),
            display_count: default_display_count(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignalsConfig {
    #[serde(default = "default_short_period")]
    pub short_period: i64,
    #[serde(default = "default_long_period")]
    pub long_period: i64,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: i64,
    #[serde(default = "default_oversold")]
    pub oversold: f64,
    #[serde(default = "default_overbought")]
    pub overbought: f64,
    /// Accepted values: `"level"` | `"crossover"`
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Accepted values: `"zero"` | `"saturate"`
    #[serde(default = "default_rsi_zero_loss")]
    pub rsi_zero_loss: String,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
            rsi_period: default_rsi_period(),
            oversold: default_oversold(),
            overbought: default_overbought(),
            mode: default_mode(),
            rsi_zero_loss: default_rsi_zero_loss(),
        }
    }
}

impl SignalsConfig {
    /// Build generator parameters from a validated config section.
    pub fn to_params(&self) -> Result<SignalParams, Report<ConfigError>> {
        let mode = TriggerMode::from_str(&self.mode).ok_or_else(|| {
            Report::new(ConfigError::Validation {
                field: format!("signals.mode \"{}\" is not valid", self.mode),
            })
        })?;
        let zero_loss = ZeroLossPolicy::from_str(&self.rsi_zero_loss).ok_or_else(|| {
            Report::new(ConfigError::Validation {
                field: format!(
                    "signals.rsi_zero_loss \"{}\" is not valid",
                    self.rsi_zero_loss
                ),
            })
        })?;
        Ok(SignalParams {
            short_period: self.short_period,
            long_period: self.long_period,
            rsi_period: self.rsi_period,
            thresholds: Thresholds {
                oversold: self.oversold,
                overbought: self.overbought,
            },
            mode,
            zero_loss,
        })
    }
}

/// Load and validate an `AppConfig` from a TOML file at `path`.
pub fn load(path: &Path) -> Result<AppConfig, Report<ConfigError>> {
    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content).change_context(ConfigError::Parse {
        reason: "invalid TOML syntax or schema mismatch".into(),
    })?;

    validate(&config)?;

    Ok(config)
}

const VALID_FORMATS: &[&str] = &["text", "json"];

pub fn validate(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    validate_general(&config.general)?;
    validate_demo(&config.demo)?;
    validate_periods(&config.signals)?;
    validate_thresholds(&config.signals)?;
    config.signals.to_params()?;
    Ok(())
}

fn invalid(field: String) -> Report<ConfigError> {
    Report::new(ConfigError::Validation { field })
}

fn validate_general(general: &GeneralConfig) -> Result<(), Report<ConfigError>> {
    if !VALID_FORMATS.contains(&general.log_format.as_str()) {
        return Err(invalid(format!(
            "general.log_format \"{}\" is not valid",
            general.log_format
        )));
    }
    Ok(())
}

fn validate_demo(demo: &DemoConfig) -> Result<(), Report<ConfigError>> {
    if demo.length == 0 {
        return Err(invalid("demo.length must be > 0".into()));
    }
    if !demo.base_price.is_finite() {
        return Err(invalid("demo.base_price must be finite".into()));
    }
    if !demo.jitter.is_finite() || demo.jitter < 0.0 {
        return Err(invalid(format!(
            "demo.jitter must be finite and >= 0, got {}",
            demo.jitter
        )));
    }
    if !VALID_FORMATS.contains(&demo.output.as_str()) {
        return Err(invalid(format!(
            "demo.output \"{}\" is not valid",
            demo.output
        )));
    }
    Ok(())
}

fn validate_periods(signals: &SignalsConfig) -> Result<(), Report<ConfigError>> {
    let periods = [
        ("short_period", signals.short_period),
        ("long_period", signals.long_period),
        ("rsi_period", signals.rsi_period),
    ];
    for (name, value) in periods {
        if value <= 0 {
            return Err(invalid(format!("signals.{name} must be > 0, got {value}")));
        }
    }
    Ok(())
}

fn validate_thresholds(signals: &SignalsConfig) -> Result<(), Report<ConfigError>> {
    for (name, value) in [
        ("oversold", signals.oversold),
        ("overbought", signals.overbought),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid(format!(
                "signals.{name} must be within [0, 100], got {value}"
            )));
        }
    }
    if signals.oversold > signals.overbought {
        return Err(invalid(format!(
            "signals.oversold ({}) must not exceed signals.overbought ({})",
            signals.oversold, signals.overbought
        )));
    }
    Ok(())
}
