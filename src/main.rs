use std::path::Path;

use clap::Parser;
use derive_more::{Display, Error};
use error_stack::{Report, ResultExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

use conviction_engine::config::{self, AppConfig};
use conviction_engine::demo::{seeded_rng, synthetic_prices};
use conviction_engine::output::{render_json, render_text, rows};
use conviction_engine::strategy::{SignalGenerator, SignalSummary};

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display("configuration error")]
    Config,
    #[display("signal generation error")]
    Signals,
    #[display("output error")]
    Output,
}

#[derive(Parser)]
#[command(
    name = "conviction-engine",
    about = "Moving average and RSI signal demo over synthetic prices"
)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the synthetic price source (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of synthetic prices to generate (overrides config)
    #[arg(long)]
    length: Option<usize>,

    /// Output format: text or json (overrides config)
    #[arg(long)]
    output: Option<String>,
}

fn main() {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Report<AppError>> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => config::load(Path::new(path)).change_context(AppError::Config)?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    config::validate(&config).change_context(AppError::Config)?;

    init_tracing(&config);

    let params = config
        .signals
        .to_params()
        .change_context(AppError::Config)?;
    let generator = SignalGenerator::new(&params).change_context(AppError::Signals)?;

    let (mut rng, seed) = seeded_rng(config.demo.seed);
    info!(
        seed,
        length = config.demo.length,
        base_price = config.demo.base_price,
        jitter = config.demo.jitter,
        "generating synthetic prices"
    );
    let prices = synthetic_prices(
        &mut rng,
        config.demo.length,
        config.demo.base_price,
        config.demo.jitter,
    );

    info!(
        short_period = params.short_period,
        long_period = params.long_period,
        rsi_period = params.rsi_period,
        oversold = params.thresholds.oversold,
        overbought = params.thresholds.overbought,
        mode = ?params.mode,
        warmup = generator.warmup_len(),
        "computing signals"
    );
    let signals = generator
        .generate(&prices)
        .change_context(AppError::Signals)?;

    let summary = SignalSummary::from_signals(&signals);
    info!(
        buy = summary.buy,
        sell = summary.sell,
        hold = summary.hold,
        "signal summary"
    );

    let displayed = rows(&prices, &signals, config.demo.display_count);
    let rendered = match config.demo.output.as_str() {
        "json" => render_json(&displayed).change_context(AppError::Output)?,
        _ => render_text(&displayed),
    };
    println!("{rendered}");

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        config.demo.seed = Some(seed);
    }
    if let Some(length) = cli.length {
        config.demo.length = length;
    }
    if let Some(output) = &cli.output {
        config.demo.output = output.clone();
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(&config.general.log_level);
    match config.general.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
