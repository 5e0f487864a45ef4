use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ffxiv_weather::{
    ForecastEntry, Forecaster, ForecasterConfig, Language, StoreLoader, ZoneRef,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Deterministic zone weather forecasts")]
struct Cli {
    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the reference tables
    #[arg(long)]
    store: Option<PathBuf>,

    /// Zone (territory) id
    #[arg(long, conflicts_with = "zone")]
    zone_id: Option<u32>,

    /// Zone name, matched case-insensitively
    #[arg(long)]
    zone: Option<String>,

    /// Language for zone names and output
    #[arg(long, value_enum)]
    lang: Option<Language>,

    /// Number of forecast entries
    #[arg(long)]
    count: Option<usize>,

    /// Seconds between entries
    #[arg(long)]
    step: Option<i64>,

    /// Seconds to shift the starting instant by
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ForecasterConfig::from_yaml(path)?,
        None => ForecasterConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store_dir = cli.store.clone().unwrap_or_else(|| config.store_dir.clone());
    let data = StoreLoader::new(&store_dir).load()?;
    info!(store = %store_dir.display(), "Reference tables loaded");
    let forecaster = Forecaster::new(Arc::new(data));

    let language = cli.lang.unwrap_or(config.language);
    let zone_ref = ZoneRef::from_selectors(cli.zone_id, cli.zone.as_deref(), Some(language))?;

    let mut options = config.forecast.options();
    if let Some(count) = cli.count {
        options.count = count;
    }
    if let Some(step) = cli.step {
        options.step_seconds = step;
    }
    if let Some(offset) = cli.offset {
        options.offset_seconds = offset;
    }

    let zone = forecaster.resolve(zone_ref)?;
    let entries = forecaster.forecast(zone_ref, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Weather for {}:", zone.names.get_or_english(language));
        print_table(&entries, language);
    }
    Ok(())
}

fn print_table(entries: &[ForecastEntry<'_>], language: Language) {
    let now = Utc::now();
    println!("| {:<24} | {:>8} |", "Weather", "Time");
    println!("+-{}-+-{}-+", "-".repeat(24), "-".repeat(8));
    for entry in entries {
        let minutes = ((entry.start_time - now).num_seconds() as f64 / 60.0).round() as i64;
        println!(
            "| {:<24} | {:>7}m |",
            entry.weather.names.get_or_english(language),
            minutes
        );
    }
}
