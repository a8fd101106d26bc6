//! MonChantier dashboard report.
//!
//! Reads a JSON data snapshot, runs one aggregation pass and prints the
//! display view as JSON on stdout. Logs go to stderr.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monchantier_core::currency::ExchangeRateTable;
use monchantier_core::dashboard::{DashboardCache, DashboardService, DashboardView};
use monchantier_core::filter::CrossFilter;
use monchantier_core::records::DashboardSnapshot;
use monchantier_shared::types::CurrencyCode;
use monchantier_shared::{AppConfig, AppError, AppResult};

use cli::Args;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monchantier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            let kind = err
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(error_code = kind, "{err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = args.filter()?;

    let config = AppConfig::load().map_err(AppError::from)?;

    let path = args
        .snapshot
        .clone()
        .or_else(|| config.report.snapshot_path.clone())
        .ok_or_else(|| AppError::Validation("No snapshot given and report.snapshot_path unset".into()))?;
    let snapshot = load_snapshot(&path, &config)?;
    info!(
        path = %path,
        version = snapshot.version,
        records = snapshot.records().len(),
        "Snapshot loaded"
    );

    let cross = CrossFilter::new();
    let summary = if args.no_cache {
        DashboardService::summarize(&snapshot, &filter, &cross)
    } else {
        DashboardCache::from_config(&config.cache).summarize_cached(&snapshot, &filter, &cross)
    }
    .map_err(AppError::from)?;

    let currency = match args.currency {
        Some(code) => code,
        None => config.currency.display_currency()?,
    };
    ensure_display_rate(&snapshot.rates, &currency)?;
    let view = DashboardView::render(
        &summary,
        &currency,
        &snapshot.rates,
        config.currency.decimal_places,
    )
    .map_err(AppError::from)?;

    let json = serde_json::to_string_pretty(&view).context("Failed to encode report")?;
    println!("{json}");

    Ok(())
}

/// Rejects a display currency the snapshot has no rate for, naming the ones
/// it does have.
fn ensure_display_rate(rates: &ExchangeRateTable, currency: &CurrencyCode) -> AppResult<()> {
    if rates.contains(currency) {
        return Ok(());
    }
    let known: Vec<&str> = rates.currencies().map(CurrencyCode::as_str).collect();
    Err(AppError::Validation(format!(
        "No exchange rate for display currency {currency}; known: {}",
        known.join(", ")
    )))
}

/// Reads a snapshot file. A snapshot without a `rates` object uses the
/// configured rate table.
fn load_snapshot(path: &str, config: &AppConfig) -> AppResult<DashboardSnapshot> {
    let raw = std::fs::read_to_string(path)?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::Validation(format!("{path}: {e}")))?;

    if let Some(object) = value.as_object_mut()
        && !object.contains_key("rates")
    {
        let rates = ExchangeRateTable::from_config(&config.currency)?;
        let rates = serde_json::to_value(rates).map_err(|e| AppError::Internal(e.to_string()))?;
        object.insert("rates".to_string(), rates);
    }

    serde_json::from_value(value).map_err(|e| AppError::Validation(format!("{path}: {e}")))
}
