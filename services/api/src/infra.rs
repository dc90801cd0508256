use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use moving_quote::config::PricingConfig;
use moving_quote::error::AppError;
use moving_quote::quote::tables::ItemCatalog;
use moving_quote::quote::{QuoteRequest, ReferenceTables, TablesError};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the price book: configured JSON tables (or the built-in ones), then an optional CSV
/// catalog replacing the item volumes and weights.
pub(crate) fn load_tables(pricing: &PricingConfig) -> Result<ReferenceTables, AppError> {
    let tables = match &pricing.tables_path {
        Some(path) => ReferenceTables::from_path(path)?,
        None => ReferenceTables::standard(),
    };

    let tables = match &pricing.catalog_csv {
        Some(path) => tables.with_catalog(load_catalog(path)?)?,
        None => tables,
    };

    Ok(tables)
}

fn load_catalog(path: &Path) -> Result<ItemCatalog, TablesError> {
    let file = std::fs::File::open(path)?;
    Ok(ItemCatalog::from_csv_reader(file)?)
}

pub(crate) fn read_request(path: &Path) -> Result<QuoteRequest, AppError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
