use crate::cli::ServeArgs;
use crate::infra::{load_tables, AppState};
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use moving_quote::config::AppConfig;
use moving_quote::error::AppError;
use moving_quote::quote::QuoteEngine;
use moving_quote::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let tables = load_tables(&config.pricing)?;
    info!(
        vehicles = tables.vehicles.len(),
        items = tables.items.len(),
        custom_tables = config.pricing.tables_path.is_some(),
        "price book loaded"
    );
    let engine = Arc::new(QuoteEngine::new(Arc::new(tables)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_quote_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "moving quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
