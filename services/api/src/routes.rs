use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use moving_quote::quote::{quote_router, QuoteEngine};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_quote_routes(engine: Arc<QuoteEngine>) -> axum::Router {
    quote_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use moving_quote::quote::ReferenceTables;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        use tower::ServiceExt;

        let request = axum::http::Request::get(uri)
            .body(axum::body::Body::empty())
            .expect("request builds");
        router
            .oneshot(request)
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn quote_routes_are_mounted_next_to_probes() {
        let engine = Arc::new(QuoteEngine::new(Arc::new(ReferenceTables::standard())));
        let router = with_quote_routes(engine);
        assert_eq!(status_of(router.clone(), "/health").await, StatusCode::OK);
        assert_eq!(
            status_of(router.clone(), "/api/v1/reference/office/items").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(router, "/api/v1/reference/castle/items").await,
            StatusCode::NOT_FOUND
        );
    }
}
