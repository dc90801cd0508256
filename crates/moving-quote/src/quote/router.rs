use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{MoveType, QuoteRequest, QuoteResult};
use super::pipeline::QuoteEngine;
use super::vehicle::VehicleRecommendation;

/// Router exposing the engine over JSON.
pub fn quote_router(engine: Arc<QuoteEngine>) -> Router {
    Router::new()
        .route("/api/v1/quotes", post(quote_handler))
        .route("/api/v1/quotes/vehicle", post(vehicle_handler))
        .route(
            "/api/v1/reference/:move_type/items",
            get(item_listing_handler),
        )
        .with_state(engine)
}

#[derive(Debug, Serialize)]
pub struct VehicleAdvice {
    pub total_volume: f64,
    pub total_weight: f64,
    pub label: Option<String>,
    pub remaining_space_percent: f64,
    pub recommendation: VehicleRecommendation,
}

#[derive(Debug, Serialize)]
pub struct ItemSectionView<'a> {
    pub label: &'a str,
    pub items: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ItemListingView<'a> {
    pub move_type: MoveType,
    pub sections: Vec<ItemSectionView<'a>>,
    pub disposal_items: Vec<&'a str>,
}

pub(crate) async fn quote_handler(
    State(engine): State<Arc<QuoteEngine>>,
    Json(request): Json<QuoteRequest>,
) -> Json<QuoteResult> {
    Json(engine.quote(&request))
}

pub(crate) async fn vehicle_handler(
    State(engine): State<Arc<QuoteEngine>>,
    Json(request): Json<QuoteRequest>,
) -> Json<VehicleAdvice> {
    let load = engine.aggregate(&request);
    let recommendation = engine.recommend(&load, request.move_type);
    Json(VehicleAdvice {
        total_volume: load.total_volume,
        total_weight: load.total_weight,
        label: recommendation.label(),
        remaining_space_percent: recommendation.remaining_space_percent(),
        recommendation,
    })
}

pub(crate) async fn item_listing_handler(
    State(engine): State<Arc<QuoteEngine>>,
    Path(move_type): Path<String>,
) -> Response {
    let Some(move_type) = MoveType::from_slug(&move_type) else {
        let payload = json!({
            "error": format!("unknown move type '{move_type}'"),
        });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let definitions = &engine.tables().item_definitions;
    let view = ItemListingView {
        move_type,
        sections: definitions
            .listed_items(move_type)
            .into_iter()
            .map(|(label, items)| ItemSectionView { label, items })
            .collect(),
        disposal_items: definitions.disposal_items(move_type),
    };
    (StatusCode::OK, Json(view)).into_response()
}
