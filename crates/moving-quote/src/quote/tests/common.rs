use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::quote::domain::{AccessMethod, MoveType, QuoteRequest, SiteAccess};
use crate::quote::pipeline::QuoteEngine;
use crate::quote::tables::{ReferenceTables, VehiclePrice};

pub(super) const VEHICLE: &str = "2.5-ton";

/// Standard price book with the home 2.5-ton fare set to 300,000 for two men and one woman,
/// container storage at 10,000 per day, and the 4-6 floor ladder at 50,000.
pub(super) fn scenario_tables() -> ReferenceTables {
    let mut tables = ReferenceTables::standard();
    tables
        .vehicle_prices
        .get_mut(&MoveType::Home)
        .expect("home prices present")
        .insert(
            VEHICLE.to_string(),
            VehiclePrice {
                price: 300_000,
                men: 2,
                women: 1,
            },
        );
    tables
        .storage
        .daily_rates
        .insert("container".to_string(), 10_000);
    tables
        .ladder
        .prices
        .get_mut("4-6")
        .expect("4-6 row present")
        .insert(VEHICLE.to_string(), 50_000);
    tables
}

pub(super) fn engine() -> QuoteEngine {
    QuoteEngine::new(Arc::new(scenario_tables()))
}

pub(super) fn home_request() -> QuoteRequest {
    QuoteRequest {
        move_type: MoveType::Home,
        vehicle: Some(VEHICLE.to_string()),
        ..QuoteRequest::default()
    }
}

pub(super) fn ladder_site(floor: &str) -> SiteAccess {
    SiteAccess {
        floor: floor.to_string(),
        method: AccessMethod::LadderTruck,
        sky_lift_hours: 0,
    }
}

pub(super) fn labels(result: &crate::quote::QuoteResult) -> Vec<&str> {
    result.lines.iter().map(|line| line.label.as_str()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub(super) fn assert_ok(response: &Response) {
    assert_eq!(response.status(), StatusCode::OK);
}
