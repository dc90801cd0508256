//! Moving-job quote computation: inventory load, vehicle fit, and the ordered cost
//! pipeline that turns a request into an itemized breakdown.

pub mod domain;
pub mod floor;
pub mod inventory;
pub mod ladder;
mod lenient;
mod pipeline;
pub mod router;
pub mod tables;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use domain::{
    format_amount, format_total, AccessMethod, CostLine, DateFlags, DateOption, ItemKey,
    ItemQuantities, ItemSelection, LoadTotals, MoveType, PersonnelInfo, QuoteRequest,
    QuoteResult, Side, SiteAccess, StorageRequest,
};
pub use floor::parse_floor;
pub use ladder::{resolve_ladder_cost, LadderQuote, LadderResolution};
pub use pipeline::QuoteEngine;
pub use router::quote_router;
pub use tables::{ReferenceTables, TablesError};
pub use vehicle::{recommend_vehicle, VehicleRecommendation, OVERFLOW_MARKER};
