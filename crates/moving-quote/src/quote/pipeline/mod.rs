mod personnel;
mod rules;

use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{CostLine, LoadTotals, MoveType, QuoteRequest, QuoteResult};
use super::inventory::aggregate_load;
use super::tables::ReferenceTables;
use super::vehicle::{recommend_vehicle, VehicleRecommendation};
use rules::RuleLine;

/// Stateless quoting engine over a shared, read-only price book.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    tables: Arc<ReferenceTables>,
}

impl QuoteEngine {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn aggregate(&self, request: &QuoteRequest) -> LoadTotals {
        aggregate_load(request, &self.tables)
    }

    pub fn recommend(&self, load: &LoadTotals, move_type: MoveType) -> VehicleRecommendation {
        recommend_vehicle(load, move_type, &self.tables)
    }

    /// Price a request. Line order is fixed; only a missing vehicle or base fare aborts.
    pub fn quote(&self, request: &QuoteRequest) -> QuoteResult {
        let tables = &*self.tables;

        let Some(vehicle) = request.selected_vehicle() else {
            warn!(move_type = request.move_type.slug(), "quote requested without a vehicle");
            return QuoteResult::aborted("no vehicle selected");
        };

        let Some(base) = tables.vehicle_price(request.move_type, vehicle) else {
            warn!(
                move_type = request.move_type.slug(),
                vehicle, "no base fare for vehicle"
            );
            return QuoteResult::aborted(format!(
                "no base fare for {vehicle} on a {}",
                request.move_type.label().to_lowercase()
            ));
        };

        let mut lines = vec![rules::base_fare_line(request, vehicle, base)];
        lines.extend(rules::ladder_lines(request, vehicle, tables));
        lines.extend(rules::sky_lift_lines(request, tables));

        let base_female_removed = personnel::female_exclusion_applies(request, base);
        if base_female_removed {
            lines.push(rules::female_exclusion_line(base, tables));
        }

        lines.extend(rules::added_personnel_line(request, tables));
        lines.extend(rules::manual_adjustment_line(request));
        lines.extend(rules::storage_line(request, tables));
        lines.extend(rules::long_distance_line(request, tables));
        lines.extend(rules::waste_line(request, tables));
        lines.extend(rules::date_surcharge_line(request, tables));
        lines.extend(rules::regional_ladder_line(request));
        lines.extend(rules::via_point_line(request));

        let personnel = personnel::crew_for(base, request, base_female_removed);
        let lines = into_cost_lines(lines);
        let total_cost = total_of(&lines);

        debug!(
            move_type = request.move_type.slug(),
            vehicle,
            total_cost,
            line_count = lines.len(),
            "quote computed"
        );

        QuoteResult {
            total_cost,
            lines,
            personnel: Some(personnel),
        }
    }
}

fn into_cost_lines(lines: Vec<RuleLine>) -> Vec<CostLine> {
    lines
        .into_iter()
        .map(|RuleLine { label, outcome }| {
            if !outcome.ok {
                warn!(%label, note = %outcome.note, "quote line could not be priced");
            }
            CostLine {
                label,
                amount: outcome.amount,
                note: outcome.note,
            }
        })
        .collect()
}

/// Sum of all line amounts, floored at zero and capped at `u64::MAX`.
pub(crate) fn total_of(lines: &[CostLine]) -> u64 {
    let sum: i128 = lines.iter().map(|line| i128::from(line.amount)).sum();
    u64::try_from(sum.max(0)).unwrap_or(u64::MAX)
}
