use std::collections::HashSet;

use super::domain::{ItemKey, LoadTotals, QuoteRequest};
use super::tables::ReferenceTables;

/// Sum unit volume and weight over the selected quantities of the request's move type.
///
/// Disposal-only sections are skipped and an item listed in several sections is counted
/// once, using the quantity selected in the first section that lists it.
pub fn aggregate_load(request: &QuoteRequest, tables: &ReferenceTables) -> LoadTotals {
    if request.items.is_empty() {
        return LoadTotals::default();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut total_volume = 0.0;
    let mut total_weight = 0.0;

    for section in tables.item_definitions.listed_sections(request.move_type) {
        for item in &section.items {
            let Some(spec) = tables.items.get(item) else {
                continue;
            };
            if !seen.insert(item.as_str()) {
                continue;
            }

            let key = ItemKey::new(request.move_type, section.label.as_str(), item.as_str());
            let quantity = f64::from(request.items.quantity(&key));
            total_volume += spec.volume_cbm * quantity;
            total_weight += spec.weight_kg * quantity;
        }
    }

    LoadTotals {
        total_volume: round2(total_volume),
        total_weight: round2(total_weight),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
