use serde::{Deserialize, Serialize};

use super::tables::ReferenceTables;

/// How a ladder-truck price was (or was not) resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderResolution {
    GroundLevel,
    NoFloorRange,
    NoTonnageBasis,
    Priced,
    DefaultClassFallback,
    NoPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderQuote {
    pub cost: i64,
    pub note: String,
    pub resolution: LadderResolution,
}

impl LadderQuote {
    fn free(resolution: LadderResolution, note: impl Into<String>) -> Self {
        Self {
            cost: 0,
            note: note.into(),
            resolution,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(
            self.resolution,
            LadderResolution::Priced | LadderResolution::DefaultClassFallback
        )
    }
}

/// Resolve the ladder-truck price for a floor and vehicle.
///
/// A zero price is treated the same as a missing one: both trigger the retry with the
/// default tonnage class.
pub fn resolve_ladder_cost(floor: i32, vehicle: &str, tables: &ReferenceTables) -> LadderQuote {
    if floor < 2 {
        return LadderQuote::free(
            LadderResolution::GroundLevel,
            "ground level, no ladder needed",
        );
    }

    let ladder = &tables.ladder;
    let Some(range) = ladder.floor_range(floor) else {
        return LadderQuote::free(
            LadderResolution::NoFloorRange,
            format!("no price for floor {floor}"),
        );
    };

    let default_class = ladder.default_tonnage_class.as_deref();
    let class = tables
        .vehicles
        .get(vehicle)
        .and_then(|spec| ladder.tonnage_class(spec.tonnage()))
        .or(default_class);
    let Some(class) = class else {
        return LadderQuote::free(
            LadderResolution::NoTonnageBasis,
            format!("no tonnage basis for vehicle {vehicle}"),
        );
    };

    if let Some(price) = ladder.price(&range.label, class).filter(|price| *price > 0) {
        return LadderQuote {
            cost: price,
            note: format!("floor {floor} ({} floors), {class} class", range.label),
            resolution: LadderResolution::Priced,
        };
    }

    if let Some(fallback) = default_class.filter(|fallback| *fallback != class) {
        if let Some(price) = ladder
            .price(&range.label, fallback)
            .filter(|price| *price > 0)
        {
            return LadderQuote {
                cost: price,
                note: format!(
                    "floor {floor} ({} floors), no {class} price, charged at default {fallback} class",
                    range.label
                ),
                resolution: LadderResolution::DefaultClassFallback,
            };
        }
    }

    LadderQuote::free(
        LadderResolution::NoPrice,
        format!(
            "no price for this combination ({} floors, {class} class)",
            range.label
        ),
    )
}
