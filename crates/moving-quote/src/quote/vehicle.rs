use serde::{Deserialize, Serialize};

use super::domain::{LoadTotals, MoveType};
use super::tables::{ReferenceTables, VehicleSpec};

pub const OVERFLOW_MARKER: &str = " (over capacity)";

/// Advisory vehicle choice for an aggregate load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleRecommendation {
    /// Nothing selected, so no vehicle is needed.
    NotNeeded,
    /// Smallest priced vehicle whose usable capacity and weight limit cover the load.
    Fits {
        vehicle: String,
        remaining_space_percent: f64,
    },
    /// No vehicle covers the load; the largest one is reported.
    Overflow { vehicle: String },
    /// The move type has no priced vehicles.
    NoCandidates,
}

impl VehicleRecommendation {
    /// Plain vehicle name, suitable for selecting it on a request.
    pub fn vehicle(&self) -> Option<&str> {
        match self {
            Self::Fits { vehicle, .. } | Self::Overflow { vehicle } => Some(vehicle),
            Self::NotNeeded | Self::NoCandidates => None,
        }
    }

    /// Display label; overflowing vehicles carry [`OVERFLOW_MARKER`].
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Fits { vehicle, .. } => Some(vehicle.clone()),
            Self::Overflow { vehicle } => Some(format!("{vehicle}{OVERFLOW_MARKER}")),
            Self::NotNeeded | Self::NoCandidates => None,
        }
    }

    pub fn remaining_space_percent(&self) -> f64 {
        match self {
            Self::Fits {
                remaining_space_percent,
                ..
            } => *remaining_space_percent,
            _ => 0.0,
        }
    }
}

/// Pick the smallest vehicle priced for `move_type` that can carry `load`.
pub fn recommend_vehicle(
    load: &LoadTotals,
    move_type: MoveType,
    tables: &ReferenceTables,
) -> VehicleRecommendation {
    let Some(prices) = tables.vehicle_prices.get(&move_type) else {
        return VehicleRecommendation::NoCandidates;
    };

    let mut candidates: Vec<(&str, &VehicleSpec)> = prices
        .keys()
        .filter_map(|name| {
            tables
                .vehicles
                .get(name)
                .map(|spec| (name.as_str(), spec))
        })
        .collect();
    if candidates.is_empty() {
        return VehicleRecommendation::NoCandidates;
    }
    if load.is_empty() {
        return VehicleRecommendation::NotNeeded;
    }

    candidates.sort_by(|(_, a), (_, b)| a.capacity_cbm.total_cmp(&b.capacity_cbm));

    for (name, spec) in &candidates {
        let usable_capacity = spec.capacity_cbm * tables.loading_efficiency;
        if load.total_volume <= usable_capacity && load.total_weight <= spec.weight_capacity_kg {
            let remaining = if usable_capacity > 0.0 {
                (1.0 - load.total_volume / usable_capacity) * 100.0
            } else {
                0.0
            };
            return VehicleRecommendation::Fits {
                vehicle: name.to_string(),
                remaining_space_percent: (remaining * 10.0).round() / 10.0,
            };
        }
    }

    let (largest, _) = candidates[candidates.len() - 1];
    VehicleRecommendation::Overflow {
        vehicle: largest.to_string(),
    }
}
