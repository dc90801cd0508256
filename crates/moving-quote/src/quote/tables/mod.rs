//! Immutable price book consumed by every quote computation.

mod catalog;
mod standard;

pub use catalog::{ItemCatalog, ItemDefinitions, ItemSpec, SectionDefinition};

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{DateOption, MoveType};

/// Nominal volume and weight limits of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub capacity_cbm: f64,
    pub weight_capacity_kg: f64,
}

impl VehicleSpec {
    pub fn tonnage(&self) -> f64 {
        self.weight_capacity_kg / 1000.0
    }
}

/// Base fare and bundled crew for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePrice {
    pub price: i64,
    pub men: u32,
    pub women: u32,
}

/// Inclusive floor interval mapped to a ladder price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRange {
    pub min_floor: i32,
    pub max_floor: i32,
    pub label: String,
}

impl FloorRange {
    pub fn contains(&self, floor: i32) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonnageThreshold {
    pub min_tons: f64,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LadderTables {
    /// Evaluated in order; the first matching range wins.
    pub floor_ranges: Vec<FloorRange>,
    /// Kept sorted by descending `min_tons`.
    pub tonnage_thresholds: Vec<TonnageThreshold>,
    #[serde(default)]
    pub default_tonnage_class: Option<String>,
    /// Floor-range label to tonnage class to price.
    pub prices: BTreeMap<String, BTreeMap<String, i64>>,
}

impl LadderTables {
    pub fn floor_range(&self, floor: i32) -> Option<&FloorRange> {
        self.floor_ranges.iter().find(|range| range.contains(floor))
    }

    pub fn tonnage_class(&self, tonnage: f64) -> Option<&str> {
        self.tonnage_thresholds
            .iter()
            .find(|threshold| threshold.min_tons <= tonnage)
            .map(|threshold| threshold.class.as_str())
    }

    pub fn price(&self, range_label: &str, class: &str) -> Option<i64> {
        self.prices
            .get(range_label)
            .and_then(|row| row.get(class))
            .copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyLiftRates {
    pub base_price: i64,
    pub extra_hour_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDayPrice {
    pub option: DateOption,
    pub label: String,
    pub surcharge: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRates {
    pub default_type: String,
    pub daily_rates: BTreeMap<String, i64>,
    pub electricity_per_day: i64,
}

/// Every static table the engine reads. Constructed once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub items: ItemCatalog,
    pub item_definitions: ItemDefinitions,
    pub vehicles: BTreeMap<String, VehicleSpec>,
    pub vehicle_prices: BTreeMap<MoveType, BTreeMap<String, VehiclePrice>>,
    pub ladder: LadderTables,
    pub sky_lift: SkyLiftRates,
    /// Evaluated in order when combining date surcharges.
    pub special_days: Vec<SpecialDayPrice>,
    pub storage: StorageRates,
    pub long_distance: BTreeMap<String, i64>,
    pub waste_rate_per_ton: i64,
    pub additional_person_cost: i64,
    /// Share of nominal vehicle volume that is loadable in practice.
    pub loading_efficiency: f64,
}

impl ReferenceTables {
    pub fn standard() -> Self {
        standard::price_book()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TablesError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TablesError> {
        let tables: Self = serde_json::from_reader(reader)?;
        tables.validated()
    }

    /// Replace the item catalog, e.g. with one imported from CSV. The result is re-validated.
    pub fn with_catalog(mut self, items: ItemCatalog) -> Result<Self, TablesError> {
        self.items = items;
        self.validated()
    }

    pub fn vehicle_price(&self, move_type: MoveType, vehicle: &str) -> Option<&VehiclePrice> {
        self.vehicle_prices
            .get(&move_type)
            .and_then(|prices| prices.get(vehicle))
    }

    /// Check structural rules and normalize ordering of the tonnage thresholds.
    pub fn validated(mut self) -> Result<Self, TablesError> {
        if !(self.loading_efficiency > 0.0 && self.loading_efficiency <= 1.0) {
            return Err(TablesError::LoadingEfficiency(self.loading_efficiency));
        }

        for range in &self.ladder.floor_ranges {
            if range.min_floor > range.max_floor {
                return Err(TablesError::InvertedFloorRange(range.label.clone()));
            }
        }

        for (index, range) in self.ladder.floor_ranges.iter().enumerate() {
            if let Some(other) = self.ladder.floor_ranges[index + 1..].iter().find(|other| {
                range.min_floor <= other.max_floor && other.min_floor <= range.max_floor
            }) {
                return Err(TablesError::OverlappingFloorRanges {
                    first: range.label.clone(),
                    second: other.label.clone(),
                });
            }
        }

        if let Some((item, _)) = self.items.iter().find(|(_, spec)| {
            !(spec.volume_cbm.is_finite() && spec.weight_kg.is_finite())
                || spec.volume_cbm < 0.0
                || spec.weight_kg < 0.0
        }) {
            return Err(TablesError::InvalidItem(item.clone()));
        }

        if self
            .ladder
            .tonnage_thresholds
            .iter()
            .any(|threshold| !threshold.min_tons.is_finite())
        {
            return Err(TablesError::InvalidTonnageThreshold);
        }
        self.ladder
            .tonnage_thresholds
            .sort_by(|a, b| b.min_tons.total_cmp(&a.min_tons));

        Ok(self)
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Failures while loading a price book. Raised at load time, never during a quote.
#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to read price tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid price table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid item catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("loading efficiency must be within (0, 1], found {0}")]
    LoadingEfficiency(f64),
    #[error("floor range '{0}' has min_floor greater than max_floor")]
    InvertedFloorRange(String),
    #[error("floor ranges '{first}' and '{second}' overlap")]
    OverlappingFloorRanges { first: String, second: String },
    #[error("item '{0}' has a negative or non-finite volume/weight")]
    InvalidItem(String),
    #[error("tonnage thresholds must be finite numbers")]
    InvalidTonnageThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_tables_pass_validation() {
        let tables = ReferenceTables::standard();
        let validated = tables.clone().validated().expect("standard tables valid");
        assert_eq!(validated, tables);
    }

    #[test]
    fn json_round_trip_preserves_price_book() {
        let tables = ReferenceTables::standard();
        let json = serde_json::to_vec(&tables).expect("tables serialize");
        let loaded = ReferenceTables::from_reader(Cursor::new(json)).expect("tables load");
        assert_eq!(loaded, tables);
    }

    #[test]
    fn rejects_overlapping_floor_ranges() {
        let mut tables = ReferenceTables::standard();
        tables.ladder.floor_ranges = vec![
            FloorRange {
                min_floor: 2,
                max_floor: 5,
                label: "2-5".to_string(),
            },
            FloorRange {
                min_floor: 5,
                max_floor: 8,
                label: "5-8".to_string(),
            },
        ];
        match tables.validated() {
            Err(TablesError::OverlappingFloorRanges { first, second }) => {
                assert_eq!(first, "2-5");
                assert_eq!(second, "5-8");
            }
            other => panic!("expected overlap error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_loading_efficiency() {
        let mut tables = ReferenceTables::standard();
        tables.loading_efficiency = 1.5;
        assert!(matches!(
            tables.validated(),
            Err(TablesError::LoadingEfficiency(_))
        ));
    }

    #[test]
    fn sorts_tonnage_thresholds_descending() {
        let mut tables = ReferenceTables::standard();
        tables.ladder.tonnage_thresholds.reverse();
        let tables = tables.validated().expect("tables valid");
        let mins: Vec<f64> = tables
            .ladder
            .tonnage_thresholds
            .iter()
            .map(|threshold| threshold.min_tons)
            .collect();
        let mut sorted = mins.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(mins, sorted);
    }

    #[test]
    fn replacement_catalog_is_validated() {
        let csv = "item,volume_cbm,weight_kg\nbox,0.1,12\ncrate,-0.5,20\n";
        let catalog = ItemCatalog::from_csv_reader(Cursor::new(csv)).expect("catalog parses");
        match ReferenceTables::standard().with_catalog(catalog) {
            Err(TablesError::InvalidItem(item)) => assert_eq!(item, "crate"),
            other => panic!("expected invalid item, got {other:?}"),
        }

        let mut catalog = ItemCatalog::new();
        catalog.insert(
            "box",
            ItemSpec {
                volume_cbm: f64::NAN,
                weight_kg: 12.0,
            },
        );
        assert!(matches!(
            ReferenceTables::standard().with_catalog(catalog),
            Err(TablesError::InvalidItem(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ReferenceTables::from_reader(Cursor::new("{\"items\": 3}"))
            .expect_err("bad tables rejected");
        assert!(matches!(err, TablesError::Json(_)));
    }
}
