use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::super::domain::MoveType;

/// Unit volume (CBM) and weight (kg) of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub volume_cbm: f64,
    pub weight_kg: f64,
}

/// Item name to unit volume/weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog(BTreeMap<String, ItemSpec>);

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: impl Into<String>, spec: ItemSpec) {
        self.0.insert(item.into(), spec);
    }

    pub fn get(&self, item: &str) -> Option<&ItemSpec> {
        self.0.get(item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &ItemSpec)> {
        self.0.iter()
    }

    /// Import a catalog exported as `item,volume_cbm,weight_kg`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = Self::new();

        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            if row.item.is_empty() {
                continue;
            }
            catalog.insert(
                row.item,
                ItemSpec {
                    volume_cbm: row.volume_cbm,
                    weight_kg: row.weight_kg,
                },
            );
        }

        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    item: String,
    volume_cbm: f64,
    weight_kg: f64,
}

/// One labeled group of items on the quoting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub label: String,
    pub items: Vec<String>,
    /// Waste bookkeeping only; excluded from load totals and the general listing.
    #[serde(default)]
    pub disposal_only: bool,
}

/// Ordered item sections per move type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemDefinitions(BTreeMap<MoveType, Vec<SectionDefinition>>);

impl ItemDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, move_type: MoveType, sections: Vec<SectionDefinition>) {
        self.0.insert(move_type, sections);
    }

    pub fn sections(&self, move_type: MoveType) -> &[SectionDefinition] {
        self.0.get(&move_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn listed_sections(&self, move_type: MoveType) -> impl Iterator<Item = &SectionDefinition> {
        self.sections(move_type)
            .iter()
            .filter(|section| !section.disposal_only)
    }

    /// Sections in order with items deduplicated; the first section listing an item keeps it.
    pub fn listed_items(&self, move_type: MoveType) -> Vec<(&str, Vec<&str>)> {
        let mut seen = std::collections::HashSet::new();
        self.listed_sections(move_type)
            .map(|section| {
                let items = section
                    .items
                    .iter()
                    .map(String::as_str)
                    .filter(|item| seen.insert(*item))
                    .collect();
                (section.label.as_str(), items)
            })
            .collect()
    }

    pub fn disposal_items(&self, move_type: MoveType) -> Vec<&str> {
        self.sections(move_type)
            .iter()
            .filter(|section| section.disposal_only)
            .flat_map(|section| section.items.iter().map(String::as_str))
            .collect()
    }
}
