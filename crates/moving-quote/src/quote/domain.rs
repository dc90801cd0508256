use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Move category. Price tables and item definitions are keyed by it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    #[default]
    Home,
    Office,
    Small,
}

impl MoveType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Home, Self::Office, Self::Small]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Office => "office",
            Self::Small => "small",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home move",
            Self::Office => "Office move",
            Self::Small => "Small move",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(value))
    }
}

/// Composite key of a quantity selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub move_type: MoveType,
    pub section: String,
    pub item: String,
}

impl ItemKey {
    pub fn new(move_type: MoveType, section: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            move_type,
            section: section.into(),
            item: item.into(),
        }
    }
}

/// Wire form of a single quantity selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelection {
    pub move_type: MoveType,
    pub section: String,
    pub item: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
}

/// Quantity selections keyed by `(move type, section, item)`.
///
/// Serialized as a list of [`ItemSelection`] entries; a later duplicate key overrides an
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ItemSelection>", into = "Vec<ItemSelection>")]
pub struct ItemQuantities(BTreeMap<ItemKey, u32>);

impl ItemQuantities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: ItemKey, quantity: u32) {
        self.0.insert(key, quantity);
    }

    pub fn with(mut self, key: ItemKey, quantity: u32) -> Self {
        self.set(key, quantity);
        self
    }

    pub fn quantity(&self, key: &ItemKey) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|quantity| *quantity == 0)
    }
}

impl From<Vec<ItemSelection>> for ItemQuantities {
    fn from(selections: Vec<ItemSelection>) -> Self {
        let map = selections
            .into_iter()
            .map(|selection| {
                (
                    ItemKey::new(selection.move_type, selection.section, selection.item),
                    selection.quantity,
                )
            })
            .collect();
        Self(map)
    }
}

impl From<ItemQuantities> for Vec<ItemSelection> {
    fn from(quantities: ItemQuantities) -> Self {
        quantities
            .0
            .into_iter()
            .map(|(key, quantity)| ItemSelection {
                move_type: key.move_type,
                section: key.section,
                item: key.item,
                quantity,
            })
            .collect()
    }
}

/// How items leave or reach a floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMethod {
    #[default]
    Elevator,
    Stairs,
    LadderTruck,
    SkyLift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Origin,
    Destination,
}

impl Side {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }
}

/// Floor and access details for one end of the move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteAccess {
    #[serde(default, deserialize_with = "lenient::text")]
    pub floor: String,
    #[serde(default)]
    pub method: AccessMethod,
    /// Sky-lift rental hours. Values below one are billed as one hour.
    #[serde(default, deserialize_with = "lenient::count")]
    pub sky_lift_hours: u32,
}

/// Calendar options that carry a surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOption {
    AuspiciousDay,
    MonthEnd,
    Weekend,
    Holiday,
    PeakSeason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFlags {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub auspicious_day: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub month_end: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub weekend: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub holiday: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub peak_season: bool,
}

impl DateFlags {
    /// Flags derivable from the calendar alone: weekends and the last two days of a month.
    pub fn from_move_date(date: NaiveDate) -> Self {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let month_end = date
            .checked_add_days(chrono::Days::new(2))
            .map(|later| later.month() != date.month())
            .unwrap_or(true);

        Self {
            month_end,
            weekend,
            ..Self::default()
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            auspicious_day: self.auspicious_day || other.auspicious_day,
            month_end: self.month_end || other.month_end,
            weekend: self.weekend || other.weekend,
            holiday: self.holiday || other.holiday,
            peak_season: self.peak_season || other.peak_season,
        }
    }

    pub fn is_set(&self, option: DateOption) -> bool {
        match option {
            DateOption::AuspiciousDay => self.auspicious_day,
            DateOption::MonthEnd => self.month_end,
            DateOption::Weekend => self.weekend,
            DateOption::Holiday => self.holiday,
            DateOption::PeakSeason => self.peak_season,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRequest {
    /// Falls back to the price book's default storage type when unset.
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub duration_days: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub electricity: bool,
}

/// Everything the caller selected for one quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub move_type: MoveType,
    #[serde(default)]
    pub items: ItemQuantities,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub storage_move: bool,
    #[serde(default)]
    pub storage: StorageRequest,
    #[serde(default)]
    pub origin: SiteAccess,
    #[serde(default)]
    pub destination: SiteAccess,
    #[serde(default, deserialize_with = "lenient::count")]
    pub added_men: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub added_women: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub exclude_base_women: bool,
    /// Signed manual adjustment; negative values are discounts.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub manual_adjustment: i64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub regional_ladder_surcharge: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub via_point: bool,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub via_point_surcharge: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub long_distance: bool,
    #[serde(default)]
    pub long_distance_route: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub waste_disposal: bool,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub waste_tons: f64,
    #[serde(default)]
    pub dates: DateFlags,
}

impl QuoteRequest {
    pub(crate) fn site(&self, side: Side) -> &SiteAccess {
        match side {
            Side::Origin => &self.origin,
            Side::Destination => &self.destination,
        }
    }

    /// The selected vehicle, ignoring blank selections.
    pub fn selected_vehicle(&self) -> Option<&str> {
        self.vehicle
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Aggregate inventory load, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadTotals {
    pub total_volume: f64,
    pub total_weight: f64,
}

impl LoadTotals {
    pub fn is_empty(&self) -> bool {
        self.total_volume <= 0.0 && self.total_weight <= 0.0
    }
}

/// A single labeled contribution to the quote. Discounts carry negative amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub amount: i64,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelInfo {
    pub base_men: u32,
    pub base_women: u32,
    pub added_men: u32,
    pub added_women: u32,
    pub final_men: u32,
    pub final_women: u32,
    pub base_female_removed: bool,
}

/// Ordered cost breakdown with the rounded, non-negative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub total_cost: u64,
    pub lines: Vec<CostLine>,
    pub personnel: Option<PersonnelInfo>,
}

impl QuoteResult {
    pub(crate) fn aborted(note: impl Into<String>) -> Self {
        Self {
            total_cost: 0,
            lines: vec![CostLine {
                label: "error".to_string(),
                amount: 0,
                note: note.into(),
            }],
            personnel: None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.personnel.is_none()
    }
}

/// Thousands-separated amount, e.g. `-1,250,000`.
pub fn format_amount(amount: i64) -> String {
    let grouped = format_total(amount.unsigned_abs());
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Unsigned variant of [`format_amount`] for quote totals.
pub fn format_total(total: u64) -> String {
    let digits = total.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
