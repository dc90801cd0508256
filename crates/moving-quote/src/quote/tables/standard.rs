use std::collections::BTreeMap;

use super::super::domain::{DateOption, MoveType};
use super::{
    FloorRange, ItemCatalog, ItemDefinitions, ItemSpec, LadderTables, ReferenceTables,
    SectionDefinition, SkyLiftRates, SpecialDayPrice, StorageRates, TonnageThreshold,
    VehiclePrice, VehicleSpec,
};

const ITEMS: &[(&str, f64, f64)] = &[
    ("refrigerator", 1.2, 95.0),
    ("kimchi refrigerator", 0.6, 60.0),
    ("washing machine", 0.7, 70.0),
    ("air conditioner", 0.5, 45.0),
    ("television", 0.3, 20.0),
    ("sofa", 1.5, 60.0),
    ("queen bed", 2.0, 80.0),
    ("single bed", 1.2, 50.0),
    ("wardrobe", 2.2, 110.0),
    ("dining table", 0.8, 40.0),
    ("chair", 0.2, 6.0),
    ("desk", 0.6, 35.0),
    ("bookshelf", 0.7, 40.0),
    ("box", 0.1, 12.0),
    ("filing cabinet", 0.4, 45.0),
    ("copier", 0.8, 90.0),
    ("server rack", 1.2, 250.0),
    ("partition", 0.3, 15.0),
];

fn section(label: &str, items: &[&str], disposal_only: bool) -> SectionDefinition {
    SectionDefinition {
        label: label.to_string(),
        items: items.iter().map(|item| item.to_string()).collect(),
        disposal_only,
    }
}

fn item_definitions() -> ItemDefinitions {
    let mut definitions = ItemDefinitions::new();
    definitions.insert(
        MoveType::Home,
        vec![
            section(
                "Appliances",
                &[
                    "refrigerator",
                    "kimchi refrigerator",
                    "washing machine",
                    "air conditioner",
                    "television",
                ],
                false,
            ),
            section(
                "Furniture",
                &[
                    "sofa",
                    "queen bed",
                    "single bed",
                    "wardrobe",
                    "dining table",
                    "chair",
                    "desk",
                    "bookshelf",
                ],
                false,
            ),
            section("Boxes", &["box"], false),
            section("Disposal", &["sofa", "wardrobe", "single bed"], true),
        ],
    );
    definitions.insert(
        MoveType::Office,
        vec![
            section("Workstations", &["desk", "chair", "partition"], false),
            section(
                "Equipment",
                &["copier", "server rack", "filing cabinet", "television"],
                false,
            ),
            section("Meeting room", &["dining table", "chair"], false),
            section("Boxes", &["box"], false),
            section("Disposal", &["desk", "chair", "partition"], true),
        ],
    );
    definitions.insert(
        MoveType::Small,
        vec![
            section(
                "Essentials",
                &["refrigerator", "washing machine", "single bed", "desk", "chair"],
                false,
            ),
            section("Boxes", &["box"], false),
        ],
    );
    definitions
}

fn vehicles() -> BTreeMap<String, VehicleSpec> {
    [
        ("1-ton", 4.8, 1_000.0),
        ("2.5-ton", 12.0, 2_500.0),
        ("5-ton", 25.0, 5_000.0),
        ("10-ton", 45.0, 10_000.0),
    ]
    .into_iter()
    .map(|(name, capacity_cbm, weight_capacity_kg)| {
        (
            name.to_string(),
            VehicleSpec {
                capacity_cbm,
                weight_capacity_kg,
            },
        )
    })
    .collect()
}

fn price_row(rows: &[(&str, i64, u32, u32)]) -> BTreeMap<String, VehiclePrice> {
    rows.iter()
        .map(|(name, price, men, women)| {
            (
                name.to_string(),
                VehiclePrice {
                    price: *price,
                    men: *men,
                    women: *women,
                },
            )
        })
        .collect()
}

fn vehicle_prices() -> BTreeMap<MoveType, BTreeMap<String, VehiclePrice>> {
    let mut prices = BTreeMap::new();
    prices.insert(
        MoveType::Home,
        price_row(&[
            ("1-ton", 400_000, 2, 0),
            ("2.5-ton", 800_000, 3, 1),
            ("5-ton", 1_300_000, 4, 1),
            ("10-ton", 2_300_000, 6, 2),
        ]),
    );
    prices.insert(
        MoveType::Office,
        price_row(&[
            ("1-ton", 350_000, 2, 0),
            ("2.5-ton", 700_000, 3, 0),
            ("5-ton", 1_200_000, 4, 0),
            ("10-ton", 2_100_000, 6, 0),
        ]),
    );
    prices.insert(
        MoveType::Small,
        price_row(&[("1-ton", 250_000, 1, 0), ("2.5-ton", 450_000, 2, 0)]),
    );
    prices
}

fn ladder() -> LadderTables {
    let floor_ranges = [
        (2, 3, "2-3"),
        (4, 6, "4-6"),
        (7, 9, "7-9"),
        (10, 12, "10-12"),
        (13, 15, "13-15"),
        (16, 20, "16-20"),
    ]
    .into_iter()
    .map(|(min_floor, max_floor, label)| FloorRange {
        min_floor,
        max_floor,
        label: label.to_string(),
    })
    .collect();

    let tonnage_thresholds = [(5.0, "5-ton"), (2.5, "2.5-ton"), (1.0, "1-ton")]
        .into_iter()
        .map(|(min_tons, class)| TonnageThreshold {
            min_tons,
            class: class.to_string(),
        })
        .collect();

    let rows: [(&str, [i64; 3]); 6] = [
        ("2-3", [100_000, 120_000, 150_000]),
        ("4-6", [120_000, 140_000, 180_000]),
        ("7-9", [140_000, 160_000, 210_000]),
        ("10-12", [160_000, 190_000, 250_000]),
        ("13-15", [0, 220_000, 290_000]),
        ("16-20", [0, 0, 350_000]),
    ];
    let prices = rows
        .into_iter()
        .map(|(range, [light, medium, heavy])| {
            let row = [("1-ton", light), ("2.5-ton", medium), ("5-ton", heavy)]
                .into_iter()
                .map(|(class, price)| (class.to_string(), price))
                .collect();
            (range.to_string(), row)
        })
        .collect();

    LadderTables {
        floor_ranges,
        tonnage_thresholds,
        default_tonnage_class: Some("5-ton".to_string()),
        prices,
    }
}

fn special_days() -> Vec<SpecialDayPrice> {
    [
        (DateOption::AuspiciousDay, "auspicious day", 100_000),
        (DateOption::MonthEnd, "month end", 50_000),
        (DateOption::Weekend, "weekend", 50_000),
        (DateOption::Holiday, "holiday", 100_000),
        (DateOption::PeakSeason, "peak season", 150_000),
    ]
    .into_iter()
    .map(|(option, label, surcharge)| SpecialDayPrice {
        option,
        label: label.to_string(),
        surcharge,
    })
    .collect()
}

/// Built-in price book used when no tables file is configured.
pub(super) fn price_book() -> ReferenceTables {
    let mut items = ItemCatalog::new();
    for (name, volume_cbm, weight_kg) in ITEMS {
        items.insert(
            *name,
            ItemSpec {
                volume_cbm: *volume_cbm,
                weight_kg: *weight_kg,
            },
        );
    }

    let storage = StorageRates {
        default_type: "container".to_string(),
        daily_rates: [
            ("container", 20_000),
            ("warehouse", 15_000),
            ("climate controlled", 30_000),
        ]
        .into_iter()
        .map(|(kind, rate)| (kind.to_string(), rate))
        .collect(),
        electricity_per_day: 5_000,
    };

    let long_distance = [
        ("under 100km", 200_000),
        ("100-200km", 400_000),
        ("200-300km", 600_000),
        ("over 300km", 800_000),
    ]
    .into_iter()
    .map(|(route, price)| (route.to_string(), price))
    .collect();

    ReferenceTables {
        items,
        item_definitions: item_definitions(),
        vehicles: vehicles(),
        vehicle_prices: vehicle_prices(),
        ladder: ladder(),
        sky_lift: SkyLiftRates {
            base_price: 150_000,
            extra_hour_rate: 50_000,
        },
        special_days: special_days(),
        storage,
        long_distance,
        waste_rate_per_ton: 200_000,
        additional_person_cost: 150_000,
        loading_efficiency: 0.9,
    }
}
