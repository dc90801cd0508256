use super::super::domain::{format_amount, AccessMethod, QuoteRequest, Side};
use super::super::floor::parse_floor;
use super::super::ladder::{resolve_ladder_cost, LadderResolution};
use super::super::tables::{ReferenceTables, VehiclePrice};

const MIN_WASTE_TONS: f64 = 0.5;
const NO_ROUTE: &str = "none";

/// Result of a single pricing rule. `ok == false` marks a diagnostic line whose price could
/// not be resolved from the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleOutcome {
    pub amount: i64,
    pub note: String,
    pub ok: bool,
}

impl RuleOutcome {
    fn charged(amount: i64, note: impl Into<String>) -> Self {
        Self {
            amount,
            note: note.into(),
            ok: true,
        }
    }

    fn diagnostic(note: impl Into<String>) -> Self {
        Self {
            amount: 0,
            note: note.into(),
            ok: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleLine {
    pub label: String,
    pub outcome: RuleOutcome,
}

impl RuleLine {
    fn new(label: impl Into<String>, outcome: RuleOutcome) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }
}

pub(crate) fn base_fare_line(
    request: &QuoteRequest,
    vehicle: &str,
    base: &VehiclePrice,
) -> RuleLine {
    let crew = format!("crew {} men / {} women", base.men, base.women);
    let outcome = if request.storage_move {
        RuleOutcome::charged(
            base.price.saturating_mul(2),
            format!(
                "{vehicle}, {crew}, doubled for storage move (2 x {})",
                format_amount(base.price)
            ),
        )
    } else {
        RuleOutcome::charged(base.price, format!("{vehicle}, {crew}"))
    };
    RuleLine::new("base fare", outcome)
}

pub(crate) fn ladder_lines(
    request: &QuoteRequest,
    vehicle: &str,
    tables: &ReferenceTables,
) -> Vec<RuleLine> {
    [Side::Origin, Side::Destination]
        .into_iter()
        .filter_map(|side| {
            let site = request.site(side);
            if site.method != AccessMethod::LadderTruck {
                return None;
            }

            let quote = resolve_ladder_cost(parse_floor(&site.floor), vehicle, tables);
            if quote.resolution == LadderResolution::GroundLevel {
                return None;
            }

            let outcome = if quote.is_priced() {
                RuleOutcome::charged(quote.cost, quote.note)
            } else {
                RuleOutcome::diagnostic(quote.note)
            };
            Some(RuleLine::new(format!("{} ladder", side.label()), outcome))
        })
        .collect()
}

pub(crate) fn sky_lift_lines(request: &QuoteRequest, tables: &ReferenceTables) -> Vec<RuleLine> {
    let rates = tables.sky_lift;
    [Side::Origin, Side::Destination]
        .into_iter()
        .filter_map(|side| {
            let site = request.site(side);
            if site.method != AccessMethod::SkyLift {
                return None;
            }

            let hours = site.sky_lift_hours.max(1);
            let cost = rates
                .extra_hour_rate
                .saturating_mul(i64::from(hours - 1))
                .saturating_add(rates.base_price);
            let note = if hours > 1 {
                format!(
                    "{hours}h: base {} + {} extra hour(s) x {}",
                    format_amount(rates.base_price),
                    hours - 1,
                    format_amount(rates.extra_hour_rate)
                )
            } else {
                "1h base rental".to_string()
            };
            Some(RuleLine::new(
                format!("{} sky-lift", side.label()),
                RuleOutcome::charged(cost, note),
            ))
        })
        .collect()
}

pub(crate) fn female_exclusion_line(base: &VehiclePrice, tables: &ReferenceTables) -> RuleLine {
    let discount = tables
        .additional_person_cost
        .saturating_mul(i64::from(base.women))
        .saturating_neg();
    RuleLine::new(
        "base women excluded",
        RuleOutcome::charged(
            discount,
            format!(
                "{} base crew woman/women removed at {} each",
                base.women,
                format_amount(tables.additional_person_cost)
            ),
        ),
    )
}

pub(crate) fn added_personnel_line(
    request: &QuoteRequest,
    tables: &ReferenceTables,
) -> Option<RuleLine> {
    let people = i64::from(request.added_men) + i64::from(request.added_women);
    let cost = people.saturating_mul(tables.additional_person_cost);
    (cost > 0).then(|| {
        RuleLine::new(
            "added personnel",
            RuleOutcome::charged(
                cost,
                format!(
                    "{} men + {} women at {} each",
                    request.added_men,
                    request.added_women,
                    format_amount(tables.additional_person_cost)
                ),
            ),
        )
    })
}

pub(crate) fn manual_adjustment_line(request: &QuoteRequest) -> Option<RuleLine> {
    let amount = request.manual_adjustment;
    if amount == 0 {
        return None;
    }
    let label = if amount > 0 {
        "manual surcharge"
    } else {
        "manual discount"
    };
    Some(RuleLine::new(
        label,
        RuleOutcome::charged(amount, "entered manually"),
    ))
}

pub(crate) fn storage_line(request: &QuoteRequest, tables: &ReferenceTables) -> Option<RuleLine> {
    if !request.storage_move {
        return None;
    }

    let storage = &request.storage;
    let days = storage.duration_days.max(1);
    let storage_type = storage
        .storage_type
        .as_deref()
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .unwrap_or(tables.storage.default_type.as_str());

    let Some(rate) = tables.storage.daily_rates.get(storage_type).copied() else {
        return Some(RuleLine::new(
            "storage",
            RuleOutcome::diagnostic(format!("no daily rate for storage type '{storage_type}'")),
        ));
    };

    let mut cost = rate.saturating_mul(i64::from(days));
    let mut note = format!("{storage_type}, {days} day(s) x {}", format_amount(rate));
    if storage.electricity {
        let electricity = tables.storage.electricity_per_day;
        cost = cost.saturating_add(electricity.saturating_mul(i64::from(days)));
        note.push_str(&format!(
            ", electricity {days} day(s) x {}",
            format_amount(electricity)
        ));
    }

    Some(RuleLine::new("storage", RuleOutcome::charged(cost, note)))
}

pub(crate) fn long_distance_line(
    request: &QuoteRequest,
    tables: &ReferenceTables,
) -> Option<RuleLine> {
    if !request.long_distance {
        return None;
    }

    let route = request
        .long_distance_route
        .as_deref()
        .map(str::trim)
        .filter(|route| !route.is_empty() && !route.eq_ignore_ascii_case(NO_ROUTE))?;

    match tables.long_distance.get(route).copied() {
        Some(cost) if cost > 0 => Some(RuleLine::new(
            "long-distance",
            RuleOutcome::charged(cost, route.to_string()),
        )),
        _ => {
            tracing::debug!(route, "long-distance route has no price; skipped");
            None
        }
    }
}

pub(crate) fn waste_line(request: &QuoteRequest, tables: &ReferenceTables) -> Option<RuleLine> {
    if !request.waste_disposal {
        return None;
    }

    let tons = if request.waste_tons.is_finite() {
        request.waste_tons.max(MIN_WASTE_TONS)
    } else {
        MIN_WASTE_TONS
    };
    let cost = (tables.waste_rate_per_ton as f64 * tons).round() as i64;

    Some(RuleLine::new(
        "waste disposal",
        RuleOutcome::charged(
            cost,
            format!(
                "{tons} t x {} per ton",
                format_amount(tables.waste_rate_per_ton)
            ),
        ),
    ))
}

pub(crate) fn date_surcharge_line(
    request: &QuoteRequest,
    tables: &ReferenceTables,
) -> Option<RuleLine> {
    let mut total: i64 = 0;
    let mut labels = Vec::new();

    for day in &tables.special_days {
        if request.dates.is_set(day.option) && day.surcharge > 0 {
            total = total.saturating_add(day.surcharge);
            labels.push(day.label.as_str());
        }
    }

    (total > 0).then(|| {
        RuleLine::new(
            "date surcharge",
            RuleOutcome::charged(total, labels.join(", ")),
        )
    })
}

pub(crate) fn regional_ladder_line(request: &QuoteRequest) -> Option<RuleLine> {
    (request.regional_ladder_surcharge > 0).then(|| {
        RuleLine::new(
            "regional ladder surcharge",
            RuleOutcome::charged(request.regional_ladder_surcharge, "entered manually"),
        )
    })
}

pub(crate) fn via_point_line(request: &QuoteRequest) -> Option<RuleLine> {
    (request.via_point && request.via_point_surcharge > 0).then(|| {
        RuleLine::new(
            "via-point surcharge",
            RuleOutcome::charged(request.via_point_surcharge, "stop-over on route"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::domain::{DateFlags, SiteAccess, StorageRequest};

    #[test]
    fn sky_lift_bills_extra_hours_beyond_the_first() {
        let tables = ReferenceTables::standard();
        let request = QuoteRequest {
            origin: SiteAccess {
                floor: "8".to_string(),
                method: AccessMethod::SkyLift,
                sky_lift_hours: 3,
            },
            destination: SiteAccess {
                floor: "1".to_string(),
                method: AccessMethod::SkyLift,
                sky_lift_hours: 0,
            },
            ..QuoteRequest::default()
        };

        let lines = sky_lift_lines(&request, &tables);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "origin sky-lift");
        assert_eq!(lines[0].outcome.amount, 250_000);
        assert_eq!(lines[1].label, "destination sky-lift");
        assert_eq!(lines[1].outcome.amount, 150_000);
    }

    #[test]
    fn unknown_storage_type_is_a_diagnostic_line() {
        let tables = ReferenceTables::standard();
        let request = QuoteRequest {
            storage_move: true,
            storage: StorageRequest {
                storage_type: Some("attic".to_string()),
                duration_days: 4,
                electricity: false,
            },
            ..QuoteRequest::default()
        };

        let line = storage_line(&request, &tables).expect("storage line present");

        assert_eq!(line.outcome.amount, 0);
        assert!(!line.outcome.ok);
        assert!(line.outcome.note.contains("attic"));
    }

    #[test]
    fn storage_adds_electricity_per_day_with_one_day_minimum() {
        let tables = ReferenceTables::standard();
        let request = QuoteRequest {
            storage_move: true,
            storage: StorageRequest {
                storage_type: None,
                duration_days: 0,
                electricity: true,
            },
            ..QuoteRequest::default()
        };

        let line = storage_line(&request, &tables).expect("storage line present");

        assert_eq!(line.outcome.amount, 25_000);
        assert!(line.outcome.note.starts_with("container, 1 day(s)"));
    }

    #[test]
    fn long_distance_ignores_none_selector() {
        let tables = ReferenceTables::standard();
        let mut request = QuoteRequest {
            long_distance: true,
            long_distance_route: Some("None".to_string()),
            ..QuoteRequest::default()
        };
        assert!(long_distance_line(&request, &tables).is_none());

        request.long_distance_route = Some("100-200km".to_string());
        let line = long_distance_line(&request, &tables).expect("priced route");
        assert_eq!(line.outcome.amount, 400_000);

        request.long_distance = false;
        assert!(long_distance_line(&request, &tables).is_none());
    }

    #[test]
    fn waste_disposal_has_half_ton_minimum() {
        let mut tables = ReferenceTables::standard();
        let request = QuoteRequest {
            waste_disposal: true,
            waste_tons: 0.2,
            ..QuoteRequest::default()
        };
        let line = waste_line(&request, &tables).expect("waste line present");
        assert_eq!(line.outcome.amount, 100_000);

        tables.waste_rate_per_ton = 0;
        let line = waste_line(&request, &tables).expect("zero-rate waste still listed");
        assert_eq!(line.outcome.amount, 0);
    }

    #[test]
    fn date_surcharges_combine_in_configured_order() {
        let tables = ReferenceTables::standard();
        let request = QuoteRequest {
            dates: DateFlags {
                holiday: true,
                auspicious_day: true,
                ..DateFlags::default()
            },
            ..QuoteRequest::default()
        };

        let line = date_surcharge_line(&request, &tables).expect("date line present");

        assert_eq!(line.outcome.amount, 200_000);
        assert_eq!(line.outcome.note, "auspicious day, holiday");
    }

    #[test]
    fn storage_move_fare_saturates_for_extreme_prices() {
        let request = QuoteRequest {
            storage_move: true,
            ..QuoteRequest::default()
        };
        let base = VehiclePrice {
            price: i64::MAX,
            men: 2,
            women: 0,
        };

        let line = base_fare_line(&request, "10-ton", &base);

        assert_eq!(line.outcome.amount, i64::MAX);
    }

    #[test]
    fn via_point_requires_flag() {
        let request = QuoteRequest {
            via_point: false,
            via_point_surcharge: 30_000,
            ..QuoteRequest::default()
        };
        assert!(via_point_line(&request).is_none());
        let request = QuoteRequest {
            via_point: true,
            ..request
        };
        assert_eq!(
            via_point_line(&request).map(|line| line.outcome.amount),
            Some(30_000)
        );
    }
}
