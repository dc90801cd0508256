use super::super::domain::{MoveType, PersonnelInfo, QuoteRequest};
use super::super::tables::VehiclePrice;

/// Base women can only be dropped from home moves whose bundled crew includes any.
pub(crate) fn female_exclusion_applies(request: &QuoteRequest, base: &VehiclePrice) -> bool {
    request.move_type == MoveType::Home && request.exclude_base_women && base.women > 0
}

pub(crate) fn crew_for(
    base: &VehiclePrice,
    request: &QuoteRequest,
    base_female_removed: bool,
) -> PersonnelInfo {
    let final_women = if base_female_removed {
        request.added_women
    } else {
        base.women.saturating_add(request.added_women)
    };

    PersonnelInfo {
        base_men: base.men,
        base_women: base.women,
        added_men: request.added_men,
        added_women: request.added_women,
        final_men: base.men.saturating_add(request.added_men),
        final_women,
        base_female_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> VehiclePrice {
        VehiclePrice {
            price: 800_000,
            men: 3,
            women: 1,
        }
    }

    #[test]
    fn adds_manual_personnel_to_base_crew() {
        let request = QuoteRequest {
            added_men: 2,
            added_women: 1,
            ..QuoteRequest::default()
        };
        let crew = crew_for(&base(), &request, false);
        assert_eq!(crew.final_men, 5);
        assert_eq!(crew.final_women, 2);
        assert!(!crew.base_female_removed);
    }

    #[test]
    fn exclusion_keeps_only_added_women() {
        let request = QuoteRequest {
            added_women: 1,
            exclude_base_women: true,
            ..QuoteRequest::default()
        };
        assert!(female_exclusion_applies(&request, &base()));
        let crew = crew_for(&base(), &request, true);
        assert_eq!(crew.final_women, 1);
        assert_eq!(crew.base_women, 1);
    }

    #[test]
    fn exclusion_only_for_home_moves_with_base_women() {
        let office = QuoteRequest {
            move_type: MoveType::Office,
            exclude_base_women: true,
            ..QuoteRequest::default()
        };
        assert!(!female_exclusion_applies(&office, &base()));

        let home = QuoteRequest {
            exclude_base_women: true,
            ..QuoteRequest::default()
        };
        let no_women = VehiclePrice { women: 0, ..base() };
        assert!(!female_exclusion_applies(&home, &no_women));
    }

    #[test]
    fn oversized_manual_crew_saturates() {
        let request = QuoteRequest {
            added_men: u32::MAX,
            added_women: u32::MAX,
            ..QuoteRequest::default()
        };
        let crew = crew_for(&base(), &request, false);
        assert_eq!(crew.final_men, u32::MAX);
        assert_eq!(crew.final_women, u32::MAX);
        assert_eq!(crew.added_men, u32::MAX);
    }
}
