use core_types::{ExpenseRecord, FilterSelection, RevenueRecord};

/// Applies the selection to the revenue collection, producing a read-only
/// view. An empty result is valid; downstream aggregates degrade to
/// zero-filled outputs rather than erroring.
pub fn filter_revenue<'a>(
    records: &'a [RevenueRecord],
    selection: &FilterSelection,
) -> Vec<&'a RevenueRecord> {
    records
        .iter()
        .filter(|r| {
            selection.matches_date(r.date)
                && selection.matches_country(&r.country)
                && selection.matches_team(&r.team)
        })
        .collect()
}

/// Applies the selection to the expense collection. Cash, pipeline, and
/// headcount are consumed unfiltered by convention; only the two
/// transactional sets are filter-scoped.
pub fn filter_expense<'a>(
    records: &'a [ExpenseRecord],
    selection: &FilterSelection,
) -> Vec<&'a ExpenseRecord> {
    records
        .iter()
        .filter(|e| {
            selection.matches_date(e.date)
                && selection.matches_country(&e.country)
                && selection.matches_team(&e.team)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{DateRange, PaymentStatus, RevenueCategory};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn revenue(id: &str, day: NaiveDate, country: &str, team: &str) -> RevenueRecord {
        RevenueRecord {
            id: id.to_string(),
            date: day,
            country: country.to_string(),
            team: team.to_string(),
            client: "Client 1".to_string(),
            project: "Project 1".to_string(),
            amount_original: dec!(100),
            currency: "KRW".to_string(),
            amount_reporting: dec!(100),
            payment_status: PaymentStatus::Paid,
            category: RevenueCategory::ProjectBased,
        }
    }

    fn sample() -> Vec<RevenueRecord> {
        vec![
            revenue("REV-0001", date(2024, 1, 10), "Korea", "Video Production"),
            revenue("REV-0002", date(2024, 2, 10), "USA", "Branded Content"),
            revenue("REV-0003", date(2024, 3, 10), "Vietnam", "EO School"),
        ]
    }

    #[test]
    fn unfiltered_selection_passes_everything_through() {
        let records = sample();
        let view = filter_revenue(&records, &FilterSelection::unfiltered());
        assert_eq!(view.len(), records.len());
    }

    #[test]
    fn date_range_restricts_inclusively() {
        let records = sample();
        let selection = FilterSelection {
            date_range: Some(DateRange::new(date(2024, 1, 10), date(2024, 2, 10)).unwrap()),
            ..FilterSelection::unfiltered()
        };
        let view = filter_revenue(&records, &selection);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn combined_filters_intersect() {
        let records = sample();
        let selection = FilterSelection {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap()),
            countries: Some(BTreeSet::from(["Korea".to_string(), "USA".to_string()])),
            teams: Some(BTreeSet::from(["Branded Content".to_string()])),
        };
        let view = filter_revenue(&records, &selection);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "REV-0002");
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let records = sample();
        let selection = FilterSelection {
            countries: Some(BTreeSet::from(["Japan".to_string()])),
            ..FilterSelection::unfiltered()
        };
        assert!(filter_revenue(&records, &selection).is_empty());
    }

    #[test]
    fn filtered_total_never_exceeds_unfiltered_total() {
        let records = sample();
        let selection = FilterSelection {
            countries: Some(BTreeSet::from(["Korea".to_string()])),
            ..FilterSelection::unfiltered()
        };
        let unfiltered: Decimal = records.iter().map(|r| r.amount_reporting).sum();
        let filtered: Decimal = filter_revenue(&records, &selection)
            .iter()
            .map(|r| r.amount_reporting)
            .sum();
        assert!(filtered <= unfiltered);
    }
}
