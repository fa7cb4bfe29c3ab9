use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CoreError;

/// An inclusive calendar date range. Both bounds are always present by
/// construction: a single-sided range cannot be represented, which is the
/// contract the upstream date picker is expected to honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidInput(
                "date_range".to_string(),
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The selection coming from the filter UI.
///
/// `None` means "no constraint supplied" and an empty set means "nothing
/// deselected in a select-all picker"; both pass every record through,
/// but they are distinct states so the intent survives the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub date_range: Option<DateRange>,
    pub countries: Option<BTreeSet<String>>,
    pub teams: Option<BTreeSet<String>>,
}

impl FilterSelection {
    /// A selection with no constraints at all.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn matches_date(&self, date: NaiveDate) -> bool {
        match &self.date_range {
            Some(range) => range.contains(date),
            None => true,
        }
    }

    pub fn matches_country(&self, country: &str) -> bool {
        Self::matches_set(&self.countries, country)
    }

    pub fn matches_team(&self, team: &str) -> bool {
        Self::matches_set(&self.teams, team)
    }

    fn matches_set(set: &Option<BTreeSet<String>>, value: &str) -> bool {
        match set {
            Some(s) if !s.is_empty() => s.contains(value),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(result.is_err());
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn absent_and_empty_sets_both_pass_through() {
        let absent = FilterSelection::unfiltered();
        assert!(absent.matches_country("Korea"));

        let empty = FilterSelection {
            countries: Some(BTreeSet::new()),
            ..FilterSelection::unfiltered()
        };
        assert!(empty.matches_country("Korea"));
        // Distinct states, identical behavior.
        assert_ne!(absent, empty);
    }

    #[test]
    fn non_empty_set_restricts_membership() {
        let selection = FilterSelection {
            countries: Some(BTreeSet::from(["Korea".to_string()])),
            ..FilterSelection::unfiltered()
        };
        assert!(selection.matches_country("Korea"));
        assert!(!selection.matches_country("USA"));
    }
}
