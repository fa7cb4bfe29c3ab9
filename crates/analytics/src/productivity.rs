use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_types::{EmployeeStatus, HeadcountRecord, RevenueRecord};

use crate::aggregate::{totals_by, DimensionTotal};

/// Per-capita revenue for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProductivity {
    pub team: String,
    pub revenue: Decimal,
    pub headcount: u64,
    pub per_capita_revenue: Decimal,
}

/// Count of Active employees per team, ordered by team name.
pub fn headcount_by_team(headcount: &[HeadcountRecord]) -> Vec<(String, u64)> {
    active_counts(headcount, |h| &h.team)
}

/// Count of Active employees per country, ordered by country name.
pub fn headcount_by_country(headcount: &[HeadcountRecord]) -> Vec<(String, u64)> {
    active_counts(headcount, |h| &h.country)
}

fn active_counts(
    headcount: &[HeadcountRecord],
    key: impl Fn(&HeadcountRecord) -> &String,
) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for h in headcount
        .iter()
        .filter(|h| h.status == EmployeeStatus::Active)
    {
        *counts.entry(key(h).clone()).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Joins filtered team revenue with Active headcount and divides.
///
/// A team present in revenue but with no Active headcount is excluded
/// from the ranking rather than zero-divided; output is sorted
/// descending by per-capita revenue.
pub fn team_productivity(
    filtered_revenue: &[&RevenueRecord],
    headcount: &[HeadcountRecord],
) -> Vec<TeamProductivity> {
    let revenue_by_team: Vec<DimensionTotal> = totals_by(
        filtered_revenue
            .iter()
            .map(|r| (r.team.clone(), r.amount_reporting)),
    );
    let counts: BTreeMap<String, u64> = headcount_by_team(headcount).into_iter().collect();

    let mut rows: Vec<TeamProductivity> = revenue_by_team
        .into_iter()
        .filter_map(|t| {
            // Teams with no Active headcount never enter `counts`, so the
            // division below is always by a positive integer.
            let headcount = *counts.get(&t.key)?;
            Some(TeamProductivity {
                per_capita_revenue: t.total / Decimal::from(headcount),
                team: t.key,
                revenue: t.total,
                headcount,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.per_capita_revenue.cmp(&a.per_capita_revenue));
    rows
}
