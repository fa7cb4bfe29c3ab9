use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One period bucket of a monthly aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Calendar month token, "YYYY-MM". Lexical order equals chronological
    /// order, which every consumer relies on.
    pub period: String,
    pub total: Decimal,
}

/// One (period, dimension) bucket of a monthly aggregate with a secondary
/// dimension such as country, team, or expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionedMonthlyTotal {
    pub period: String,
    pub dimension: String,
    pub total: Decimal,
}

/// One bucket of a plain (non-temporal) group-by, e.g. revenue per country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionTotal {
    pub key: String,
    pub total: Decimal,
}

/// Truncates a date to its calendar month token.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Groups `(date, amount)` pairs by calendar month and sums each group.
/// Output is ascending by period and duplicate-free; every month present
/// in the input appears exactly once.
pub fn monthly_totals(items: impl Iterator<Item = (NaiveDate, Decimal)>) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for (date, amount) in items {
        *buckets.entry(month_key(date)).or_default() += amount;
    }
    buckets
        .into_iter()
        .map(|(period, total)| MonthlyTotal { period, total })
        .collect()
}

/// Groups `(date, dimension, amount)` triples by (month, dimension).
/// Output is ordered by period first, then by dimension.
pub fn monthly_totals_by(
    items: impl Iterator<Item = (NaiveDate, String, Decimal)>,
) -> Vec<DimensionedMonthlyTotal> {
    let mut buckets: BTreeMap<(String, String), Decimal> = BTreeMap::new();
    for (date, dimension, amount) in items {
        *buckets.entry((month_key(date), dimension)).or_default() += amount;
    }
    buckets
        .into_iter()
        .map(|((period, dimension), total)| DimensionedMonthlyTotal {
            period,
            dimension,
            total,
        })
        .collect()
}

/// Plain group-by over a single string dimension, ordered by key.
pub fn totals_by(items: impl Iterator<Item = (String, Decimal)>) -> Vec<DimensionTotal> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for (key, amount) in items {
        *buckets.entry(key).or_default() += amount;
    }
    buckets
        .into_iter()
        .map(|(key, total)| DimensionTotal { key, total })
        .collect()
}

/// Outer-joins two monthly aggregates on period. The result covers the
/// union of both period sets; a side with no data for a period contributes
/// zero. No period is ever dropped because one side lacks data.
pub fn outer_join_periods(
    left: &[MonthlyTotal],
    right: &[MonthlyTotal],
) -> Vec<(String, Decimal, Decimal)> {
    let mut joined: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for l in left {
        joined.entry(l.period.clone()).or_default().0 += l.total;
    }
    for r in right {
        joined.entry(r.period.clone()).or_default().1 += r.total;
    }
    joined
        .into_iter()
        .map(|(period, (l, r))| (period, l, r))
        .collect()
}
