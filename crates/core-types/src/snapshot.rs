use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::enums::PipelineStage;
use crate::error::CoreError;
use crate::records::{
    CashRecord, ExpenseRecord, HeadcountRecord, PipelineOpportunity, RevenueRecord,
};

/// The immutable record store for one load cycle.
///
/// Constructed once from a data source and shared by reference with every
/// downstream calculator. Validation happens here, fail-fast: a malformed
/// record rejects the whole load rather than being silently coerced.
#[derive(Debug, Clone)]
pub struct DataSnapshot {
    revenue: Vec<RevenueRecord>,
    expense: Vec<ExpenseRecord>,
    cash: Vec<CashRecord>,
    pipeline: Vec<PipelineOpportunity>,
    headcount: Vec<HeadcountRecord>,
    coverage_start: NaiveDate,
    coverage_end: NaiveDate,
}

impl DataSnapshot {
    pub fn new(
        revenue: Vec<RevenueRecord>,
        expense: Vec<ExpenseRecord>,
        cash: Vec<CashRecord>,
        pipeline: Vec<PipelineOpportunity>,
        headcount: Vec<HeadcountRecord>,
        coverage_start: NaiveDate,
        coverage_end: NaiveDate,
    ) -> Result<Self, CoreError> {
        if coverage_start > coverage_end {
            return Err(CoreError::InvalidInput(
                "coverage".to_string(),
                format!("start {coverage_start} is after end {coverage_end}"),
            ));
        }

        for r in &revenue {
            check_amount(&r.id, r.amount_reporting)?;
            check_coverage(&r.id, r.date, coverage_start, coverage_end)?;
        }
        for e in &expense {
            check_amount(&e.id, e.amount_reporting)?;
            check_coverage(&e.id, e.date, coverage_start, coverage_end)?;
        }
        for c in &cash {
            if c.balance_reporting < Decimal::ZERO {
                return Err(CoreError::NegativeAmount {
                    id: format!("cash/{}/{}", c.country, c.date),
                    amount: c.balance_reporting.to_string(),
                });
            }
        }
        let mut seen_cash: HashSet<(&str, NaiveDate)> = HashSet::new();
        for c in &cash {
            if !seen_cash.insert((c.country.as_str(), c.date)) {
                return Err(CoreError::DuplicateCashRecord {
                    country: c.country.clone(),
                    date: c.date,
                });
            }
        }
        for o in &pipeline {
            check_amount(&o.id, o.amount_reporting)?;
            let in_bounds =
                o.probability >= Decimal::ZERO && o.probability <= Decimal::from(100);
            let consistent = match o.stage {
                PipelineStage::ClosedWon => o.probability == Decimal::from(100),
                _ => o.probability < Decimal::from(100),
            };
            if !in_bounds || !consistent {
                return Err(CoreError::InvalidProbability {
                    id: o.id.clone(),
                    probability: o.probability.to_string(),
                    stage: o.stage.as_str().to_string(),
                });
            }
        }
        for h in &headcount {
            check_amount(&h.id, h.monthly_salary_reporting)?;
        }

        tracing::info!(
            revenue = revenue.len(),
            expense = expense.len(),
            cash = cash.len(),
            pipeline = pipeline.len(),
            headcount = headcount.len(),
            "Record store validated and loaded."
        );

        Ok(Self {
            revenue,
            expense,
            cash,
            pipeline,
            headcount,
            coverage_start,
            coverage_end,
        })
    }

    pub fn revenue(&self) -> &[RevenueRecord] {
        &self.revenue
    }

    pub fn expense(&self) -> &[ExpenseRecord] {
        &self.expense
    }

    pub fn cash(&self) -> &[CashRecord] {
        &self.cash
    }

    pub fn pipeline(&self) -> &[PipelineOpportunity] {
        &self.pipeline
    }

    pub fn headcount(&self) -> &[HeadcountRecord] {
        &self.headcount
    }

    pub fn coverage(&self) -> (NaiveDate, NaiveDate) {
        (self.coverage_start, self.coverage_end)
    }

    /// The most recent date present in the full cash record set.
    /// Cash is always read "as of latest available data", never filtered.
    pub fn latest_cash_date(&self) -> Option<NaiveDate> {
        self.cash.iter().map(|c| c.date).max()
    }

    /// Total cash across all countries at the latest available date.
    pub fn latest_cash_total(&self) -> Decimal {
        match self.latest_cash_date() {
            Some(latest) => self
                .cash
                .iter()
                .filter(|c| c.date == latest)
                .map(|c| c.balance_reporting)
                .sum(),
            None => Decimal::ZERO,
        }
    }

    /// Per-country balances at the latest available date, ordered by country.
    pub fn cash_by_country_at_latest(&self) -> Vec<(String, Decimal)> {
        let Some(latest) = self.latest_cash_date() else {
            return Vec::new();
        };
        let mut by_country: BTreeMap<String, Decimal> = BTreeMap::new();
        for c in self.cash.iter().filter(|c| c.date == latest) {
            *by_country.entry(c.country.clone()).or_default() += c.balance_reporting;
        }
        by_country.into_iter().collect()
    }
}

fn check_amount(id: &str, amount: Decimal) -> Result<(), CoreError> {
    if amount < Decimal::ZERO {
        return Err(CoreError::NegativeAmount {
            id: id.to_string(),
            amount: amount.to_string(),
        });
    }
    Ok(())
}

fn check_coverage(
    id: &str,
    date: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), CoreError> {
    if date < start || date > end {
        return Err(CoreError::DateOutOfCoverage {
            id: id.to_string(),
            date,
            start,
            end,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{PaymentStatus, RevenueCategory};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn revenue_record(id: &str, day: NaiveDate, amount: Decimal) -> RevenueRecord {
        RevenueRecord {
            id: id.to_string(),
            date: day,
            country: "Korea".to_string(),
            team: "Video Production".to_string(),
            client: "Client 1".to_string(),
            project: "Project 1".to_string(),
            amount_original: amount,
            currency: "KRW".to_string(),
            amount_reporting: amount,
            payment_status: PaymentStatus::Paid,
            category: RevenueCategory::Retainer,
        }
    }

    fn empty_snapshot_parts() -> (NaiveDate, NaiveDate) {
        (date(2024, 1, 1), date(2024, 12, 31))
    }

    #[test]
    fn rejects_negative_revenue_amount() {
        let (start, end) = empty_snapshot_parts();
        let bad = revenue_record("REV-0001", date(2024, 3, 1), dec!(-1));
        let result =
            DataSnapshot::new(vec![bad], vec![], vec![], vec![], vec![], start, end);
        assert!(matches!(result, Err(CoreError::NegativeAmount { .. })));
    }

    #[test]
    fn rejects_date_outside_coverage() {
        let (start, end) = empty_snapshot_parts();
        let stray = revenue_record("REV-0002", date(2023, 12, 31), dec!(100));
        let result =
            DataSnapshot::new(vec![stray], vec![], vec![], vec![], vec![], start, end);
        assert!(matches!(result, Err(CoreError::DateOutOfCoverage { .. })));
    }

    #[test]
    fn rejects_closed_won_without_full_probability() {
        let (start, end) = empty_snapshot_parts();
        let opp = PipelineOpportunity {
            id: "OPP-0001".to_string(),
            client: "Prospect 1".to_string(),
            project: "Opportunity 1".to_string(),
            country: "Korea".to_string(),
            team: "EO School".to_string(),
            stage: PipelineStage::ClosedWon,
            probability: dec!(95),
            amount_reporting: dec!(1000),
            expected_close_date: date(2024, 6, 1),
        };
        let result =
            DataSnapshot::new(vec![], vec![], vec![], vec![opp], vec![], start, end);
        assert!(matches!(result, Err(CoreError::InvalidProbability { .. })));
    }

    #[test]
    fn rejects_duplicate_cash_period() {
        let (start, end) = empty_snapshot_parts();
        let cash = vec![
            CashRecord {
                date: date(2024, 1, 31),
                country: "Korea".to_string(),
                balance_reporting: dec!(500),
            },
            CashRecord {
                date: date(2024, 1, 31),
                country: "Korea".to_string(),
                balance_reporting: dec!(600),
            },
        ];
        let result = DataSnapshot::new(vec![], vec![], cash, vec![], vec![], start, end);
        assert!(matches!(result, Err(CoreError::DuplicateCashRecord { .. })));
    }

    #[test]
    fn latest_cash_sums_across_countries_at_max_date_only() {
        let (start, end) = empty_snapshot_parts();
        let cash = vec![
            CashRecord {
                date: date(2024, 1, 31),
                country: "Korea".to_string(),
                balance_reporting: dec!(100),
            },
            CashRecord {
                date: date(2024, 2, 29),
                country: "Korea".to_string(),
                balance_reporting: dec!(300),
            },
            CashRecord {
                date: date(2024, 2, 29),
                country: "USA".to_string(),
                balance_reporting: dec!(500),
            },
        ];
        let snapshot =
            DataSnapshot::new(vec![], vec![], cash, vec![], vec![], start, end).unwrap();
        assert_eq!(snapshot.latest_cash_date(), Some(date(2024, 2, 29)));
        // Older periods never contribute; cash is a snapshot, not a flow.
        assert_eq!(snapshot.latest_cash_total(), dec!(800));
    }
}
