use chrono::{Datelike, Duration, Months, NaiveDate};
use configuration::SyntheticDataConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use core_types::{
    CashRecord, DataSnapshot, EmployeeStatus, ExpenseCategory, ExpenseRecord, HeadcountRecord,
    PaymentStatus, PipelineOpportunity, PipelineStage, RevenueCategory, RevenueRecord,
};

use crate::error::SourceError;
use crate::fx;
use crate::DataSource;

const COUNTRIES: [(&str, u32); 3] = [("Korea", 5), ("USA", 3), ("Vietnam", 2)];
const TEAMS: [&str; 3] = ["Video Production", "Branded Content", "EO School"];
// Expense and headcount rows also land on the Admin cost center.
const COST_CENTERS: [&str; 4] = ["Video Production", "Branded Content", "EO School", "Admin"];
const ROLES: [&str; 4] = ["Junior", "Senior", "Lead", "Manager"];

/// A deterministic stand-in for the future spreadsheet feed.
///
/// Row counts, amount ranges, and category weights mirror the shape of the
/// production books closely enough that every chart downstream renders
/// realistically. The same seed always produces the same snapshot.
pub struct SyntheticSource {
    cfg: SyntheticDataConfig,
}

impl SyntheticSource {
    pub fn new(cfg: SyntheticDataConfig) -> Self {
        Self { cfg }
    }

    fn random_date(&self, rng: &mut StdRng) -> NaiveDate {
        let span_days = (self.cfg.coverage_end - self.cfg.coverage_start).num_days();
        self.cfg.coverage_start + Duration::days(rng.gen_range(0..=span_days))
    }

    fn generate_revenue(&self, rng: &mut StdRng) -> Result<Vec<RevenueRecord>, SourceError> {
        let mut rows = Vec::with_capacity(self.cfg.revenue_rows);
        for i in 0..self.cfg.revenue_rows {
            let date = self.random_date(rng);
            let country = *pick_weighted(rng, &COUNTRIES);
            let team = TEAMS[rng.gen_range(0..TEAMS.len())];

            // Amount ranges differ per country to keep KRW-normalized
            // magnitudes comparable.
            let (amount_original, currency) = match country {
                "Korea" => (Decimal::from(rng.gen_range(10_000_000..=100_000_000i64)), "KRW"),
                "USA" => (Decimal::from(rng.gen_range(10_000..=80_000i64)), "USD"),
                _ => (Decimal::from(rng.gen_range(200_000_000..=1_500_000_000i64)), "VND"),
            };
            let amount_reporting = fx::to_reporting(amount_original, currency)
                .ok_or_else(|| SourceError::UnknownCurrency(currency.to_string()))?;

            let payment_status = *pick_weighted(
                rng,
                &[
                    (PaymentStatus::Paid, 7),
                    (PaymentStatus::Pending, 2),
                    (PaymentStatus::Overdue, 1),
                ],
            );
            let category = [
                RevenueCategory::Retainer,
                RevenueCategory::ProjectBased,
                RevenueCategory::License,
            ][rng.gen_range(0..3)];

            rows.push(RevenueRecord {
                id: format!("REV-{:04}", i + 1),
                date,
                country: country.to_string(),
                team: team.to_string(),
                client: format!("Client {}", rng.gen_range(1..50)),
                project: format!("Project {}", rng.gen_range(1..100)),
                amount_original,
                currency: currency.to_string(),
                amount_reporting,
                payment_status,
                category,
            });
        }
        Ok(rows)
    }

    fn generate_expense(&self, rng: &mut StdRng) -> Vec<ExpenseRecord> {
        let mut rows = Vec::with_capacity(self.cfg.expense_rows);
        for i in 0..self.cfg.expense_rows {
            let date = self.random_date(rng);
            let country = *pick_weighted(rng, &COUNTRIES);
            let team = COST_CENTERS[rng.gen_range(0..COST_CENTERS.len())];
            let category_l1 = *pick_weighted(
                rng,
                &[
                    (ExpenseCategory::Personnel, 10),
                    (ExpenseCategory::Marketing, 3),
                    (ExpenseCategory::Operations, 4),
                    (ExpenseCategory::Cogs, 3),
                ],
            );
            let amount = Decimal::from(match category_l1 {
                ExpenseCategory::Personnel => rng.gen_range(3_000_000..=15_000_000i64),
                ExpenseCategory::Marketing => rng.gen_range(500_000..=10_000_000i64),
                ExpenseCategory::Cogs => rng.gen_range(1_000_000..=20_000_000i64),
                ExpenseCategory::Operations => rng.gen_range(500_000..=5_000_000i64),
            });

            rows.push(ExpenseRecord {
                id: format!("EXP-{:04}", i + 1),
                date,
                country: country.to_string(),
                team: team.to_string(),
                category_l1,
                category_l2: format!("{}_sub", category_l1.as_str()),
                vendor: format!("Vendor {}", rng.gen_range(1..30)),
                description: format!("Expense description {}", i + 1),
                amount_reporting: amount,
            });
        }
        rows
    }

    fn generate_cash(&self, rng: &mut StdRng) -> Vec<CashRecord> {
        let mut rows = Vec::new();
        for period_end in month_ends(self.cfg.coverage_start, self.cfg.coverage_end) {
            for (country, _) in COUNTRIES {
                rows.push(CashRecord {
                    date: period_end,
                    country: country.to_string(),
                    balance_reporting: Decimal::from(
                        rng.gen_range(100_000_000..=800_000_000i64),
                    ),
                });
            }
        }
        rows
    }

    fn generate_pipeline(&self, rng: &mut StdRng) -> Vec<PipelineOpportunity> {
        let mut rows = Vec::with_capacity(self.cfg.opportunities);
        for i in 0..self.cfg.opportunities {
            let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())].0;
            let team = TEAMS[rng.gen_range(0..TEAMS.len())];
            let stage = PipelineStage::ALL[rng.gen_range(0..PipelineStage::ALL.len())];
            // Probability bands follow the stage's certainty; Closed Won is
            // exactly 100 by invariant.
            let probability = Decimal::from(match stage {
                PipelineStage::Proposal => rng.gen_range(20..50i64),
                PipelineStage::Contract => rng.gen_range(60..80i64),
                PipelineStage::PaymentPending => rng.gen_range(80..95i64),
                PipelineStage::ClosedWon => 100,
            });

            rows.push(PipelineOpportunity {
                id: format!("OPP-{:04}", i + 1),
                client: format!("Prospect {}", i + 1),
                project: format!("Opportunity {}", i + 1),
                country: country.to_string(),
                team: team.to_string(),
                stage,
                probability,
                amount_reporting: Decimal::from(rng.gen_range(20_000_000..=150_000_000i64)),
                expected_close_date: self.cfg.coverage_end
                    + Duration::days(rng.gen_range(30..180)),
            });
        }
        rows
    }

    fn generate_headcount(&self, rng: &mut StdRng) -> Vec<HeadcountRecord> {
        let mut rows = Vec::with_capacity(self.cfg.employees);
        for i in 0..self.cfg.employees {
            let country = *pick_weighted(rng, &COUNTRIES);
            let team = COST_CENTERS[rng.gen_range(0..COST_CENTERS.len())];
            rows.push(HeadcountRecord {
                id: format!("EMP-{:03}", i + 1),
                name: format!("Employee {}", i + 1),
                country: country.to_string(),
                team: team.to_string(),
                role: ROLES[rng.gen_range(0..ROLES.len())].to_string(),
                monthly_salary_reporting: Decimal::from(
                    rng.gen_range(3_000_000..=12_000_000i64),
                ),
                status: EmployeeStatus::Active,
            });
        }
        rows
    }
}

impl DataSource for SyntheticSource {
    fn load(&self) -> Result<DataSnapshot, SourceError> {
        let mut rng = StdRng::seed_from_u64(self.cfg.seed);

        let revenue = self.generate_revenue(&mut rng)?;
        let expense = self.generate_expense(&mut rng);
        let cash = self.generate_cash(&mut rng);
        let pipeline = self.generate_pipeline(&mut rng);
        let headcount = self.generate_headcount(&mut rng);

        tracing::info!(seed = self.cfg.seed, "Generated synthetic record sets.");

        let snapshot = DataSnapshot::new(
            revenue,
            expense,
            cash,
            pipeline,
            headcount,
            self.cfg.coverage_start,
            self.cfg.coverage_end,
        )?;
        Ok(snapshot)
    }
}

/// Picks one item according to integer weights.
fn pick_weighted<'a, T>(rng: &mut StdRng, items: &'a [(T, u32)]) -> &'a T {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (item, weight) in items {
        if roll < *weight {
            return item;
        }
        roll -= weight;
    }
    // Unreachable for non-empty, positive-weight tables.
    &items[items.len() - 1].0
}

/// Every month-end date that falls inside `[start, end]`.
fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut ends = Vec::new();
    let mut first = match NaiveDate::from_ymd_opt(start.year(), start.month(), 1) {
        Some(d) => d,
        None => return ends,
    };
    while first <= end {
        let Some(next_first) = first.checked_add_months(Months::new(1)) else {
            break;
        };
        let last = next_first - Duration::days(1);
        if last >= start && last <= end {
            ends.push(last);
        }
        first = next_first;
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SyntheticDataConfig {
        SyntheticDataConfig {
            seed,
            coverage_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            coverage_end: NaiveDate::from_ymd_opt(2024, 10, 31).unwrap(),
            revenue_rows: 50,
            expense_rows: 80,
            opportunities: 20,
            employees: 25,
        }
    }

    #[test]
    fn generated_snapshot_passes_store_validation() {
        let snapshot = SyntheticSource::new(config(42)).load().unwrap();
        assert_eq!(snapshot.revenue().len(), 50);
        assert_eq!(snapshot.expense().len(), 80);
        assert_eq!(snapshot.pipeline().len(), 20);
        assert_eq!(snapshot.headcount().len(), 25);
        // 22 month-ends in the window, one row per country each.
        assert_eq!(snapshot.cash().len(), 22 * 3);
    }

    #[test]
    fn same_seed_reproduces_the_same_snapshot() {
        let a = SyntheticSource::new(config(7)).load().unwrap();
        let b = SyntheticSource::new(config(7)).load().unwrap();
        assert_eq!(a.revenue(), b.revenue());
        assert_eq!(a.expense(), b.expense());
        assert_eq!(a.pipeline(), b.pipeline());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SyntheticSource::new(config(1)).load().unwrap();
        let b = SyntheticSource::new(config(2)).load().unwrap();
        assert_ne!(a.revenue(), b.revenue());
    }

    #[test]
    fn month_ends_stay_inside_the_window() {
        let ends = month_ends(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        );
        assert_eq!(
            ends,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );
    }

    #[test]
    fn closed_won_opportunities_always_carry_full_probability() {
        let snapshot = SyntheticSource::new(config(99)).load().unwrap();
        for opp in snapshot.pipeline() {
            if opp.stage == PipelineStage::ClosedWon {
                assert_eq!(opp.probability, Decimal::from(100));
            } else {
                assert!(opp.probability < Decimal::from(100));
            }
        }
    }
}
