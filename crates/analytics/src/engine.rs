use core_types::{DataSnapshot, FilterSelection};

use crate::aggregate::{monthly_totals, monthly_totals_by, totals_by};
use crate::cashflow::{average_monthly_burn, monthly_cash_flow, runway_months, RunwaySummary};
use crate::filter::{filter_expense, filter_revenue};
use crate::kpi::{ArSummary, KpiSummary};
use crate::pipeline::PipelineSummary;
use crate::pnl::PnlStatement;
use crate::productivity::{headcount_by_country, headcount_by_team, team_productivity};
use crate::report::DashboardReport;

/// A stateless calculator that derives the full dashboard report from one
/// immutable snapshot and one filter selection.
///
/// Recomputation is wholesale: any filter change re-runs the entire
/// pipeline from the current filtered view. Only revenue and expense are
/// filter-scoped; cash, pipeline, and headcount are always read in full,
/// so balance-sheet style figures never shrink with the window.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: computes every metric for the selection.
    ///
    /// Pure and total: an empty filtered set produces zero-filled
    /// aggregates, never an error.
    pub fn calculate(
        &self,
        snapshot: &DataSnapshot,
        selection: &FilterSelection,
    ) -> DashboardReport {
        let revenue = filter_revenue(snapshot.revenue(), selection);
        let expense = filter_expense(snapshot.expense(), selection);
        tracing::debug!(
            revenue_rows = revenue.len(),
            expense_rows = expense.len(),
            "Recomputing dashboard report for selection."
        );

        let revenue_by_month =
            monthly_totals(revenue.iter().map(|r| (r.date, r.amount_reporting)));
        let expense_by_month =
            monthly_totals(expense.iter().map(|e| (e.date, e.amount_reporting)));

        let cash_flow = monthly_cash_flow(&revenue_by_month, &expense_by_month);
        let average_burn = average_monthly_burn(&expense_by_month);
        let runway = RunwaySummary {
            cash_balance: snapshot.latest_cash_total(),
            cash_as_of: snapshot.latest_cash_date(),
            average_monthly_burn: average_burn,
            runway_months: runway_months(snapshot.latest_cash_total(), average_burn),
        };

        let pnl = PnlStatement::build(&revenue, &expense);
        let pipeline = PipelineSummary::build(snapshot.pipeline());
        let productivity = team_productivity(&revenue, snapshot.headcount());
        let kpi = KpiSummary::build(&revenue, &expense, snapshot);
        let ar = ArSummary::build(&revenue);

        let revenue_by_country = totals_by(
            revenue
                .iter()
                .map(|r| (r.country.clone(), r.amount_reporting)),
        );
        let revenue_by_team =
            totals_by(revenue.iter().map(|r| (r.team.clone(), r.amount_reporting)));
        let expense_by_category = totals_by(
            expense
                .iter()
                .map(|e| (e.category_l1.as_str().to_string(), e.amount_reporting)),
        );
        let monthly_revenue_by_country = monthly_totals_by(
            revenue
                .iter()
                .map(|r| (r.date, r.country.clone(), r.amount_reporting)),
        );
        let monthly_revenue_by_team = monthly_totals_by(
            revenue
                .iter()
                .map(|r| (r.date, r.team.clone(), r.amount_reporting)),
        );
        let monthly_expense_by_category = monthly_totals_by(
            expense
                .iter()
                .map(|e| (e.date, e.category_l1.as_str().to_string(), e.amount_reporting)),
        );

        DashboardReport {
            kpi,
            cash_flow,
            runway,
            pnl,
            pipeline,
            productivity,
            ar,
            revenue_by_country,
            revenue_by_team,
            expense_by_category,
            monthly_revenue_by_country,
            monthly_revenue_by_team,
            monthly_expense_by_category,
            headcount_by_team: headcount_by_team(snapshot.headcount()),
            headcount_by_country: headcount_by_country(snapshot.headcount()),
            cash_by_country: snapshot.cash_by_country_at_latest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{
        CashRecord, DateRange, ExpenseCategory, ExpenseRecord, PaymentStatus, RevenueCategory,
        RevenueRecord,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn revenue(id: &str, day: NaiveDate, amount: Decimal) -> RevenueRecord {
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

    fn expense(id: &str, day: NaiveDate, amount: Decimal) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            date: day,
            country: "Korea".to_string(),
            team: "Video Production".to_string(),
            category_l1: ExpenseCategory::Operations,
            category_l2: "Operations_sub".to_string(),
            vendor: "Vendor 1".to_string(),
            description: "Expense".to_string(),
            amount_reporting: amount,
        }
    }

    fn snapshot() -> DataSnapshot {
        DataSnapshot::new(
            vec![
                revenue("REV-0001", date(2024, 1, 10), dec!(100)),
                revenue("REV-0002", date(2024, 2, 10), dec!(200)),
            ],
            vec![
                expense("EXP-0001", date(2024, 1, 12), dec!(50)),
                expense("EXP-0002", date(2024, 2, 12), dec!(30)),
            ],
            vec![CashRecord {
                date: date(2024, 2, 29),
                country: "Korea".to_string(),
                balance_reporting: dec!(800),
            }],
            vec![],
            vec![],
            date(2024, 1, 1),
            date(2024, 12, 31),
        )
        .unwrap()
    }

    #[test]
    fn full_report_is_consistent_across_components() {
        let engine = MetricsEngine::new();
        let report = engine.calculate(&snapshot(), &FilterSelection::unfiltered());

        assert_eq!(report.kpi.total_revenue, dec!(300));
        assert_eq!(report.kpi.total_expense, dec!(80));
        assert_eq!(report.pnl.total_revenue(), report.kpi.total_revenue);
        assert_eq!(report.cash_flow.len(), 2);
        // burn = (50 + 30) / 2 = 40; runway = 800 / 40 = 20
        assert_eq!(report.runway.average_monthly_burn, dec!(40));
        assert_eq!(report.runway.runway_months, dec!(20));
    }

    #[test]
    fn narrowing_the_date_filter_changes_burn_but_not_cash() {
        let engine = MetricsEngine::new();
        let snapshot = snapshot();
        let january = FilterSelection {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()),
            ..FilterSelection::unfiltered()
        };
        let report = engine.calculate(&snapshot, &january);

        // Burn reflects the filtered window (January only).
        assert_eq!(report.runway.average_monthly_burn, dec!(50));
        // Cash stays "as of latest available data", unfiltered.
        assert_eq!(report.runway.cash_balance, dec!(800));
        assert_eq!(report.runway.cash_as_of, Some(date(2024, 2, 29)));
    }

    #[test]
    fn empty_selection_degrades_to_zero_filled_report() {
        let engine = MetricsEngine::new();
        let snapshot = snapshot();
        let nothing = FilterSelection {
            countries: Some(std::collections::BTreeSet::from(["Japan".to_string()])),
            ..FilterSelection::unfiltered()
        };
        let report = engine.calculate(&snapshot, &nothing);

        assert_eq!(report.kpi.total_revenue, dec!(0));
        assert!(report.cash_flow.is_empty());
        assert!(report.pnl.rows.is_empty());
        // Zero burn means zero runway, never a division error.
        assert_eq!(report.runway.runway_months, dec!(0));
    }

    #[test]
    fn recomputation_is_deterministic() {
        let engine = MetricsEngine::new();
        let snapshot = snapshot();
        let selection = FilterSelection::unfiltered();
        assert_eq!(
            engine.calculate(&snapshot, &selection),
            engine.calculate(&snapshot, &selection)
        );
    }
}
