use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{DimensionTotal, DimensionedMonthlyTotal};
use crate::cashflow::{MonthlyCashFlow, RunwaySummary};
use crate::kpi::{ArSummary, KpiSummary};
use crate::pipeline::PipelineSummary;
use crate::pnl::PnlStatement;
use crate::productivity::TeamProductivity;

/// Every computed metric for one (snapshot, selection) pair.
///
/// This struct is the final output of the `MetricsEngine` and the data
/// transfer object handed to presentation: ordered sequences of plain
/// records, with no further aggregation left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub kpi: KpiSummary,
    pub cash_flow: Vec<MonthlyCashFlow>,
    pub runway: RunwaySummary,
    pub pnl: PnlStatement,
    pub pipeline: PipelineSummary,
    pub productivity: Vec<TeamProductivity>,
    pub ar: ArSummary,

    // Per-dimension cuts for the revenue/expense analysis views.
    pub revenue_by_country: Vec<DimensionTotal>,
    pub revenue_by_team: Vec<DimensionTotal>,
    pub expense_by_category: Vec<DimensionTotal>,
    pub monthly_revenue_by_country: Vec<DimensionedMonthlyTotal>,
    pub monthly_revenue_by_team: Vec<DimensionedMonthlyTotal>,
    pub monthly_expense_by_category: Vec<DimensionedMonthlyTotal>,

    // Headcount distribution (Active only, never filter-scoped).
    pub headcount_by_team: Vec<(String, u64)>,
    pub headcount_by_country: Vec<(String, u64)>,

    /// Cash held per country at the latest available date.
    pub cash_by_country: Vec<(String, Decimal)>,
}
