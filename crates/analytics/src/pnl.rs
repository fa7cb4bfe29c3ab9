use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_types::{ExpenseCategory, ExpenseRecord, RevenueRecord};

use crate::aggregate::{monthly_totals, MonthlyTotal};

/// One month of the profit-and-loss summary. Sums retain full precision;
/// margin percentages are rounded only at presentation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlRow {
    pub period: String,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub opex: Decimal,
    pub gross_profit: Decimal,
    pub gross_margin_pct: Decimal,
    pub net_profit: Decimal,
    pub net_margin_pct: Decimal,
}

/// The per-month P&L rows plus whole-window totals, which feed the KPI
/// cards and the net-profit alert rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlStatement {
    pub rows: Vec<PnlRow>,
}

impl PnlStatement {
    /// Builds the statement from filtered revenue and expense views.
    ///
    /// Revenue, COGS, and OpEx aggregates are outer-joined on period with
    /// missing sides treated as zero, so a month carrying expense but no
    /// revenue still appears (with margins reported as 0 rather than an
    /// error).
    pub fn build(revenue: &[&RevenueRecord], expense: &[&ExpenseRecord]) -> Self {
        let revenue_by_month =
            monthly_totals(revenue.iter().map(|r| (r.date, r.amount_reporting)));
        let cogs_by_month = monthly_totals(
            expense
                .iter()
                .filter(|e| e.category_l1 == ExpenseCategory::Cogs)
                .map(|e| (e.date, e.amount_reporting)),
        );
        let opex_by_month = monthly_totals(
            expense
                .iter()
                .filter(|e| e.category_l1 != ExpenseCategory::Cogs)
                .map(|e| (e.date, e.amount_reporting)),
        );

        // Three-way outer join on period.
        let mut joined: BTreeMap<String, (Decimal, Decimal, Decimal)> = BTreeMap::new();
        merge_into(&mut joined, &revenue_by_month, |slot, v| slot.0 = v);
        merge_into(&mut joined, &cogs_by_month, |slot, v| slot.1 = v);
        merge_into(&mut joined, &opex_by_month, |slot, v| slot.2 = v);

        let rows = joined
            .into_iter()
            .map(|(period, (revenue, cogs, opex))| {
                let gross_profit = revenue - cogs;
                let net_profit = revenue - cogs - opex;
                PnlRow {
                    period,
                    revenue,
                    cogs,
                    opex,
                    gross_profit,
                    gross_margin_pct: margin_pct(gross_profit, revenue),
                    net_profit,
                    net_margin_pct: margin_pct(net_profit, revenue),
                }
            })
            .collect();

        Self { rows }
    }

    pub fn total_revenue(&self) -> Decimal {
        self.rows.iter().map(|r| r.revenue).sum()
    }

    /// Net profit over the whole filtered window, the figure the P&L alert
    /// rule evaluates (full-period total, not per-month).
    pub fn total_net_profit(&self) -> Decimal {
        self.rows.iter().map(|r| r.net_profit).sum()
    }
}

/// Profit as a percentage of revenue, 0 when revenue is 0. Division by
/// zero is guarded here once so no invalid value can reach a display.
fn margin_pct(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue == Decimal::ZERO {
        return Decimal::ZERO;
    }
    profit / revenue * Decimal::from(100)
}

fn merge_into(
    joined: &mut BTreeMap<String, (Decimal, Decimal, Decimal)>,
    totals: &[MonthlyTotal],
    assign: impl Fn(&mut (Decimal, Decimal, Decimal), Decimal),
) {
    for t in totals {
        let slot = joined.entry(t.period.clone()).or_default();
        assign(slot, t.total);
    }
}
