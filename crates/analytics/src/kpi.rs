use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_types::{DataSnapshot, EmployeeStatus, ExpenseRecord, PaymentStatus, RevenueRecord};

/// The headline cards at the top of the dashboard.
///
/// Revenue/expense/profit cover the filtered window; the cash balance is
/// always as of the latest date in the full cash set, and headcount is the
/// current Active count (neither is filter-scoped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    pub net_margin_pct: Decimal,
    pub cash_balance: Decimal,
    pub cash_as_of: Option<NaiveDate>,
    pub active_headcount: u64,
    pub per_capita_revenue: Decimal,
}

impl KpiSummary {
    pub fn build(
        filtered_revenue: &[&RevenueRecord],
        filtered_expense: &[&ExpenseRecord],
        snapshot: &DataSnapshot,
    ) -> Self {
        let total_revenue: Decimal =
            filtered_revenue.iter().map(|r| r.amount_reporting).sum();
        let total_expense: Decimal =
            filtered_expense.iter().map(|e| e.amount_reporting).sum();
        let net_profit = total_revenue - total_expense;
        let net_margin_pct = if total_revenue == Decimal::ZERO {
            Decimal::ZERO
        } else {
            net_profit / total_revenue * Decimal::from(100)
        };

        let active_headcount = snapshot
            .headcount()
            .iter()
            .filter(|h| h.status == EmployeeStatus::Active)
            .count() as u64;
        let per_capita_revenue = if active_headcount == 0 {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(active_headcount)
        };

        Self {
            total_revenue,
            total_expense,
            net_profit,
            net_margin_pct,
            cash_balance: snapshot.latest_cash_total(),
            cash_as_of: snapshot.latest_cash_date(),
            active_headcount,
            per_capita_revenue,
        }
    }
}

/// Accounts-receivable buckets over the filtered revenue set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArSummary {
    pub pending: Decimal,
    pub overdue: Decimal,
    pub total: Decimal,
}

impl ArSummary {
    pub fn build(filtered_revenue: &[&RevenueRecord]) -> Self {
        let mut pending = Decimal::ZERO;
        let mut overdue = Decimal::ZERO;
        for r in filtered_revenue {
            match r.payment_status {
                PaymentStatus::Pending => pending += r.amount_reporting,
                PaymentStatus::Overdue => overdue += r.amount_reporting,
                PaymentStatus::Paid => {}
            }
        }
        Self {
            pending,
            overdue,
            total: pending + overdue,
        }
    }

    /// Whether any receivable exists at all. The AR alert rule is only
    /// evaluated when this is true.
    pub fn has_receivables(&self) -> bool {
        self.total > Decimal::ZERO
    }

    /// Overdue receivables as a percentage of total revenue. `None` when
    /// revenue is zero, so the guard stays local and nothing downstream
    /// divides.
    pub fn overdue_pct(&self, total_revenue: Decimal) -> Option<Decimal> {
        if total_revenue == Decimal::ZERO {
            return None;
        }
        Some(self.overdue / total_revenue * Decimal::from(100))
    }
}
