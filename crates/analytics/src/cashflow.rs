use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{MonthlyTotal, outer_join_periods};

/// One month of the cash flow series: revenue in, expense out, and the net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    pub period: String,
    pub revenue: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// The runway snapshot shown next to the cash flow chart.
///
/// The cash side is always "as of latest available data" across the full
/// unfiltered cash set, while the burn side reflects the filtered expense
/// window. That asymmetry is deliberate: narrowing the date filter changes
/// the burn rate but never the cash reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwaySummary {
    pub cash_balance: Decimal,
    pub cash_as_of: Option<NaiveDate>,
    pub average_monthly_burn: Decimal,
    pub runway_months: Decimal,
}

/// Outer-joins the monthly revenue and expense aggregates into the net
/// cash flow series. Months present on only one side appear with the
/// missing side as zero.
pub fn monthly_cash_flow(
    revenue_by_month: &[MonthlyTotal],
    expense_by_month: &[MonthlyTotal],
) -> Vec<MonthlyCashFlow> {
    outer_join_periods(revenue_by_month, expense_by_month)
        .into_iter()
        .map(|(period, revenue, expense)| MonthlyCashFlow {
            period,
            revenue,
            expense,
            net: revenue - expense,
        })
        .collect()
}

/// Arithmetic mean of the monthly expense sums over the periods present in
/// the (filtered) expense aggregate. Zero when the aggregate is empty.
pub fn average_monthly_burn(expense_by_month: &[MonthlyTotal]) -> Decimal {
    if expense_by_month.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = expense_by_month.iter().map(|m| m.total).sum();
    total / Decimal::from(expense_by_month.len() as u64)
}

/// Months of operation sustainable at the given burn rate. Defined as 0
/// when burn is 0, regardless of the cash balance; infinity never leaves
/// this function.
pub fn runway_months(cash_balance: Decimal, average_burn: Decimal) -> Decimal {
    if average_burn <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    cash_balance / average_burn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::monthly_totals;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn net_cash_flow_outer_joins_both_sides() {
        let revenue = monthly_totals(vec![(date(2024, 1, 1), dec!(100))].into_iter());
        let expense = monthly_totals(
            vec![(date(2024, 1, 1), dec!(40)), (date(2024, 2, 1), dec!(30))].into_iter(),
        );
        let series = monthly_cash_flow(&revenue, &expense);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].net, dec!(60));
        // Expense-only month still appears, with revenue treated as zero.
        assert_eq!(series[1].revenue, dec!(0));
        assert_eq!(series[1].net, dec!(-30));
    }

    #[test]
    fn burn_is_mean_over_present_periods_only() {
        let expense = monthly_totals(
            vec![(date(2024, 1, 1), dec!(50)), (date(2024, 2, 1), dec!(30))].into_iter(),
        );
        assert_eq!(average_monthly_burn(&expense), dec!(40));
    }

    #[test]
    fn runway_matches_worked_example() {
        // cash=800, two months of expense [50, 30] -> burn 40 -> 20 months.
        let expense = monthly_totals(
            vec![(date(2024, 1, 1), dec!(50)), (date(2024, 2, 1), dec!(30))].into_iter(),
        );
        let burn = average_monthly_burn(&expense);
        assert_eq!(runway_months(dec!(800), burn), dec!(20));
    }

    #[test]
    fn zero_burn_yields_zero_runway_not_infinity() {
        assert_eq!(runway_months(dec!(1_000_000), Decimal::ZERO), dec!(0));
        assert_eq!(average_monthly_burn(&[]), dec!(0));
    }

    #[test]
    fn runway_is_non_negative_for_non_negative_cash() {
        let runway = runway_months(dec!(0), dec!(40));
        assert!(runway >= Decimal::ZERO);
    }
}
