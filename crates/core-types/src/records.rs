use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{
    EmployeeStatus, ExpenseCategory, PaymentStatus, PipelineStage, RevenueCategory,
};

/// A single revenue transaction, normalized to the reporting currency (KRW)
/// at ingestion. `amount_original`/`currency` are retained for traceability
/// only; downstream math always uses `amount_reporting`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub id: String,
    pub date: NaiveDate,
    pub country: String,
    pub team: String,
    pub client: String,
    pub project: String,
    pub amount_original: Decimal,
    pub currency: String,
    pub amount_reporting: Decimal,
    pub payment_status: PaymentStatus,
    pub category: RevenueCategory,
}

/// A single expense transaction, already in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub date: NaiveDate,
    pub country: String,
    pub team: String,
    pub category_l1: ExpenseCategory,
    pub category_l2: String,
    pub vendor: String,
    pub description: String,
    pub amount_reporting: Decimal,
}

/// A point-in-time cash balance for one country at a period end.
/// This is a snapshot, not a flow: balances must never be summed
/// across periods, only across countries at one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRecord {
    pub date: NaiveDate,
    pub country: String,
    pub balance_reporting: Decimal,
}

/// An open (or just-closed) sales opportunity.
/// `probability` is a percentage in `[0, 100]`, and is 100 exactly when
/// the stage is `ClosedWon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOpportunity {
    pub id: String,
    pub client: String,
    pub project: String,
    pub country: String,
    pub team: String,
    pub stage: PipelineStage,
    pub probability: Decimal,
    pub amount_reporting: Decimal,
    pub expected_close_date: NaiveDate,
}

impl PipelineOpportunity {
    /// The opportunity amount scaled by its close probability.
    pub fn weighted_amount(&self) -> Decimal {
        self.amount_reporting * self.probability / Decimal::from(100)
    }
}

/// One employee row from the headcount sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadcountRecord {
    pub id: String,
    pub name: String,
    pub country: String,
    pub team: String,
    pub role: String,
    pub monthly_salary_reporting: Decimal,
    pub status: EmployeeStatus,
}
