//! Threshold-based alerting over already-computed financial metrics.
//!
//! The engine is stateless: each evaluation looks only at the inputs it is
//! handed, every rule independently contributes zero or one alert, and
//! identical inputs always produce the identical ordered sequence. An empty
//! output is the "all clear" outcome, not an error.

use crate::error::AlerterError;
use configuration::AlertThresholds;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod error;

/// Severity of a finding. `Critical` demands action; `Warning` asks for a
/// plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

/// Which metric family a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    Cash,
    AccountsReceivable,
    ProfitAndLoss,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Cash => "Cash",
            AlertCategory::AccountsReceivable => "AR",
            AlertCategory::ProfitAndLoss => "P&L",
        }
    }
}

/// One finding emitted by a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub category: AlertCategory,
    pub message: String,
}

/// The metric values the rule set is evaluated against. Assembled by the
/// caller from the computed dashboard report.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertInputs {
    pub runway_months: Decimal,
    /// Overdue receivables and total revenue over the same filtered set.
    pub overdue_ar: Decimal,
    pub total_revenue: Decimal,
    /// Whether any receivable records exist; the AR rule is skipped
    /// entirely when none do.
    pub has_receivables: bool,
    /// Net profit over the whole filtered window (not per-month).
    pub net_profit: Decimal,
}

/// Evaluates the fixed rule set in a fixed order: cash runway, overdue AR
/// ratio, then whole-window net profit.
#[derive(Debug, Clone)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    /// Creates the engine, re-validating the thresholds so a hand-built
    /// `AlertThresholds` cannot bypass the config-load checks.
    pub fn new(thresholds: AlertThresholds) -> Result<Self, AlerterError> {
        thresholds
            .validate()
            .map_err(|e| AlerterError::InvalidThresholds(e.to_string()))?;
        Ok(Self { thresholds })
    }

    /// Runs every rule and returns the findings in evaluation order.
    pub fn evaluate(&self, inputs: &AlertInputs) -> Vec<Alert> {
        let mut alerts = Vec::new();

        // Rule 1: cash runway.
        if inputs.runway_months < self.thresholds.runway_critical_months {
            alerts.push(Alert {
                severity: Severity::Critical,
                category: AlertCategory::Cash,
                message: format!(
                    "Runway is {:.1} months, below the {} month critical floor. Secure funding now.",
                    inputs.runway_months, self.thresholds.runway_critical_months
                ),
            });
        } else if inputs.runway_months < self.thresholds.runway_warning_months {
            alerts.push(Alert {
                severity: Severity::Warning,
                category: AlertCategory::Cash,
                message: format!(
                    "Runway is {:.1} months. Review the funding plan.",
                    inputs.runway_months
                ),
            });
        }

        // Rule 2: overdue receivables ratio, only when AR records exist.
        if inputs.has_receivables {
            if let Some(pct) = overdue_pct(inputs.overdue_ar, inputs.total_revenue) {
                if pct > self.thresholds.overdue_ar_pct {
                    alerts.push(Alert {
                        severity: Severity::Critical,
                        category: AlertCategory::AccountsReceivable,
                        message: format!(
                            "Overdue receivables are {:.1}% of revenue. Start collection.",
                            pct
                        ),
                    });
                }
            }
        }

        // Rule 3: whole-window profitability.
        if inputs.net_profit < Decimal::ZERO {
            alerts.push(Alert {
                severity: Severity::Critical,
                category: AlertCategory::ProfitAndLoss,
                message: format!(
                    "Net profit for the selected period is {}, the business is loss-making.",
                    inputs.net_profit
                ),
            });
        }

        if !alerts.is_empty() {
            tracing::warn!(count = alerts.len(), "Alert rules fired.");
        }
        alerts
    }
}

fn overdue_pct(overdue: Decimal, total_revenue: Decimal) -> Option<Decimal> {
    if total_revenue == Decimal::ZERO {
        return None;
    }
    Some(overdue / total_revenue * Decimal::from(100))
}
