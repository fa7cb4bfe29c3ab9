use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub alerts: AlertThresholds,
    pub synthetic_data: SyntheticDataConfig,
}

impl Config {
    /// Checks cross-field consistency that serde alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alerts.validate()?;
        self.synthetic_data.validate()?;
        Ok(())
    }
}

/// Thresholds the alert rules are evaluated against.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertThresholds {
    /// Runway below this many months is a Critical cash alert.
    pub runway_critical_months: Decimal,
    /// Runway below this many months (but at or above the critical bound)
    /// is a Warning cash alert.
    pub runway_warning_months: Decimal,
    /// Overdue receivables above this percentage of filtered revenue is a
    /// Critical AR alert.
    pub overdue_ar_pct: Decimal,
}

impl AlertThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runway_critical_months <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "runway_critical_months must be greater than 0".to_string(),
            ));
        }
        if self.runway_warning_months < self.runway_critical_months {
            return Err(ConfigError::ValidationError(
                "runway_warning_months must be at least runway_critical_months".to_string(),
            ));
        }
        if self.overdue_ar_pct <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "overdue_ar_pct must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Knobs for the synthetic data source. A spreadsheet-backed source will
/// ignore this section entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct SyntheticDataConfig {
    /// RNG seed; the same seed always produces the same record sets.
    pub seed: u64,
    /// The declared coverage window for revenue and expense dates.
    pub coverage_start: NaiveDate,
    pub coverage_end: NaiveDate,
    pub revenue_rows: usize,
    pub expense_rows: usize,
    pub opportunities: usize,
    pub employees: usize,
}

impl SyntheticDataConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coverage_start > self.coverage_end {
            return Err(ConfigError::ValidationError(format!(
                "coverage_start {} is after coverage_end {}",
                self.coverage_start, self.coverage_end
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thresholds(critical: Decimal, warning: Decimal, ar: Decimal) -> AlertThresholds {
        AlertThresholds {
            runway_critical_months: critical,
            runway_warning_months: warning,
            overdue_ar_pct: ar,
        }
    }

    #[test]
    fn accepts_default_style_thresholds() {
        assert!(thresholds(dec!(6), dec!(12), dec!(10)).validate().is_ok());
    }

    #[test]
    fn rejects_warning_below_critical() {
        assert!(thresholds(dec!(12), dec!(6), dec!(10)).validate().is_err());
    }

    #[test]
    fn rejects_non_positive_ar_threshold() {
        assert!(thresholds(dec!(6), dec!(12), dec!(0)).validate().is_err());
    }
}
