use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed conversion rate into the reporting currency (KRW).
///
/// This is a deliberately static table: conversion correctness beyond it is
/// out of scope, and amounts are converted exactly once at ingestion.
/// Unknown currencies return `None` and must be rejected by the caller.
pub fn rate_to_krw(currency: &str) -> Option<Decimal> {
    match currency {
        "KRW" => Some(Decimal::ONE),
        "USD" => Some(dec!(1300)),
        "VND" => Some(dec!(0.055)),
        _ => None,
    }
}

/// Converts an original-currency amount into the reporting currency.
pub fn to_reporting(amount: Decimal, currency: &str) -> Option<Decimal> {
    rate_to_krw(currency).map(|rate| amount * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporting_currency_is_identity() {
        assert_eq!(to_reporting(dec!(5000), "KRW"), Some(dec!(5000)));
    }

    #[test]
    fn known_rates_convert() {
        assert_eq!(to_reporting(dec!(10), "USD"), Some(dec!(13000)));
        assert_eq!(to_reporting(dec!(1000), "VND"), Some(dec!(55)));
    }

    #[test]
    fn unknown_currency_is_rejected_not_coerced() {
        assert_eq!(to_reporting(dec!(1), "EUR"), None);
    }
}
