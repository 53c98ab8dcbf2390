//! Core types and constants

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Exchange rate, units of target currency per unit of source currency
pub type Rate = f64;

/// Daily closing prices keyed by calendar date, iterated in date order
pub type PriceSeries = BTreeMap<NaiveDate, Price>;

/// Date format used by both remote APIs and the CSV index column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2023-01-01"),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert!(parse_date("1234").is_none());
        assert!(parse_date("2023-02-30").is_none());
    }
}
