//! Date helpers
//!
//! Calendar days cross the API as `YYYY-MM-DD` strings and are stored the
//! same way, so range filters compare lexicographically.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use super::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        AppError::with_message(
            shared::ErrorCode::InvalidDate,
            format!("Invalid date format: {} (expected YYYY-MM-DD)", date),
        )
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Current UTC calendar day
pub fn today() -> String {
    format_date(Utc::now().date_naive())
}

/// Monday of the week containing `date`
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Normalize any day to its week: `(monday, sunday)`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = week_monday(date);
    (monday, monday + Duration::days(6))
}

/// Round to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_week_normalizes_to_monday() {
        // 2024-03-13 is a Wednesday
        let (monday, sunday) = week_bounds(parse_date("2024-03-13").unwrap());
        assert_eq!(format_date(monday), "2024-03-11");
        assert_eq!(format_date(sunday), "2024-03-17");

        // Monday stays put, Sunday goes back six days
        assert_eq!(format_date(week_monday(parse_date("2024-03-11").unwrap())), "2024-03-11");
        assert_eq!(format_date(week_monday(parse_date("2024-03-17").unwrap())), "2024-03-11");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(60.0, 2), 60.0);
        assert_eq!(round_to(2.0 / 3.0 * 100.0, 2), 66.67);
        assert_eq!(round_to(1.0 / 3.0 * 100.0, 1), 33.3);
    }
}
