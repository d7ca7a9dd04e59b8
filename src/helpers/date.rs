//! Date helper functions

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Format a calendar date as an RFC-822 timestamp at midnight UTC
///
/// # Examples
/// ```ignore
/// rfc822(&date) // -> "Mon, 01 Jan 2024 00:00:00 GMT"
/// ```
pub fn rfc822(date: &NaiveDate) -> String {
    midnight_utc(date)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Format a date in W3C datetime format (sitemaps)
pub fn w3c_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format an instant in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn midnight_utc(date: &NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rfc822() {
        assert_eq!(rfc822(&date(2024, 1, 1)), "Mon, 01 Jan 2024 00:00:00 GMT");
        assert_eq!(rfc822(&date(2024, 6, 1)), "Sat, 01 Jun 2024 00:00:00 GMT");
    }

    #[test]
    fn test_w3c_and_full_date() {
        assert_eq!(w3c_date(&date(2024, 6, 1)), "2024-06-01");
        assert_eq!(full_date(&date(2024, 6, 1)), "June 1, 2024");
    }

    #[test]
    fn test_date_xml() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(date_xml(&dt), "2024-01-15T10:30:00+00:00");
    }
}
