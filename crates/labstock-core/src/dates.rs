//! Lenient expiry date parsing.
//!
//! Spreadsheet exports carry dates in whatever format the sheet was set
//! to. Anything that cannot be read as a calendar date is treated as "no
//! expiry" by the caller; this module never errors.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Two-digit-year layouts come first: `%Y` also accepts `25` as year 25,
/// while `%y` rejects a four-digit year.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%d-%b-%y",
    "%d %b %y",
    "%b %d, %y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Earliest year accepted from a text layout.
const MIN_YEAR: i32 = 1900;

/// Excel serial numbers accepted as dates (1954-10-03 ..= 2119-01-10).
const EXCEL_SERIAL_RANGE: std::ops::RangeInclusive<i64> = 20_000..=80_000;

/// Parses an expiry cell into a calendar date.
///
/// Accepts ISO dates, common slash/month-name layouts, date-times (the time
/// of day is dropped), RFC 3339 timestamps, and Excel serial day numbers.
/// Two-digit years follow the `%y` pivot (`00..=68` is 20xx). Returns
/// `None` for anything else, including dates before 1900.
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_text_date(value)
        .filter(|date| date.year() >= MIN_YEAR)
        .or_else(|| parse_excel_serial(value))
}

fn parse_text_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}

fn parse_excel_serial(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.parse().ok()?;
    if !serial.is_finite() {
        return None;
    }
    let days = serial.trunc() as i64;
    if !EXCEL_SERIAL_RANGE.contains(&days) {
        return None;
    }
    // Day 0 of the 1900 system is 1899-12-30 once the 1900 leap-year bug is accounted for.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(parse_expiry_date("2025-06-30"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date(" 2025/06/30 "), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("06/30/2025"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("30-Jun-2025"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("June 30, 2025"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("20250630"), date(2025, 6, 30));
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(parse_expiry_date("2025-06-30 23:59:59"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("2025-06-30T08:15:00"), date(2025, 6, 30));
        assert_eq!(
            parse_expiry_date("2025-06-30T08:15:00+02:00"),
            date(2025, 6, 30)
        );
    }

    #[test]
    fn reads_excel_serials() {
        assert_eq!(parse_expiry_date("45838"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("45838.75"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("12"), None);
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        assert_eq!(parse_expiry_date("6/30/25"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("06/30/25"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("30-Jun-25"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("30 Jun 25"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("Jun 30, 25"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("6/30/25 14:05"), date(2025, 6, 30));
        assert_eq!(parse_expiry_date("6/30/2025"), date(2025, 6, 30));
    }

    #[test]
    fn ancient_years_are_rejected() {
        assert_eq!(parse_expiry_date("0025-06-30"), None);
        assert_eq!(parse_expiry_date("1899/12/31"), None);
        assert_eq!(parse_expiry_date("1900-01-01"), date(1900, 1, 1));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_expiry_date(""), None);
        assert_eq!(parse_expiry_date("N/A"), None);
        assert_eq!(parse_expiry_date("2025-13-01"), None);
        assert_eq!(parse_expiry_date("soon"), None);
    }
}
