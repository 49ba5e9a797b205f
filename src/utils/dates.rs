//! Locale date/time strings used by stored records.
//!
//! Records carry their date and time as display strings (en-US style,
//! `10/19/2026` and `02:10 PM`). Analytics parses them back when it needs
//! calendar arithmetic.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};

pub const DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const TIME_FORMAT: &str = "%I:%M %p";

const PARSE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Today's date in the stored format.
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub fn week_label(week_start: NaiveDate) -> String {
    format!("Week {}", week_start.format("%b %-d"))
}

pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_without_padding() {
        assert_eq!(format_date(ymd(2026, 1, 5)), "1/5/2026");
        assert_eq!(format_date(ymd(2026, 10, 19)), "10/19/2026");
    }

    #[test]
    fn formats_twelve_hour_time() {
        let time = NaiveTime::from_hms_opt(14, 10, 0).unwrap();
        assert_eq!(format_time(time), "02:10 PM");
    }

    #[test]
    fn parses_locale_and_iso_dates() {
        assert_eq!(parse_date("1/5/2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date("10/19/2026"), Some(ymd(2026, 10, 19)));
        assert_eq!(parse_date("2026-10-19"), Some(ymd(2026, 10, 19)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn week_starts_on_sunday() {
        assert_eq!(start_of_week(ymd(2026, 10, 14)), ymd(2026, 10, 11));
        assert_eq!(start_of_week(ymd(2026, 10, 11)), ymd(2026, 10, 11));
        assert_eq!(start_of_week(ymd(2026, 1, 1)), ymd(2025, 12, 28));
    }

    #[test]
    fn labels() {
        assert_eq!(week_label(ymd(2026, 10, 11)), "Week Oct 11");
        assert_eq!(month_label(2026, 10), "October");
    }
}
