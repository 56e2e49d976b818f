// Date and number helpers shared by the reporting core.
//
// This module centralizes date parsing, calendar-month arithmetic, and
// locale-aware number formatting so the rest of the code can assume clean,
// typed values.
use crate::error::ReportError;
use chrono::{Datelike, Months, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// Parse a `YYYY-MM-DD` date string, failing fast with a typed error.
///
/// A malformed date in a filter is a caller error, never "no constraint";
/// treating it as unconstrained would silently widen the result set.
pub fn parse_date(field: &'static str, s: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ReportError::InvalidDate {
        field,
        value: s.to_string(),
    })
}

/// Whole calendar months from `d` up to `anchor`.
///
/// Day-of-month is ignored: March 31st and March 1st are both one month
/// before an April anchor. Negative when `d` is after the anchor month.
pub fn months_between(anchor: NaiveDate, d: NaiveDate) -> i32 {
    (anchor.year() - d.year()) * 12 + (anchor.month() as i32 - d.month() as i32)
}

/// First day of the month `offset` months before `anchor`'s month.
pub fn month_floor_back(anchor: NaiveDate, offset: u32) -> NaiveDate {
    let first = anchor.with_day(1).unwrap_or(anchor);
    first
        .checked_sub_months(Months::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// Short label for a month bucket, e.g. `Mar 2024`.
pub fn month_label(month_start: NaiveDate) -> String {
    month_start.format("%b %Y").to_string()
}

/// Percentage of `part` in `whole`; a zero denominator reports 0, never NaN.
pub fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with a fixed number of decimal places and
    // locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values; used for
    // counts and rupee amounts in console messages and exports.
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(parse_date("startDate", "2025-02-15").unwrap(), d(2025, 2, 15));
        assert_eq!(parse_date("startDate", " 2024-12-01 ").unwrap(), d(2024, 12, 1));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("endDate", "15/02/2025").unwrap_err();
        match err {
            ReportError::InvalidDate { field, value } => {
                assert_eq!(field, "endDate");
                assert_eq!(value, "15/02/2025");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_date("endDate", "").is_err());
        assert!(parse_date("endDate", "2025-13-40").is_err());
    }

    #[test]
    fn months_between_ignores_day_of_month() {
        let anchor = d(2025, 2, 15);
        assert_eq!(months_between(anchor, d(2025, 2, 1)), 0);
        assert_eq!(months_between(anchor, d(2025, 1, 31)), 1);
        assert_eq!(months_between(anchor, d(2024, 3, 1)), 11);
        assert_eq!(months_between(anchor, d(2024, 2, 28)), 12);
        assert_eq!(months_between(anchor, d(2025, 3, 1)), -1);
    }

    #[test]
    fn month_floor_back_crosses_years() {
        let anchor = d(2025, 2, 15);
        assert_eq!(month_floor_back(anchor, 0), d(2025, 2, 1));
        assert_eq!(month_floor_back(anchor, 11), d(2024, 3, 1));
    }

    #[test]
    fn month_label_formats() {
        assert_eq!(month_label(d(2024, 3, 1)), "Mar 2024");
    }

    #[test]
    fn pct_handles_zero_denominator() {
        assert_eq!(pct(5, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1234.5, 2), "-1,234.50");
        assert_eq!(format_number(0.0, 0), "0");
    }
}
