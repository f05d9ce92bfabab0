//! Cell normalizers for roster columns
//!
//! Spreadsheet cells arrive as loosely typed values: a date may be a serial
//! number or a `DD/MM/YYYY` string, a time a fraction of a day or `H:MM`.
//! Each function here turns one cell into the shape its field stores.

use calamine::Data;
use chrono::{Days, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Largest serial date the 1900 date system can express (9999-12-31)
const MAX_SERIAL_DATE: f64 = 2_958_465.0;

/// Serial 60 is the fictitious 1900-02-29 kept for Lotus 1-2-3 compatibility
const PHANTOM_LEAP_DAY: u64 = 60;

/// Empty cells, empty strings, zero, `false` and error values carry no value
pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.is_empty(),
        Data::Int(i) => *i == 0,
        Data::Float(f) => *f == 0.0 || f.is_nan(),
        Data::Bool(b) => !b,
        Data::DateTime(dt) => dt.as_f64() == 0.0,
        Data::Error(_) => true,
    }
}

/// Numeric value of a number or date-typed cell
fn numeric(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    }
}

/// Cell rendered as text, trimmed
pub fn text(cell: &Data) -> String {
    let raw = match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(_) => String::new(),
    };
    raw.trim().to_string()
}

/// Integer with `parseInt` semantics: numbers truncate, strings read their
/// leading digits, anything else is `None`.
pub fn integer(cell: &Data) -> Option<i64> {
    if is_blank(cell) {
        return None;
    }

    match cell {
        Data::Int(i) => Some(*i),
        Data::String(s) | Data::DateTimeIso(s) => leading_integer(s),
        _ => numeric(cell)
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Date as `YYYY-MM-DD` from a serial number or a `DD/MM/YYYY` string
pub fn date(cell: &Data) -> Option<String> {
    if is_blank(cell) {
        return None;
    }

    match cell {
        Data::String(s) => slash_date(s),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.format("%Y-%m-%d").to_string()),
        _ => numeric(cell).and_then(serial_date),
    }
}

/// Convert a serial date in the 1900 date system to `YYYY-MM-DD`.
///
/// Any time-of-day fraction is dropped. Serial 0 (the "day before" the
/// epoch) and out-of-range values have no calendar date.
pub fn serial_date(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL_DATE).contains(&serial) {
        return None;
    }

    let days = serial.floor() as u64;
    match days {
        0 => None,
        PHANTOM_LEAP_DAY => Some("1900-02-29".to_string()),
        d if d < PHANTOM_LEAP_DAY => NaiveDate::from_ymd_opt(1899, 12, 31)?
            .checked_add_days(Days::new(d))
            .map(|date| date.format("%Y-%m-%d").to_string()),
        d => NaiveDate::from_ymd_opt(1899, 12, 30)?
            .checked_add_days(Days::new(d))
            .map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

/// `DD/MM/YYYY` → `YYYY-MM-DD`. Day and month are zero-padded, the year is
/// kept verbatim. Only the separator count is checked.
fn slash_date(s: &str) -> Option<String> {
    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => Some(format!("{}-{:0>2}-{:0>2}", year, month, day)),
        _ => None,
    }
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("valid clock regex"))
}

/// Time of day as `HH:MM` from a day fraction or an `H:MM`/`HH:MM` string.
///
/// Strings are checked for shape only, so `25:00` passes through.
pub fn time(cell: &Data) -> Option<String> {
    if is_blank(cell) {
        return None;
    }

    if let Data::String(s) = cell {
        let caps = clock_pattern().captures(s.trim())?;
        return Some(format!("{:0>2}:{}", &caps[1], &caps[2]));
    }

    let fraction = numeric(cell)?;
    if !fraction.is_finite() || fraction < 0.0 {
        return None;
    }
    let total_minutes = (fraction * 1440.0).round() as u64;
    Some(format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_blank_cells() {
        assert!(is_blank(&Data::Empty));
        assert!(is_blank(&s("")));
        assert!(is_blank(&Data::Float(0.0)));
        assert!(is_blank(&Data::Int(0)));
        assert!(!is_blank(&s(" ")));
        assert!(!is_blank(&s("Pérez")));
        assert!(!is_blank(&Data::Float(1.0)));
    }

    #[test]
    fn test_error_cells_are_blank() {
        let na = Data::Error(CellErrorType::NA);
        assert!(is_blank(&na));
        assert_eq!(text(&na), "");
        assert_eq!(text(&Data::Error(CellErrorType::Ref)), "");
        assert_eq!(integer(&na), None);
        assert_eq!(date(&Data::Error(CellErrorType::Value)), None);
        assert_eq!(time(&Data::Error(CellErrorType::Div0)), None);
    }

    #[test]
    fn test_text_renders_numbers_like_the_sheet() {
        assert_eq!(text(&Data::Float(12345678.0)), "12345678");
        assert_eq!(text(&Data::Float(1.5)), "1.5");
        assert_eq!(text(&Data::Int(56912345678)), "56912345678");
        assert_eq!(text(&s("  Juan  ")), "Juan");
        assert_eq!(text(&Data::Empty), "");
    }

    #[test]
    fn test_integer_parse_int_rules() {
        assert_eq!(integer(&Data::Float(8.0)), Some(8));
        assert_eq!(integer(&Data::Float(8.9)), Some(8));
        assert_eq!(integer(&Data::Int(16)), Some(16));
        assert_eq!(integer(&s(" 12 semanas")), Some(12));
        assert_eq!(integer(&s("-3")), Some(-3));
        assert_eq!(integer(&s("0")), Some(0));
        assert_eq!(integer(&s("abc")), None);
        assert_eq!(integer(&Data::Float(0.0)), None);
        assert_eq!(integer(&Data::Empty), None);
    }

    #[test]
    fn test_date_from_slash_string() {
        assert_eq!(date(&s("05/03/2025")).as_deref(), Some("2025-03-05"));
        assert_eq!(date(&s("5/3/2025")).as_deref(), Some("2025-03-05"));
    }

    #[test]
    fn test_date_rejects_other_shapes() {
        assert_eq!(date(&s("2025-03-05")), None);
        assert_eq!(date(&s("05/03")), None);
        assert_eq!(date(&s("05/03/2025/1")), None);
        assert_eq!(date(&Data::Bool(true)), None);
        assert_eq!(date(&Data::Empty), None);
    }

    #[test]
    fn test_date_from_serial() {
        assert_eq!(date(&Data::Float(45721.0)).as_deref(), Some("2025-03-05"));
        assert_eq!(date(&Data::Int(45717)).as_deref(), Some("2025-03-01"));
        assert_eq!(date(&Data::Float(45721.75)).as_deref(), Some("2025-03-05"));
    }

    #[test]
    fn test_serial_date_1900_leap_bug() {
        assert_eq!(serial_date(1.0).as_deref(), Some("1900-01-01"));
        assert_eq!(serial_date(59.0).as_deref(), Some("1900-02-28"));
        assert_eq!(serial_date(60.0).as_deref(), Some("1900-02-29"));
        assert_eq!(serial_date(61.0).as_deref(), Some("1900-03-01"));
        assert_eq!(serial_date(2958465.0).as_deref(), Some("9999-12-31"));
    }

    #[test]
    fn test_serial_date_out_of_range() {
        assert_eq!(serial_date(0.5), None);
        assert_eq!(serial_date(-1.0), None);
        assert_eq!(serial_date(2958466.0), None);
        assert_eq!(serial_date(f64::NAN), None);
    }

    #[test]
    fn test_date_from_iso_cell() {
        let cell = Data::DateTimeIso("2025-03-05T00:00:00".to_string());
        assert_eq!(date(&cell).as_deref(), Some("2025-03-05"));
    }

    #[test]
    fn test_time_from_fraction() {
        assert_eq!(time(&Data::Float(0.5)).as_deref(), Some("12:00"));
        assert_eq!(time(&Data::Float(8.0 / 24.0)).as_deref(), Some("08:00"));
        assert_eq!(time(&Data::Float(17.5 / 24.0)).as_deref(), Some("17:30"));
        assert_eq!(time(&Data::Float(-0.5)), None);
    }

    #[test]
    fn test_time_from_string() {
        assert_eq!(time(&s("8:00")).as_deref(), Some("08:00"));
        assert_eq!(time(&s(" 17:45 ")).as_deref(), Some("17:45"));
        // shape-only check
        assert_eq!(time(&s("25:00")).as_deref(), Some("25:00"));
        assert_eq!(time(&s("125:00")), None);
        assert_eq!(time(&s("8h")), None);
        assert_eq!(time(&s("08:00:00")), None);
    }
}
