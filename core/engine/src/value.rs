//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Raw values as read from a source spreadsheet, and the coercions
//! the loader applies to them (counts, ranks, dates, money, free text).
//! CONTEXT: The persistence crate converts workbook cells into `SheetValue`;
//! everything downstream works on this type only.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Day zero of the 1900 date system for serials after the phantom
/// 1900-02-29 (serial 60).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serials below 60 count from 1899-12-31 (serial 1 = 1900-01-01).
const EXCEL_EARLY_EPOCH: (i32, u32, u32) = (1899, 12, 31);

/// Serial Excel assigns to the non-existent 1900-02-29.
const EXCEL_PHANTOM_LEAP_DAY: f64 = 60.0;

/// Largest serial Excel can represent (9999-12-31).
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Textual date layouts accepted in date columns, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// A single cell from a source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SheetValue {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Date cells, already converted from the workbook's serial representation.
    Date(NaiveDate),
    Error(String),
}

impl SheetValue {
    /// Empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            SheetValue::Empty => true,
            SheetValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form used for identifiers and free-text columns.
    /// Surrounding whitespace is stripped; blanks and error cells yield `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SheetValue::Empty | SheetValue::Error(_) => None,
            SheetValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            SheetValue::Number(n) => Some(format_number(*n)),
            SheetValue::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            SheetValue::Date(d) => Some(d.format("%d/%m/%Y").to_string()),
        }
    }

    /// Numeric reading of the cell. Text is parsed leniently (currency
    /// prefix, Brazilian decimal comma), booleans count as 1/0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SheetValue::Number(n) if n.is_finite() => Some(*n),
            SheetValue::Text(s) => parse_decimal(s),
            SheetValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer reading of the cell, truncating toward zero.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number().map(|n| n.trunc() as i64)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            SheetValue::Date(d) => Some(*d),
            SheetValue::Number(n) => excel_serial_to_date(*n),
            SheetValue::Text(s) => parse_date_text(s),
            _ => None,
        }
    }

    /// Raw text shown in value warnings.
    pub fn raw_display(&self) -> String {
        match self {
            SheetValue::Empty => String::new(),
            SheetValue::Text(s) => s.clone(),
            SheetValue::Error(e) => format!("#{}", e),
            other => other.as_text().unwrap_or_default(),
        }
    }
}

impl From<&str> for SheetValue {
    fn from(value: &str) -> Self {
        SheetValue::Text(value.to_string())
    }
}

impl From<String> for SheetValue {
    fn from(value: String) -> Self {
        SheetValue::Text(value)
    }
}

impl From<f64> for SheetValue {
    fn from(value: f64) -> Self {
        SheetValue::Number(value)
    }
}

impl From<i64> for SheetValue {
    fn from(value: i64) -> Self {
        SheetValue::Number(value as f64)
    }
}

impl From<NaiveDate> for SheetValue {
    fn from(value: NaiveDate) -> Self {
        SheetValue::Date(value)
    }
}

/// Format a number without unnecessary decimal places (12345.0 -> "12345").
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Parse a decimal typed by hand into a cell: "5", " 5.0 ", "R$ 1.234,50".
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let without_currency = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let compact: String = without_currency
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.is_empty() {
        return None;
    }

    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Convert a 1900-system serial day number to a calendar date. Used for
/// numbers typed into a date column; real date cells are converted by the
/// workbook reader. The time fraction is dropped and serial 60 (Excel's
/// 1900-02-29) has no date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > EXCEL_MAX_SERIAL {
        return None;
    }
    let day = serial.floor();
    let (y, m, d) = if day < EXCEL_PHANTOM_LEAP_DAY {
        EXCEL_EARLY_EPOCH
    } else if day == EXCEL_PHANTOM_LEAP_DAY {
        return None;
    } else {
        EXCEL_EPOCH
    };
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(day as u64))
}

/// Parse a date typed as text. A trailing time part is accepted and ignored.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
}
