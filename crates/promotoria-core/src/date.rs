//! Spreadsheet date serials to Spanish display strings.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

use crate::cell::{format_number, CellValue};

/// Lowercase Spanish month names, January first.
pub const MESES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Serials at or below this are not treated as dates by the cut-off formatters.
pub const MIN_DATE_SERIAL: f64 = 30_000.0;

const DEADLINE_MAX_SERIAL: f64 = 100_000.0;

/// Shown when a deadline cell is blank or zero.
pub const NOT_AVAILABLE: &str = "No disponible";

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Converts a 1900-system serial to a calendar date. The time fraction is
/// dropped. Returns `None` for non-finite or out-of-range serials.
#[must_use]
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor();
    if days.abs() > 3_000_000.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let days = days as i64;
    let base = epoch();
    if days >= 0 {
        base.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        base.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// `"15 de marzo de 2023"`.
#[must_use]
pub fn format_long_es(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

/// `"Marzo 2023"`.
#[must_use]
pub fn format_month_year_es(date: NaiveDate) -> String {
    month_year(date.month(), date.year())
}

fn month_name(month: u32) -> &'static str {
    let index = usize::try_from(month.saturating_sub(1)).unwrap_or(0);
    MESES.get(index).copied().unwrap_or(MESES[0])
}

fn month_year(month: u32, year: i32) -> String {
    let name = month_name(month);
    let mut chars = name.chars();
    let capitalized: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    format!("{capitalized} {year}")
}

/// Maps a raw two-digit year to a full one: below 30 is 20xx, below 100 is
/// 19xx, anything else is returned as is.
#[must_use]
pub fn expand_two_digit_year(year: i32) -> i32 {
    match year {
        0..=29 => 2000 + year,
        30..=99 => 1900 + year,
        _ => year,
    }
}

/// Parses free-form date text in the handful of layouts the exports use.
#[must_use]
pub fn parse_generic_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Display string for a campaign sheet's `Fecha_Corte` cell.
///
/// Serials above 30000 render long form; smaller numbers render as the
/// number; text that parses as a date renders long form, other text verbatim.
#[must_use]
pub fn format_cut_off(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if *n > MIN_DATE_SERIAL => {
            serial_to_date(*n).map_or_else(|| format_number(*n), format_long_es)
        }
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(raw) => parse_generic_date(raw).map_or_else(|| raw.clone(), format_long_es),
        CellValue::Empty => String::new(),
    }
}

/// Display string for the summary workbook's A1 cell.
///
/// Text is the pre-formatted display value and is used verbatim; a serial is
/// rendered as `"{Mes} {Year}"`.
#[must_use]
pub fn format_summary_cut_off(value: &CellValue) -> String {
    match value {
        CellValue::Text(raw) => raw.clone(),
        CellValue::Number(n) if *n != 0.0 => serial_to_date(*n)
            .map(|date| month_year(date.month(), expand_two_digit_year(date.year())))
            .unwrap_or_default(),
        CellValue::Number(_) | CellValue::Empty => String::new(),
    }
}

/// Display string for a goal deadline cell such as `Limite_Logro_Meta`.
#[must_use]
pub fn format_deadline(value: &CellValue) -> String {
    match value {
        CellValue::Empty => NOT_AVAILABLE.to_owned(),
        CellValue::Text(raw) if raw.is_empty() => NOT_AVAILABLE.to_owned(),
        other => {
            if let Some(n) = other.as_number() {
                if n == 0.0 {
                    return NOT_AVAILABLE.to_owned();
                }
                if n > MIN_DATE_SERIAL && n < DEADLINE_MAX_SERIAL {
                    if let Some(date) = serial_to_date(n) {
                        return format_month_year_es(date);
                    }
                }
            }
            let raw = other.as_text_or_empty();
            parse_generic_date(&raw).map_or(raw, format_month_year_es)
        }
    }
}
