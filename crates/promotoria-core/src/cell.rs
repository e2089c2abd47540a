//! Dynamically typed spreadsheet cell values.
//!
//! Campaign sheets carry different columns per campaign, so rows are kept as
//! untyped cells. Every numeric or textual read in the goal engine goes
//! through [`CellValue::as_number_or_zero`] or [`CellValue::as_text_or_empty`].

use serde::{Serialize, Serializer};

/// One cell read from a worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// `true` for a cell with no value at all. An empty string is not null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the cell.
    ///
    /// Text is trimmed and parsed; blank text, unparseable text and
    /// non-finite numbers yield `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            CellValue::Number(_) | CellValue::Empty => None,
        }
    }

    /// Numeric view with the zero default applied to anything non-numeric.
    #[must_use]
    pub fn as_number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Text view of the cell; numbers render without a trailing `.0`.
    #[must_use]
    pub fn as_text_or_empty(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) => match whole_number(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_none(),
            },
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation)]
fn whole_number(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

/// Renders a number the way a spreadsheet export prints it: integers without
/// a fractional part, everything else with the shortest round-trip form.
#[must_use]
pub fn format_number(n: f64) -> String {
    match whole_number(n) {
        Some(i) => i.to_string(),
        None => format!("{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_coercion_defaults_to_zero() {
        assert!((CellValue::Empty.as_number_or_zero()).abs() < f64::EPSILON);
        assert!((CellValue::from("abc").as_number_or_zero()).abs() < f64::EPSILON);
        assert!((CellValue::from("").as_number_or_zero()).abs() < f64::EPSILON);
        assert!((CellValue::Number(f64::NAN).as_number_or_zero()).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(CellValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::from("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn text_view_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::Number(10.0).as_text_or_empty(), "10");
        assert_eq!(CellValue::Number(3.5).as_text_or_empty(), "3.5");
        assert_eq!(CellValue::Empty.as_text_or_empty(), "");
    }

    #[test]
    fn empty_string_is_not_null() {
        assert!(!CellValue::from("").is_null());
        assert!(CellValue::Empty.is_null());
    }

    #[test]
    fn serializes_as_plain_json_values() {
        let values = vec![
            CellValue::Number(45_000.0),
            CellValue::Number(0.25),
            CellValue::from("Juan"),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[45000,0.25,"Juan",null]"#);
    }
}
