use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::cell::CellValue;

/// Column holding the advisor name; the join key for every campaign lookup.
pub const ADVISOR_FIELD: &str = "Asesor";

/// Column holding the campaign cut-off date in each campaign sheet.
pub const CUT_OFF_FIELD: &str = "Fecha_Corte";

/// An ordered `header -> cell` mapping for one spreadsheet row.
///
/// Insertion order follows column order and is preserved when serialized, so
/// a row renders as a JSON object with its keys in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets `key` to `value`, replacing an earlier value under the same key
    /// in place.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// First non-null value among `keys`, in order.
    #[must_use]
    pub fn first_present(&self, keys: &[&str]) -> Option<&CellValue> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_null())
    }

    /// Numeric value of `key`; absent, null and non-numeric cells read as 0.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).map_or(0.0, CellValue::as_number_or_zero)
    }

    /// Numeric value of `key`, substituting `default` when it reads as 0.
    #[must_use]
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        let value = self.number(key);
        if value == 0.0 {
            default
        } else {
            value
        }
    }

    /// Text value of `key`; absent and null cells read as an empty string.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.get(key)
            .map(CellValue::as_text_or_empty)
            .unwrap_or_default()
    }

    /// The advisor name, when the row carries a non-empty text `Asesor` cell.
    #[must_use]
    pub fn advisor(&self) -> Option<&str> {
        match self.get(ADVISOR_FIELD) {
            Some(CellValue::Text(name)) if !name.is_empty() => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a str, &'a CellValue);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Every row of one campaign folder's spreadsheet at the moment it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSnapshot {
    pub campaign: String,
    /// File name (not path) of the workbook the rows came from.
    pub source_file: String,
    pub records: Vec<Row>,
}

impl CampaignSnapshot {
    /// The sheet's declared cut-off: the first record's `Fecha_Corte` cell.
    #[must_use]
    pub fn cut_off(&self) -> Option<&CellValue> {
        self.records
            .first()
            .and_then(|row| row.get(CUT_OFF_FIELD))
            .filter(|value| !value.is_null())
    }

    /// The record for `advisor`. When a sheet repeats a name, the first row wins.
    #[must_use]
    pub fn find_advisor(&self, advisor: &str) -> Option<&Row> {
        self.records
            .iter()
            .find(|row| row.advisor() == Some(advisor))
    }

    pub fn advisor_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(Row::advisor)
    }
}
