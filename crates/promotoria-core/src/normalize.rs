//! Raw sheet grids to header-keyed rows.

use std::collections::HashSet;
use std::ops::Range;

use crate::cell::CellValue;
use crate::record::Row;

/// A worksheet as rows of cells, indexed from A1.
///
/// Rows may be ragged; a cell past the end of its row reads as empty.
pub type SheetGrid = Vec<Vec<CellValue>>;

const EMPTY_HEADER: &str = "__EMPTY";

/// Converts a grid into records using its first row as header.
///
/// * An empty header cell is named `__EMPTY`, `__EMPTY_1`, ...
/// * A repeated header gets `_1`, `_2`, ... suffixes.
/// * Empty data cells contribute no key.
/// * Rows whose cells are all empty are skipped.
#[must_use]
pub fn rows_from_grid(grid: &[Vec<CellValue>]) -> Vec<Row> {
    let Some((header_row, data_rows)) = grid.split_first() else {
        return Vec::new();
    };
    let width = data_rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_row.len()))
        .max()
        .unwrap_or(0);
    let headers = header_names(header_row, width);

    data_rows
        .iter()
        .filter_map(|cells| {
            let row: Row = headers
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !cell.is_null())
                .map(|(header, cell)| (header.clone(), cell.clone()))
                .collect();
            (!row.is_empty()).then_some(row)
        })
        .collect()
}

/// Unique header names for `width` columns.
#[must_use]
pub fn header_names(header_row: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(width);
    (0..width)
        .map(|col| {
            let base = match header_row.get(col) {
                Some(cell @ (CellValue::Number(_) | CellValue::Text(_))) => {
                    let text = cell.as_text_or_empty();
                    if text.is_empty() {
                        EMPTY_HEADER.to_owned()
                    } else {
                        text
                    }
                }
                Some(CellValue::Empty) | None => EMPTY_HEADER.to_owned(),
            };
            let name = unique_name(&base, &seen);
            seen.insert(name.clone());
            name
        })
        .collect()
}

fn unique_name(base: &str, seen: &HashSet<String>) -> String {
    if !seen.contains(base) {
        return base.to_owned();
    }
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Builds a record from `row` over the columns in `columns`, naming each
/// column from `headers` (absolute column indices).
///
/// A column whose header is empty contributes no key. A missing or empty data
/// cell maps to [`CellValue::Empty`].
#[must_use]
pub fn record_from_columns(headers: &[CellValue], row: &[CellValue], columns: Range<usize>) -> Row {
    let mut record = Row::with_capacity(columns.len());
    for col in columns {
        let name = match headers.get(col) {
            Some(header) => header.as_text_or_empty(),
            None => continue,
        };
        if name.is_empty() {
            continue;
        }
        let value = row.get(col).cloned().unwrap_or_default();
        record.insert(name, value);
    }
    record
}

/// `true` when column `col` of `row` holds a value.
#[must_use]
pub fn has_value(row: &[CellValue], col: usize) -> bool {
    row.get(col).is_some_and(|cell| !cell.is_null())
}
