//! The company-wide summary workbook.
//!
//! Every section sheet has its cut-off in row 1, headers in row 2 and data
//! from row 3. Two sheets pack a second table to the right of the first; those
//! rows are read twice, once per column range.

mod branch;
mod totals;

use std::ops::Range;

use serde::Serialize;

use crate::cell::CellValue;
use crate::date::format_summary_cut_off;
use crate::normalize::{has_value, record_from_columns, SheetGrid};
use crate::record::Row;

pub use branch::{branch_of, parse_branch_list, BranchFilter, BranchListError};
pub use totals::{pagado_pendiente_totals, PaymentTotals};

const SIN_EMISION_INDIVIDUAL: Range<usize> = 0..12;
const SIN_EMISION_BY_BRANCH: Range<usize> = 13..25;
const COMPARATIVO_INDIVIDUAL: Range<usize> = 0..10;
const COMPARATIVO_GENERAL: Range<usize> = 12..28;

/// Advisors without new business, plus the per-branch roll-up beside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinEmisionSection {
    pub individuals: Vec<Row>,
    pub summary_by_sucursal: Vec<Row>,
}

/// Year-over-year life comparison per advisor, plus one company total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoVidaSection {
    pub individuals: Vec<Row>,
    pub general_summary: Option<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryWorkbook {
    pub fecha_corte: String,
    pub pagado_pendiente: Vec<Row>,
    pub asesores_sin_emision: SinEmisionSection,
    pub proactivos: Vec<Row>,
    pub comparativo_vida: ComparativoVidaSection,
}

/// Raw grids read from the summary workbook. A `None` section is a sheet the
/// workbook does not contain.
#[derive(Debug, Clone, Default)]
pub struct SummaryGrids {
    /// Cell A1 of the workbook's first sheet.
    pub cut_off: CellValue,
    pub pagado_pendiente: Option<SheetGrid>,
    pub asesores_sin_emision: Option<SheetGrid>,
    pub proactivos: Option<SheetGrid>,
    pub comparativo_vida: Option<SheetGrid>,
}

/// Builds every section from the raw grids.
#[must_use]
pub fn build_summary_workbook(grids: &SummaryGrids) -> SummaryWorkbook {
    SummaryWorkbook {
        fecha_corte: format_summary_cut_off(&grids.cut_off),
        pagado_pendiente: grids.pagado_pendiente.as_deref().map(flat_section).unwrap_or_default(),
        asesores_sin_emision: grids
            .asesores_sin_emision
            .as_deref()
            .map(sin_emision_section)
            .unwrap_or_default(),
        proactivos: grids.proactivos.as_deref().map(flat_section).unwrap_or_default(),
        comparativo_vida: grids
            .comparativo_vida
            .as_deref()
            .map(comparativo_vida_section)
            .unwrap_or_default(),
    }
}

/// Splits a section grid into its header row and data rows; `None` when the
/// sheet has fewer than two rows.
fn split_section(grid: &[Vec<CellValue>]) -> Option<(&[CellValue], &[Vec<CellValue>])> {
    match grid {
        [_, headers, data @ ..] => Some((headers.as_slice(), data)),
        _ => None,
    }
}

/// One record per row whose first column holds a value, across all headers.
#[must_use]
pub fn flat_section(grid: &[Vec<CellValue>]) -> Vec<Row> {
    let Some((headers, data)) = split_section(grid) else {
        return Vec::new();
    };
    data.iter()
        .filter(|row| has_value(row, 0))
        .map(|row| record_from_columns(headers, row, 0..headers.len()))
        .collect()
}

/// A row may yield an individual record, a branch record, both, or neither.
#[must_use]
pub fn sin_emision_section(grid: &[Vec<CellValue>]) -> SinEmisionSection {
    let mut section = SinEmisionSection::default();
    let Some((headers, data)) = split_section(grid) else {
        return section;
    };
    for row in data {
        if has_value(row, SIN_EMISION_INDIVIDUAL.start) {
            section
                .individuals
                .push(record_from_columns(headers, row, SIN_EMISION_INDIVIDUAL));
        }
        if has_value(row, SIN_EMISION_BY_BRANCH.start) {
            section
                .summary_by_sucursal
                .push(record_from_columns(headers, row, SIN_EMISION_BY_BRANCH));
        }
    }
    section
}

/// The general summary is taken from the first row that has one; later
/// candidates are ignored.
#[must_use]
pub fn comparativo_vida_section(grid: &[Vec<CellValue>]) -> ComparativoVidaSection {
    let mut section = ComparativoVidaSection::default();
    let Some((headers, data)) = split_section(grid) else {
        return section;
    };
    let mut captured = false;
    for row in data {
        if has_value(row, COMPARATIVO_INDIVIDUAL.start) {
            section
                .individuals
                .push(record_from_columns(headers, row, COMPARATIVO_INDIVIDUAL));
        }
        if !captured && has_value(row, COMPARATIVO_GENERAL.start) {
            section.general_summary = Some(record_from_columns(headers, row, COMPARATIVO_GENERAL));
            captured = true;
        }
    }
    section
}

impl SummaryWorkbook {
    /// Keeps only rows belonging to the branches in `filter`. The comparativo
    /// general summary is recomputed from the remaining individuals.
    #[must_use]
    pub fn filter_by_branch(&self, filter: &BranchFilter) -> SummaryWorkbook {
        branch::filter_workbook(self, filter)
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
