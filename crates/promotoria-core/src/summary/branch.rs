use std::collections::BTreeSet;

use thiserror::Error;

use super::{ComparativoVidaSection, SinEmisionSection, SummaryWorkbook};
use crate::cell::CellValue;
use crate::record::Row;

/// Columns that may carry the branch code, in lookup order.
const BRANCH_FIELDS: [&str; 3] = ["Sucursal", "SUC", "Suc"];

/// Comparativo general summary keys: previous year, current year as read from
/// the individuals, current year as written, growth, growth %. Spellings
/// follow the workbook, including `Añoa`.
const GENERAL_SUMMARY_KEYS: [(&str, &str, &str, &str, &str); 4] = [
    (
        "Polizas_Pagadas_Año_Anterior",
        "Polizas_Pagadas_Año_Actual",
        "Polizas_Pagadas_Año_Actual",
        "Crec_Polizas_Pagadas",
        "%_Crec_Polizas_Pagadas",
    ),
    (
        "Prima_Pagada_Año_Anterior",
        "Prima_Pagada_Año_Actual",
        "Prima_Pagada_Añoa_Actual",
        "Crec_Prima_Pagada",
        "%_Crec_Prima_Pagada",
    ),
    (
        "Recluta_Año_Anterior",
        "Recluta_Año_Actual",
        "Recluta_Año_Actual",
        "Crec_Recluta",
        "%_Crec_Recluta",
    ),
    (
        "Prima_Pagada_Reclutas_Año_Anterior",
        "Prima_Pagada_Reclutas_Año_Actual",
        "Prima_Pagada_Reclutas_Año_Actual",
        "Crec_Prima_Pagada_Reclutas",
        "%_Crec_Prima_Pagada_Reclutas",
    ),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid branch code '{0}': expected a comma-separated list of integers")]
pub struct BranchListError(pub String);

/// A set of branch codes. An empty filter keeps every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    codes: BTreeSet<i64>,
}

impl BranchFilter {
    #[must_use]
    pub fn new(codes: impl IntoIterator<Item = i64>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        branch_of(row).is_some_and(|code| self.codes.contains(&code))
    }

    fn keep(&self, rows: &[Row]) -> Vec<Row> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Parses `"2692,2856"`. Blank input yields an empty filter.
///
/// # Errors
///
/// Returns `BranchListError` naming the first entry that is not an integer.
pub fn parse_branch_list(raw: &str) -> Result<BranchFilter, BranchListError> {
    let mut codes = BTreeSet::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let code = token
            .parse::<i64>()
            .map_err(|_| BranchListError(token.to_owned()))?;
        codes.insert(code);
    }
    Ok(BranchFilter { codes })
}

/// The row's branch code from `Sucursal`, else `SUC`, else `Suc`.
///
/// Missing values read as 0; non-integral values have no code.
#[must_use]
pub fn branch_of(row: &Row) -> Option<i64> {
    let value = row
        .first_present(&BRANCH_FIELDS)
        .map_or(0.0, CellValue::as_number_or_zero);
    if value.fract() != 0.0 || value.abs() > 1e15 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value as i64)
}

pub(super) fn filter_workbook(workbook: &SummaryWorkbook, filter: &BranchFilter) -> SummaryWorkbook {
    if filter.is_empty() {
        return workbook.clone();
    }

    let comparativo_individuals = filter.keep(&workbook.comparativo_vida.individuals);
    let general_summary = match &workbook.comparativo_vida.general_summary {
        Some(_) if !comparativo_individuals.is_empty() => {
            Some(recompute_general_summary(&comparativo_individuals))
        }
        other => other.clone(),
    };

    SummaryWorkbook {
        fecha_corte: workbook.fecha_corte.clone(),
        pagado_pendiente: filter.keep(&workbook.pagado_pendiente),
        asesores_sin_emision: SinEmisionSection {
            individuals: filter.keep(&workbook.asesores_sin_emision.individuals),
            summary_by_sucursal: filter.keep(&workbook.asesores_sin_emision.summary_by_sucursal),
        },
        proactivos: filter.keep(&workbook.proactivos),
        comparativo_vida: ComparativoVidaSection {
            individuals: comparativo_individuals,
            general_summary,
        },
    }
}

fn recompute_general_summary(individuals: &[Row]) -> Row {
    let sum = |key: &str| individuals.iter().map(|row| row.number(key)).sum::<f64>();
    let mut summary = Row::with_capacity(GENERAL_SUMMARY_KEYS.len() * 4);
    for (previous_key, current_key, current_out, growth_key, pct_key) in GENERAL_SUMMARY_KEYS {
        let previous = sum(previous_key);
        let current = sum(current_key);
        let growth = current - previous;
        summary.insert(previous_key, CellValue::Number(previous));
        summary.insert(current_out, CellValue::Number(current));
        summary.insert(growth_key, CellValue::Number(growth));
        summary.insert(pct_key, CellValue::Number(safe_ratio(growth, previous)));
    }
    summary
}

/// `numerator / denominator`, or 0 when the denominator is 0.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
