use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use promotoria_core::summary::build_summary_workbook;
use promotoria_core::{CampaignSettings, CellValue, SheetGrid, SummaryGrids, SummaryWorkbook};

use crate::error::SheetError;
use crate::grid::grid_from_range;

/// Reads the summary workbook configured in `settings` under `root`.
///
/// Returns `Ok(None)` when the file does not exist. Sheets the workbook does
/// not contain produce empty sections.
///
/// # Errors
///
/// Returns [`SheetError`] if the file exists but cannot be parsed.
pub fn load_summary_workbook(
    root: &Path,
    settings: &CampaignSettings,
) -> Result<Option<SummaryWorkbook>, SheetError> {
    let path = root.join(&settings.summary_workbook);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "summary workbook not found");
        return Ok(None);
    }

    let workbook_err = |source| SheetError::Workbook {
        path: path.display().to_string(),
        source,
    };
    let mut workbook = open_workbook_auto(&path).map_err(workbook_err)?;
    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Err(SheetError::NoSheets {
            path: path.display().to_string(),
        });
    };

    let first_grid = grid_from_range(&workbook.worksheet_range(first).map_err(workbook_err)?);
    let cut_off = first_grid
        .first()
        .and_then(|row| row.first())
        .cloned()
        .unwrap_or(CellValue::Empty);

    let mut section = |name: &str| -> Result<Option<SheetGrid>, SheetError> {
        if !sheet_names.iter().any(|s| s == name) {
            tracing::debug!(sheet = name, "summary sheet missing");
            return Ok(None);
        }
        let range = workbook.worksheet_range(name).map_err(workbook_err)?;
        Ok(Some(grid_from_range(&range)))
    };

    let sheets = &settings.summary_sheets;
    let grids = SummaryGrids {
        cut_off,
        pagado_pendiente: section(&sheets.pagado_pendiente)?,
        asesores_sin_emision: section(&sheets.asesores_sin_emision)?,
        proactivos: section(&sheets.proactivos)?,
        comparativo_vida: section(&sheets.comparativo_vida)?,
    };

    Ok(Some(build_summary_workbook(&grids)))
}
