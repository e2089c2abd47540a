use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};
use promotoria_core::{rows_from_grid, CampaignSnapshot, SheetGrid};

use crate::error::SheetError;
use crate::grid::{grid_from_range, trim_leading_blanks};

pub const WORKBOOK_EXTENSION: &str = ".xlsx";

/// Prefix of the lock files spreadsheet editors leave next to open workbooks.
pub const LOCK_FILE_PREFIX: &str = "~$";

/// `true` for a single path component that stays inside the data root.
#[must_use]
pub fn is_safe_folder_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

/// `true` for workbook file names that are not editor lock files.
#[must_use]
pub fn is_campaign_workbook(file_name: &str) -> bool {
    file_name.ends_with(WORKBOOK_EXTENSION) && !file_name.starts_with(LOCK_FILE_PREFIX)
}

/// The workbook to read from a campaign folder.
///
/// Returns `Ok(None)` when the folder is missing, is not a directory or holds
/// no candidate. Several candidates resolve to the lexically first one.
///
/// # Errors
///
/// Returns [`SheetError::Io`] if the folder cannot be listed.
pub fn find_campaign_file(folder: &Path) -> Result<Option<PathBuf>, SheetError> {
    if !folder.is_dir() {
        return Ok(None);
    }
    let io_err = |source| SheetError::Io {
        path: folder.display().to_string(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_campaign_workbook(name) {
                candidates.push(name.to_owned());
            }
        }
    }
    candidates.sort();

    let Some((selected, ignored)) = candidates.split_first() else {
        return Ok(None);
    };
    if !ignored.is_empty() {
        tracing::warn!(
            folder = %folder.display(),
            selected = %selected,
            ignored = ?ignored,
            "multiple workbooks in campaign folder; using the first"
        );
    }
    Ok(Some(folder.join(selected)))
}

/// Reads the first sheet of the workbook at `path` as an A1-addressed grid.
///
/// # Errors
///
/// Returns [`SheetError`] if the workbook cannot be opened or has no sheets.
pub fn read_first_sheet(path: &Path) -> Result<SheetGrid, SheetError> {
    let workbook_err = |source| SheetError::Workbook {
        path: path.display().to_string(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Err(SheetError::NoSheets {
            path: path.display().to_string(),
        });
    };
    let range = workbook.worksheet_range(&first).map_err(workbook_err)?;
    Ok(grid_from_range(&range))
}

/// Reads the records of the campaign folder `folder` under `root`.
///
/// Any missing folder, missing file, parse failure or empty sheet yields
/// `None`; failures are logged rather than returned.
#[must_use]
pub fn load_campaign(root: &Path, folder: &str) -> Option<CampaignSnapshot> {
    if !is_safe_folder_name(folder) {
        tracing::debug!(folder, "rejected campaign folder name");
        return None;
    }

    let path = match find_campaign_file(&root.join(folder)) {
        Ok(Some(path)) => path,
        Ok(None) => {
            tracing::debug!(folder, "no workbook in campaign folder");
            return None;
        }
        Err(e) => {
            tracing::warn!(folder, error = %e, "failed to list campaign folder");
            return None;
        }
    };
    tracing::debug!(folder, file = %path.display(), "reading campaign workbook");

    let grid = match read_first_sheet(&path) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::warn!(folder, error = %e, "failed to read campaign workbook");
            return None;
        }
    };

    // Header is the first populated row, wherever the used range starts.
    let records = rows_from_grid(&trim_leading_blanks(grid));
    tracing::debug!(folder, rows = records.len(), "campaign workbook parsed");
    if records.is_empty() {
        return None;
    }

    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Some(CampaignSnapshot {
        campaign: folder.to_owned(),
        source_file,
        records,
    })
}
