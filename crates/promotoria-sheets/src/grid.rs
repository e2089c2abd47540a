use calamine::{Data, Range};
use promotoria_core::{CellValue, SheetGrid};

/// Converts one calamine cell. Dates become their serial, booleans their
/// spreadsheet text, error cells are empty.
#[must_use]
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        #[allow(clippy::cast_precision_loss)]
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(true) => CellValue::from("TRUE"),
        Data::Bool(false) => CellValue::from("FALSE"),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// The used range as a grid addressed from A1. A range that starts below or
/// right of A1 is padded with empty cells so indices stay absolute.
#[must_use]
pub fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let Some((start_row, start_col)) = range.start() else {
        return SheetGrid::new();
    };
    let pad_rows = usize::try_from(start_row).unwrap_or(0);
    let pad_cols = usize::try_from(start_col).unwrap_or(0);

    let mut grid: SheetGrid = Vec::with_capacity(pad_rows + range.height());
    grid.resize_with(pad_rows, Vec::new);
    for row in range.rows() {
        let mut cells = Vec::with_capacity(pad_cols + row.len());
        cells.resize(pad_cols, CellValue::Empty);
        cells.extend(row.iter().map(cell_value));
        while cells.last().is_some_and(CellValue::is_null) {
            cells.pop();
        }
        grid.push(cells);
    }
    grid
}

/// Drops leading all-empty rows and the leading columns that are empty in
/// every row, so the first populated row and column come first.
#[must_use]
pub fn trim_leading_blanks(mut grid: SheetGrid) -> SheetGrid {
    let first = grid
        .iter()
        .position(|row| !row.iter().all(CellValue::is_null))
        .unwrap_or(grid.len());
    grid.drain(..first);

    let skip = grid
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| row.iter().take_while(|cell| cell.is_null()).count())
        .min()
        .unwrap_or(0);
    if skip > 0 {
        for row in &mut grid {
            row.drain(..skip.min(row.len()));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_cell_kind() {
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_value(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(cell_value(&Data::String("Juan".into())), CellValue::from("Juan"));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::from("TRUE"));
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Empty
        );
    }

    #[test]
    fn offset_range_is_padded_to_a1() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Asesor".into()));
        range.set_value((3, 2), Data::Float(4.0));
        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 4);
        assert!(grid[0].is_empty());
        assert_eq!(grid[2], vec![CellValue::Empty, CellValue::from("Asesor")]);
        assert_eq!(
            grid[3],
            vec![CellValue::Empty, CellValue::Empty, CellValue::Number(4.0)]
        );
    }

    #[test]
    fn leading_blanks_are_trimmed() {
        let grid = vec![
            vec![],
            vec![CellValue::Empty, CellValue::Empty],
            vec![CellValue::Empty, CellValue::from("Asesor"), CellValue::from("Lugar")],
            vec![],
            vec![CellValue::Empty, CellValue::from("Juan"), CellValue::Number(12.0)],
        ];
        let trimmed = trim_leading_blanks(grid);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(
            trimmed[0],
            vec![CellValue::from("Asesor"), CellValue::from("Lugar")]
        );
        assert!(trimmed[1].is_empty());
        assert_eq!(trimmed[2], vec![CellValue::from("Juan"), CellValue::Number(12.0)]);
    }

    #[test]
    fn all_blank_grid_trims_to_empty() {
        let grid = vec![vec![], vec![CellValue::Empty]];
        assert!(trim_leading_blanks(grid).is_empty());
    }

    #[test]
    fn empty_range_is_empty_grid() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }
}
