//! Column-major → row-major grid transposition

use rf_outcome::{Grid, GridDims, SymbolId};

use crate::error::IngestError;

/// Transpose a column-major grid (`input[col][row]`) into row-major form
/// (`output[row][col]`).
///
/// The input must have exactly `dims.columns` columns of exactly
/// `dims.rows` entries each.
pub fn transpose_grid(columns: &[Vec<SymbolId>], dims: GridDims) -> Result<Grid, IngestError> {
    if columns.len() != dims.columns {
        return Err(IngestError::invalid(format!(
            "grid must have {} columns, got {}",
            dims.columns,
            columns.len()
        )));
    }
    if let Some((col, column)) = columns
        .iter()
        .enumerate()
        .find(|(_, column)| column.len() != dims.rows)
    {
        return Err(IngestError::invalid(format!(
            "grid column {} must have {} rows, got {}",
            col,
            dims.rows,
            column.len()
        )));
    }

    Ok((0..dims.rows)
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_reference_grid() {
        let raw = vec![vec![1, 2, 3, 4]; 5];
        let grid = transpose_grid(&raw, GridDims::default()).unwrap();

        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0], vec![1, 1, 1, 1, 1]);
        assert_eq!(grid[1], vec![2, 2, 2, 2, 2]);
        assert_eq!(grid[3], vec![4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_transpose_every_cell() {
        let dims = GridDims::default();
        let raw: Vec<Vec<u32>> = (0..dims.columns)
            .map(|c| (0..dims.rows).map(|r| (c * 10 + r) as u32).collect())
            .collect();
        let grid = transpose_grid(&raw, dims).unwrap();

        for r in 0..dims.rows {
            for c in 0..dims.columns {
                assert_eq!(grid[r][c], raw[c][r], "mismatch at row {} col {}", r, c);
            }
        }
    }

    #[test]
    fn test_transpose_rejects_wrong_column_count() {
        let err = transpose_grid(&[vec![1, 2, 3, 4]], GridDims::default()).unwrap_err();
        assert!(err.is_invalid_raw_schema());
        assert!(err.to_string().contains("5 columns"));
    }

    #[test]
    fn test_transpose_rejects_short_column() {
        let mut raw = vec![vec![1, 2, 3, 4]; 5];
        raw[3].pop();
        let err = transpose_grid(&raw, GridDims::default()).unwrap_err();
        assert!(err.to_string().contains("column 3"));
    }
}
