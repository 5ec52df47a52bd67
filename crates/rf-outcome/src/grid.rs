//! Grid dimensions and row-major grid helpers

use serde::{Deserialize, Serialize};

/// Number of reel columns (W) understood by adapters and renderers
pub const GRID_COLUMNS: usize = 5;

/// Number of visible rows per column (H)
pub const GRID_ROWS: usize = 4;

/// Symbol identifier as sent by the backend
pub type SymbolId = u32;

/// Row-major grid: `grid[row][col]`
pub type Grid = Vec<Vec<SymbolId>>;

/// Fixed grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    /// Column count (W)
    pub columns: usize,
    /// Row count (H)
    pub rows: usize,
}

impl GridDims {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Total cell count
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Flat row-major index of a cell (`row * W + col`), `None` outside the grid
    pub fn flat_index(&self, col: usize, row: usize) -> Option<usize> {
        if !self.contains(col, row) {
            return None;
        }
        row.checked_mul(self.columns)?.checked_add(col)
    }

    /// Inverse of [`flat_index`](Self::flat_index), returns `(col, row)`
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        if self.columns == 0 || index >= self.capacity() {
            return None;
        }
        Some((index % self.columns, index / self.columns))
    }

    /// Does the cell lie inside the grid?
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.columns && row < self.rows
    }

    /// Check that a row-major grid has exactly these dimensions
    pub fn matches_row_major(&self, grid: &[Vec<SymbolId>]) -> bool {
        grid.len() == self.rows && grid.iter().all(|row| row.len() == self.columns)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(GRID_COLUMNS, GRID_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index_roundtrip() {
        let dims = GridDims::default();
        assert_eq!(dims.capacity(), 20);
        assert_eq!(dims.flat_index(0, 0), Some(0));
        assert_eq!(dims.flat_index(4, 0), Some(4));
        assert_eq!(dims.flat_index(2, 3), Some(17));
        assert_eq!(dims.cell_of(17), Some((2, 3)));
        assert_eq!(dims.cell_of(20), None);
    }

    #[test]
    fn test_flat_index_outside_grid() {
        let dims = GridDims::default();
        assert_eq!(dims.flat_index(0, 4), None);
        assert_eq!(dims.flat_index(5, 0), None);
        assert_eq!(dims.flat_index(0, usize::MAX), None);
        assert_eq!(GridDims::new(usize::MAX, usize::MAX).flat_index(1, 2), None);
    }

    #[test]
    fn test_matches_row_major() {
        let dims = GridDims::new(2, 3);
        assert!(dims.matches_row_major(&[vec![1, 2], vec![3, 4], vec![5, 6]]));
        assert!(!dims.matches_row_major(&[vec![1, 2, 3], vec![4, 5, 6]]));
        assert!(!dims.contains(2, 0));
        assert!(dims.contains(1, 2));
    }
}
