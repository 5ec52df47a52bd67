//! Raw line win → normalized win

use rf_outcome::{GridDims, NormalizedWin};

use crate::error::IngestError;
use crate::raw::RawLineWin;

/// Map one raw line win.
///
/// Returns `Ok(None)` when the record carries no pattern; such records are
/// filtered out, not rejected. Positions cover the first `mc` columns of the
/// pattern, never more than the pattern provides. A consumed pattern entry
/// outside the grid is a schema error.
pub fn map_line_win(
    line: &RawLineWin,
    dims: GridDims,
) -> Result<Option<NormalizedWin>, IngestError> {
    let Some(pattern) = line.p.as_ref() else {
        return Ok(None);
    };

    let positions = pattern
        .iter()
        .take(line.mc)
        .enumerate()
        .map(|(col, &row)| {
            dims.flat_index(col, row).ok_or_else(|| {
                IngestError::invalid(format!(
                    "line win for symbol {}: row {} at column {} is outside the {}x{} grid",
                    line.s, row, col, dims.columns, dims.rows
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(NormalizedWin {
        symbol_id: line.s,
        amount: line.w,
        positions,
    }))
}

/// Map all line wins of a record, dropping those without a pattern
pub fn map_line_wins(
    lines: &[RawLineWin],
    dims: GridDims,
) -> Result<Vec<NormalizedWin>, IngestError> {
    let mut wins = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(win) = map_line_win(line, dims)? {
            wins.push(win);
        }
    }

    let dropped = lines.len() - wins.len();
    if dropped > 0 {
        log::debug!("Dropped {} line win(s) without a pattern", dropped);
    }
    Ok(wins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(mc: usize, p: Option<Vec<usize>>) -> RawLineWin {
        RawLineWin {
            s: 1,
            l: Some(0),
            mc,
            w: 50.0,
            p,
        }
    }

    #[test]
    fn test_reference_line_win() {
        let win = map_line_win(&line(3, Some(vec![0, 0, 0, 1, 2])), GridDims::default())
            .unwrap()
            .unwrap();
        assert_eq!(win.symbol_id, 1);
        assert!((win.amount - 50.0).abs() < 0.001);
        assert_eq!(win.positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_positions_are_row_major() {
        // col 0 row 1, col 1 row 2, col 2 row 3
        let win = map_line_win(&line(3, Some(vec![1, 2, 3])), GridDims::default())
            .unwrap()
            .unwrap();
        assert_eq!(win.positions, vec![5, 11, 17]);
    }

    #[test]
    fn test_match_count_clamped_to_pattern() {
        let dims = GridDims::default();
        for (mc, len) in [(0, 5), (2, 5), (5, 5), (7, 3), (3, 0)] {
            let win = map_line_win(&line(mc, Some(vec![0; len])), dims).unwrap().unwrap();
            assert_eq!(win.positions.len(), mc.min(len), "mc={} len={}", mc, len);
        }
    }

    #[test]
    fn test_missing_pattern_dropped() {
        let lines = vec![line(3, None), line(3, Some(vec![0, 0, 0]))];
        let wins = map_line_wins(&lines, GridDims::default()).unwrap();
        assert_eq!(wins.len(), 1);
        assert!(map_line_win(&line(3, None), GridDims::default()).unwrap().is_none());
    }

    #[test]
    fn test_out_of_grid_row_rejected() {
        let dims = GridDims::default();
        for p in [vec![9, 0], vec![4, 0, 0], vec![usize::MAX, 0]] {
            let err = map_line_win(&line(2, Some(p.clone())), dims).unwrap_err();
            assert!(err.is_invalid_raw_schema(), "p={:?}", p);
            assert!(err.to_string().contains("outside the 5x4 grid"));
        }
    }

    #[test]
    fn test_unconsumed_pattern_entries_not_checked() {
        // Only the first `mc` entries become positions
        let win = map_line_win(&line(2, Some(vec![1, 1, 99])), GridDims::default())
            .unwrap()
            .unwrap();
        assert_eq!(win.positions, vec![5, 6]);
    }

    #[test]
    fn test_pattern_longer_than_grid_rejected() {
        let err = map_line_win(&line(6, Some(vec![0; 6])), GridDims::default()).unwrap_err();
        assert!(err.to_string().contains("column 5"));
    }

    #[test]
    fn test_one_bad_line_fails_the_record() {
        let lines = vec![line(3, Some(vec![0, 0, 0])), line(2, Some(vec![0, 7]))];
        assert!(map_line_wins(&lines, GridDims::default()).is_err());
    }
}
