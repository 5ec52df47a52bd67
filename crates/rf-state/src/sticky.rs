//! Sticky Wilds - wild positions that persist across the steps of a round

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use rf_outcome::{Grid, StepMeta, SymbolId};
use serde::Deserialize;
use serde_json::Value;

use crate::error::StateError;
use crate::store::{PersistentFeatureStore, is_truthy};

/// Registry key of the sticky-wild store
pub const STICKY_WILDS_KEY: &str = "sticky_wilds";

/// Axis order of a two-part coordinate key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// `"col,row"`
    ColRow,
    /// `"row,col"`
    RowCol,
}

/// Axis order of backend sticky-wild keys.
///
/// Keys are read as `"col,row"`. The backend contract does not state the
/// order; this needs confirmation from the backend team before a game
/// with a non-square sticky layout ships.
pub const STICKY_KEY_AXIS_ORDER: AxisOrder = AxisOrder::ColRow;

/// Decoded sticky-wild coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StickyCoord {
    pub col: usize,
    pub row: usize,
}

impl StickyCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Decode a backend key. Returns `None` for anything that is not two
    /// comma-separated plain decimal integers (no sign, padding or leading
    /// zeros), so every accepted key formats back to the same text.
    pub fn parse(key: &str) -> Option<Self> {
        let (first, second) = key.split_once(',')?;
        let first = parse_axis(first)?;
        let second = parse_axis(second)?;
        Some(match STICKY_KEY_AXIS_ORDER {
            AxisOrder::ColRow => Self::new(first, second),
            AxisOrder::RowCol => Self::new(second, first),
        })
    }
}

fn parse_axis(part: &str) -> Option<usize> {
    let plain = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !plain || (part.len() > 1 && part.starts_with('0')) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for StickyCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match STICKY_KEY_AXIS_ORDER {
            AxisOrder::ColRow => write!(f, "{},{}", self.col, self.row),
            AxisOrder::RowCol => write!(f, "{},{}", self.row, self.col),
        }
    }
}

/// Serialized shape: `{ "wilds": ["col,row", ...] }`
#[derive(Debug, Default, Deserialize)]
struct StickyWildsBlob {
    #[serde(default)]
    wilds: Vec<String>,
}

/// Tracks occupied sticky-wild coordinates for the current round.
///
/// Grows monotonically through `apply_from_step` and only shrinks on
/// `reset` or `hydrate`. Malformed keys are skipped with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickyWildStore {
    wilds: BTreeSet<StickyCoord>,
}

impl StickyWildStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate directly
    pub fn insert(&mut self, coord: StickyCoord) -> bool {
        self.wilds.insert(coord)
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        self.wilds.contains(&StickyCoord::new(col, row))
    }

    /// Stored coordinates, ordered by column then row
    pub fn coords(&self) -> impl Iterator<Item = &StickyCoord> {
        self.wilds.iter()
    }

    pub fn len(&self) -> usize {
        self.wilds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wilds.is_empty()
    }

    /// Overlay stored coordinates onto a row-major grid.
    ///
    /// Returns a new grid; the input is untouched. Coordinates outside the
    /// grid are skipped.
    pub fn apply_to_grid(&self, grid: &Grid, sticky_symbol: SymbolId) -> Grid {
        let mut out = grid.clone();
        for coord in &self.wilds {
            match out.get_mut(coord.row).and_then(|row| row.get_mut(coord.col)) {
                Some(cell) => *cell = sticky_symbol,
                None => log::warn!("Sticky wild {} lies outside the grid, skipped", coord),
            }
        }
        out
    }

    fn insert_key(&mut self, key: &str) {
        match StickyCoord::parse(key) {
            Some(coord) => {
                self.wilds.insert(coord);
            }
            None => log::warn!("Skipping malformed sticky wild key '{}'", key),
        }
    }
}

impl PersistentFeatureStore for StickyWildStore {
    fn apply_from_step(&mut self, meta: &StepMeta) {
        for (key, value) in &meta.sticky_wilds {
            if is_truthy(value) {
                self.insert_key(key);
            }
        }
    }

    fn serialize(&self) -> Value {
        let wilds: Vec<String> = self.wilds.iter().map(|c| c.to_string()).collect();
        serde_json::json!({ "wilds": wilds })
    }

    fn hydrate(&mut self, data: &Value) -> Result<(), StateError> {
        if data.is_null() {
            return Ok(());
        }
        let blob = StickyWildsBlob::deserialize(data)
            .map_err(|e| StateError::MalformedBlob(e.to_string()))?;

        self.wilds.clear();
        for key in &blob.wilds {
            self.insert_key(key);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.wilds.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
