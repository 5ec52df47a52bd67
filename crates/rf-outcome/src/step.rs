//! Step - one discrete grid state plus its wins within a round

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::grid::{Grid, SymbolId};

/// Semantic classification of a step inside a multi-step round
///
/// Only the first step of a round is distinguished today. Respins and
/// free-spin steps currently classify as [`StepType::FeatureStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum StepType {
    /// The paid spin that opens the round
    Base,
    /// Any follow-up step (cascade drop, respin, free spin)
    FeatureStep,
}

impl StepType {
    /// Wire name (e.g. `"BASE"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "BASE",
            Self::FeatureStep => "FEATURE_STEP",
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base)
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line win with flattened row-major positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWin {
    pub symbol_id: SymbolId,
    /// Win amount in bet currency
    pub amount: f64,
    /// Flat indices, `row * W + col`
    pub positions: Vec<usize>,
}

/// Per-step metadata consumed by persistent feature stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMeta {
    pub step_type: StepType,
    pub step_index: usize,
    /// Key of the backend result entry this step came from
    pub request_key: String,
    /// Raw sticky-wild map (`"col,row"` → value), passed through untouched
    #[serde(default)]
    pub sticky_wilds: Map<String, Value>,
    #[serde(default)]
    pub scatter_count: u32,
    #[serde(default)]
    pub trigger_free_game: bool,
}

impl StepMeta {
    pub fn new(step_type: StepType, step_index: usize, request_key: impl Into<String>) -> Self {
        Self {
            step_type,
            step_index,
            request_key: request_key.into(),
            sticky_wilds: Map::new(),
            scatter_count: 0,
            trigger_free_game: false,
        }
    }

    /// Builder: attach a raw sticky-wild map
    pub fn with_sticky_wilds(mut self, sticky_wilds: Map<String, Value>) -> Self {
        self.sticky_wilds = sticky_wilds;
        self
    }
}

/// One step of a cascade outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Zero-based, contiguous
    pub index: usize,
    /// Row-major grid after this step resolved
    pub grid_after: Grid,
    #[serde(default)]
    pub wins: Vec<NormalizedWin>,
    /// Flat indices removed by the cascade. Not populated by current adapters.
    #[serde(default)]
    pub removed_positions: Vec<usize>,
    pub meta: StepMeta,
}

impl Step {
    /// Sum of all win amounts in this step
    pub fn win_amount(&self) -> f64 {
        self.wins.iter().map(|w| w.amount).sum()
    }

    pub fn has_wins(&self) -> bool {
        !self.wins.is_empty()
    }
}
