//! CanonicalOutcome - the normalized result of one backend round

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feature::FeaturePayload;
use crate::grid::Grid;
use crate::step::Step;

/// Canonical outcome schema version emitted by current adapters
pub const SCHEMA_VERSION: &str = "1.0";

/// Outcome family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeType {
    /// Ordered sequence of steps (cascades, multi-drop)
    Cascade,
}

/// Bet placed for the round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub amount: f64,
    pub currency: String,
}

/// Hints for the rendering layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationHints {
    /// Opaque resume pointer taken from the first step's `current.next`
    #[serde(default)]
    pub restore_step: Option<Value>,
}

/// Engine-agnostic outcome of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOutcome {
    #[serde(rename = "type")]
    pub outcome_type: OutcomeType,
    pub game_id: String,
    pub schema_version: String,
    pub round_id: String,
    pub spin_id: String,
    pub bet: Bet,
    pub total_win: f64,
    pub steps: Vec<Step>,
    pub features: Vec<FeaturePayload>,
    #[serde(default)]
    pub presentation_hints: PresentationHints,
}

impl CanonicalOutcome {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Grid after the last step
    pub fn final_grid(&self) -> Option<&Grid> {
        self.steps.last().map(|s| &s.grid_after)
    }

    /// Find a feature payload by wire kind
    pub fn feature(&self, kind: &str) -> Option<&FeaturePayload> {
        self.features.iter().find(|f| f.kind() == kind)
    }

    /// Did any step trigger free spins?
    pub fn free_spins_triggered(&self) -> bool {
        self.features
            .iter()
            .any(|f| matches!(f, FeaturePayload::FreeSpinsTrigger { triggered: true }))
    }

    /// Total number of wins across all steps
    pub fn win_count(&self) -> usize {
        self.steps.iter().map(|s| s.wins.len()).sum()
    }

    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
