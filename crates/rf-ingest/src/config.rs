//! Adapter Configuration - TOML-based config for backend game variants

use std::collections::HashMap;

use rf_outcome::GridDims;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// How the adapter picks the authoritative entry of a result container.
///
/// Whether the backend can ever send several concurrent result keys, and
/// which one would then be authoritative, is not settled by the backend
/// contract. Only one strategy exists until it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKeySelection {
    /// First key in backend (insertion) order
    #[default]
    FirstInserted,
}

/// Complete adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Unique adapter ID
    pub adapter_id: String,

    /// Name for logs and listings
    #[serde(default)]
    pub display_name: String,

    /// Config version
    #[serde(default = "default_version")]
    pub version: String,

    /// Game identifiers this adapter supports
    #[serde(default)]
    pub game_ids: Vec<String>,

    /// Registry priority (lower runs first)
    #[serde(default)]
    pub priority: i32,

    /// Bet currency when the round context has none
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Result container entry selection
    #[serde(default)]
    pub result_key: ResultKeySelection,

    /// Fixed grid dimensions
    #[serde(default)]
    pub grid: GridDims,

    /// Custom metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            adapter_id: "cascade".to_string(),
            display_name: "Cascade".to_string(),
            version: default_version(),
            game_ids: Vec::new(),
            priority: 0,
            currency: default_currency(),
            result_key: ResultKeySelection::default(),
            grid: GridDims::default(),
            metadata: HashMap::new(),
        }
    }
}

impl AdapterConfig {
    /// Create a new config with required fields
    pub fn new(adapter_id: &str, game_ids: &[&str]) -> Self {
        Self {
            adapter_id: adapter_id.to_string(),
            display_name: adapter_id.to_string(),
            game_ids: game_ids.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, IngestError> {
        toml::from_str(toml_str).map_err(|e| IngestError::Config(e.to_string()))
    }

    /// Save to TOML string
    pub fn to_toml(&self) -> Result<String, IngestError> {
        toml::to_string_pretty(self).map_err(|e| IngestError::Config(e.to_string()))
    }

    /// Builder: set priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set default currency
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// Is the game listed?
    pub fn supports_game(&self, game_id: &str) -> bool {
        self.game_ids.iter().any(|g| g == game_id)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.adapter_id.is_empty() {
            return Err(IngestError::Config(
                "adapter_id cannot be empty".to_string(),
            ));
        }
        if self.game_ids.is_empty() {
            return Err(IngestError::Config(
                "at least one game id must be specified".to_string(),
            ));
        }
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(IngestError::Config(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.grid.columns, self.grid.rows
            )));
        }
        Ok(())
    }
}
