//! Raw backend payload schema
//!
//! ```text
//! { success, balance, results: { <requestKey>: { data: RoundRecord | [RoundRecord] } } }
//! ```
//!
//! Field names follow the backend (camelCase). The result container keeps
//! backend key order (`serde_json` with `preserve_order`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::IngestError;

/// Treat an explicit JSON `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level backend response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    /// Producer-side success flag; absent counts as failure
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub balance: Option<f64>,

    /// Result container keyed by request identifier, in backend order
    pub results: Map<String, Value>,
}

impl RawPayload {
    /// Validate an untyped JSON value against the raw schema
    pub fn from_value(raw: &Value) -> Result<Self, IngestError> {
        if !raw.is_object() {
            return Err(IngestError::invalid("raw payload must be a JSON object"));
        }
        let payload = Self::deserialize(raw)
            .map_err(|e| IngestError::invalid(format!("malformed raw payload: {}", e)))?;
        payload.ensure_success()?;
        Ok(payload)
    }

    /// Fail if the producer signaled failure
    pub fn ensure_success(&self) -> Result<(), IngestError> {
        if self.success {
            Ok(())
        } else {
            Err(IngestError::invalid(
                "backend signaled failure (success=false)",
            ))
        }
    }

    /// Request keys in backend order
    pub fn request_keys(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(|k| k.as_str())
    }

    /// Decode the entry stored under `key`
    pub fn entry(&self, key: &str) -> Result<RawResultEntry, IngestError> {
        let value = self
            .results
            .get(key)
            .ok_or_else(|| IngestError::invalid(format!("no result entry for key '{}'", key)))?;
        RawResultEntry::deserialize(value).map_err(|e| {
            IngestError::invalid(format!("malformed result entry '{}': {}", key, e))
        })
    }
}

/// One entry of the result container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResultEntry {
    #[serde(default)]
    pub data: Option<RoundData>,
}

/// Either a single round record or an ordered list (multi-step rounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundData {
    Many(Vec<RoundRecord>),
    One(Box<RoundRecord>),
}

impl RoundData {
    /// Coerce to a list so single- and multi-step rounds share one path
    pub fn into_records(self) -> Vec<RoundRecord> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![*record],
        }
    }
}

/// One round-data record (one step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    #[serde(default)]
    pub game_type: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bet_amount: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_spin_won: f64,

    /// Running total won up to and including this record
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_won: f64,

    /// Mid-round resume pointer
    #[serde(default)]
    pub current: Option<RoundPointer>,

    pub spin_result: SpinResultBlock,
}

impl RoundRecord {
    /// Resume pointer value, if the backend sent one
    pub fn next_pointer(&self) -> Option<&Value> {
        self.current
            .as_ref()
            .and_then(|c| c.next.as_ref())
            .filter(|v| !v.is_null())
    }
}

/// `current` block of a round record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundPointer {
    #[serde(default)]
    pub next: Option<Value>,
}

/// Spin result block of a round record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResultBlock {
    /// Column-major: `grid[col][row]`
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid: Vec<Vec<u32>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub lines: Vec<RawLineWin>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scatter_count: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scatter_positions: Vec<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub trigger_free_game: bool,

    /// `"col,row"` → value; truthy values mark a sticky wild
    #[serde(default, deserialize_with = "null_as_default")]
    pub sticky_wilds: Map<String, Value>,
}

/// Raw per-line win record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLineWin {
    /// Symbol id
    pub s: u32,

    /// Line id
    #[serde(default)]
    pub l: Option<u32>,

    /// Match count
    #[serde(default)]
    pub mc: usize,

    /// Win amount
    #[serde(default)]
    pub w: f64,

    /// Per-column row index pattern
    #[serde(default)]
    pub p: Option<Vec<usize>>,
}
