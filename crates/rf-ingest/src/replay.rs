//! Outcome Replay - fixture packs fed through the adapter pipeline
//!
//! Substitutes a live backend during development and tests: same registry
//! and adapters, raw payloads come from a pre-recorded pack instead of the
//! transport client.
//!
//! ## States
//!
//! ```text
//! Unloaded ──load──► Loaded ──next──► Consuming ──end──► Exhausted (Once)
//!                                         └─────wrap──► Cycling   (Cycle)
//! ```
//!
//! `load` may be called in any state; it replaces the pack and resets the cursor.

use std::path::Path;

use rf_outcome::{CanonicalOutcome, RoundContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::IngestError;
use crate::registry::AdapterRegistry;

/// Replay errors
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("No fixture pack loaded")]
    NotLoaded,

    #[error("Fixture pack exhausted after {served} outcome(s)")]
    Exhausted { served: usize },

    #[error("Fixture pack is empty")]
    EmptyPack,

    #[error("Invalid fixture pack: {0}")]
    Fixture(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// One pre-recorded raw payload
///
/// On disk an entry is either a bare payload or
/// `{ "payload": .., "context": .. }`. Any object with a `payload` key must
/// decode as the wrapped form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Fixture {
    /// Raw backend payload
    pub payload: Value,
    /// Round context override for this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RoundContext>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedFixture {
    payload: Value,
    #[serde(default)]
    context: Option<RoundContext>,
}

impl TryFrom<Value> for Fixture {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.get("payload").is_none() {
            return Ok(Self::new(value));
        }
        let wrapped = WrappedFixture::deserialize(value)
            .map_err(|e| format!("invalid wrapped fixture: {}", e))?;
        Ok(Self {
            payload: wrapped.payload,
            context: wrapped.context,
        })
    }
}

impl Fixture {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            context: None,
        }
    }

    /// Builder: set a round context override
    pub fn with_context(mut self, context: RoundContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Ordered list of fixtures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixturePack {
    pub fixtures: Vec<Fixture>,
}

impl FixturePack {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    /// Pack of bare payloads
    pub fn from_payloads(payloads: impl IntoIterator<Item = Value>) -> Self {
        Self::new(payloads.into_iter().map(Fixture::new).collect())
    }

    /// Parse a JSON array of fixtures
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(json).map_err(|e| ReplayError::Fixture(e.to_string()))
    }

    /// Read a JSON fixture pack from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Fixture(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn push(&mut self, fixture: Fixture) {
        self.fixtures.push(fixture);
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// What happens after the last fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayMode {
    /// Serve each fixture once, then report exhaustion
    #[default]
    Once,
    /// Wrap back to the first fixture
    Cycle,
}

/// Replay runner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    Unloaded,
    Loaded,
    Consuming,
    Exhausted,
    Cycling,
}

/// Replays a fixture pack through an adapter registry
pub struct ReplayRunner {
    registry: AdapterRegistry,
    default_context: RoundContext,
    mode: ReplayMode,
    pack: FixturePack,
    cursor: usize,
    served: usize,
    state: ReplayState,
}

impl ReplayRunner {
    /// Create a runner; `default_context` applies to fixtures without an override
    pub fn new(registry: AdapterRegistry, default_context: RoundContext) -> Self {
        Self {
            registry,
            default_context,
            mode: ReplayMode::default(),
            pack: FixturePack::default(),
            cursor: 0,
            served: 0,
            state: ReplayState::Unloaded,
        }
    }

    /// Builder: set replay mode
    pub fn with_mode(mut self, mode: ReplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Load a fixture pack, replacing any previous one and resetting the cursor
    pub fn load(&mut self, pack: FixturePack) -> Result<(), ReplayError> {
        if pack.is_empty() {
            return Err(ReplayError::EmptyPack);
        }
        log::info!("Loaded fixture pack with {} fixture(s)", pack.len());
        self.pack = pack;
        self.cursor = 0;
        self.served = 0;
        self.state = ReplayState::Loaded;
        Ok(())
    }

    /// Normalize the next fixture and advance the cursor.
    ///
    /// The cursor advances even when normalization fails, so a bad fixture
    /// is reported once and then skipped.
    pub fn next(&mut self) -> Result<CanonicalOutcome, ReplayError> {
        let index = self.advance()?;
        let fixture = &self.pack.fixtures[index];
        let context = fixture.context.as_ref().unwrap_or(&self.default_context);
        Ok(self.registry.normalize(&fixture.payload, context)?)
    }

    /// Next raw payload without advancing
    pub fn peek_raw(&self) -> Option<&Value> {
        match self.state {
            ReplayState::Unloaded | ReplayState::Exhausted => None,
            _ => self
                .pack
                .fixtures
                .get(self.cursor)
                .or_else(|| match self.mode {
                    ReplayMode::Cycle => self.pack.fixtures.first(),
                    ReplayMode::Once => None,
                })
                .map(|f| &f.payload),
        }
    }

    /// Rewind to the first fixture of the loaded pack
    pub fn reset(&mut self) {
        if self.state != ReplayState::Unloaded {
            self.cursor = 0;
            self.served = 0;
            self.state = ReplayState::Loaded;
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    /// Index of the fixture `next` will serve
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Fixtures left in the current pass
    pub fn remaining(&self) -> usize {
        self.pack.len().saturating_sub(self.cursor)
    }

    /// Outcomes served since the last load or reset
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ReplayState::Exhausted
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Move the cursor, returning the index to serve
    fn advance(&mut self) -> Result<usize, ReplayError> {
        match self.state {
            ReplayState::Unloaded => return Err(ReplayError::NotLoaded),
            ReplayState::Exhausted => {
                return Err(ReplayError::Exhausted {
                    served: self.served,
                });
            }
            _ => {}
        }

        if self.cursor >= self.pack.len() {
            // Only reachable in Cycle mode; Once transitions to Exhausted below
            log::info!("Fixture pack wrapped after {} outcome(s)", self.served);
            self.cursor = 0;
            self.state = ReplayState::Cycling;
        }

        let index = self.cursor;
        self.cursor += 1;
        self.served += 1;

        if self.state == ReplayState::Loaded {
            self.state = ReplayState::Consuming;
        }
        if self.cursor >= self.pack.len() && self.mode == ReplayMode::Once {
            log::debug!("Fixture pack exhausted after {} outcome(s)", self.served);
            self.state = ReplayState::Exhausted;
        }
        Ok(index)
    }
}
