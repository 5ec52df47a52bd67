//! Outcome Adapter trait and the cascade implementation

use rf_outcome::{
    Bet, CanonicalOutcome, OutcomeType, PresentationHints, RoundContext, SCHEMA_VERSION,
};
use serde_json::Value;
use uuid::Uuid;

use crate::config::{AdapterConfig, ResultKeySelection};
use crate::error::IngestError;
use crate::mapping::{build_step, extract_features};
use crate::raw::RawPayload;

/// Outcome adapter trait - converts one backend game variant's payloads
/// into canonical outcomes
pub trait OutcomeAdapter: Send + Sync {
    /// Unique adapter identifier (e.g., "sticky-cascade")
    fn adapter_id(&self) -> &str;

    /// Registry ordering, lower runs first
    fn priority(&self) -> i32 {
        0
    }

    /// Cheap check whether this adapter handles the round
    fn supports(&self, context: &RoundContext) -> bool;

    /// Validate an untyped payload against the raw schema
    fn parse(&self, raw: &Value) -> Result<RawPayload, IngestError>;

    /// Transform a parsed payload into a canonical outcome
    fn to_normalized(
        &self,
        payload: &RawPayload,
        context: &RoundContext,
    ) -> Result<CanonicalOutcome, IngestError>;
}

/// Adapter for cascade games driven by an [`AdapterConfig`]
#[derive(Debug, Clone)]
pub struct CascadeAdapter {
    config: AdapterConfig,
}

impl CascadeAdapter {
    /// Create an adapter, validating its configuration
    pub fn new(config: AdapterConfig) -> Result<Self, IngestError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create from a TOML config string
    pub fn from_toml(toml_str: &str) -> Result<Self, IngestError> {
        Self::new(AdapterConfig::from_toml(toml_str)?)
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Pick the authoritative request key of the result container
    fn select_result_key<'a>(&self, payload: &'a RawPayload) -> Result<&'a str, IngestError> {
        match self.config.result_key {
            ResultKeySelection::FirstInserted => payload
                .request_keys()
                .next()
                .ok_or_else(|| IngestError::invalid("result container is empty")),
        }
    }
}

impl OutcomeAdapter for CascadeAdapter {
    fn adapter_id(&self) -> &str {
        &self.config.adapter_id
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    fn supports(&self, context: &RoundContext) -> bool {
        self.config.supports_game(&context.game_id)
    }

    fn parse(&self, raw: &Value) -> Result<RawPayload, IngestError> {
        RawPayload::from_value(raw)
    }

    fn to_normalized(
        &self,
        payload: &RawPayload,
        context: &RoundContext,
    ) -> Result<CanonicalOutcome, IngestError> {
        payload.ensure_success()?;

        let request_key = self.select_result_key(payload)?;
        let records = payload
            .entry(request_key)?
            .data
            .ok_or_else(|| {
                IngestError::invalid(format!("result entry '{}' has no data", request_key))
            })?
            .into_records();

        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(IngestError::invalid(format!(
                "result entry '{}' has an empty step list",
                request_key
            )));
        };

        let steps = records
            .iter()
            .enumerate()
            .map(|(index, record)| build_step(index, record, request_key, self.config.grid))
            .collect::<Result<Vec<_>, _>>()?;

        let id = Uuid::new_v4().to_string();
        let outcome = CanonicalOutcome {
            outcome_type: OutcomeType::Cascade,
            game_id: context.game_id.clone(),
            schema_version: SCHEMA_VERSION.to_string(),
            round_id: id.clone(),
            spin_id: id,
            bet: Bet {
                amount: first.bet_amount,
                currency: context
                    .currency
                    .clone()
                    .unwrap_or_else(|| self.config.currency.clone()),
            },
            total_win: last.total_won,
            features: extract_features(&records),
            presentation_hints: PresentationHints {
                restore_step: first.next_pointer().cloned(),
            },
            steps,
        };

        log::debug!(
            "[{}] Normalized '{}': {} step(s), total win {}",
            self.config.adapter_id,
            request_key,
            outcome.steps.len(),
            outcome.total_win
        );

        Ok(outcome)
    }
}
