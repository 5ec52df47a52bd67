//! Adapter Registry - Central registry for all outcome adapters

use std::sync::Arc;

use parking_lot::Mutex;
use rf_outcome::{CanonicalOutcome, RoundContext};
use serde_json::Value;

use crate::adapter::{CascadeAdapter, OutcomeAdapter};
use crate::config::AdapterConfig;
use crate::error::IngestError;

/// Registry guarded by a single lock around register/resolve
pub type SharedAdapterRegistry = Arc<Mutex<AdapterRegistry>>;

/// Central registry for outcome adapters
///
/// Adapters are kept ordered by priority (lower first); adapters with equal
/// priority keep registration order. Populate once at startup.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn OutcomeAdapter>>,
}

impl AdapterRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: Arc<dyn OutcomeAdapter>) {
        let priority = adapter.priority();
        // Insert after every adapter with priority <= ours
        let at = self
            .adapters
            .iter()
            .position(|a| a.priority() > priority)
            .unwrap_or(self.adapters.len());

        log::info!(
            "Registered outcome adapter '{}' (priority {})",
            adapter.adapter_id(),
            priority
        );
        self.adapters.insert(at, adapter);
    }

    /// Register a config-based cascade adapter
    pub fn register_config(&mut self, config: AdapterConfig) -> Result<(), IngestError> {
        self.register(Arc::new(CascadeAdapter::new(config)?));
        Ok(())
    }

    /// Resolve the first adapter supporting the round
    pub fn resolve(&self, context: &RoundContext) -> Result<Arc<dyn OutcomeAdapter>, IngestError> {
        let adapter = self
            .adapters
            .iter()
            .find(|a| a.supports(context))
            .cloned()
            .ok_or_else(|| IngestError::NoAdapter {
                game_id: context.game_id.clone(),
            })?;

        log::debug!(
            "Resolved adapter '{}' for game '{}'",
            adapter.adapter_id(),
            context.game_id
        );
        Ok(adapter)
    }

    /// Resolve, parse and normalize a raw payload in one call
    pub fn normalize(
        &self,
        raw: &Value,
        context: &RoundContext,
    ) -> Result<CanonicalOutcome, IngestError> {
        let adapter = self.resolve(context)?;
        let payload = adapter.parse(raw)?;
        adapter.to_normalized(&payload, context)
    }

    /// Get adapter by ID
    pub fn get(&self, adapter_id: &str) -> Option<Arc<dyn OutcomeAdapter>> {
        self.adapters
            .iter()
            .find(|a| a.adapter_id() == adapter_id)
            .cloned()
    }

    /// Check if adapter exists
    pub fn contains(&self, adapter_id: &str) -> bool {
        self.adapters.iter().any(|a| a.adapter_id() == adapter_id)
    }

    /// Adapter IDs in resolution order
    pub fn adapter_ids(&self) -> Vec<String> {
        self.adapters
            .iter()
            .map(|a| a.adapter_id().to_string())
            .collect()
    }

    /// Get adapter count
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Wrap in a shared lock
    pub fn into_shared(self) -> SharedAdapterRegistry {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawPayload;
    use rf_outcome::{Bet, OutcomeType, PresentationHints, SCHEMA_VERSION};

    // Mock adapter for testing
    struct MockAdapter {
        id: String,
        priority: i32,
        games: Vec<&'static str>,
    }

    impl MockAdapter {
        fn arc(id: &str, priority: i32, games: Vec<&'static str>) -> Arc<dyn OutcomeAdapter> {
            Arc::new(Self {
                id: id.to_string(),
                priority,
                games,
            })
        }
    }

    impl OutcomeAdapter for MockAdapter {
        fn adapter_id(&self) -> &str {
            &self.id
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn supports(&self, context: &RoundContext) -> bool {
            self.games.contains(&context.game_id.as_str())
        }
        fn parse(&self, raw: &Value) -> Result<RawPayload, IngestError> {
            RawPayload::from_value(raw)
        }
        fn to_normalized(
            &self,
            _payload: &RawPayload,
            context: &RoundContext,
        ) -> Result<CanonicalOutcome, IngestError> {
            Ok(CanonicalOutcome {
                outcome_type: OutcomeType::Cascade,
                game_id: context.game_id.clone(),
                schema_version: SCHEMA_VERSION.to_string(),
                round_id: self.id.clone(),
                spin_id: self.id.clone(),
                bet: Bet {
                    amount: 0.0,
                    currency: "USD".into(),
                },
                total_win: 0.0,
                steps: Vec::new(),
                features: Vec::new(),
                presentation_hints: PresentationHints::default(),
            })
        }
    }

    #[test]
    fn test_registry_operations() {
        let mut registry = AdapterRegistry::new();
        registry.register(MockAdapter::arc("mock-1", 0, vec!["g1"]));

        assert!(registry.contains("mock-1"));
        assert!(!registry.contains("mock-2"));
        assert_eq!(registry.len(), 1);

        let retrieved = registry.get("mock-1");
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().adapter_id(), "mock-1");
    }

    #[test]
    fn test_resolve_by_priority_then_registration() {
        let mut registry = AdapterRegistry::new();
        registry.register(MockAdapter::arc("late", 10, vec!["g1"]));
        registry.register(MockAdapter::arc("tie-a", 1, vec!["g1"]));
        registry.register(MockAdapter::arc("tie-b", 1, vec!["g1"]));
        registry.register(MockAdapter::arc("early", 0, vec!["g2"]));

        assert_eq!(registry.adapter_ids(), vec!["early", "tie-a", "tie-b", "late"]);
        assert_eq!(registry.resolve(&RoundContext::new("g1")).unwrap().adapter_id(), "tie-a");
        assert_eq!(registry.resolve(&RoundContext::new("g2")).unwrap().adapter_id(), "early");
    }

    #[test]
    fn test_resolve_no_adapter() {
        let mut registry = AdapterRegistry::new();
        registry.register(MockAdapter::arc("mock-1", 0, vec!["g1"]));

        let err = registry.resolve(&RoundContext::new("unknown")).err().unwrap();
        assert!(matches!(err, IngestError::NoAdapter { ref game_id } if game_id == "unknown"));
    }

    #[test]
    fn test_normalize_pipeline() {
        let mut registry = AdapterRegistry::new();
        registry.register(MockAdapter::arc("mock-1", 0, vec!["g1"]));

        let raw = serde_json::json!({ "success": true, "results": {} });
        let outcome = registry.normalize(&raw, &RoundContext::new("g1")).unwrap();
        assert_eq!(outcome.round_id, "mock-1");

        let failed = serde_json::json!({ "success": false, "results": {} });
        assert!(registry.normalize(&failed, &RoundContext::new("g1")).is_err());
    }

    #[test]
    fn test_shared_registry() {
        let mut registry = AdapterRegistry::new();
        registry
            .register_config(AdapterConfig::new("sticky-cascade", &["g1"]))
            .unwrap();
        let shared = registry.into_shared();

        let guard = shared.lock();
        assert!(guard.resolve(&RoundContext::new("g1")).is_ok());
    }
}
