//! Persistent Store Manager - named feature stores behind one snapshot

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rf_outcome::{CanonicalOutcome, StepMeta};

use crate::error::StateError;
use crate::snapshot::RecoverySnapshot;
use crate::sticky::{STICKY_WILDS_KEY, StickyWildStore};
use crate::store::{BoxedFeatureStore, PersistentFeatureStore};

/// Manager guarded by a single lock around apply/hydrate
pub type SharedStoreManager = Arc<Mutex<PersistentStoreManager>>;

/// Keyed registry of persistent feature stores
///
/// Constructed once, populated at startup, then consulted after every round
/// and once during recovery.
#[derive(Default)]
pub struct PersistentStoreManager {
    stores: BTreeMap<String, BoxedFeatureStore>,
}

impl PersistentStoreManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with the built-in stores:
    /// - sticky_wilds
    pub fn with_builtins() -> Self {
        let mut manager = Self::new();
        manager.register(STICKY_WILDS_KEY, Box::new(StickyWildStore::new()));
        manager
    }

    /// Register a store, returning any store previously under `key`
    pub fn register(
        &mut self,
        key: impl Into<String>,
        store: BoxedFeatureStore,
    ) -> Option<BoxedFeatureStore> {
        let key = key.into();
        log::debug!("Registered persistent store '{}'", key);
        self.stores.insert(key, store)
    }

    /// Get a store by key (immutable)
    pub fn get(&self, key: &str) -> Option<&dyn PersistentFeatureStore> {
        self.stores.get(key).map(|s| s.as_ref())
    }

    /// Get a store by key (mutable)
    pub fn get_mut(&mut self, key: &str) -> Option<&mut BoxedFeatureStore> {
        self.stores.get_mut(key)
    }

    /// Get a store by key as its concrete type
    pub fn get_as<T: 'static>(&self, key: &str) -> Option<&T> {
        self.stores
            .get(key)
            .and_then(|s| s.as_any().downcast_ref::<T>())
    }

    /// Get a store by key as its concrete type (mutable)
    pub fn get_as_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.stores
            .get_mut(key)
            .and_then(|s| s.as_any_mut().downcast_mut::<T>())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stores.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.stores.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Feed one step's metadata to every store
    pub fn apply_step(&mut self, meta: &StepMeta) {
        for store in self.stores.values_mut() {
            store.apply_from_step(meta);
        }
    }

    /// Feed every step of an outcome, in order, to every store
    pub fn apply_outcome(&mut self, outcome: &CanonicalOutcome) {
        for step in &outcome.steps {
            self.apply_step(&step.meta);
        }
    }

    /// Serialize every registered store
    pub fn serialize_all(&self) -> RecoverySnapshot {
        let mut snapshot = RecoverySnapshot::new();
        for (key, store) in &self.stores {
            snapshot.insert(key.clone(), store.serialize());
        }
        snapshot
    }

    /// Hydrate every store whose key is in the snapshot.
    ///
    /// Stores absent from the snapshot are left untouched (not reset).
    /// Stores are visited in key order; on failure, stores before the
    /// failing one stay hydrated.
    pub fn hydrate_all(&mut self, snapshot: &RecoverySnapshot) -> Result<(), StateError> {
        for (key, store) in self.stores.iter_mut() {
            if let Some(blob) = snapshot.get(key) {
                store.hydrate(blob).map_err(|e| StateError::Hydrate {
                    key: key.clone(),
                    source: Box::new(e),
                })?;
                log::info!("Hydrated persistent store '{}'", key);
            }
        }
        Ok(())
    }

    /// Reset every store
    pub fn reset_all(&mut self) {
        for store in self.stores.values_mut() {
            store.reset();
        }
    }

    /// Wrap in a shared lock
    pub fn into_shared(self) -> SharedStoreManager {
        Arc::new(Mutex::new(self))
    }
}
