//! Recovery snapshot - serialized bundle of all feature stores

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::StateError;

/// `{ <storeKey>: <store blob> }`, e.g. `{ "sticky_wilds": { "wilds": ["1,2"] } }`
///
/// JSON `null` decodes as an empty snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RecoverySnapshot {
    stores: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for RecoverySnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stores = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        Ok(Self {
            stores: stores.unwrap_or_default(),
        })
    }
}

impl RecoverySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, blob: Value) {
        self.stores.insert(key.into(), blob);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.stores.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn to_json_string(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse snapshot text; blank text and `null` give an empty snapshot
    pub fn from_json_str(json: &str) -> Result<Self, StateError> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str(json)?)
    }
}
