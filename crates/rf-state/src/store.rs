//! Persistent Feature Store trait - one unit of cross-round state

use std::any::Any;

use rf_outcome::StepMeta;
use serde_json::Value;

use crate::error::StateError;

/// A keyed, serializable unit of feature state that survives a client
/// teardown mid-round.
///
/// ## Lifecycle
///
/// 1. `reset()` - at the start of a game round
/// 2. `apply_from_step()` - once per step of each canonical outcome
/// 3. `serialize()` - when building a recovery snapshot
/// 4. `hydrate()` - once during recovery, before the first render
pub trait PersistentFeatureStore: Send {
    /// Fold one step's metadata into the store
    fn apply_from_step(&mut self, meta: &StepMeta);

    /// Serialized blob for the recovery snapshot
    fn serialize(&self) -> Value;

    /// Replace (not merge) the store's state from a serialized blob
    fn hydrate(&mut self, data: &Value) -> Result<(), StateError>;

    /// Clear round-scoped state. Stores without any keep the default no-op.
    fn reset(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Boxed feature store
pub type BoxedFeatureStore = Box<dyn PersistentFeatureStore>;

/// JavaScript-style truthiness of a raw backend value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
