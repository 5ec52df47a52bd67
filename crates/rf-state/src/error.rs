//! State errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// A store blob does not match the store's serialized shape
    #[error("Malformed store blob: {0}")]
    MalformedBlob(String),

    /// Hydration of a registered store failed
    #[error("Failed to hydrate store '{key}': {source}")]
    Hydrate {
        key: String,
        #[source]
        source: Box<StateError>,
    },

    /// Recovery snapshot is not valid JSON of the expected shape
    #[error("Invalid recovery snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
