//! Ingest errors

use thiserror::Error;

/// Stable machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRawSchema,
    NoAdapter,
    Config,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRawSchema => "INVALID_RAW_SCHEMA",
            Self::NoAdapter => "NO_ADAPTER",
            Self::Config => "CONFIG",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning a backend payload into a canonical outcome
///
/// Validation failures are never retried here: a malformed payload is a
/// contract violation with the transport boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Any local validation failure of the raw payload
    #[error("INVALID_RAW_SCHEMA: {0}")]
    InvalidRawSchema(String),

    /// No registered adapter supports the round context
    #[error("No adapter found for game '{game_id}'")]
    NoAdapter { game_id: String },

    /// Adapter configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRawSchema(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRawSchema(_) => ErrorCode::InvalidRawSchema,
            Self::NoAdapter { .. } => ErrorCode::NoAdapter,
            Self::Config(_) => ErrorCode::Config,
        }
    }

    pub fn is_invalid_raw_schema(&self) -> bool {
        matches!(self, Self::InvalidRawSchema(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = IngestError::invalid("grid must have 5 columns");
        assert_eq!(err.code().as_str(), "INVALID_RAW_SCHEMA");
        assert!(err.is_invalid_raw_schema());
        assert!(err.to_string().contains("grid must have 5 columns"));

        let err = IngestError::NoAdapter {
            game_id: "unknown".into(),
        };
        assert_eq!(err.code(), ErrorCode::NoAdapter);
        assert!(!err.is_invalid_raw_schema());
    }
}
