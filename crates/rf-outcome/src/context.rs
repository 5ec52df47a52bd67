//! Round context - what the client knows about a round before its payload arrives

use serde::{Deserialize, Serialize};

/// Context used to pick an adapter and fill outcome fields the payload lacks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundContext {
    /// Game identifier (e.g. "sticky_cascade_5x4")
    pub game_id: String,

    /// Currency override; the adapter default applies when absent
    #[serde(default)]
    pub currency: Option<String>,
}

impl RoundContext {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            currency: None,
        }
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_parse() {
        let ctx: RoundContext = serde_json::from_str(r#"{"gameId":"g1"}"#).unwrap();
        assert_eq!(ctx, RoundContext::new("g1"));

        let ctx: RoundContext =
            serde_json::from_str(r#"{"gameId":"g1","currency":"EUR"}"#).unwrap();
        assert_eq!(ctx.currency.as_deref(), Some("EUR"));
    }
}
