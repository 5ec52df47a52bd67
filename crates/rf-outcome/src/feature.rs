//! Feature payloads derived from a whole round

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed feature payload attached to a canonical outcome
///
/// Adapters always emit exactly one of each kind, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeaturePayload {
    /// Scatter count and positions from the last step
    ScatterInfo {
        count: u32,
        #[serde(default)]
        positions: Vec<Value>,
    },
    /// Whether any step of the round triggered free spins
    FreeSpinsTrigger { triggered: bool },
    /// Raw sticky-wild map from the last step
    StickyWilds {
        #[serde(default)]
        wilds: Map<String, Value>,
    },
}

impl FeaturePayload {
    /// Wire name of the payload kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ScatterInfo { .. } => "scatter_info",
            Self::FreeSpinsTrigger { .. } => "free_spins_trigger",
            Self::StickyWilds { .. } => "sticky_wilds",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_payload_tagging() {
        let payload = FeaturePayload::FreeSpinsTrigger { triggered: true };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "free_spins_trigger");
        assert_eq!(json["triggered"], true);
        assert_eq!(payload.kind(), "free_spins_trigger");
    }

    #[test]
    fn test_feature_payload_parse_defaults() {
        let parsed: FeaturePayload =
            serde_json::from_str(r#"{"kind":"scatter_info","count":3}"#).unwrap();
        assert_eq!(
            parsed,
            FeaturePayload::ScatterInfo {
                count: 3,
                positions: Vec::new()
            }
        );
    }
}
