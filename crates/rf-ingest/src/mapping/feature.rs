//! Feature payload extraction over a whole round

use rf_outcome::FeaturePayload;

use crate::raw::RoundRecord;

/// Derive the round's feature payloads.
///
/// Always returns `[scatter_info, free_spins_trigger, sticky_wilds]`:
/// scatter and sticky data come from the last record, the free-spin trigger
/// is set if any record set it.
pub fn extract_features(records: &[RoundRecord]) -> Vec<FeaturePayload> {
    let last = records.last().map(|r| &r.spin_result);

    let scatter = FeaturePayload::ScatterInfo {
        count: last.map(|s| s.scatter_count).unwrap_or(0),
        positions: last.map(|s| s.scatter_positions.clone()).unwrap_or_default(),
    };

    let triggered = records.iter().any(|r| r.spin_result.trigger_free_game);

    let sticky = FeaturePayload::StickyWilds {
        wilds: last.map(|s| s.sticky_wilds.clone()).unwrap_or_default(),
    };

    vec![
        scatter,
        FeaturePayload::FreeSpinsTrigger { triggered },
        sticky,
    ]
}
