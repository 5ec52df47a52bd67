//! Recovery flow: replayed rounds feed the stores, a snapshot crosses a
//! simulated teardown, and a fresh manager rebuilds the visible grid.

use rf_ingest::{AdapterConfig, AdapterRegistry, FixturePack, ReplayRunner};
use rf_outcome::{CanonicalOutcome, Grid, RoundContext};
use rf_state::{
    PersistentStoreManager, RecoverySnapshot, STICKY_WILDS_KEY, StickyWildStore, recover,
};

const REFERENCE_PACK: &str = include_str!("../../../fixtures/reference_pack.json");
const ADAPTER_TOML: &str = include_str!("../../../fixtures/sticky_cascade.toml");
const STICKY_SYMBOL: u32 = 10;

fn runner() -> ReplayRunner {
    let mut registry = AdapterRegistry::new();
    registry
        .register_config(AdapterConfig::from_toml(ADAPTER_TOML).unwrap())
        .unwrap();

    let mut runner = ReplayRunner::new(registry, RoundContext::new("sticky_cascade_5x4"));
    runner
        .load(FixturePack::from_json_str(REFERENCE_PACK).unwrap())
        .unwrap();
    runner
}

fn play_round(manager: &mut PersistentStoreManager, outcome: &CanonicalOutcome) {
    manager.reset_all();
    manager.apply_outcome(outcome);
}

#[test]
fn test_cascade_round_survives_teardown() {
    let mut runner = runner();
    let mut live = PersistentStoreManager::with_builtins();

    let first = runner.next().unwrap();
    play_round(&mut live, &first);
    assert!(live.get_as::<StickyWildStore>(STICKY_WILDS_KEY).unwrap().is_empty());

    let second = runner.next().unwrap();
    play_round(&mut live, &second);

    let json = live.serialize_all().to_json_string().unwrap();
    assert_eq!(json, r#"{"sticky_wilds":{"wilds":["1,2","3,0"]}}"#);
    drop(live);

    let mut fresh = PersistentStoreManager::with_builtins();
    let last_grid: &Grid = second.final_grid().unwrap();
    let grid = recover(&mut fresh, &json, last_grid, STICKY_SYMBOL).unwrap();

    assert_eq!(grid[0], vec![3, 4, 6, STICKY_SYMBOL, 5]);
    assert_eq!(grid[1], vec![5, 9, 2, 3, 6]);
    assert_eq!(grid[2], vec![7, STICKY_SYMBOL, 9, 3, 7]);
    assert_eq!(grid[3], vec![2, 4, 8, 1, 8]);
    assert_eq!(fresh.serialize_all().to_json_string().unwrap(), json);
}

#[test]
fn test_round_reset_drops_previous_wilds() {
    let mut runner = runner();
    let mut live = PersistentStoreManager::with_builtins();

    for _ in 0..3 {
        let outcome = runner.next().unwrap();
        play_round(&mut live, &outcome);
    }

    // Third round only carries "0,3" truthy; "x,1" is malformed, "4,3" is falsy
    let sticky = live.get_as::<StickyWildStore>(STICKY_WILDS_KEY).unwrap();
    assert_eq!(sticky.len(), 1);
    assert!(sticky.contains(0, 3));
}

#[test]
fn test_snapshot_from_older_client_hydrates_known_keys_only() {
    let mut fresh = PersistentStoreManager::with_builtins();
    let snapshot = RecoverySnapshot::from_json_str(
        r#"{"sticky_wilds":{"wilds":["2,1"]},"retired_store":{"level":3}}"#,
    )
    .unwrap();

    fresh.hydrate_all(&snapshot).unwrap();
    assert!(fresh
        .get_as::<StickyWildStore>(STICKY_WILDS_KEY)
        .unwrap()
        .contains(2, 1));
    assert!(!fresh.contains("retired_store"));
}
