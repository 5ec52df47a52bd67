//! Recovery - restore stores from a snapshot and rebuild the visible grid

use rf_outcome::{Grid, SymbolId};

use crate::error::StateError;
use crate::manager::PersistentStoreManager;
use crate::snapshot::RecoverySnapshot;
use crate::sticky::{STICKY_WILDS_KEY, StickyWildStore};

/// Overlay the sticky-wild store registered under `key` onto `grid`.
///
/// Returns `grid` unchanged when no sticky-wild store is registered there.
pub fn reconstruct_grid(
    manager: &PersistentStoreManager,
    key: &str,
    grid: &Grid,
    sticky_symbol: SymbolId,
) -> Grid {
    match manager.get_as::<StickyWildStore>(key) {
        Some(store) => store.apply_to_grid(grid, sticky_symbol),
        None => {
            log::debug!("No sticky wild store under '{}', grid left as is", key);
            grid.clone()
        }
    }
}

/// Hydrate `manager` from a serialized snapshot, then rebuild the grid the
/// player last saw using the built-in sticky-wild store.
pub fn recover(
    manager: &mut PersistentStoreManager,
    snapshot_json: &str,
    last_grid: &Grid,
    sticky_symbol: SymbolId,
) -> Result<Grid, StateError> {
    let snapshot = RecoverySnapshot::from_json_str(snapshot_json)?;
    manager.hydrate_all(&snapshot)?;
    log::info!("Recovered {} persistent store(s)", snapshot.len());
    Ok(reconstruct_grid(manager, STICKY_WILDS_KEY, last_grid, sticky_symbol))
}
