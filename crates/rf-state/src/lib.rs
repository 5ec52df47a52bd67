//! rf-state: Persistent feature state and mid-round recovery
//!
//! Feature stores fold the metadata of every canonical step into state that
//! must survive a client teardown (sticky wilds today). The manager bundles
//! all stores into one [`RecoverySnapshot`] and hydrates them back before
//! the first render after a reconnect.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rf_state::{PersistentStoreManager, recover};
//!
//! let mut live = PersistentStoreManager::with_builtins();
//! live.apply_outcome(&outcome);
//! let json = live.serialize_all().to_json_string()?;
//!
//! let mut fresh = PersistentStoreManager::with_builtins();
//! let grid = recover(&mut fresh, &json, outcome.final_grid().unwrap(), 10)?;
//! ```

pub mod error;
pub mod manager;
pub mod recovery;
pub mod snapshot;
pub mod sticky;
pub mod store;

pub use error::*;
pub use manager::*;
pub use recovery::*;
pub use snapshot::*;
pub use sticky::*;
pub use store::*;
