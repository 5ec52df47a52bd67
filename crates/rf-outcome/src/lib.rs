//! # rf-outcome - ReelForge Canonical Round Outcome
//!
//! Engine-agnostic representation of a backend round result.
//! Every backend adapter produces a [`CanonicalOutcome`]; every consumer
//! (grid rendering, win presentation, feature persistence) reads only this.
//!
//! ## Shape
//!
//! ```text
//! CanonicalOutcome (CASCADE)
//!     │
//!     ├── Bet / total win / identifiers
//!     ├── Vec<Step>
//!     │     ├── grid_after (rows × columns, row-major)
//!     │     ├── Vec<NormalizedWin>
//!     │     └── StepMeta (step type, request key, sticky map, scatter, trigger)
//!     ├── Vec<FeaturePayload> (scatter_info, free_spins_trigger, sticky_wilds)
//!     └── PresentationHints
//! ```

pub mod context;
pub mod feature;
pub mod grid;
pub mod outcome;
pub mod step;

pub use context::*;
pub use feature::*;
pub use grid::*;
pub use outcome::*;
pub use step::*;
