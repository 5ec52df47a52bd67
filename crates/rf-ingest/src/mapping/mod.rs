//! Pure mapping functions composed by outcome adapters
//!
//! ```text
//! RoundRecord ──► grid::transpose_grid ──► Step.grid_after
//!             ──► win::map_line_wins   ──► Step.wins
//!             ──► step::classify_step  ──► StepMeta.step_type
//! [RoundRecord] ► feature::extract_features ► CanonicalOutcome.features
//! ```

pub mod feature;
pub mod grid;
pub mod step;
pub mod win;

pub use feature::extract_features;
pub use grid::transpose_grid;
pub use step::{build_step, classify_step};
pub use win::{map_line_win, map_line_wins};
