//! # rf-ingest - ReelForge Outcome Ingest
//!
//! Adapters for converting backend round payloads into canonical outcomes.
//!
//! ## Pipeline
//!
//! 1. **Resolve** - `AdapterRegistry` picks the adapter for the round context
//! 2. **Parse** - raw JSON validated against the backend schema
//! 3. **Normalize** - grids transposed, wins flattened, steps classified,
//!    features extracted
//!
//! `ReplayRunner` drives the same pipeline from a recorded fixture pack.

pub mod adapter;
pub mod config;
pub mod error;
pub mod mapping;
pub mod raw;
pub mod registry;
pub mod replay;

pub use adapter::*;
pub use config::*;
pub use error::*;
pub use raw::*;
pub use registry::*;
pub use replay::*;
