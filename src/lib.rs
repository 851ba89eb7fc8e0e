//! Deterministic compatibility scoring between two personality profiles.
//!
//! Pipeline: [`scoring::compare`] turns two [`core::Profile`]s into
//! per-dimension comparisons, [`scoring::aggregate`] blends them into a raw
//! score, [`scoring::amplify`] spreads that over 0-100. Category scores and
//! top matches/clashes are derived from the same comparisons for display.

pub mod config;
pub mod core;
pub mod provider;
pub mod scoring;

pub use crate::core::{CompatibilityResult, Dimension, Profile};
pub use crate::scoring::{CompatibilityEngine, CompatibilityReport};
