//! Static scoring tables: per-dimension weights and the Choquet interaction terms.
//!
//! Both tables are plain values handed to the engine at construction time.
//! The numbers are hand-tuned and kept as-is for score compatibility.

use serde::{Deserialize, Serialize};

use super::{DIMENSION_COUNT, Dimension};

/// How a single dimension is compared and weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub weight: f64,
    /// `false`: similarity preferred. `true`: moderate difference preferred,
    /// peaking at a difference of 0.5.
    pub is_complementary: bool,
}

impl DimensionConfig {
    const fn similar(weight: f64) -> Self {
        Self { weight, is_complementary: false }
    }

    const fn complementary(weight: f64) -> Self {
        Self { weight, is_complementary: true }
    }
}

/// One `DimensionConfig` per dimension, indexed by `Dimension::index()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTable {
    entries: [DimensionConfig; DIMENSION_COUNT],
}

impl Default for DimensionTable {
    fn default() -> Self {
        Self {
            entries: [
                DimensionConfig::similar(1.0),       // positivity
                DimensionConfig::similar(1.2),       // empathy
                DimensionConfig::similar(0.8),       // engagement
                DimensionConfig::complementary(0.9), // debate
                DimensionConfig::similar(1.3),       // shitpost
                DimensionConfig::similar(1.0),       // meme
                DimensionConfig::similar(1.4),       // intellectual
                DimensionConfig::similar(1.2),       // political
                DimensionConfig::similar(0.9),       // personalSharing
                DimensionConfig::similar(0.7),       // inspirationalQuotes
                DimensionConfig::complementary(0.8), // extroversion
                DimensionConfig::similar(1.5),       // authenticity
                DimensionConfig::similar(1.0),       // optimism
                DimensionConfig::similar(1.5),       // humor
                DimensionConfig::similar(0.9),       // aiGenerated
            ],
        }
    }
}

impl DimensionTable {
    pub fn get(&self, dimension: Dimension) -> DimensionConfig {
        self.entries[dimension.index()]
    }

    /// Replace the weight of one dimension. Non-positive or non-finite
    /// weights are rejected and leave the table unchanged.
    pub fn with_weight(mut self, dimension: Dimension, weight: f64) -> Self {
        if weight.is_finite() && weight > 0.0 {
            self.entries[dimension.index()].weight = weight;
        } else {
            tracing::warn!("Ignoring invalid weight {weight} for {dimension}");
        }
        self
    }
}

/// A signed synergy (positive) or redundancy/conflict (negative) term added
/// to a Choquet coalition when both dimensions are present in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub from: Dimension,
    pub to: Dimension,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionTable {
    entries: Vec<Interaction>,
}

impl Default for InteractionTable {
    fn default() -> Self {
        use Dimension::*;
        let entry = |from, to, bonus| Interaction { from, to, bonus };
        Self {
            entries: vec![
                // symmetric pairs, listed once
                entry(Humor, Shitpost, 0.15),
                entry(Shitpost, Meme, 0.20),
                entry(Humor, Meme, 0.10),
                entry(Intellectual, Debate, 0.10),
                // directional
                entry(Authenticity, Empathy, 0.10),
                entry(Authenticity, PersonalSharing, 0.15),
                entry(Authenticity, AiGenerated, -0.20),
                entry(AiGenerated, Authenticity, -0.20),
                entry(Political, Debate, -0.05),
            ],
        }
    }
}

impl InteractionTable {
    pub fn new(entries: Vec<Interaction>) -> Self {
        Self { entries }
    }

    /// A table with no interaction terms, reducing Choquet to a plain
    /// rank-dependent weighted mean.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Sum of all terms whose two dimensions both satisfy `present`.
    pub fn coalition_bonus(&self, present: impl Fn(Dimension) -> bool) -> f64 {
        self.entries
            .iter()
            .filter(|i| present(i.from) && present(i.to))
            .map(|i| i.bonus)
            .sum()
    }
}
