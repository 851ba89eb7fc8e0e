pub mod aggregate;
pub mod amplify;
pub mod category;
pub mod compare;
pub mod ranking;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::core::tables::{DimensionTable, InteractionTable};
use crate::core::{CompatibilityResult, CompatibilityTier, DimensionComparison, Profile};
use aggregate::{AggregateOutcome, AggregationEngine};
use amplify::ScoreAmplifier;
use compare::DimensionComparator;

/// A scored pair plus the explanation data derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub profile1: String,
    pub profile2: String,
    #[serde(flatten)]
    pub result: CompatibilityResult,
    pub tier: CompatibilityTier,
    pub top_matches: Vec<DimensionComparison>,
    pub top_clashes: Vec<DimensionComparison>,
    pub aggregate: AggregateOutcome,
}

/// The compatibility scoring service.
///
/// Holds only static tables and the amplification power, all injected at
/// construction. Every call is a pure function of its two profiles, so one
/// engine can be shared across threads without locking.
pub struct CompatibilityEngine {
    comparator: DimensionComparator,
    aggregator: AggregationEngine,
    amplifier: ScoreAmplifier,
    top_n: usize,
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::new(
            DimensionTable::default(),
            InteractionTable::default(),
            ScoreAmplifier::default(),
        )
    }
}

impl CompatibilityEngine {
    pub fn new(
        dimensions: DimensionTable,
        interactions: InteractionTable,
        amplifier: ScoreAmplifier,
    ) -> Self {
        Self {
            comparator: DimensionComparator::new(dimensions),
            aggregator: AggregationEngine::new(interactions),
            amplifier,
            top_n: ranking::DEFAULT_TOP_N,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.dimension_table(),
            InteractionTable::default(),
            ScoreAmplifier::new(config.amplification_power()),
        )
        .with_top_n(config.top_n)
    }

    /// How many best/worst dimensions `analyze` reports.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn amplifier(&self) -> &ScoreAmplifier {
        &self.amplifier
    }

    pub fn score(&self, a: &Profile, b: &Profile) -> CompatibilityResult {
        self.evaluate(a, b).0
    }

    pub fn analyze(&self, a: &Profile, b: &Profile) -> CompatibilityReport {
        let (result, aggregate) = self.evaluate(a, b);
        CompatibilityReport {
            profile1: a.id.clone(),
            profile2: b.id.clone(),
            tier: CompatibilityTier::from_score(result.score),
            top_matches: ranking::top_matches(&result.breakdown, self.top_n),
            top_clashes: ranking::top_clashes(&result.breakdown, self.top_n),
            result,
            aggregate,
        }
    }

    fn evaluate(&self, a: &Profile, b: &Profile) -> (CompatibilityResult, AggregateOutcome) {
        let breakdown = self.comparator.compare(a, b);
        let aggregate = self.aggregator.aggregate(&breakdown);
        let score = self.amplifier.amplify(aggregate.raw_score);
        let category_scores = category::category_scores(&breakdown);

        debug!(
            "Scored {} vs {}: {} overlapping dimensions, raw={:.4}, score={score}",
            a.id,
            b.id,
            breakdown.len(),
            aggregate.raw_score,
        );

        (
            CompatibilityResult {
                score,
                breakdown,
                category_scores,
            },
            aggregate,
        )
    }
}
