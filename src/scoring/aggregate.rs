//! Raw score aggregation.
//!
//! Seven aggregation methods are computed over the same `(score, weight)`
//! pairs, then an ordered strategy table picks how to blend them based on the
//! shape of the score distribution. Two post-adjustments follow: dampening
//! when critical dimensions are poor on average, and a nudge away from the
//! plain weighted average when it would hide a weak dimension.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DimensionComparison;
use crate::core::tables::InteractionTable;

/// Raw score returned when no dimension overlaps.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Floor applied before logs and fractional powers so zero scores stay finite.
const SCORE_FLOOR: f64 = 0.001;

const WASPAS_LAMBDA: f64 = 0.7;
const PENALTY_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    WeightedAverage,
    Geometric,
    Quadratic,
    PowerHalf,
    Waspas,
    Choquet,
    Penalty,
}

/// Every aggregation method evaluated over one comparison list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodScores {
    pub weighted_avg: f64,
    pub geometric: f64,
    pub quadratic: f64,
    pub power_half: f64,
    pub waspas: f64,
    pub choquet: f64,
    pub penalty: f64,
}

impl MethodScores {
    pub fn get(&self, method: Method) -> f64 {
        match method {
            Method::WeightedAverage => self.weighted_avg,
            Method::Geometric => self.geometric,
            Method::Quadratic => self.quadratic,
            Method::PowerHalf => self.power_half,
            Method::Waspas => self.waspas,
            Method::Choquet => self.choquet,
            Method::Penalty => self.penalty,
        }
    }
}

/// Distribution statistics the strategy table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    pub min_score: f64,
    /// Unweighted mean.
    pub avg_score: f64,
    pub weighted_avg: f64,
    /// 1.0 when no critical dimension is present.
    pub min_critical: f64,
    /// 1.0 when no critical dimension is present.
    pub avg_critical: f64,
}

impl ScoreStats {
    pub fn from_comparisons(comparisons: &[DimensionComparison], weighted_avg: f64) -> Self {
        let scores: Vec<f64> = comparisons.iter().map(|c| c.score).collect();
        let critical: Vec<f64> = comparisons
            .iter()
            .filter(|c| c.dimension.is_critical())
            .map(|c| c.score)
            .collect();

        let (min_critical, avg_critical) = if critical.is_empty() {
            (1.0, 1.0)
        } else {
            (min_of(&critical), mean_of(&critical))
        };

        Self {
            min_score: min_of(&scores),
            avg_score: mean_of(&scores),
            weighted_avg,
            min_critical,
            avg_critical,
        }
    }
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Named outcome of strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// No overlapping dimensions; neutral score.
    NoData,
    /// A critical dimension failed outright.
    CriticalFailure,
    /// Uniformly high scores.
    Excellent,
    /// High average.
    Strong,
    /// At least one very weak dimension.
    WeakLink,
    /// Everything else.
    Mixed,
}

#[derive(Debug, Clone, Copy)]
enum Blend {
    /// Smallest of the scaled method scores.
    MinOf(&'static [(Method, f64)]),
    /// Weighted sum of method scores.
    Weighted(&'static [(Method, f64)]),
}

impl Blend {
    fn evaluate(&self, methods: &MethodScores) -> f64 {
        match self {
            Blend::MinOf(terms) => terms
                .iter()
                .map(|&(m, k)| methods.get(m) * k)
                .fold(f64::INFINITY, f64::min),
            Blend::Weighted(terms) => terms.iter().map(|&(m, k)| methods.get(m) * k).sum(),
        }
    }
}

struct StrategyRule {
    strategy: Strategy,
    applies: fn(&ScoreStats) -> bool,
    blend: Blend,
}

/// Evaluated top to bottom, first match wins. The last row always matches.
static STRATEGY_TABLE: [StrategyRule; 5] = [
    StrategyRule {
        strategy: Strategy::CriticalFailure,
        applies: |s| s.min_critical < 0.25,
        blend: Blend::MinOf(&[
            (Method::Geometric, 0.8),
            (Method::Penalty, 1.0),
            (Method::WeightedAverage, 0.7),
        ]),
    },
    StrategyRule {
        strategy: Strategy::Excellent,
        applies: |s| s.avg_score > 0.85 && s.min_score > 0.6,
        blend: Blend::Weighted(&[
            (Method::Quadratic, 0.4),
            (Method::Waspas, 0.3),
            (Method::Choquet, 0.2),
            (Method::WeightedAverage, 0.1),
        ]),
    },
    StrategyRule {
        strategy: Strategy::Strong,
        applies: |s| s.avg_score > 0.7,
        blend: Blend::Weighted(&[
            (Method::WeightedAverage, 0.3),
            (Method::Geometric, 0.25),
            (Method::Waspas, 0.25),
            (Method::Choquet, 0.2),
        ]),
    },
    StrategyRule {
        strategy: Strategy::WeakLink,
        applies: |s| s.min_score < 0.3,
        blend: Blend::Weighted(&[
            (Method::Penalty, 0.4),
            (Method::Geometric, 0.3),
            (Method::WeightedAverage, 0.3),
        ]),
    },
    StrategyRule {
        strategy: Strategy::Mixed,
        applies: |_| true,
        blend: Blend::Weighted(&[
            (Method::WeightedAverage, 0.35),
            (Method::PowerHalf, 0.25),
            (Method::Waspas, 0.25),
            (Method::Choquet, 0.15),
        ]),
    },
];

fn select_rule(stats: &ScoreStats) -> &'static StrategyRule {
    STRATEGY_TABLE
        .iter()
        .find(|rule| (rule.applies)(stats))
        .unwrap_or(&STRATEGY_TABLE[STRATEGY_TABLE.len() - 1])
}

/// Pick the blending strategy for a score distribution.
pub fn select_strategy(stats: &ScoreStats) -> Strategy {
    select_rule(stats).strategy
}

/// Raw aggregate plus everything that went into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOutcome {
    /// Final raw score in [0, 1], input to the amplifier.
    pub raw_score: f64,
    pub strategy: Strategy,
    pub methods: Option<MethodScores>,
    pub stats: Option<ScoreStats>,
    /// Critical dimensions averaged below 0.5 and scaled the blend down.
    pub critical_dampened: bool,
    /// The blend sat on the weighted average while a dimension was weak,
    /// so it was pushed below it.
    pub differentiated: bool,
}

impl AggregateOutcome {
    fn neutral() -> Self {
        Self {
            raw_score: NEUTRAL_SCORE,
            strategy: Strategy::NoData,
            methods: None,
            stats: None,
            critical_dampened: false,
            differentiated: false,
        }
    }
}

/// Combines per-dimension comparisons into one raw score.
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    interactions: InteractionTable,
}

impl AggregationEngine {
    pub fn new(interactions: InteractionTable) -> Self {
        Self { interactions }
    }

    pub fn aggregate(&self, comparisons: &[DimensionComparison]) -> AggregateOutcome {
        let total_weight: f64 = comparisons.iter().map(|c| c.weight).sum();
        if comparisons.is_empty() || total_weight <= 0.0 {
            debug!("No overlapping dimensions, using neutral raw score");
            return AggregateOutcome::neutral();
        }

        let methods = self.methods(comparisons, total_weight);
        let stats = ScoreStats::from_comparisons(comparisons, methods.weighted_avg);
        let rule = select_rule(&stats);
        let mut raw = rule.blend.evaluate(&methods);

        let critical_dampened = stats.avg_critical < 0.5;
        if critical_dampened {
            raw *= 0.5 + stats.avg_critical;
        }

        let differentiated = (raw - stats.weighted_avg).abs() < 0.05 && stats.min_score < 0.5;
        if differentiated {
            raw = stats.weighted_avg - 0.1;
        }

        let raw_score = raw.clamp(0.0, 1.0);
        debug!(
            "Aggregated {} comparisons: strategy={:?} raw={raw_score:.4} weighted_avg={:.4} min={:.3} avg_critical={:.3}",
            comparisons.len(),
            rule.strategy,
            stats.weighted_avg,
            stats.min_score,
            stats.avg_critical,
        );

        AggregateOutcome {
            raw_score,
            strategy: rule.strategy,
            methods: Some(methods),
            stats: Some(stats),
            critical_dampened,
            differentiated,
        }
    }

    /// Evaluate all seven methods. `total_weight` must be positive.
    pub fn methods(&self, comparisons: &[DimensionComparison], total_weight: f64) -> MethodScores {
        let weighted_avg = weighted_average(comparisons, total_weight);
        let geometric = geometric_mean(comparisons, total_weight);
        MethodScores {
            weighted_avg,
            geometric,
            quadratic: power_mean(comparisons, total_weight, 2.0),
            power_half: power_mean(comparisons, total_weight, 0.5),
            waspas: WASPAS_LAMBDA * weighted_avg + (1.0 - WASPAS_LAMBDA) * geometric,
            choquet: self.choquet(comparisons, total_weight),
            penalty: penalized_average(comparisons, total_weight, weighted_avg),
        }
    }

    /// Choquet-style integral: walk scores upward, crediting each increment
    /// to the coalition of comparisons still at or above it, including any
    /// interaction terms among that coalition.
    pub fn choquet(&self, comparisons: &[DimensionComparison], total_weight: f64) -> f64 {
        let mut sorted: Vec<&DimensionComparison> = comparisons.iter().collect();
        sorted.sort_by(|a, b| a.score.total_cmp(&b.score));

        let mut total = 0.0;
        let mut previous = 0.0;
        for (i, comparison) in sorted.iter().enumerate() {
            let coalition = &sorted[i..];
            let weight: f64 = coalition.iter().map(|c| c.weight).sum();
            let bonus = self
                .interactions
                .coalition_bonus(|d| coalition.iter().any(|c| c.dimension == d));
            total += (comparison.score - previous) * (weight + bonus).max(0.0);
            previous = comparison.score;
        }

        (total / total_weight).clamp(0.0, 1.0)
    }
}

pub fn weighted_average(comparisons: &[DimensionComparison], total_weight: f64) -> f64 {
    comparisons.iter().map(|c| c.score * c.weight).sum::<f64>() / total_weight
}

/// Weighted geometric mean with each score floored at 0.001.
pub fn geometric_mean(comparisons: &[DimensionComparison], total_weight: f64) -> f64 {
    comparisons
        .iter()
        .map(|c| c.score.max(SCORE_FLOOR).powf(c.weight / total_weight))
        .product()
}

/// Weighted power mean for a non-zero exponent.
pub fn power_mean(comparisons: &[DimensionComparison], total_weight: f64, p: f64) -> f64 {
    let sum: f64 = comparisons
        .iter()
        .map(|c| c.weight * c.score.max(SCORE_FLOOR).powf(p))
        .sum();
    (sum / total_weight).powf(1.0 / p)
}

/// Weighted average shrunk once per comparison scoring below 0.4,
/// proportionally to how far below and how heavily weighted it is.
pub fn penalized_average(comparisons: &[DimensionComparison], total_weight: f64, weighted_avg: f64) -> f64 {
    comparisons
        .iter()
        .filter(|c| c.score < PENALTY_THRESHOLD)
        .fold(weighted_avg, |acc, c| {
            let severity = (PENALTY_THRESHOLD - c.score) / PENALTY_THRESHOLD;
            acc * (1.0 - severity * 0.5 * c.weight / total_weight)
        })
}
