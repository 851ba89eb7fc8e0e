use crate::core::tables::{DimensionConfig, DimensionTable};
use crate::core::{Dimension, DimensionComparison, Profile};

use super::rules::{self, OverrideRule};

/// Base score before any override rule.
///
/// Similarity dimensions score `1 - difference`. Complementary dimensions
/// follow a triangle peaking at a difference of 0.5.
pub fn base_score(config: DimensionConfig, difference: f64) -> f64 {
    if !config.is_complementary {
        1.0 - difference
    } else if difference <= 0.5 {
        difference * 2.0
    } else {
        2.0 - difference * 2.0
    }
}

/// Turns two profiles into one comparison per jointly-known dimension.
pub struct DimensionComparator {
    table: DimensionTable,
    rules: Vec<Box<dyn OverrideRule + Send + Sync>>,
}

impl Default for DimensionComparator {
    fn default() -> Self {
        Self::new(DimensionTable::default())
    }
}

impl DimensionComparator {
    pub fn new(table: DimensionTable) -> Self {
        Self {
            table,
            rules: rules::default_rules(),
        }
    }

    pub fn table(&self) -> &DimensionTable {
        &self.table
    }

    fn rule_for(&self, dimension: Dimension) -> Option<&(dyn OverrideRule + Send + Sync)> {
        self.rules
            .iter()
            .find(|r| r.dimension() == dimension)
            .map(|r| r.as_ref())
    }

    /// Score a single dimension for a known value pair.
    pub fn compare_values(&self, dimension: Dimension, value1: f64, value2: f64) -> DimensionComparison {
        let config = self.table.get(dimension);
        let difference = (value1 - value2).abs();
        let base = base_score(config, difference);
        let score = self
            .rule_for(dimension)
            .and_then(|rule| rule.apply(value1, value2, base))
            .unwrap_or(base);

        DimensionComparison {
            dimension,
            value1,
            value2,
            difference,
            score,
            weight: config.weight,
        }
    }

    /// Compare two profiles in canonical dimension order. Dimensions unknown
    /// on either side are skipped.
    pub fn compare(&self, a: &Profile, b: &Profile) -> Vec<DimensionComparison> {
        Dimension::ALL
            .iter()
            .filter_map(|&dimension| {
                let value1 = a.get(dimension)?;
                let value2 = b.get(dimension)?;
                Some(self.compare_values(dimension, value1, value2))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similar() -> DimensionConfig {
        DimensionConfig { weight: 1.0, is_complementary: false }
    }

    fn complementary() -> DimensionConfig {
        DimensionConfig { weight: 1.0, is_complementary: true }
    }

    #[test]
    fn base_similarity() {
        assert!((base_score(similar(), 0.0) - 1.0).abs() < 1e-12);
        assert!((base_score(similar(), 0.3) - 0.7).abs() < 1e-12);
        assert!((base_score(similar(), 1.0)).abs() < 1e-12);
    }

    #[test]
    fn base_complementary_triangle() {
        assert!((base_score(complementary(), 0.0)).abs() < 1e-12);
        assert!((base_score(complementary(), 0.25) - 0.5).abs() < 1e-12);
        assert!((base_score(complementary(), 0.5) - 1.0).abs() < 1e-12);
        assert!((base_score(complementary(), 0.75) - 0.5).abs() < 1e-12);
        assert!((base_score(complementary(), 1.0)).abs() < 1e-12);
    }

    #[test]
    fn shitpost_scenario() {
        let c = DimensionComparator::default().compare_values(Dimension::Shitpost, 0.9, 0.85);
        assert!((c.difference - 0.05).abs() < 1e-9);
        assert!((c.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn intellectual_scenario() {
        let c = DimensionComparator::default().compare_values(Dimension::Intellectual, 0.9, 0.1);
        assert!((c.score - 0.06).abs() < 1e-9);
    }

    #[test]
    fn meme_scenario() {
        let c = DimensionComparator::default().compare_values(Dimension::Meme, 0.85, 0.9);
        assert_eq!(c.score, 1.0);
    }

    #[test]
    fn political_scenario() {
        let c = DimensionComparator::default().compare_values(Dimension::Political, 0.8, 0.75);
        let base = 1.0 - c.difference;
        assert!((c.score - base * base).abs() < 1e-12);
        assert!((c.score - 0.9025).abs() < 1e-9);
    }

    #[test]
    fn complementary_dimension_peaks_at_half() {
        let comparator = DimensionComparator::default();
        let c = comparator.compare_values(Dimension::Extroversion, 0.2, 0.7);
        assert!((c.score - 1.0).abs() < 1e-9);
        let same = comparator.compare_values(Dimension::Extroversion, 0.6, 0.6);
        assert_eq!(same.score, 0.0);
    }

    #[test]
    fn weight_copied_from_table() {
        let table = DimensionTable::default().with_weight(Dimension::Optimism, 2.5);
        let c = DimensionComparator::new(table).compare_values(Dimension::Optimism, 0.5, 0.5);
        assert_eq!(c.weight, 2.5);
    }

    #[test]
    fn compare_skips_unknown_and_keeps_order() {
        let a = Profile::new("a")
            .with(Dimension::AiGenerated, 0.1)
            .with(Dimension::Positivity, 0.5)
            .with(Dimension::Humor, 0.4)
            .with_unknown(Dimension::Empathy);
        let b = Profile::new("b")
            .with(Dimension::AiGenerated, 0.2)
            .with(Dimension::Positivity, 0.6)
            .with(Dimension::Empathy, 0.9);
        let comparisons = DimensionComparator::default().compare(&a, &b);
        let dims: Vec<Dimension> = comparisons.iter().map(|c| c.dimension).collect();
        assert_eq!(dims, vec![Dimension::Positivity, Dimension::AiGenerated]);
    }

    #[test]
    fn compare_empty_profiles() {
        let comparisons = DimensionComparator::default().compare(&Profile::new("a"), &Profile::new("b"));
        assert!(comparisons.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scores_in_unit_range_for_every_dimension(
            index in 0usize..Dimension::ALL.len(),
            v1 in 0.0f64..=1.0,
            v2 in 0.0f64..=1.0,
        ) {
            let d = Dimension::ALL[index];
            let c = DimensionComparator::default().compare_values(d, v1, v2);
            prop_assert!((0.0..=1.0).contains(&c.score), "{} ({}, {}) -> {}", d, v1, v2, c.score);
        }

        #[test]
        fn compare_values_is_symmetric(
            index in 0usize..Dimension::ALL.len(),
            v1 in 0.0f64..=1.0,
            v2 in 0.0f64..=1.0,
        ) {
            let d = Dimension::ALL[index];
            let comparator = DimensionComparator::default();
            prop_assert_eq!(
                comparator.compare_values(d, v1, v2).score,
                comparator.compare_values(d, v2, v1).score
            );
        }
    }
}
