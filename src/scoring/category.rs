use crate::core::{Category, CategoryScores, DimensionComparison};

/// Weighted average per category, 0-100. Categories without any comparison
/// keep the default of 50. Explanatory only, never feeds the headline score.
pub fn category_scores(comparisons: &[DimensionComparison]) -> CategoryScores {
    let mut scores = CategoryScores::default();
    for category in Category::ALL {
        let (weighted, weight) = comparisons
            .iter()
            .filter(|c| c.dimension.category() == category)
            .fold((0.0, 0.0), |(sum, w), c| (sum + c.score * c.weight, w + c.weight));

        if weight > 0.0 {
            scores.set(category, (weighted / weight * 100.0).round() as u8);
        }
    }
    scores
}
