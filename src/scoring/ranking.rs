use crate::core::DimensionComparison;

/// Number of best/worst dimensions surfaced by default.
pub const DEFAULT_TOP_N: usize = 3;

/// Comparisons sorted by score, best first. Ties keep dimension order.
fn sorted_desc(comparisons: &[DimensionComparison]) -> Vec<DimensionComparison> {
    let mut sorted = comparisons.to_vec();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted
}

/// The `n` best-aligned dimensions, best first.
pub fn top_matches(comparisons: &[DimensionComparison], n: usize) -> Vec<DimensionComparison> {
    let mut sorted = sorted_desc(comparisons);
    sorted.truncate(n);
    sorted
}

/// The `n` worst-aligned dimensions, worst first.
pub fn top_clashes(comparisons: &[DimensionComparison], n: usize) -> Vec<DimensionComparison> {
    let sorted = sorted_desc(comparisons);
    let start = sorted.len().saturating_sub(n);
    sorted[start..].iter().rev().cloned().collect()
}
