//! Non-linear remap from a raw aggregate to the 0-100 headline score.
//!
//! Raw aggregates cluster around the middle. A steepened sigmoid pushes them
//! apart, then a piecewise-linear table lands them in the score bands people
//! read intuitively.

/// Default amplification strength. 1 is mild, ≥3.5 extreme.
pub const DEFAULT_AMPLIFICATION_POWER: f64 = 2.5;

/// `(lower bound, output base, slope)`, checked top-down with `s > lower`.
/// The last row catches everything at or below 0.1.
const BANDS: [(f64, f64, f64); 7] = [
    (0.85, 0.88, 0.47),
    (0.75, 0.78, 1.0),
    (0.6, 0.65, 0.87),
    (0.4, 0.45, 1.0),
    (0.25, 0.25, 1.33),
    (0.1, 0.15, 0.67),
    (f64::NEG_INFINITY, 0.05, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAmplifier {
    power: f64,
}

impl Default for ScoreAmplifier {
    fn default() -> Self {
        Self::new(DEFAULT_AMPLIFICATION_POWER)
    }
}

impl ScoreAmplifier {
    /// `power` is expected to be validated by the caller (see `Config`).
    pub fn new(power: f64) -> Self {
        Self { power }
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn steepness(&self) -> f64 {
        self.power * 2.0
    }

    pub fn sigmoid(&self, raw: f64) -> f64 {
        1.0 / (1.0 + (-self.steepness() * (raw - 0.5)).exp())
    }

    pub fn amplify(&self, raw: f64) -> u8 {
        let output = remap(self.sigmoid(raw)).clamp(0.0, 1.0);
        (output * 100.0).round() as u8
    }
}

/// Piecewise-linear band remap of a sigmoid output.
pub fn remap(s: f64) -> f64 {
    let (lower, base, slope) = BANDS
        .iter()
        .copied()
        .find(|&(lower, _, _)| s > lower)
        .unwrap_or(BANDS[BANDS.len() - 1]);
    // the catch-all band is anchored at zero rather than at its lower bound
    let anchor = if lower.is_finite() { lower } else { 0.0 };
    base + (s - anchor) * slope
}
