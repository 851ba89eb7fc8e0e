use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::Dimension;
use crate::core::tables::DimensionTable;
use crate::scoring::amplify::DEFAULT_AMPLIFICATION_POWER;
use crate::scoring::ranking::DEFAULT_TOP_N;

/// Environment override for the amplification power.
pub const AMPLIFICATION_POWER_ENV: &str = "VIBECHECK_AMPLIFICATION_POWER";

pub const MIN_AMPLIFICATION_POWER: f64 = 1.0;
pub const MAX_AMPLIFICATION_POWER: f64 = 5.0;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScoringConfig {
    pub amplification_power: f64,
    pub top_n: usize,
    /// Per-dimension weight overrides, keyed by wire id (`personalSharing`).
    pub weights: HashMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            amplification_power: DEFAULT_AMPLIFICATION_POWER,
            top_n: DEFAULT_TOP_N,
            weights: HashMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Amplification power clamped to the supported range. Non-finite values
    /// fall back to the default.
    pub fn amplification_power(&self) -> f64 {
        let power = self.amplification_power;
        if !power.is_finite() {
            tracing::warn!("Invalid amplification power {power}, using {DEFAULT_AMPLIFICATION_POWER}");
            return DEFAULT_AMPLIFICATION_POWER;
        }
        let clamped = power.clamp(MIN_AMPLIFICATION_POWER, MAX_AMPLIFICATION_POWER);
        if clamped != power {
            tracing::warn!("Amplification power {power} out of range, clamped to {clamped}");
        }
        clamped
    }

    /// Default dimension table with the configured weight overrides applied.
    pub fn dimension_table(&self) -> DimensionTable {
        let mut overrides: Vec<(&String, &f64)> = self.weights.iter().collect();
        overrides.sort_by(|a, b| a.0.cmp(b.0));

        overrides
            .into_iter()
            .fold(DimensionTable::default(), |table, (name, &weight)| {
                match Dimension::from_name(name) {
                    Some(dimension) => table.with_weight(dimension, weight),
                    None => {
                        tracing::warn!("Ignoring weight override for unknown dimension '{name}'");
                        table
                    }
                }
            })
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `VIBECHECK_AMPLIFICATION_POWER` if set and parseable.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(AMPLIFICATION_POWER_ENV) {
            self.apply_power_override(&raw);
        }
    }

    fn apply_power_override(&mut self, raw: &str) {
        match raw.trim().parse::<f64>() {
            Ok(power) => {
                tracing::info!("Amplification power {power} from {AMPLIFICATION_POWER_ENV}");
                self.scoring.amplification_power = power;
            }
            Err(e) => {
                tracing::warn!("Ignoring {AMPLIFICATION_POWER_ENV}={raw:?}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.amplification_power, 2.5);
        assert_eq!(config.scoring.top_n, 3);
        assert!(config.scoring.weights.is_empty());
    }

    #[test]
    fn parse_partial_file() {
        let config = Config::parse("[scoring]\ntop_n = 5\n").unwrap();
        assert_eq!(config.scoring.top_n, 5);
        assert_eq!(config.scoring.amplification_power, 2.5);
    }

    #[test]
    fn parse_empty_file() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.scoring.top_n, 3);
    }

    #[test]
    fn parse_weights() {
        let toml = r#"
[scoring]
amplification_power = 3.0

[scoring.weights]
humor = 2.0
personalSharing = 0.5
"#;
        let config = Config::parse(toml).unwrap();
        let table = config.scoring.dimension_table();
        assert_eq!(table.get(Dimension::Humor).weight, 2.0);
        assert_eq!(table.get(Dimension::PersonalSharing).weight, 0.5);
        assert_eq!(table.get(Dimension::Meme).weight, 1.0);
    }

    #[test]
    fn parse_rejects_bad_types() {
        assert!(Config::parse("[scoring]\ntop_n = \"many\"\n").is_err());
    }

    #[test]
    fn unknown_and_invalid_weights_ignored() {
        let mut config = Config::default();
        config.scoring.weights.insert("sarcasm".into(), 2.0);
        config.scoring.weights.insert("meme".into(), -1.0);
        assert_eq!(config.scoring.dimension_table(), DimensionTable::default());
    }

    #[test]
    fn power_clamped() {
        let mut scoring = ScoringConfig::default();
        scoring.amplification_power = 9.0;
        assert_eq!(scoring.amplification_power(), 5.0);
        scoring.amplification_power = 0.2;
        assert_eq!(scoring.amplification_power(), 1.0);
        scoring.amplification_power = f64::NAN;
        assert_eq!(scoring.amplification_power(), 2.5);
        scoring.amplification_power = 3.5;
        assert_eq!(scoring.amplification_power(), 3.5);
    }

    #[test]
    fn power_override_parsing() {
        let mut config = Config::default();
        config.apply_power_override(" 4.0 ");
        assert_eq!(config.scoring.amplification_power, 4.0);
        config.apply_power_override("loud");
        assert_eq!(config.scoring.amplification_power, 4.0);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/here.toml");
        assert_eq!(config.scoring.top_n, 3);
    }
}
