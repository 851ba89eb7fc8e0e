use crate::core::Dimension;

/// A dimension-specific override applied after the base similarity score.
/// Returns `Some(score)` when the rule fires, `None` to keep the base score.
pub trait OverrideRule {
    fn name(&self) -> &str;
    fn dimension(&self) -> Dimension;
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64>;
}

/// Return the full override rule set, at most one rule per dimension.
pub fn default_rules() -> Vec<Box<dyn OverrideRule + Send + Sync>> {
    vec![
        Box::new(ShitpostSynergyRule),
        Box::new(IntellectualGapRule),
        Box::new(HumorGapRule),
        Box::new(PoliticalIntensityRule),
        Box::new(MemeLordsRule),
        Box::new(AiGeneratedRule),
        Box::new(AuthenticityClashRule),
    ]
}

fn both_above(value1: f64, value2: f64, threshold: f64) -> bool {
    value1 > threshold && value2 > threshold
}

// --- Individual Rules ---

/// Two heavy shitposters get along better than plain similarity suggests.
struct ShitpostSynergyRule;
impl OverrideRule for ShitpostSynergyRule {
    fn name(&self) -> &str { "shitpost_synergy" }
    fn dimension(&self) -> Dimension { Dimension::Shitpost }
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64> {
        both_above(value1, value2, 0.7).then(|| (base * 1.5).min(1.0))
    }
}

struct IntellectualGapRule;
impl OverrideRule for IntellectualGapRule {
    fn name(&self) -> &str { "intellectual_gap" }
    fn dimension(&self) -> Dimension { Dimension::Intellectual }
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64> {
        ((value1 - value2).abs() > 0.5).then(|| base * 0.3)
    }
}

struct HumorGapRule;
impl OverrideRule for HumorGapRule {
    fn name(&self) -> &str { "humor_gap" }
    fn dimension(&self) -> Dimension { Dimension::Humor }
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64> {
        ((value1 - value2).abs() > 0.6).then(|| base * 0.2)
    }
}

/// Two highly political profiles either clash hard or agree strongly.
/// Agreement is squared so only near-identical stances keep a high score.
struct PoliticalIntensityRule;
impl OverrideRule for PoliticalIntensityRule {
    fn name(&self) -> &str { "political_intensity" }
    fn dimension(&self) -> Dimension { Dimension::Political }
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64> {
        if !both_above(value1, value2, 0.7) {
            return None;
        }
        if (value1 - value2).abs() > 0.3 {
            Some(base * 0.1)
        } else {
            Some(base * base)
        }
    }
}

struct MemeLordsRule;
impl OverrideRule for MemeLordsRule {
    fn name(&self) -> &str { "meme_lords" }
    fn dimension(&self) -> Dimension { Dimension::Meme }
    fn apply(&self, value1: f64, value2: f64, _base: f64) -> Option<f64> {
        both_above(value1, value2, 0.8).then_some(1.0)
    }
}

struct AiGeneratedRule;
impl OverrideRule for AiGeneratedRule {
    fn name(&self) -> &str { "ai_generated_kinship" }
    fn dimension(&self) -> Dimension { Dimension::AiGenerated }
    fn apply(&self, value1: f64, value2: f64, _base: f64) -> Option<f64> {
        both_above(value1, value2, 0.7).then_some(1.0)
    }
}

/// Very authentic vs. very inauthentic is close to a deal-breaker.
struct AuthenticityClashRule;
impl OverrideRule for AuthenticityClashRule {
    fn name(&self) -> &str { "authenticity_clash" }
    fn dimension(&self) -> Dimension { Dimension::Authenticity }
    fn apply(&self, value1: f64, value2: f64, base: f64) -> Option<f64> {
        let clash = (value1 > 0.8 && value2 < 0.3) || (value1 < 0.3 && value2 > 0.8);
        clash.then(|| base * 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(dimension: Dimension) -> Box<dyn OverrideRule + Send + Sync> {
        default_rules()
            .into_iter()
            .find(|r| r.dimension() == dimension)
            .unwrap()
    }

    #[test]
    fn shitpost_boost_capped_at_one() {
        let rule = ShitpostSynergyRule;
        let score = rule.apply(0.9, 0.85, 0.95).unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shitpost_boost_uncapped() {
        let rule = ShitpostSynergyRule;
        let score = rule.apply(0.75, 0.75, 0.6).unwrap();
        assert!((score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn shitpost_needs_both_high() {
        let rule = ShitpostSynergyRule;
        assert_eq!(rule.apply(0.9, 0.7, 0.8), None);
    }

    #[test]
    fn intellectual_gap_penalized() {
        let rule = IntellectualGapRule;
        let score = rule.apply(0.9, 0.1, 0.2).unwrap();
        assert!((score - 0.06).abs() < 1e-12);
    }

    #[test]
    fn intellectual_small_gap_untouched() {
        let rule = IntellectualGapRule;
        assert_eq!(rule.apply(0.6, 0.1, 0.5), None);
    }

    #[test]
    fn humor_gap_penalized() {
        let rule = HumorGapRule;
        let score = rule.apply(0.95, 0.1, 0.15).unwrap();
        assert!((score - 0.03).abs() < 1e-12);
        assert_eq!(rule.apply(0.65, 0.1, 0.45), None);
    }

    #[test]
    fn political_high_pair_always_squared_in_range() {
        // Both above 0.7 bounds the gap below 0.3, so in-range input never clashes.
        let rule = PoliticalIntensityRule;
        let score = rule.apply(0.75, 1.0, 0.75).unwrap();
        assert!((score - 0.5625).abs() < 1e-12);
    }

    #[test]
    fn political_agreement_squared() {
        let rule = PoliticalIntensityRule;
        let score = rule.apply(0.8, 0.75, 0.95).unwrap();
        assert!((score - 0.9025).abs() < 1e-12);
    }

    #[test]
    fn political_moderate_untouched() {
        let rule = PoliticalIntensityRule;
        assert_eq!(rule.apply(0.7, 0.9, 0.8), None);
    }

    #[test]
    fn meme_lords_force_one() {
        let rule = MemeLordsRule;
        assert_eq!(rule.apply(0.85, 0.9, 0.95), Some(1.0));
        assert_eq!(rule.apply(0.8, 0.9, 0.9), None);
    }

    #[test]
    fn ai_generated_force_one() {
        let rule = AiGeneratedRule;
        assert_eq!(rule.apply(0.71, 0.99, 0.72), Some(1.0));
        assert_eq!(rule.apply(0.7, 0.99, 0.71), None);
    }

    #[test]
    fn authenticity_clash_both_directions() {
        let rule = AuthenticityClashRule;
        let a = rule.apply(0.9, 0.2, 0.3).unwrap();
        let b = rule.apply(0.2, 0.9, 0.3).unwrap();
        assert!((a - 0.03).abs() < 1e-12);
        assert_eq!(a, b);
        assert_eq!(rule.apply(0.8, 0.2, 0.4), None);
    }


    #[test]
    fn at_most_one_rule_per_dimension() {
        let rules = default_rules();
        let mut dims: Vec<Dimension> = rules.iter().map(|r| r.dimension()).collect();
        let len = dims.len();
        dims.sort();
        dims.dedup();
        assert_eq!(len, dims.len());
    }

    #[test]
    fn all_rule_names_unique() {
        let rules = default_rules();
        let mut names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        let len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(len, names.len());
    }

    #[test]
    fn default_rules_cover_expected_dimensions() {
        assert_eq!(default_rules().len(), 7);
        for d in [
            Dimension::Shitpost,
            Dimension::Intellectual,
            Dimension::Humor,
            Dimension::Political,
            Dimension::Meme,
            Dimension::AiGenerated,
            Dimension::Authenticity,
        ] {
            assert_eq!(rule_for(d).dimension(), d);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rules_keep_scores_in_unit_range(v1 in 0.0f64..=1.0, v2 in 0.0f64..=1.0) {
            let base = 1.0 - (v1 - v2).abs();
            for rule in default_rules() {
                if let Some(score) = rule.apply(v1, v2, base) {
                    prop_assert!((0.0..=1.0).contains(&score), "{} gave {}", rule.name(), score);
                }
            }
        }
    }
}
