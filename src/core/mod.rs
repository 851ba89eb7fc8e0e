pub mod tables;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of personality dimensions every profile is described by.
pub const DIMENSION_COUNT: usize = 15;

/// One of the fixed personality axes, each valued 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Positivity,
    Empathy,
    Engagement,
    Debate,
    Shitpost,
    Meme,
    Intellectual,
    Political,
    PersonalSharing,
    InspirationalQuotes,
    Extroversion,
    Authenticity,
    Optimism,
    Humor,
    AiGenerated,
}

impl Dimension {
    /// Canonical order. Breakdowns are always emitted in this order.
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::Positivity,
        Dimension::Empathy,
        Dimension::Engagement,
        Dimension::Debate,
        Dimension::Shitpost,
        Dimension::Meme,
        Dimension::Intellectual,
        Dimension::Political,
        Dimension::PersonalSharing,
        Dimension::InspirationalQuotes,
        Dimension::Extroversion,
        Dimension::Authenticity,
        Dimension::Optimism,
        Dimension::Humor,
        Dimension::AiGenerated,
    ];

    /// Dimensions whose poor alignment caps the final score.
    pub const CRITICAL: [Dimension; 4] = [
        Dimension::Intellectual,
        Dimension::Humor,
        Dimension::Authenticity,
        Dimension::Shitpost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Positivity => "positivity",
            Dimension::Empathy => "empathy",
            Dimension::Engagement => "engagement",
            Dimension::Debate => "debate",
            Dimension::Shitpost => "shitpost",
            Dimension::Meme => "meme",
            Dimension::Intellectual => "intellectual",
            Dimension::Political => "political",
            Dimension::PersonalSharing => "personalSharing",
            Dimension::InspirationalQuotes => "inspirationalQuotes",
            Dimension::Extroversion => "extroversion",
            Dimension::Authenticity => "authenticity",
            Dimension::Optimism => "optimism",
            Dimension::Humor => "humor",
            Dimension::AiGenerated => "aiGenerated",
        }
    }

    /// Parse a wire id such as `personalSharing`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_critical(&self) -> bool {
        Self::CRITICAL.contains(self)
    }

    pub fn category(&self) -> Category {
        match self {
            Dimension::Positivity | Dimension::Empathy => Category::Emotional,
            Dimension::Engagement | Dimension::Debate => Category::Interaction,
            Dimension::Shitpost | Dimension::Meme | Dimension::Intellectual => Category::Content,
            Dimension::Political | Dimension::PersonalSharing | Dimension::InspirationalQuotes => {
                Category::Topics
            }
            Dimension::Extroversion | Dimension::Authenticity => Category::Social,
            Dimension::Optimism => Category::Values,
            Dimension::Humor | Dimension::AiGenerated => Category::Communication,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Explanatory grouping of dimensions. Does not feed the headline score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Emotional,
    Interaction,
    Content,
    Topics,
    Social,
    Values,
    Communication,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Emotional,
        Category::Interaction,
        Category::Content,
        Category::Topics,
        Category::Social,
        Category::Values,
        Category::Communication,
    ];
}

/// A personality profile as handed over by the profile provider.
/// Absent keys and explicit `null` both mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub dimensions: BTreeMap<Dimension, Option<f64>>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dimensions: BTreeMap::new(),
        }
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        self.dimensions.insert(dimension, Some(value));
        self
    }

    /// Record a dimension as explicitly unknown.
    pub fn with_unknown(mut self, dimension: Dimension) -> Self {
        self.dimensions.insert(dimension, None);
        self
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.dimensions.get(&dimension).copied().flatten()
    }

    /// Number of dimensions with a known value.
    pub fn known_count(&self) -> usize {
        Dimension::ALL.iter().filter(|d| self.get(**d).is_some()).count()
    }

    /// Clamp every known value into [0, 1] and drop non-finite ones.
    /// Applied at the provider boundary; the scoring engine assumes clean input.
    pub fn sanitized(mut self) -> Self {
        for value in self.dimensions.values_mut() {
            *value = match *value {
                Some(v) if v.is_finite() => Some(v.clamp(0.0, 1.0)),
                _ => None,
            };
        }
        self
    }
}

/// Per-dimension comparison of two profiles. Only created when both sides
/// have a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionComparison {
    pub dimension: Dimension,
    pub value1: f64,
    pub value2: f64,
    pub difference: f64,
    pub score: f64, // 0-1, after override rules
    pub weight: f64,
}

/// Per-category weighted averages, 0-100. 50 when a category has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub emotional: u8,
    pub interaction: u8,
    pub content: u8,
    pub topics: u8,
    pub social: u8,
    pub values: u8,
    pub communication: u8,
}

impl Default for CategoryScores {
    fn default() -> Self {
        Self {
            emotional: 50,
            interaction: 50,
            content: 50,
            topics: 50,
            social: 50,
            values: 50,
            communication: 50,
        }
    }
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Emotional => self.emotional,
            Category::Interaction => self.interaction,
            Category::Content => self.content,
            Category::Topics => self.topics,
            Category::Social => self.social,
            Category::Values => self.values,
            Category::Communication => self.communication,
        }
    }

    pub fn set(&mut self, category: Category, score: u8) {
        let slot = match category {
            Category::Emotional => &mut self.emotional,
            Category::Interaction => &mut self.interaction,
            Category::Content => &mut self.content,
            Category::Topics => &mut self.topics,
            Category::Social => &mut self.social,
            Category::Values => &mut self.values,
            Category::Communication => &mut self.communication,
        };
        *slot = score;
    }
}

/// Output of one scoring call. Built fresh each time, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub score: u8, // 0-100
    pub breakdown: Vec<DimensionComparison>,
    pub category_scores: CategoryScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityTier {
    Exceptional,
    Strong,
    Good,
    Moderate,
    Low,
    Poor,
}

impl CompatibilityTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 88 {
            CompatibilityTier::Exceptional
        } else if score >= 78 {
            CompatibilityTier::Strong
        } else if score >= 65 {
            CompatibilityTier::Good
        } else if score >= 45 {
            CompatibilityTier::Moderate
        } else if score >= 25 {
            CompatibilityTier::Low
        } else {
            CompatibilityTier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompatibilityTier::Exceptional => "exceptional",
            CompatibilityTier::Strong => "strong",
            CompatibilityTier::Good => "good",
            CompatibilityTier::Moderate => "moderate",
            CompatibilityTier::Low => "low",
            CompatibilityTier::Poor => "poor",
        }
    }
}
