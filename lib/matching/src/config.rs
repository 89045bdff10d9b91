//! Scoring and search configuration
//!
//! Component weights and price thresholds are product-tuning values, so
//! they live here instead of being baked into the scorer. The defaults
//! reproduce the reference weighting (color 30, style 20, occasion 15,
//! material 20, category 10, gender 10, price 5).

use gemmatch_core::{BudgetCeilings, ThumbnailConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Points awarded by each score component on a full match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub color: f64,
    pub style: f64,
    pub occasion: f64,
    pub material: f64,
    pub category: f64,
    pub gender: f64,
    pub price: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            color: 30.0,
            style: 20.0,
            occasion: 15.0,
            material: 20.0,
            category: 10.0,
            gender: 10.0,
            price: 5.0,
        }
    }
}

impl ComponentWeights {
    /// Sum of all weights: the nominal score ceiling
    pub fn total(&self) -> f64 {
        self.color + self.style + self.occasion + self.material + self.category + self.gender + self.price
    }

    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("color", self.color),
            ("style", self.style),
            ("occasion", self.occasion),
            ("material", self.material),
            ("category", self.category),
            ("gender", self.gender),
            ("price", self.price),
        ]
    }
}

/// A price band: items whose price/budget ratio is at most `max_ratio`
/// earn `points`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub max_ratio: f64,
    pub points: f64,
}

impl PriceTier {
    pub const fn new(max_ratio: f64, points: f64) -> Self {
        Self { max_ratio, points }
    }
}

/// Full scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ComponentWeights,

    /// Partial gender credit for unisex items
    #[serde(default = "default_unisex_credit")]
    pub unisex_credit: f64,

    /// Checked in ascending order; first matching tier wins
    #[serde(default = "default_price_tiers")]
    pub price_tiers: Vec<PriceTier>,

    /// Budget assumed for price scoring when the shopper gave none
    #[serde(default = "default_scoring_budget")]
    pub default_budget: f64,

    /// Number of ranked items returned
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Totals are clamped to this value
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

fn default_unisex_credit() -> f64 {
    6.0
}

fn default_price_tiers() -> Vec<PriceTier> {
    vec![
        PriceTier::new(0.5, 5.0),
        PriceTier::new(0.8, 3.0),
        PriceTier::new(1.0, 1.0),
    ]
}

fn default_scoring_budget() -> f64 {
    50_000.0
}

fn default_result_limit() -> usize {
    12
}

fn default_max_score() -> f64 {
    100.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            unisex_credit: default_unisex_credit(),
            price_tiers: default_price_tiers(),
            default_budget: default_scoring_budget(),
            result_limit: default_result_limit(),
            max_score: default_max_score(),
        }
    }
}

impl ScoringConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::NegativeWeight(name.to_string()));
            }
        }

        if self.unisex_credit < 0.0 || self.unisex_credit > self.weights.gender {
            return Err(ConfigError::UnisexCreditOutOfRange {
                credit: self.unisex_credit,
                gender_weight: self.weights.gender,
            });
        }

        let mut previous = f64::NEG_INFINITY;
        for tier in &self.price_tiers {
            if tier.max_ratio < 0.0 || tier.max_ratio <= previous {
                return Err(ConfigError::UnorderedPriceTiers);
            }
            if tier.points < 0.0 || tier.points > self.weights.price {
                return Err(ConfigError::TierPointsOutOfRange(tier.points));
            }
            previous = tier.max_ratio;
        }

        if !(self.max_score > 0.0) {
            return Err(ConfigError::NonPositiveMaxScore(self.max_score));
        }
        if !(self.default_budget > 0.0) {
            return Err(ConfigError::NonPositiveBudget(self.default_budget));
        }
        if self.result_limit == 0 {
            return Err(ConfigError::ZeroResultLimit);
        }

        Ok(())
    }
}

/// Relaxation search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidates fetched per query attempt
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

fn default_candidate_limit() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
        }
    }
}

/// Everything the recommendation pipeline can be tuned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub budgets: BudgetCeilings,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
}

impl RecommenderConfig {
    /// Load a JSON configuration file; missing sections take defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        if self.search.candidate_limit == 0 {
            return Err(ConfigError::ZeroCandidateLimit);
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Weight '{0}' must be a non-negative number")]
    NegativeWeight(String),

    #[error("Unisex credit {credit} must be between 0 and the gender weight {gender_weight}")]
    UnisexCreditOutOfRange { credit: f64, gender_weight: f64 },

    #[error("Price tiers must have strictly ascending, non-negative ratios")]
    UnorderedPriceTiers,

    #[error("Price tier points {0} must be between 0 and the price weight")]
    TierPointsOutOfRange(f64),

    #[error("Default budget must be positive, got {0}")]
    NonPositiveBudget(f64),

    #[error("Maximum score must be positive, got {0}")]
    NonPositiveMaxScore(f64),

    #[error("Result limit cannot be zero")]
    ZeroResultLimit,

    #[error("Candidate limit cannot be zero")]
    ZeroCandidateLimit,

    #[error("Failed to read configuration: {0}")]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl From<ConfigError> for gemmatch_core::Error {
    fn from(e: ConfigError) -> Self {
        gemmatch_core::Error::InvalidConfig(e.to_string())
    }
}
