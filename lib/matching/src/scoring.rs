//! Weighted preference scoring
//!
//! Each [`ScoreComponent`] is scored on its own. A component whose
//! preference is absent is not evaluated and contributes nothing; the total
//! is the plain sum of the evaluated components, clamped to the configured
//! maximum.

use crate::config::{ComponentWeights, ConfigError, ScoringConfig};
use gemmatch_core::{CatalogItem, ComplementarityTable, Gender, PreferenceVector};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    Color,
    Style,
    Occasion,
    Material,
    Category,
    Gender,
    Price,
}

impl ScoreComponent {
    pub const ALL: [ScoreComponent; 7] = [
        ScoreComponent::Color,
        ScoreComponent::Style,
        ScoreComponent::Occasion,
        ScoreComponent::Material,
        ScoreComponent::Category,
        ScoreComponent::Gender,
        ScoreComponent::Price,
    ];

    pub fn weight(&self, weights: &ComponentWeights) -> f64 {
        match self {
            ScoreComponent::Color => weights.color,
            ScoreComponent::Style => weights.style,
            ScoreComponent::Occasion => weights.occasion,
            ScoreComponent::Material => weights.material,
            ScoreComponent::Category => weights.category,
            ScoreComponent::Gender => weights.gender,
            ScoreComponent::Price => weights.price,
        }
    }
}

/// Points per evaluated component
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown {
    components: BTreeMap<ScoreComponent, f64>,
}

impl ScoreBreakdown {
    /// `None` means the component was not evaluated
    pub fn get(&self, component: ScoreComponent) -> Option<f64> {
        self.components.get(&component).copied()
    }

    pub fn is_evaluated(&self, component: ScoreComponent) -> bool {
        self.components.contains_key(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreComponent, f64)> + '_ {
        self.components.iter().map(|(c, p)| (*c, *p))
    }

    pub fn sum(&self) -> f64 {
        self.components.values().sum()
    }

    /// Component with the largest contribution
    pub fn top_component(&self) -> Option<ScoreComponent> {
        self.components
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(c, _)| *c)
    }

    fn record(&mut self, component: ScoreComponent, points: Option<f64>) {
        if let Some(points) = points {
            self.components.insert(component, points);
        }
    }
}

/// A catalog item with its match score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores catalog items against a preference vector
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Caller has already run `ScoringConfig::validate`
    pub(crate) fn from_validated(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Copy of this engine with different component weights
    pub fn with_weights(&self, weights: ComponentWeights) -> Result<Self, ConfigError> {
        let mut config = self.config.clone();
        config.weights = weights;
        Self::new(config)
    }

    /// Total score, deterministic for identical inputs
    pub fn score(&self, item: &CatalogItem, prefs: &PreferenceVector) -> f64 {
        self.total(&self.explain(item, prefs))
    }

    /// Per-component contributions
    pub fn explain(&self, item: &CatalogItem, prefs: &PreferenceVector) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for component in ScoreComponent::ALL {
            breakdown.record(component, self.component_score(component, item, prefs));
        }
        breakdown
    }

    /// Points for one component, or `None` if it is not evaluated for `prefs`
    pub fn component_score(
        &self,
        component: ScoreComponent,
        item: &CatalogItem,
        prefs: &PreferenceVector,
    ) -> Option<f64> {
        let weight = component.weight(&self.config.weights);
        match component {
            ScoreComponent::Color => self.color_fraction(item, prefs).map(|f| f * weight),
            ScoreComponent::Style => prefs.style.map(|s| award(item.has_style(s), weight)),
            ScoreComponent::Occasion => prefs.occasion.map(|o| award(item.has_occasion(o), weight)),
            ScoreComponent::Material => prefs.material.map(|m| award(item.has_material(m), weight)),
            ScoreComponent::Category => prefs.category.map(|c| award(item.category == c, weight)),
            ScoreComponent::Gender => prefs.gender.map(|g| self.gender_points(item.gender, g, weight)),
            ScoreComponent::Price => Some(self.price_points(item, prefs)),
        }
    }

    /// Score every candidate and keep the best, most recent first on ties
    pub fn rank(&self, candidates: Vec<CatalogItem>, prefs: &PreferenceVector) -> Vec<ScoredItem> {
        let mut results: Vec<ScoredItem> = candidates
            .into_iter()
            .map(|item| {
                let breakdown = self.explain(&item, prefs);
                let score = self.total(&breakdown);
                tracing::debug!(item = %item.id, score, ?breakdown, "scored candidate");
                ScoredItem { item, score, breakdown }
            })
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(self.config.result_limit);
        results
    }

    fn total(&self, breakdown: &ScoreBreakdown) -> f64 {
        breakdown.sum().min(self.config.max_score)
    }

    /// Matched colors over preferred colors, capped at 1
    fn color_fraction(&self, item: &CatalogItem, prefs: &PreferenceVector) -> Option<f64> {
        if prefs.colors.is_empty() {
            return None;
        }
        let complements = ComplementarityTable::complements_of(&prefs.colors);
        let matched: BTreeSet<_> = item
            .colors
            .iter()
            .filter(|c| prefs.colors.contains(*c) || complements.contains(*c))
            .collect();

        let fraction = matched.len() as f64 / prefs.colors.len().max(1) as f64;
        Some(fraction.min(1.0))
    }

    fn gender_points(&self, item_gender: Gender, wanted: Gender, weight: f64) -> f64 {
        if item_gender == wanted {
            weight
        } else if item_gender == Gender::Unisex {
            self.config.unisex_credit
        } else {
            0.0
        }
    }

    fn price_points(&self, item: &CatalogItem, prefs: &PreferenceVector) -> f64 {
        let budget = prefs.price_ceiling().unwrap_or(self.config.default_budget);
        let ratio = item.price / budget;
        self.config
            .price_tiers
            .iter()
            .find(|tier| ratio <= tier.max_ratio)
            .map(|tier| tier.points)
            .unwrap_or(0.0)
    }
}

#[inline]
fn award(hit: bool, weight: f64) -> f64 {
    if hit { weight } else { 0.0 }
}
