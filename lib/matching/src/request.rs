//! Caller-facing request and its normalization into a [`PreferenceVector`]
//!
//! Requests carry free-form labels. Labels outside a vocabulary are treated
//! as absent rather than rejected; omitted fields take the request defaults.

use gemmatch_core::{BudgetCeilings, BudgetInput, ColorLabel, Gender, Occasion, PreferenceVector, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Values assumed for fields a request leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub occasion: Option<Occasion>,
    pub style: Option<Style>,
    pub gender: Option<Gender>,
    pub budget: Option<BudgetInput>,
}

impl RequestDefaults {
    /// Defaults for preference-only requests
    pub fn suggest() -> Self {
        Self {
            occasion: Some(Occasion::Daily),
            style: Some(Style::Modern),
            gender: Some(Gender::Unisex),
            budget: None,
        }
    }

    /// Defaults for photo analysis requests
    pub fn analyze() -> Self {
        Self {
            budget: Some(BudgetInput::Label("medium".to_string())),
            ..Self::suggest()
        }
    }

    /// No defaults at all
    pub fn none() -> Self {
        Self {
            occasion: None,
            style: None,
            gender: None,
            budget: None,
        }
    }
}

impl RecommendationRequest {
    pub fn normalize(
        &self,
        defaults: &RequestDefaults,
        budgets: &BudgetCeilings,
        colors: Vec<ColorLabel>,
    ) -> PreferenceVector {
        let budget = match &self.budget {
            Some(BudgetInput::Label(l)) if l.trim().is_empty() => defaults.budget.as_ref(),
            Some(input) => Some(input),
            None => defaults.budget.as_ref(),
        };

        PreferenceVector {
            occasion: resolve(&self.occasion, defaults.occasion),
            style: resolve(&self.style, defaults.style),
            budget: budget.and_then(|b| budgets.normalize(b)),
            material: resolve(&self.material, None),
            category: resolve(&self.category, None),
            gender: resolve(&self.gender, defaults.gender),
            colors: Vec::new(),
        }
        .with_colors(colors)
    }
}

/// Omitted or blank → default; unknown → absent
fn resolve<T: FromStr>(raw: &Option<String>, default: Option<T>) -> Option<T> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => default,
        Some(label) => label.parse().ok(),
    }
}
