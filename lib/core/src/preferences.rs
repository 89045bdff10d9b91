//! Shopper preferences
//!
//! [`PreferenceVector`] is the normalized, request-scoped set of matching
//! criteria. Raw budget input can be either a number or a range label and
//! is normalized through [`BudgetCeilings`].

use crate::vocabulary::{Category, ColorLabel, Gender, Material, Occasion, Style};
use serde::{Deserialize, Serialize};

/// Budget as supplied by a caller: a literal amount or a range label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Amount(f64),
    Label(String),
}

impl From<f64> for BudgetInput {
    fn from(v: f64) -> Self {
        BudgetInput::Amount(v)
    }
}

impl From<&str> for BudgetInput {
    fn from(s: &str) -> Self {
        BudgetInput::Label(s.to_string())
    }
}

/// Numeric ceilings behind the `low` / `medium` / `high` budget labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCeilings {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for BudgetCeilings {
    fn default() -> Self {
        Self {
            low: 10_000.0,
            medium: 50_000.0,
            high: 100_000.0,
        }
    }
}

impl BudgetCeilings {
    /// Resolve a raw budget to an amount.
    ///
    /// Numeric strings are read as amounts. Unrecognized labels resolve to
    /// `None` (no budget constraint), never to zero.
    pub fn normalize(&self, input: &BudgetInput) -> Option<f64> {
        match input {
            BudgetInput::Amount(v) if v.is_finite() => Some(*v),
            BudgetInput::Amount(_) => None,
            BudgetInput::Label(label) => {
                let label = label.trim();
                if let Ok(v) = label.parse::<f64>() {
                    return v.is_finite().then_some(v);
                }
                match label.to_ascii_lowercase().as_str() {
                    "low" => Some(self.low),
                    "medium" => Some(self.medium),
                    "high" => Some(self.high),
                    _ => None,
                }
            }
        }
    }
}

/// Normalized matching criteria for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Image-derived colors, most dominant first
    #[serde(default)]
    pub colors: Vec<ColorLabel>,
}

impl PreferenceVector {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = Some(occasion);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Set the color signal, dropping repeats but keeping order
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = ColorLabel>) -> Self {
        self.colors.clear();
        for color in colors {
            if !self.colors.contains(&color) {
                self.colors.push(color);
            }
        }
        self
    }

    /// Budget usable as a price ceiling: present and strictly positive
    pub fn price_ceiling(&self) -> Option<f64> {
        self.budget.filter(|b| *b > 0.0)
    }
}
