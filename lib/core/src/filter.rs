//! Catalog filter predicates
//!
//! A [`CatalogFilter`] is an AND of typed [`FilterClause`]s. Filters are
//! values: relaxing one produces a new snapshot and leaves the original
//! untouched.

use crate::complement::ComplementarityTable;
use crate::item::CatalogItem;
use crate::preferences::PreferenceVector;
use crate::vocabulary::{Category, ColorLabel, Gender, Material, Occasion, Style};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

pub trait Filter {
    fn matches(&self, item: &CatalogItem) -> bool;
}

/// Identifies a clause independently of its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    InStock,
    Price,
    Style,
    Occasion,
    Category,
    Material,
    Gender,
    Color,
}

impl ClauseKind {
    /// Soft clauses in the order they are given up when a search comes back
    /// empty. Stock and price are never relaxed.
    pub const RELAXATION_ORDER: [ClauseKind; 6] = [
        ClauseKind::Color,
        ClauseKind::Material,
        ClauseKind::Occasion,
        ClauseKind::Style,
        ClauseKind::Category,
        ClauseKind::Gender,
    ];

    pub fn is_relaxable(&self) -> bool {
        Self::RELAXATION_ORDER.contains(self)
    }

    /// Catalog attribute the clause constrains
    pub fn field(&self) -> &'static str {
        match self {
            ClauseKind::InStock => "inStock",
            ClauseKind::Price => "price",
            ClauseKind::Style => "style",
            ClauseKind::Occasion => "occasions",
            ClauseKind::Category => "category",
            ClauseKind::Material => "materials",
            ClauseKind::Gender => "gender",
            ClauseKind::Color => "colors",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "clause", rename_all = "snake_case")]
pub enum FilterClause {
    InStock,
    PriceAtMost { max: f64 },
    StyleIn { style: Style },
    OccasionIn { occasion: Occasion },
    CategoryIs { category: Category },
    MaterialIn { material: Material },
    /// Item gender is one of `genders`
    GenderIn { genders: Vec<Gender> },
    /// Item colors intersect either set
    ColorsAny {
        direct: BTreeSet<ColorLabel>,
        complementary: BTreeSet<ColorLabel>,
    },
}

impl FilterClause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            FilterClause::InStock => ClauseKind::InStock,
            FilterClause::PriceAtMost { .. } => ClauseKind::Price,
            FilterClause::StyleIn { .. } => ClauseKind::Style,
            FilterClause::OccasionIn { .. } => ClauseKind::Occasion,
            FilterClause::CategoryIs { .. } => ClauseKind::Category,
            FilterClause::MaterialIn { .. } => ClauseKind::Material,
            FilterClause::GenderIn { .. } => ClauseKind::Gender,
            FilterClause::ColorsAny { .. } => ClauseKind::Color,
        }
    }
}

impl Filter for FilterClause {
    fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            FilterClause::InStock => item.in_stock,
            FilterClause::PriceAtMost { max } => item.price <= *max,
            FilterClause::StyleIn { style } => item.has_style(*style),
            FilterClause::OccasionIn { occasion } => item.has_occasion(*occasion),
            FilterClause::CategoryIs { category } => item.category == *category,
            FilterClause::MaterialIn { material } => item.has_material(*material),
            FilterClause::GenderIn { genders } => genders.contains(&item.gender),
            FilterClause::ColorsAny { direct, complementary } => item
                .colors
                .iter()
                .any(|c| direct.contains(c) || complementary.contains(c)),
        }
    }
}

/// Conjunction of clauses, at most one per [`ClauseKind`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogFilter {
    clauses: Vec<FilterClause>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            clauses: vec![FilterClause::InStock],
        }
    }
}

impl CatalogFilter {
    /// Filter with only the in-stock clause
    pub fn in_stock() -> Self {
        Self::default()
    }

    /// Add a clause, replacing any existing clause of the same kind
    #[must_use]
    pub fn with_clause(mut self, clause: FilterClause) -> Self {
        let kind = clause.kind();
        match self.clauses.iter_mut().find(|c| c.kind() == kind) {
            Some(existing) => *existing = clause,
            None => self.clauses.push(clause),
        }
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn kinds(&self) -> Vec<ClauseKind> {
        self.clauses.iter().map(|c| c.kind()).collect()
    }

    pub fn contains(&self, kind: ClauseKind) -> bool {
        self.clauses.iter().any(|c| c.kind() == kind)
    }

    pub fn get(&self, kind: ClauseKind) -> Option<&FilterClause> {
        self.clauses.iter().find(|c| c.kind() == kind)
    }

    /// A copy of this filter without the clause of `kind`
    #[must_use]
    pub fn without(&self, kind: ClauseKind) -> Self {
        Self {
            clauses: self
                .clauses
                .iter()
                .filter(|c| c.kind() != kind)
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Filter for CatalogFilter {
    fn matches(&self, item: &CatalogItem) -> bool {
        self.clauses.iter().all(|c| c.matches(item))
    }
}

/// Translates preferences into a [`CatalogFilter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFilterBuilder;

impl CatalogFilterBuilder {
    /// Build the strictest filter for `prefs`.
    ///
    /// Every clause except in-stock is conditional on its preference being
    /// present. A `unisex` gender preference adds no gender clause.
    pub fn build(prefs: &PreferenceVector) -> CatalogFilter {
        let mut filter = CatalogFilter::in_stock();

        if let Some(max) = prefs.price_ceiling() {
            filter = filter.with_clause(FilterClause::PriceAtMost { max });
        }
        if let Some(style) = prefs.style {
            filter = filter.with_clause(FilterClause::StyleIn { style });
        }
        if let Some(occasion) = prefs.occasion {
            filter = filter.with_clause(FilterClause::OccasionIn { occasion });
        }
        if let Some(category) = prefs.category {
            filter = filter.with_clause(FilterClause::CategoryIs { category });
        }
        if let Some(material) = prefs.material {
            filter = filter.with_clause(FilterClause::MaterialIn { material });
        }
        if let Some(gender) = prefs.gender.filter(Gender::is_binary) {
            filter = filter.with_clause(FilterClause::GenderIn {
                genders: vec![gender, Gender::Unisex],
            });
        }
        if !prefs.colors.is_empty() {
            filter = filter.with_clause(FilterClause::ColorsAny {
                direct: prefs.colors.iter().copied().collect(),
                complementary: ComplementarityTable::complements_of(&prefs.colors),
            });
        }

        filter
    }
}
