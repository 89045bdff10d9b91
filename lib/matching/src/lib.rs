//! # gemmatch Matching
//!
//! Relaxation search and weighted ranking on top of `gemmatch-core`.
//!
//! ## Features
//!
//! - **Relaxation Search**: drops soft filter clauses in a fixed order until
//!   the catalog returns something
//! - **Weighted Scoring**: additive per-component score with configurable
//!   weights and price tiers
//! - **Explainability**: per-component breakdown for every ranked item
//! - **Pipeline**: [`Recommender`] wires photo colors, filters, search and
//!   scoring together
//!
//! ## Example
//!
//! ```rust
//! use gemmatch_core::{CatalogItem, Category, ColorLabel, Gender, Material, Occasion, PreferenceVector, Style};
//! use gemmatch_matching::ScoringEngine;
//!
//! let item = CatalogItem::new("1", "Pendant", 20000.0, Category::Necklace)
//!     .with_styles([Style::Modern])
//!     .with_occasions([Occasion::Daily])
//!     .with_materials([Material::Gold])
//!     .with_colors([ColorLabel::Red]);
//! let prefs = PreferenceVector::new()
//!     .with_style(Style::Modern)
//!     .with_occasion(Occasion::Daily)
//!     .with_material(Material::Gold)
//!     .with_gender(Gender::Women)
//!     .with_colors([ColorLabel::Red])
//!     .with_budget(50000.0);
//!
//! assert_eq!(ScoringEngine::default().score(&item, &prefs), 96.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Thumbnail  │────>│ Preferences │────>│   Filter    │
//! │  (colors)   │     │ (normalize) │     │  (builder)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Scoring   │<────│ Relaxation  │<──> Catalog
//!                     │  (ranking)  │     │   Search    │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod explain;
pub mod relax;
pub mod request;
pub mod scoring;

pub use config::{
    ComponentWeights, ConfigError, PriceTier, RecommenderConfig, ScoringConfig, SearchConfig,
};
pub use engine::{Recommendation, Recommender};
pub use explain::RecommendationSummary;
pub use relax::{RelaxationSearch, RelaxationStep, SearchOutcome};
pub use request::{RecommendationRequest, RequestDefaults};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoredItem, ScoringEngine};
