//! # gemmatch
//!
//! A jewelry matching engine. Given shopper preferences and, optionally, a
//! photo, it picks the photo's dominant colors, narrows a catalog with a
//! relaxable filter and ranks what is left with a weighted score.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! gemmatch serve --catalog catalog.json --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use gemmatch::prelude::*;
//!
//! let store = CatalogStore::from_items([
//!     CatalogItem::new("r1", "Ruby studs", 12_000.0, Category::Earrings)
//!         .with_styles([Style::Modern])
//!         .with_occasions([Occasion::Daily])
//!         .with_colors([ColorLabel::Red]),
//! ]);
//!
//! let recommender = Recommender::new(store, RecommenderConfig::default()).unwrap();
//! let request = RecommendationRequest {
//!     budget: Some(BudgetInput::from("medium")),
//!     ..Default::default()
//! };
//! let prefs = recommender.preferences(&request, &RequestDefaults::suggest(), None);
//! let result = recommender.recommend(&prefs).unwrap();
//! assert_eq!(result.recommendations[0].item.id, "r1");
//! ```
//!
//! ## Crate Structure
//!
//! - `gemmatch-core` - vocabularies, catalog items, color extraction, filters
//! - `gemmatch-matching` - relaxation search, scoring and the recommender
//! - `gemmatch-storage` - JSON backed in-memory catalog
//! - `gemmatch-api` - REST surface

// Re-export core types
pub use gemmatch_core::{
    BudgetCeilings, BudgetInput, CatalogFilter, CatalogFilterBuilder, CatalogItem, CatalogQuery,
    Category, ClauseKind, ColorClassifier, ColorLabel, ComplementarityTable, Error, Filter,
    FilterClause, Gender, Material, Occasion, PixelSample, PreferenceVector, Result, Style,
    ThumbnailConfig, ThumbnailDecoder,
};

// Re-export matching
pub use gemmatch_matching::{
    RecommendationRequest, RecommendationSummary, Recommender, RecommenderConfig,
    RelaxationSearch, RequestDefaults, ScoreBreakdown, ScoreComponent, ScoredItem,
    ScoringConfig, ScoringEngine, SearchConfig, SearchOutcome, Recommendation,
};

// Re-export storage
pub use gemmatch_storage::CatalogStore;

// Re-export API
pub use gemmatch_api::{ApiError, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BudgetInput, CatalogItem, CatalogQuery, CatalogStore, Category, ColorLabel, Gender,
        Material, Occasion, PreferenceVector, Recommendation, RecommendationRequest, Recommender,
        RecommenderConfig, RequestDefaults, Style, Error, Result,
    };
}
