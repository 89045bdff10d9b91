//! # gemmatch Core
//!
//! Core types for the gemmatch jewelry matching engine.
//!
//! This crate provides the vocabulary and the leaf algorithms:
//!
//! - [`ColorLabel`] and the other closed vocabularies
//! - [`ColorClassifier`] - reduces pixels to at most three dominant colors
//! - [`ThumbnailDecoder`] - decodes and resamples uploads before classification
//! - [`ComplementarityTable`] - static complementary color lookup
//! - [`CatalogFilterBuilder`] - turns preferences into a relaxable [`CatalogFilter`]
//! - [`CatalogQuery`] - the catalog collaborator
//!
//! ## Example
//!
//! ```rust
//! use gemmatch_core::{CatalogFilterBuilder, ClauseKind, ColorLabel, PreferenceVector, Style};
//!
//! let prefs = PreferenceVector::new()
//!     .with_style(Style::Modern)
//!     .with_colors([ColorLabel::Red]);
//! let filter = CatalogFilterBuilder::build(&prefs);
//!
//! assert!(filter.contains(ClauseKind::Color));
//! let relaxed = filter.without(ClauseKind::Color);
//! assert!(!relaxed.contains(ClauseKind::Color));
//! ```

pub mod catalog;
pub mod color;
pub mod complement;
pub mod error;
pub mod filter;
pub mod item;
pub mod preferences;
pub mod thumbnail;
pub mod vocabulary;

pub use catalog::CatalogQuery;
pub use color::{ColorClassifier, PixelSample, DEFAULT_SAMPLE_STRIDE, MAX_DOMINANT_COLORS};
pub use complement::ComplementarityTable;
pub use error::{Error, Result};
pub use filter::{CatalogFilter, CatalogFilterBuilder, ClauseKind, Filter, FilterClause};
pub use item::CatalogItem;
pub use preferences::{BudgetCeilings, BudgetInput, PreferenceVector};
pub use thumbnail::{ThumbnailConfig, ThumbnailDecoder};
pub use vocabulary::{
    Category, ColorLabel, Gender, Material, Occasion, Style, UnknownLabel,
    COLOR_VOCABULARY_VERSION,
};
