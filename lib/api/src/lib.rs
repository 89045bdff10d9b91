//! REST surface for the gemmatch recommendation engine

pub mod error;
pub mod rest;

pub use error::ApiError;
pub use rest::{routes, RestApi, SharedRecommender, MAX_JSON_BYTES, MAX_UPLOAD_BYTES};
