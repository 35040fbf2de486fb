//! Find cheaper clothing alternatives ("dupes") for a shopping query.
//!
//! The pipeline takes raw web-search hits from an upstream provider,
//! filters them down to plausible clothing product listings, scrapes each
//! surviving page for a representative product image and ranks the results
//! by how attractive they are as a cheaper alternative.

pub mod classify;
pub mod config;
pub mod core;
pub mod enrich;
pub mod error;
pub mod models;
pub mod normalize;
pub mod price;
pub mod providers;
pub mod resolver;
pub mod score;

pub use self::core::DupeFinder;
pub use self::error::SearchError;
