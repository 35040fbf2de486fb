use serde::{Deserialize, Serialize};

/// A single untouched record from the upstream web-search provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawSearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,

    /// Publisher name, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    /// Thumbnail supplied by the provider itself, used as a placeholder
    /// until the page has been scraped for a real product image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
