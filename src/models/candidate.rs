use serde::{Deserialize, Serialize};

/// A search hit that survived shopping/clothing filtering.
///
/// The `image` field starts out as whatever placeholder the provider gave
/// us and may be overwritten once by the enrichment stage; after scoring
/// nothing is mutated anymore.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    pub snippet: String,

    /// Lower-cased registrable host, absent when the URL does not parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// First dollar amount found in the hit's text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Terminal entity handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub candidate: Candidate,

    /// Desirability as a dupe, always within 0..=100
    pub dupe_score: u8,
    /// Human-readable justification for the score
    pub reason: String,
}
