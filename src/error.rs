use thiserror::Error;

/// Terminal failures for a whole request. Per-candidate problems (a dead
/// product page, a malformed URL) are absorbed inside the pipeline and
/// never show up here.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No search provider credential was configured.
    #[error("missing Tavily API key")]
    MissingApiKey,

    /// Transport-level failure talking to the search provider.
    #[error("search provider request error: {0}")]
    Provider(#[from] reqwest::Error),

    /// The search provider answered with a non-success status.
    #[error("search provider returned status {0}")]
    ProviderStatus(reqwest::StatusCode),
}
