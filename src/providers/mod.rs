use async_trait::async_trait;

use crate::error::SearchError;
use crate::models::RawSearchHit;

/// Upstream web-search provider, a black box returning raw hits.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Hard cap the provider imposes on a single request.
    fn max_results(&self) -> usize;

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchHit>, SearchError>;
}

pub mod tavily;

pub use tavily::Tavily;
