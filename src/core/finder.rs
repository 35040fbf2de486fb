//! End-to-end pipeline driver.

use crate::classify::FilterPolicy;
use crate::enrich::{self, EnrichOptions};
use crate::error::SearchError;
use crate::models::{Candidate, ScoredItem};
use crate::normalize::normalize;
use crate::providers::SearchProvider;
use crate::resolver::{ImageResolver, ResolveImage};
use crate::score::{rank, score};

/// Runs one query end-to-end: search, filter, enrich, score, rank.
///
/// Holds no state across requests; every call re-fetches and re-scrapes
/// from scratch.
pub struct DupeFinder {
    provider: Box<dyn SearchProvider>,
    resolver: Box<dyn ResolveImage>,
    enrich_options: EnrichOptions,
}

impl DupeFinder {
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self {
            provider,
            resolver: Box::new(ImageResolver::default()),
            enrich_options: EnrichOptions::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: Box<dyn ResolveImage>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_enrich_options(mut self, options: EnrichOptions) -> Self {
        self.enrich_options = options;
        self
    }

    /// Scored and ranked dupe candidates for a shopping query.
    pub async fn find_dupes(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ScoredItem>, SearchError> {
        // Clothing filtering is strict, so ask the provider for everything
        // it will give us and cap after filtering.
        let raw = self
            .provider
            .search(query, self.provider.max_results())
            .await?;
        log::info!("{} raw hits from {} for {:?}", raw.len(), self.provider.name(), query);

        let mut candidates = normalize(&raw, max_results, FilterPolicy::ClothingDupes);
        enrich::enrich_images(self.resolver.as_ref(), &mut candidates, self.enrich_options).await;

        let max_price = candidates
            .iter()
            .filter_map(|candidate| candidate.price)
            .fold(None::<f64>, |acc, price| {
                Some(acc.map_or(price, |max| max.max(price)))
            });

        let scored = candidates
            .into_iter()
            .map(|candidate| score(candidate, max_price))
            .collect();
        Ok(rank(scored, max_results))
    }

    /// Normalized shopping results under the looser general-shopping
    /// policy; no enrichment or scoring.
    pub async fn search_normalized(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SearchError> {
        let raw = self
            .provider
            .search(query, max_results.min(self.provider.max_results()))
            .await?;
        log::info!("{} raw hits from {} for {:?}", raw.len(), self.provider.name(), query);

        Ok(normalize(&raw, max_results, FilterPolicy::Shopping))
    }
}
