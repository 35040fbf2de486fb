//! Concurrent image enrichment over normalized candidates.

use std::time::Duration;

use futures::StreamExt;

use crate::models::Candidate;
use crate::resolver::ResolveImage;

/// Fallback shown when no real product image could be resolved.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400?text=No+Image";

#[derive(Debug, Clone, Copy)]
pub struct EnrichOptions {
    /// Outer per-candidate deadline. Wins over the resolver's own fetch
    /// timeout when that one is slow to fire.
    pub task_timeout: Duration,
    /// How many product pages are scraped at once.
    pub max_concurrent: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            task_timeout: Duration::from_secs(5),
            max_concurrent: 8,
        }
    }
}

/// A non-empty absolute http(s) URL.
pub(crate) fn has_usable_image(image: Option<&str>) -> bool {
    image.is_some_and(|raw| {
        reqwest::Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
    })
}

/// Resolve images for every candidate that still lacks a usable one.
///
/// Fetches run concurrently up to `max_concurrent`, each independently
/// time-boxed; the stage waits for all of them and never fails the
/// request. A task that errors, times out or finds nothing leaves the
/// candidate's placeholder untouched (the scorer substitutes the fixed
/// placeholder later if that value is unusable too). No retries.
pub async fn enrich_images(
    resolver: &dyn ResolveImage,
    candidates: &mut [Candidate],
    options: EnrichOptions,
) {
    let jobs: Vec<(usize, String)> = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| !has_usable_image(candidate.image.as_deref()))
        .map(|(idx, candidate)| (idx, candidate.url.clone()))
        .collect();

    if jobs.is_empty() {
        return;
    }
    log::info!(
        "Resolving images for {} of {} candidates",
        jobs.len(),
        candidates.len()
    );

    let resolved: Vec<(usize, Option<String>)> =
        futures::stream::iter(jobs.into_iter().map(|(idx, url)| async move {
            let image = match tokio::time::timeout(options.task_timeout, resolver.resolve(&url))
                .await
            {
                Ok(image) => image,
                Err(_) => {
                    log::debug!("Image resolution timed out for {}", url);
                    None
                }
            };
            (idx, image)
        }))
        .buffer_unordered(options.max_concurrent.max(1))
        .collect()
        .await;

    let mut found = 0;
    for (idx, image) in resolved {
        if let Some(image) = image {
            candidates[idx].image = Some(image);
            found += 1;
        }
    }
    log::info!("Resolved {} product images", found);
}
