use async_trait::async_trait;

use dupefinder::DupeFinder;
use dupefinder::enrich::PLACEHOLDER_IMAGE;
use dupefinder::error::SearchError;
use dupefinder::models::RawSearchHit;
use dupefinder::providers::{SearchProvider, Tavily};
use dupefinder::resolver::ResolveImage;

struct FixedProvider {
    hits: Vec<RawSearchHit>,
}

#[async_trait]
impl SearchProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn max_results(&self) -> usize {
        20
    }

    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchHit>, SearchError> {
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

/// Finds an image only on Amazon pages; everything else is a dead end.
struct StubResolver;

#[async_trait]
impl ResolveImage for StubResolver {
    async fn resolve(&self, page_url: &str) -> Option<String> {
        page_url
            .contains("amazon")
            .then(|| "https://cdn.example.com/resolved.jpg".to_string())
    }
}

fn hit(title: &str, url: &str, snippet: &str) -> RawSearchHit {
    RawSearchHit {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        ..Default::default()
    }
}

fn finder(hits: Vec<RawSearchHit>) -> DupeFinder {
    DupeFinder::new(Box::new(FixedProvider { hits })).with_resolver(Box::new(StubResolver))
}

#[tokio::test]
async fn find_dupes_filters_scores_and_ranks() {
    let finder = finder(vec![
        hit(
            "Satin slip dress",
            "https://www.amazon.com/dp/B01",
            "Buy now, only $24.99",
        ),
        hit(
            "Satin slip dress haul",
            "https://www.youtube.com/watch?v=1",
            "look at this dress, $10",
        ),
        hit(
            "Designer slip dress",
            "https://boutique.example.com/p/9",
            "elegant evening gown, $99.99",
        ),
        hit(
            "Slip dress",
            "https://smallshop.example.com/p/3",
            "beautiful satin dress",
        ),
        hit(
            "How to style a slip dress",
            "https://shop.example.com/blog/styling",
            "a styling guide for every dress",
        ),
    ]);

    let items = finder.find_dupes("satin slip dress dupe", 8).await.unwrap();

    // The video platform, the editorial keyword and the /blog/ path are
    // all filtered out.
    assert_eq!(items.len(), 3);

    // Priced items first, ascending in price, then the unpriced one.
    assert_eq!(items[0].candidate.price, Some(24.99));
    assert_eq!(items[1].candidate.price, Some(99.99));
    assert_eq!(items[2].candidate.price, None);
    assert_eq!(items[0].candidate.site.as_deref(), Some("amazon.com"));

    // The cheap Amazon listing wins on score too: retailer bonus plus the
    // deep-savings tier against the $99.99 set maximum.
    assert!(items[0].dupe_score > items[1].dupe_score);
    assert!(items.iter().all(|item| item.dupe_score <= 100));

    // Only the Amazon page resolved an image; the rest fall back to the
    // fixed placeholder rather than failing the request.
    assert_eq!(
        items[0].candidate.image.as_deref(),
        Some("https://cdn.example.com/resolved.jpg")
    );
    assert_eq!(items[1].candidate.image.as_deref(), Some(PLACEHOLDER_IMAGE));
    assert_eq!(items[2].candidate.image.as_deref(), Some(PLACEHOLDER_IMAGE));
}

#[tokio::test]
async fn search_mode_is_looser_than_dupes_mode() {
    let hits = vec![hit(
        "Garden hose",
        "https://hardware.example.com/p/1",
        "Buy now, in stock, only $20",
    )];

    let results = finder(hits.clone())
        .search_normalized("garden hose", 8)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].price, Some(20.0));

    // No clothing vocabulary, so the dupe policy rejects the same hit.
    let items = finder(hits).find_dupes("garden hose", 8).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn empty_provider_result_is_not_an_error() {
    let items = finder(vec![]).find_dupes("satin slip dress", 8).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn missing_api_key_surfaces_as_terminal_error() {
    let finder = DupeFinder::new(Box::new(Tavily::new(None)));
    let err = finder.find_dupes("satin slip dress", 8).await.unwrap_err();
    assert!(matches!(err, SearchError::MissingApiKey));
}
