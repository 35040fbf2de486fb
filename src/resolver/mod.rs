//! Best-effort product image resolution.
//!
//! Arbitrary e-commerce HTML rarely agrees on where the product shot
//! lives, so resolution walks an ordered cascade of strategies, from
//! curated metadata (JSON-LD, Open Graph) down to scanning raw `<img>`
//! tags. The first strategy to produce a usable URL wins; a strategy that
//! finds nothing, or whose markup is broken, simply passes the page on to
//! the next one.

pub(crate) mod fallback;
pub(crate) mod strategies;

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::Html;

macro_rules! sel {
    ($sel:literal) => {
        &scraper::Selector::parse($sel).expect("invalid selector")
    };
}
pub(crate) use sel;

/// One way of digging a representative image out of a fetched page.
pub(crate) trait ImageStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn resolve(&self, document: &Html, base: &Url) -> Option<String>;
}

pub(crate) static STRATEGIES: Lazy<Vec<Box<dyn ImageStrategy>>> = Lazy::new(|| {
    vec![
        Box::new(strategies::JsonLd),
        Box::new(strategies::OpenGraph),
        Box::new(strategies::TwitterCard),
        Box::new(strategies::ProductMeta),
        Box::new(strategies::ItemProp),
        Box::new(strategies::LinkImageSrc),
        Box::new(strategies::SecureOpenGraph),
        Box::new(strategies::CssHeuristics),
        Box::new(fallback::ImgScan),
    ]
});

/// Seam for the enrichment stage; lets tests stub out page fetching.
#[async_trait]
pub trait ResolveImage: Send + Sync {
    async fn resolve(&self, page_url: &str) -> Option<String>;
}

/// Fetches product pages and runs the strategy cascade over them.
#[derive(Clone, Debug)]
pub struct ImageResolver {
    client: Client,
    timeout: Duration,
}

impl ImageResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(6))
    }
}

#[async_trait]
impl ResolveImage for ImageResolver {
    /// Never fails: a network error, timeout or non-200 response is the
    /// same as finding no image.
    async fn resolve(&self, page_url: &str) -> Option<String> {
        let response = match self
            .client
            .get(page_url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Image fetch failed for {}: {}", page_url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!(
                "Image fetch for {} returned {}",
                page_url,
                response.status()
            );
            return None;
        }

        // Redirects may have moved us; relative URLs resolve against the
        // final address.
        let base = response.url().clone();
        let html = response.text().await.ok()?;
        resolve_from_html(&html, &base)
    }
}

pub(crate) fn resolve_from_html(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    for strategy in STRATEGIES.iter() {
        if let Some(image) = strategy.resolve(&document, base) {
            log::debug!("{} resolved via {}", base, strategy.name());
            return Some(image);
        }
    }
    log::debug!("No product image found on {}", base);
    None
}

/// Upgrade a raw attribute value to an absolute URL against the page it
/// came from. `.svg` assets are never product shots.
pub(crate) fn absolutize(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || is_svg(raw) {
        return None;
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else if let Some(rest) = raw.strip_prefix("//") {
        Some(format!("https://{rest}"))
    } else if raw.starts_with('/') {
        let host = base.host_str()?;
        Some(format!("{}://{}{}", base.scheme(), host, raw))
    } else {
        base.join(raw).ok().map(Into::into)
    }
}

pub(crate) fn is_svg(url: &str) -> bool {
    url.split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_lowercase()
        .ends_with(".svg")
}
