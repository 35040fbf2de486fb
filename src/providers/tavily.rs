use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::SearchProvider;
use crate::error::SearchError;
use crate::models::RawSearchHit;

const TAVILY_URL: &str = "https://api.tavily.com/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Tavily rejects anything above this per request.
pub const TAVILY_MAX_RESULTS: usize = 20;

#[derive(Clone, Debug)]
pub struct Tavily {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
    snippet: Option<String>,
    source: Option<String>,
    published: Option<String>,
}

impl Tavily {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("TAVILY_API_KEY").ok())
    }
}

#[async_trait]
impl SearchProvider for Tavily {
    fn name(&self) -> &'static str {
        "tavily"
    }

    fn max_results(&self) -> usize {
        TAVILY_MAX_RESULTS
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchHit>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        log::info!("Searching tavily for {:?}", query);
        let payload = json!({
            "api_key": api_key,
            "query": query,
            "search_depth": "basic",
            "max_results": max_results.min(TAVILY_MAX_RESULTS),
            "include_answer": false,
            "include_images": false,
        });

        let response = self
            .client
            .post(TAVILY_URL)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::ProviderStatus(response.status()));
        }

        let body: TavilyResponse = response.json().await?;
        log::debug!("Tavily returned {} raw results", body.results.len());

        Ok(body
            .results
            .into_iter()
            .map(|item| RawSearchHit {
                title: item.title.unwrap_or_else(|| "Untitled".to_string()),
                url: item.url.unwrap_or_default(),
                snippet: item.content.or(item.snippet).unwrap_or_default(),
                source: item.source,
                published_at: item.published,
                image: None,
            })
            .collect())
    }
}
