//! Turn raw provider hits into filtered candidates.

use std::collections::HashSet;

use crate::classify::{self, FilterPolicy};
use crate::models::{Candidate, RawSearchHit};
use crate::price::extract_price;

/// Reduce a host to its registrable domain ("www.amazon.com" -> "amazon.com").
fn registrable_host(host: &str) -> String {
    match addr::parse_domain_name(host) {
        Ok(domain) => domain.root().unwrap_or(host).to_lowercase(),
        Err(_) => host.to_lowercase(),
    }
}

/// Apply the deny-list and the policy's own filter to raw hits, keeping
/// input order and stopping once `limit` candidates have been accepted.
/// Duplicate URLs are dropped. A URL that does not parse leaves `site`
/// unset rather than rejecting the hit.
pub fn normalize(hits: &[RawSearchHit], limit: usize, policy: FilterPolicy) -> Vec<Candidate> {
    log::debug!("Normalizing {} hits under {} policy", hits.len(), policy);

    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for hit in hits {
        if out.len() >= limit {
            break;
        }
        if hit.url.is_empty() || !seen_urls.insert(hit.url.as_str()) {
            continue;
        }

        let host = reqwest::Url::parse(&hit.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_lowercase));
        if let Some(host) = &host
            && classify::is_excluded_site(host)
        {
            log::debug!("Rejecting {}: excluded site", hit.url);
            continue;
        }
        if classify::has_excluded_keywords(&hit.title, &hit.snippet) {
            log::debug!("Rejecting {}: excluded content keyword", hit.url);
            continue;
        }

        let site = host.as_deref().map(registrable_host);
        let accepted = match policy {
            FilterPolicy::Shopping => {
                classify::is_shopping_content(&hit.title, &hit.snippet, site.as_deref().unwrap_or(""))
            }
            FilterPolicy::ClothingDupes => {
                !hit.title.trim().is_empty()
                    && !hit.snippet.trim().is_empty()
                    && classify::is_clothing_relevant(&hit.title, &hit.snippet)
                    && !classify::has_excluded_path(&hit.url)
            }
        };
        if !accepted {
            continue;
        }

        out.push(Candidate {
            title: hit.title.clone(),
            url: hit.url.clone(),
            snippet: hit.snippet.clone(),
            site,
            image: hit.image.clone().filter(|image| !image.is_empty()),
            price: extract_price(&format!("{} {}", hit.title, hit.snippet)),
        });
    }

    log::info!("{} of {} hits survived {} filtering", out.len(), hits.len(), policy);
    out
}
