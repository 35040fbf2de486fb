//! Last-resort scan over raw `<img>` tags.

use reqwest::Url;
use scraper::Html;

use super::strategies::img_source;
use super::{ImageStrategy, absolutize, is_svg, sel};

/// Only the top of the page is considered; product shots live above the
/// recommendation carousels and footer sprites.
const MAX_IMG_TAGS: usize = 20;

/// Bonus for a URL that names itself like a product shot.
const PRODUCT_HINT_BONUS: i64 = 500;

/// Chrome assets that are never the product.
static SKIP_SUBSTRINGS: &[&str] = &["logo", "icon", "sprite", "avatar", "placeholder", "blank"];

static PRODUCT_HINTS: &[&str] = &["product", "main", "hero", "large", "full", "detail"];

/// Scored entry while picking the best of several same-page images.
struct ImageCandidate {
    url: String,
    score: i64,
}

pub(crate) struct ImgScan;

impl ImageStrategy for ImgScan {
    fn name(&self) -> &'static str {
        "img-scan"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        let mut best: Option<ImageCandidate> = None;

        for img in document.select(sel!("img")).take(MAX_IMG_TAGS) {
            let Some(raw) = img_source(&img) else {
                continue;
            };
            let lower = raw.to_lowercase();
            if is_svg(raw) || SKIP_SUBSTRINGS.iter().any(|skip| lower.contains(skip)) {
                continue;
            }
            let Some(url) = absolutize(base, raw) else {
                continue;
            };

            // A multi-resolution srcset is the site telling us which
            // renditions exist; trust its largest entry outright.
            if let Some(srcset) = img.value().attr("srcset")
                && let Some(largest) = largest_srcset_entry(srcset)
            {
                return absolutize(base, &largest);
            }

            let mut score = dimension(img.value().attr("width"))
                + dimension(img.value().attr("height"));
            if PRODUCT_HINTS.iter().any(|hint| lower.contains(hint)) {
                score += PRODUCT_HINT_BONUS;
            }

            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(ImageCandidate { url, score });
            }
        }

        best.map(|candidate| candidate.url)
    }
}

/// Highest-resolution entry of a srcset, only when it actually lists
/// multiple renditions.
fn largest_srcset_entry(srcset: &str) -> Option<String> {
    let mut entries: Vec<(String, u32)> = srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let url = parts.next()?.to_string();
            let width = parts
                .next()
                .and_then(|descriptor| descriptor.trim_end_matches(['w', 'x']).parse().ok())
                .unwrap_or(0);
            Some((url, width))
        })
        .collect();

    if entries.len() < 2 {
        return None;
    }
    entries.sort_by_key(|(_, width)| *width);
    entries.pop().map(|(url, _)| url)
}

fn dimension(attr: Option<&str>) -> i64 {
    attr.and_then(|value| value.trim_end_matches("px").parse().ok())
        .unwrap_or(0)
}
