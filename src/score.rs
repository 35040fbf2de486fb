//! Dupe desirability scoring and final ranking.

use crate::enrich::{PLACEHOLDER_IMAGE, has_usable_image};
use crate::models::{Candidate, ScoredItem};
use crate::price::format_price;

const BASE_SCORE: i32 = 50;

/// Flat bonus for having any extractable price at all.
const PRICED_BONUS: i32 = 5;

/// Weight at or above which a retailer counts as top-rated.
const TOP_RATED_WEIGHT: i32 = 8;

const GENERIC_REASON: &str = "Possible dupe match";

/// Retailer reputation by host substring; the highest matching weight
/// wins.
static RETAILER_WEIGHTS: &[(&str, i32)] = &[
    ("amazon", 9),
    ("nordstrom", 9),
    ("zappos", 8),
    ("walmart", 8),
    ("target", 8),
    ("asos", 8),
    ("zara", 8),
    ("hm.com", 8),
    ("uniqlo", 8),
    ("macys", 8),
    ("bloomingdales", 8),
    ("mango", 7),
    ("ebay", 7),
    ("etsy", 7),
    ("shein", 7),
    ("urbanoutfitters", 7),
    ("boohoo", 6),
    ("forever21", 6),
    ("prettylittlething", 6),
    ("aliexpress", 6),
    ("lulus", 6),
    ("romwe", 5),
    ("temu", 5),
];

fn retailer_weight(site: &str) -> Option<i32> {
    RETAILER_WEIGHTS
        .iter()
        .filter(|(needle, _)| site.contains(needle))
        .map(|(_, weight)| *weight)
        .max()
}

fn savings_bonus(percent: f64) -> i32 {
    if percent >= 70.0 {
        30
    } else if percent >= 50.0 {
        25
    } else if percent >= 30.0 {
        20
    } else if percent >= 20.0 {
        15
    } else if percent >= 10.0 {
        10
    } else {
        0
    }
}

fn savings_phrase(price: f64, savings: Option<f64>) -> String {
    match savings {
        Some(percent) if percent > 50.0 => {
            format!("Massive {:.0}% savings at {}", percent, format_price(price))
        }
        Some(percent) if percent >= 20.0 => {
            format!("{:.0}% cheaper at {}", percent, format_price(price))
        }
        Some(percent) if percent > 0.0 => format!("Lower price at {}", format_price(price)),
        _ => format!("Priced at {}", format_price(price)),
    }
}

/// Score one candidate against the most expensive price seen in its set.
///
/// The reference point means the set's priciest item always earns zero
/// savings bonus; it still gets the flat bonus for carrying a price.
pub fn score(candidate: Candidate, max_price: Option<f64>) -> ScoredItem {
    let mut total = BASE_SCORE;
    let mut reasons: Vec<String> = Vec::new();

    if let Some(weight) = candidate.site.as_deref().and_then(retailer_weight) {
        total += weight;
        reasons.push(
            if weight >= TOP_RATED_WEIGHT {
                "Top-rated retailer"
            } else {
                "Trusted retailer"
            }
            .to_string(),
        );
    }

    if let Some(price) = candidate.price {
        total += PRICED_BONUS;
        let savings = max_price
            .filter(|max| *max > 0.0)
            .map(|max| (max - price) / max * 100.0);
        if let Some(percent) = savings {
            total += savings_bonus(percent);
        }
        reasons.push(savings_phrase(price, savings));
    }

    let mut candidate = candidate;
    if !has_usable_image(candidate.image.as_deref()) {
        candidate.image = Some(PLACEHOLDER_IMAGE.to_string());
    }

    ScoredItem {
        candidate,
        dupe_score: total.clamp(0, 100) as u8,
        reason: if reasons.is_empty() {
            GENERIC_REASON.to_string()
        } else {
            reasons.join("; ")
        },
    }
}

/// Order the scored set and truncate it.
///
/// Everything is first sorted by descending score. When at least one item
/// carries a price, priced items are pulled in front of unpriced ones and
/// re-sorted stably by ascending price, so equal prices keep their score
/// order.
pub fn rank(mut items: Vec<ScoredItem>, limit: usize) -> Vec<ScoredItem> {
    items.sort_by(|a, b| b.dupe_score.cmp(&a.dupe_score));

    if items.iter().any(|item| item.candidate.price.is_some()) {
        let (mut priced, unpriced): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| item.candidate.price.is_some());
        priced.sort_by(|a, b| {
            a.candidate
                .price
                .partial_cmp(&b.candidate.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        priced.extend(unpriced);
        priced.truncate(limit);
        priced
    } else {
        items.truncate(limit);
        items
    }
}
