//! Heuristic filters deciding whether a raw search hit belongs to a
//! shopping context and whether it is clothing/fashion-relevant.
//!
//! The upstream provider is a general web search with no shopping-only
//! filter, so these checks trade recall for precision: a hit must show
//! clear commerce signals before it is allowed through.

/// Phrases that almost only occur on live product pages.
static STRONG_SIGNALS: &[&str] = &[
    "buy now",
    "add to cart",
    "add to bag",
    "in stock",
    "free returns",
];

/// Weaker commerce hints; several are required before they count on their
/// own.
static MODERATE_SIGNALS: &[&str] = &[
    "price", "sale", "shipping", "discount", "deal", "checkout", "order", "$",
];

/// Host substrings of retailers that always count as shopping context.
static KNOWN_RETAILERS: &[&str] = &[
    "amazon.",
    "ebay.",
    "walmart.",
    "target.",
    "etsy.",
    "aliexpress.",
    "shein.",
    "temu.",
    "asos.",
    "zara.",
    "hm.com",
    "uniqlo.",
    "mango.",
    "nordstrom.",
    "macys.",
    "bloomingdales.",
    "zappos.",
    "shopbop.",
    "revolve.",
    "ssense.",
    "farfetch.",
    "net-a-porter.",
    "boohoo.",
    "prettylittlething.",
    "forever21.",
    "romwe.",
    "lulus.",
    "nastygal.",
    "urbanoutfitters.",
    "anthropologie.",
];

/// Host substrings that are never product listings: video and social
/// platforms, news outlets, blogs, wikis, review/advice sites and
/// dupe-comparison blogs.
static EXCLUDED_SITES: &[&str] = &[
    "youtube.",
    "tiktok.",
    "instagram.",
    "facebook.",
    "pinterest.",
    "reddit.",
    "twitter.",
    "x.com",
    "medium.",
    "quora.",
    "wikipedia.",
    "wikihow.",
    "fandom.",
    "blog.",
    "blogspot.",
    "wordpress.",
    "tumblr.",
    "substack.",
    "buzzfeed.",
    "nytimes.",
    "theguardian.",
    "cosmopolitan.",
    "vogue.",
    "elle.",
    "glamour.",
    "refinery29.",
    "byrdie.",
    "whowhatwear.",
    "thecut.",
    "dupethat.",
];

/// Editorial content markers; any match rejects the hit regardless of how
/// strong its shopping signals are.
static EXCLUDED_KEYWORDS: &[&str] = &[
    "tutorial",
    "how to",
    "review",
    "roundup",
    "top 10",
    "best of",
    "we tested",
    "ranked",
];

/// Garment types, accessories and generic fashion terms. One match in the
/// combined title+snippet text is enough for clothing relevance.
static CLOTHING_KEYWORDS: &[&str] = &[
    "dress",
    "skirt",
    "jacket",
    "coat",
    "blazer",
    "sweater",
    "cardigan",
    "hoodie",
    "jumper",
    "jeans",
    "denim",
    "trousers",
    "leggings",
    "shorts",
    "shirt",
    "blouse",
    "gown",
    "jumpsuit",
    "romper",
    "swimsuit",
    "bikini",
    "lingerie",
    "activewear",
    "sneaker",
    "shoe",
    "boots",
    "heels",
    "sandal",
    "loafer",
    "handbag",
    "purse",
    "tote",
    "clutch",
    "backpack",
    "scarf",
    "beanie",
    "sunglasses",
    "jewelry",
    "necklace",
    "earring",
    "bracelet",
    "outfit",
    "fashion",
    "clothing",
    "apparel",
    "knitwear",
    "cashmere",
    "leather",
    "wardrobe",
];

/// URL path segments that mark editorial pages even on retailer domains.
static EXCLUDED_PATHS: &[&str] = &["/blog/", "/article/", "/news/", "/guide/"];

/// Which filtering policy a pipeline run applies to raw hits.
///
/// The two policies are intentionally distinct products: plain search
/// accepts anything with believable shopping signals, while dupe finding
/// additionally demands clothing vocabulary and rejects editorial paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FilterPolicy {
    /// General shopping signals are enough.
    Shopping,
    /// Clothing keywords are mandatory and editorial paths are rejected.
    ClothingDupes,
}

/// Decide whether a hit looks like a shopping context at all.
///
/// First match wins: a known retailer passes outright, then tiered signal
/// counts are tried in decreasing order of confidence.
pub fn is_shopping_content(title: &str, snippet: &str, site: &str) -> bool {
    if title.trim().is_empty() || snippet.trim().is_empty() {
        return false;
    }

    let site = site.to_lowercase();
    if KNOWN_RETAILERS.iter().any(|host| site.contains(host)) {
        return true;
    }

    let text = format!("{} {}", title, snippet).to_lowercase();
    let strong = STRONG_SIGNALS
        .iter()
        .filter(|signal| text.contains(*signal))
        .count();
    let moderate = MODERATE_SIGNALS
        .iter()
        .filter(|signal| text.contains(*signal))
        .count();

    if strong >= 1 && moderate >= 1 {
        return true;
    }
    if moderate >= 2 && text.contains('$') {
        return true;
    }
    moderate >= 3
}

/// At least one clothing/fashion keyword in the combined text.
pub fn is_clothing_relevant(title: &str, snippet: &str) -> bool {
    let text = format!("{} {}", title, snippet).to_lowercase();
    CLOTHING_KEYWORDS.iter().any(|word| text.contains(word))
}

pub fn is_excluded_site(host: &str) -> bool {
    let host = host.to_lowercase();
    EXCLUDED_SITES.iter().any(|needle| host.contains(needle))
}

pub fn has_excluded_keywords(title: &str, snippet: &str) -> bool {
    let text = format!("{} {}", title, snippet).to_lowercase();
    EXCLUDED_KEYWORDS.iter().any(|word| text.contains(word))
}

pub fn has_excluded_path(url: &str) -> bool {
    let url = url.to_lowercase();
    EXCLUDED_PATHS.iter().any(|segment| url.contains(segment))
}
