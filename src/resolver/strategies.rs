//! Tag-based resolution strategies.
//!
//! Strategies 1-7 trust the page's own curated metadata and never
//! second-guess it with size checks; the CSS heuristics exist for small
//! shops that omit metadata entirely.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::{ImageStrategy, absolutize, sel};

/// Embedded JSON linked-data blocks carrying an `image`/`images` field.
pub(crate) struct JsonLd;

impl ImageStrategy for JsonLd {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        document
            .select(sel!(r#"script[type="application/ld+json"]"#))
            .find_map(|script| {
                let text = script.text().collect::<String>();
                let value = serde_json::from_str::<Value>(&text).ok()?;
                image_from_value(&value, base)
            })
    }
}

fn image_from_value(value: &Value, base: &Url) -> Option<String> {
    match value {
        Value::Object(obj) => {
            if let Some(image) = obj.get("image").or_else(|| obj.get("images"))
                && let Some(url) = image_url(image, base)
            {
                return Some(url);
            }
            obj.get("@graph")
                .and_then(|graph| image_from_value(graph, base))
        }
        Value::Array(items) => items.iter().find_map(|item| image_from_value(item, base)),
        _ => None,
    }
}

/// A single URL string, the first usable entry of a list, or an
/// ImageObject's `url`.
fn image_url(image: &Value, base: &Url) -> Option<String> {
    match image {
        Value::String(raw) => absolutize(base, raw),
        Value::Array(items) => items.iter().find_map(|item| image_url(item, base)),
        Value::Object(obj) => obj
            .get("url")
            .and_then(Value::as_str)
            .and_then(|raw| absolutize(base, raw)),
        _ => None,
    }
}

pub(crate) struct OpenGraph;

impl ImageStrategy for OpenGraph {
    fn name(&self) -> &'static str {
        "og:image"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        meta_content(document, sel!(r#"meta[property="og:image"]"#), base)
    }
}

pub(crate) struct TwitterCard;

impl ImageStrategy for TwitterCard {
    fn name(&self) -> &'static str {
        "twitter:image"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        meta_content(document, sel!(r#"meta[name="twitter:image"]"#), base)
            .or_else(|| meta_content(document, sel!(r#"meta[property="twitter:image"]"#), base))
    }
}

pub(crate) struct ProductMeta;

impl ImageStrategy for ProductMeta {
    fn name(&self) -> &'static str {
        "product:image"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        meta_content(document, sel!(r#"meta[property="product:image"]"#), base)
    }
}

pub(crate) struct ItemProp;

impl ImageStrategy for ItemProp {
    fn name(&self) -> &'static str {
        "itemprop"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        document
            .select(sel!(r#"[itemprop="image"]"#))
            .find_map(|el| {
                img_source(&el)
                    .or_else(|| el.value().attr("content"))
                    .and_then(|raw| absolutize(base, raw))
            })
    }
}

pub(crate) struct LinkImageSrc;

impl ImageStrategy for LinkImageSrc {
    fn name(&self) -> &'static str {
        "link:image_src"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        document
            .select(sel!(r#"link[rel="image_src"]"#))
            .find_map(|el| el.value().attr("href").and_then(|raw| absolutize(base, raw)))
    }
}

pub(crate) struct SecureOpenGraph;

impl ImageStrategy for SecureOpenGraph {
    fn name(&self) -> &'static str {
        "og:image:secure_url"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        meta_content(
            document,
            sel!(r#"meta[property="og:image:secure_url"]"#),
            base,
        )
    }
}

/// Class/id patterns that shops without metadata tend to use for the main
/// product shot.
static PRODUCT_IMG_SELECTORS: &[&str] = &[
    "img.product-image",
    "img#product-image",
    ".product-image img",
    "img.main-image",
    "img#main-image",
    ".main-image img",
    ".gallery-main img",
    "img.gallery-main",
    ".product-gallery img",
    ".product-photo img",
];

pub(crate) struct CssHeuristics;

impl ImageStrategy for CssHeuristics {
    fn name(&self) -> &'static str {
        "css-heuristics"
    }

    fn resolve(&self, document: &Html, base: &Url) -> Option<String> {
        PRODUCT_IMG_SELECTORS.iter().find_map(|css| {
            let selector = Selector::parse(css).ok()?;
            document
                .select(&selector)
                .find_map(|el| img_source(&el).and_then(|raw| absolutize(base, raw)))
        })
    }
}

fn meta_content(document: &Html, selector: &Selector, base: &Url) -> Option<String> {
    document
        .select(selector)
        .find_map(|el| el.value().attr("content").and_then(|raw| absolutize(base, raw)))
}

/// `src` with the common lazy-loading fallbacks.
pub(crate) fn img_source<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    let value = el.value();
    value
        .attr("src")
        .or_else(|| value.attr("data-src"))
        .or_else(|| value.attr("data-lazy-src"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example.com/p/1").unwrap()
    }

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn json_ld_accepts_image_list() {
        let html = r#"<script type="application/ld+json">
            {"@type":"Product","images":["/a.jpg","/b.jpg"]}
        </script>"#;
        assert_eq!(
            JsonLd.resolve(&doc(html), &base()),
            Some("https://shop.example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn json_ld_accepts_image_object_in_graph() {
        let html = r#"<script type="application/ld+json">
            {"@graph":[{"@type":"WebSite"},{"@type":"Product","image":{"url":"//cdn.example.com/p.jpg"}}]}
        </script>"#;
        assert_eq!(
            JsonLd.resolve(&doc(html), &base()),
            Some("https://cdn.example.com/p.jpg".to_string())
        );
    }

    #[test]
    fn json_ld_skips_svg_entries() {
        let html = r#"<script type="application/ld+json">
            {"@type":"Product","images":["/brand.svg","/real.jpg"]}
        </script>"#;
        assert_eq!(
            JsonLd.resolve(&doc(html), &base()),
            Some("https://shop.example.com/real.jpg".to_string())
        );
    }

    #[test]
    fn broken_json_ld_is_skipped_not_fatal() {
        let html = r#"<script type="application/ld+json">{not json</script>"#;
        assert_eq!(JsonLd.resolve(&doc(html), &base()), None);
    }

    #[test]
    fn twitter_card_checks_name_then_property() {
        let by_name = r#"<meta name="twitter:image" content="/t.jpg">"#;
        let by_property = r#"<meta property="twitter:image" content="/t.jpg">"#;
        let expected = Some("https://shop.example.com/t.jpg".to_string());
        assert_eq!(TwitterCard.resolve(&doc(by_name), &base()), expected);
        assert_eq!(TwitterCard.resolve(&doc(by_property), &base()), expected);
    }

    #[test]
    fn itemprop_prefers_src_over_content() {
        let html = r#"<img itemprop="image" src="/real.jpg" data-src="/lazy.jpg">"#;
        assert_eq!(
            ItemProp.resolve(&doc(html), &base()),
            Some("https://shop.example.com/real.jpg".to_string())
        );
        let lazy = r#"<img itemprop="image" data-lazy-src="/lazy.jpg">"#;
        assert_eq!(
            ItemProp.resolve(&doc(lazy), &base()),
            Some("https://shop.example.com/lazy.jpg".to_string())
        );
    }

    #[test]
    fn link_image_src_uses_href() {
        let html = r#"<link rel="image_src" href="https://cdn.example.com/l.jpg">"#;
        assert_eq!(
            LinkImageSrc.resolve(&doc(html), &base()),
            Some("https://cdn.example.com/l.jpg".to_string())
        );
    }

    #[test]
    fn css_heuristics_find_main_product_image() {
        let html = r#"<div class="product-gallery"><img src="/shot.jpg"></div>"#;
        assert_eq!(
            CssHeuristics.resolve(&doc(html), &base()),
            Some("https://shop.example.com/shot.jpg".to_string())
        );
    }

    #[test]
    fn css_heuristics_support_lazy_sources() {
        let html = r#"<img class="main-image" data-src="/lazy-main.jpg">"#;
        assert_eq!(
            CssHeuristics.resolve(&doc(html), &base()),
            Some("https://shop.example.com/lazy-main.jpg".to_string())
        );
    }
}
