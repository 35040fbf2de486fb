//! Pull a dollar amount out of free text.

use once_cell::sync::Lazy;
use regex::Regex;

static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d+(?:\.\d{1,2})?)").expect("invalid price pattern"));

/// First dollar amount in the text, if any. Multiple prices in one text
/// are not aggregated; the first occurrence wins.
pub fn extract_price(text: &str) -> Option<f64> {
    PRICE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|amount| amount.as_str().parse::<f64>().ok())
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_decimal_price() {
        assert_eq!(extract_price("Affordable dupe $39.99"), Some(39.99));
    }

    #[test]
    fn extracts_whole_dollar_price() {
        assert_eq!(extract_price("only $45 today"), Some(45.0));
    }

    #[test]
    fn no_price_yields_none() {
        assert_eq!(extract_price("No price visible"), None);
        assert_eq!(extract_price("costs 39.99 euros"), None);
    }

    #[test]
    fn first_price_wins() {
        assert_eq!(extract_price("Was $120, now $89.99"), Some(120.0));
    }

    #[test]
    fn at_most_two_fractional_digits() {
        assert_eq!(extract_price("precise $5.999"), Some(5.99));
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_price(39.9), "$39.90");
        assert_eq!(format_price(45.0), "$45.00");
    }
}
