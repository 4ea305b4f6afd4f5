//! Price extraction from free-form model output

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Price reported when the text holds no number at all
pub const DEFAULT_PRICE: i64 = 1000;

/// Integer with optional comma grouping (`12,000`); full-width digits included
static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9０-９]+(?:,[0-9０-９]{3})*").expect("Invalid price regex")
});

/// Best-guess integer price from unstructured text
///
/// Uses the leftmost number only, so `"1000-1500"` yields `1000`.
/// Falls back to [`DEFAULT_PRICE`] when nothing matches.
pub fn extract_price(text: &str) -> i64 {
    let Some(found) = PRICE_PATTERN.find(text) else {
        debug!("No price found in model output, using default {}", DEFAULT_PRICE);
        return DEFAULT_PRICE;
    };

    let digits: String = found
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .map(to_ascii_digit)
        .collect();

    // only overflow can fail here
    digits.parse().unwrap_or(i64::MAX)
}

/// Fold full-width digits onto ASCII
fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_number() {
        assert_eq!(extract_price("推定価格は12,000円です"), 12000);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(extract_price("価格不明"), DEFAULT_PRICE);
        assert_eq!(extract_price(""), DEFAULT_PRICE);
    }

    #[test]
    fn test_leftmost_match_wins() {
        assert_eq!(extract_price("1000-1500"), 1000);
        assert_eq!(extract_price("約500円程度です"), 500);
    }

    #[test]
    fn test_full_width_digits() {
        assert_eq!(extract_price("３０００円"), 3000);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(extract_price("99999999999999999999999"), i64::MAX);
    }
}
