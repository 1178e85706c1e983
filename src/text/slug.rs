use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

static NON_ALNUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derive a URL-safe identifier from a title.
///
/// Lowercases, decomposes to NFD and drops combining marks (so `é` becomes
/// `e`), then collapses every run of other characters into one hyphen.
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    NON_ALNUM_REGEX
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_collapses_to_single_hyphen() {
        assert_eq!(slugify("Trading & the Mind!"), "trading-the-mind");
    }

    #[test]
    fn test_diacritics_are_stripped() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Überraschung à la carte"), "uberraschung-a-la-carte");
    }

    #[test]
    fn test_edges_and_empty() {
        assert_eq!(slugify("  --Risk Management 101--  "), "risk-management-101");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_non_latin_scripts_drop_out() {
        assert_eq!(slugify("Markets 市场 2025"), "markets-2025");
    }
}
