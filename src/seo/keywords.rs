use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::is_stopword;

const MAX_KEYWORDS: usize = 12;
const MIN_KEYWORD_LEN: usize = 3;

static TOKEN_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Ranked topical terms from the title and taxonomy names, in first-seen
/// order.
pub fn extract_keywords<'a, C, T>(title: &str, categories: C, tags: T) -> Vec<String>
where
    C: IntoIterator<Item = &'a str>,
    T: IntoIterator<Item = &'a str>,
{
    let mut combined = title.to_string();
    for name in categories.into_iter().chain(tags) {
        combined.push(' ');
        combined.push_str(name);
    }
    let combined = combined.to_lowercase();

    let mut seen = HashSet::new();
    TOKEN_SPLIT_REGEX
        .split(&combined)
        .filter(|token| token.len() >= MIN_KEYWORD_LEN && !is_stopword(token))
        .filter(|token| seen.insert(*token))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_first_seen_order() {
        let keywords = extract_keywords(
            "Risk Management for the Busy Trader",
            ["Risk", "Psychology"],
            ["trading-plans"],
        );
        assert_eq!(
            keywords,
            vec!["risk", "management", "busy", "trader", "psychology", "trading", "plans"]
        );
    }

    #[test]
    fn test_drops_short_tokens_and_stopwords() {
        let keywords = extract_keywords("An AI of the 10 best ETFs", [], []);
        assert_eq!(keywords, vec!["best", "etfs"]);
    }

    #[test]
    fn test_caps_at_twelve() {
        let title = (1..=20)
            .map(|n| format!("word{n}"))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = extract_keywords(&title, [], []);
        assert_eq!(keywords.len(), 12);
        assert_eq!(keywords[0], "word1");
        assert_eq!(keywords[11], "word12");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(extract_keywords("", [], []).is_empty());
    }
}
