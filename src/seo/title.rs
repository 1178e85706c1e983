use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{char_len, collapse_whitespace, fit_within};

/// A leading segment shorter than this is too vague to stand alone.
const MIN_SEGMENT_LEN: usize = 10;

static SEGMENT_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r":|–|—| - ").unwrap());

/// Compose a meta title of at most `max` chars.
///
/// Over-long titles are first cut back to their leading segment (text before
/// a colon or dash), then ellipsized. A taxonomy keyword is appended as
/// `" — keyword"` when it fits and is not already present, and the brand
/// suffix only when it fits as-is. Nothing is truncated after the suffix.
pub fn compose_title(base: &str, keyword: Option<&str>, max: usize, brand_suffix: &str) -> String {
    let collapsed = collapse_whitespace(base);
    if collapsed.is_empty() {
        return String::new();
    }

    let mut title = collapsed.as_str();
    if char_len(title) > max
        && let Some(first) = SEGMENT_SPLIT_REGEX.split(title).next().map(str::trim)
        && char_len(first) > MIN_SEGMENT_LEN
    {
        title = first;
    }
    let mut title = fit_within(title, max);

    if let Some(keyword) = keyword.map(collapse_whitespace).filter(|k| !k.is_empty()) {
        let candidate = format!("{title} — {keyword}");
        let already_present = title.to_lowercase().contains(&keyword.to_lowercase());
        if char_len(&candidate) <= max && !already_present {
            title = candidate;
        }
    }

    if !brand_suffix.is_empty()
        && !title.ends_with(brand_suffix)
        && char_len(&title) + char_len(brand_suffix) <= max
    {
        title.push_str(brand_suffix);
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ELLIPSIS;

    const SUFFIX: &str = " | Seben Capital";

    #[test]
    fn test_long_title_stays_within_limit() {
        let title = compose_title(
            "A Very Long Headline About Risk Management That Exceeds Sixty Characters Easily",
            None,
            60,
            SUFFIX,
        );
        assert!(char_len(&title) <= 60);
        assert!(!title.contains("……"));
        // 56 chars after ellipsizing leaves no room for the 16-char suffix.
        assert_eq!(
            title,
            format!("A Very Long Headline About Risk Management That Exceeds{ELLIPSIS}")
        );
    }

    #[test]
    fn test_short_title_gets_suffix() {
        assert_eq!(
            compose_title("Risk Management 101", Some("Risk"), 60, SUFFIX),
            "Risk Management 101 | Seben Capital"
        );
    }

    #[test]
    fn test_keyword_appended_when_it_fits() {
        assert_eq!(
            compose_title("Position Sizing Basics", Some("Psychology"), 60, SUFFIX),
            "Position Sizing Basics — Psychology | Seben Capital"
        );
    }

    #[test]
    fn test_keyword_skipped_when_too_long() {
        let title = compose_title(
            "Position Sizing Basics for Swing Traders",
            Some("Behavioural Finance and Trading Psychology"),
            60,
            SUFFIX,
        );
        assert_eq!(title, "Position Sizing Basics for Swing Traders | Seben Capital");
    }

    #[test]
    fn test_leading_segment_used_for_long_titles() {
        let title = compose_title(
            "Risk Management: A Practical Field Guide for Independent Traders Everywhere",
            None,
            60,
            SUFFIX,
        );
        assert_eq!(title, "Risk Management | Seben Capital");
    }

    #[test]
    fn test_short_leading_segment_is_not_used() {
        let title = compose_title(
            "Risk 101: A Practical Field Guide for Independent Traders Everywhere Today",
            None,
            60,
            SUFFIX,
        );
        assert!(title.starts_with("Risk 101: A Practical"));
        assert!(title.ends_with(ELLIPSIS));
        assert!(char_len(&title) <= 60);
    }

    #[test]
    fn test_suffix_never_duplicated() {
        assert_eq!(
            compose_title("Weekly Notes | Seben Capital", None, 60, SUFFIX),
            "Weekly Notes | Seben Capital"
        );
    }

    #[test]
    fn test_empty_base_yields_empty_title() {
        assert_eq!(compose_title("   ", Some("Risk"), 60, SUFFIX), "");
    }
}
