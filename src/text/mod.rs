//! String helpers shared by the converters and the SEO composers.
//!
//! Lengths are counted in chars, never bytes, so truncation never splits a
//! multi-byte character.

pub mod slug;
pub mod stopwords;

pub use slug::slugify;
pub use stopwords::is_stopword;

use once_cell::sync::Lazy;
use regex::Regex;

pub const ELLIPSIS: char = '…';

/// A cut only backtracks to a word boundary when the boundary lies past this
/// char index; otherwise the text is hard-cut.
const MIN_BACKTRACK_INDEX: usize = 40;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static FENCED_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").unwrap());
static IMAGE_OR_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[[^\]]*\]\([^)]*\)").unwrap());
static BLOCK_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[#>*-]+[ \t]*").unwrap());

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Replace every tag with a space and collapse the result.
pub fn strip_html(html: &str) -> String {
    collapse_whitespace(&TAG_REGEX.replace_all(html, " "))
}

/// Drop code, images, links and leading block markers from Markdown source.
pub fn strip_markdown(markdown: &str) -> String {
    let text = FENCED_CODE_REGEX.replace_all(markdown, " ");
    let text = INLINE_CODE_REGEX.replace_all(&text, " ");
    let text = IMAGE_OR_LINK_REGEX.replace_all(&text, " ");
    let text = BLOCK_MARKER_REGEX.replace_all(&text, "");
    collapse_whitespace(&text)
}

/// Truncate to `max` chars with a trailing ellipsis.
///
/// The result may be one char longer than `max` (the ellipsis itself). Use
/// [`fit_within`] when the bound is strict.
pub fn ellipsize(text: &str, max: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max {
        return text;
    }

    let cut: String = text.chars().take(max).collect();
    let cut = match cut.rfind(' ') {
        Some(idx) if cut[..idx].chars().count() > MIN_BACKTRACK_INDEX => &cut[..idx],
        _ => cut.as_str(),
    };
    let cut = cut.trim_end_matches(|c: char| c == ELLIPSIS || c.is_whitespace());
    format!("{cut}{ELLIPSIS}")
}

/// Like [`ellipsize`] but the result never exceeds `max` chars.
pub fn fit_within(text: &str, max: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max {
        return text;
    }
    if max == 0 {
        return String::new();
    }
    ellipsize(&text, max - 1)
}

/// Split prose into sentences on `.`, `!` or `?` followed by whitespace.
pub fn sentences(text: &str) -> Vec<String> {
    let text = collapse_whitespace(text);
    let mut found = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let at_boundary = matches!(ch, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if at_boundary {
            let end = idx + ch.len_utf8();
            found.push(text[start..end].trim().to_string());
            start = end;
        }
    }
    found.push(text[start..].trim().to_string());

    found.retain(|sentence| !sentence.is_empty());
    found
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Escape `&`, `<`, `>` and `"` for text nodes and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}
