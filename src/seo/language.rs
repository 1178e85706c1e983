//! `inLanguage` for the structured data.
//!
//! The body is the best evidence of an article's language. Titles and
//! excerpts are short and often borrow English terms, so they are only
//! consulted when the body alone is too thin to classify.

use whatlang::{Info, Lang};

use crate::text::{collapse_whitespace, strip_html};

/// Fewer chars than this and whatlang guesses more than it detects.
const MIN_SAMPLE_CHARS: usize = 60;
const MIN_CONFIDENCE: f64 = 0.3;

/// Two-letter tags for the languages the site publishes in. Anything else
/// keeps whatlang's three-letter code, which is still a valid primary tag.
const TWO_LETTER_TAGS: &[(Lang, &str)] = &[
    (Lang::Eng, "en"),
    (Lang::Fra, "fr"),
    (Lang::Deu, "de"),
    (Lang::Spa, "es"),
    (Lang::Por, "pt"),
    (Lang::Ita, "it"),
    (Lang::Nld, "nl"),
    (Lang::Ara, "ar"),
    (Lang::Hin, "hi"),
    (Lang::Cmn, "zh"),
    (Lang::Jpn, "ja"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageSample<'a> {
    pub title: &'a str,
    pub excerpt: &'a str,
    /// Canonical HTML; tags are stripped before detection.
    pub body_html: &'a str,
}

/// Detect the article language, or `None` when the text is too short or the
/// guess is not confident.
pub fn detect_language(sample: LanguageSample<'_>) -> Option<String> {
    let body = strip_html(sample.body_html);
    let text = if body.chars().count() >= MIN_SAMPLE_CHARS {
        body
    } else {
        collapse_whitespace(&format!("{} {} {body}", sample.title, sample.excerpt))
    };

    if text.chars().count() < MIN_SAMPLE_CHARS {
        return None;
    }

    whatlang::detect(&text)
        .filter(|info: &Info| info.confidence() >= MIN_CONFIDENCE)
        .map(|info| tag_for(info.lang()))
}

fn tag_for(lang: Lang) -> String {
    TWO_LETTER_TAGS
        .iter()
        .find(|(known, _)| *known == lang)
        .map_or(lang.code(), |(_, tag)| *tag)
        .to_string()
}
