use std::collections::HashSet;

use crate::text::{char_len, collapse_whitespace, fit_within, sentences, strip_html, strip_markdown};

/// Sentences inside this open char range earn the length bonus.
const LENGTH_BONUS_MIN: usize = 40;
const LENGTH_BONUS_MAX: usize = 180;
/// Ties are broken by closeness to this length.
const IDEAL_SENTENCE_LEN: usize = 150;

#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionSources<'a> {
    pub excerpt: &'a str,
    /// Markdown source text, stripped before use.
    pub markdown: &'a str,
    /// Canonical HTML, stripped before use.
    pub html: &'a str,
}

#[derive(Debug)]
struct Candidate {
    text: String,
    score: usize,
    distance: usize,
}

/// Pick the best one or two sentences for a meta description of at most
/// `max` chars.
pub fn compose_description(
    sources: DescriptionSources<'_>,
    keywords: &[String],
    max: usize,
) -> String {
    let combined = collapse_whitespace(&format!(
        "{} {} {}",
        sources.excerpt,
        strip_markdown(sources.markdown),
        strip_html(sources.html)
    ));

    let mut pool = rank(unique_sentences(&combined), keywords);
    if pool.is_empty() {
        let head: String = combined.chars().take(max).collect();
        return fit_within(&head, max);
    }

    let top = pool.remove(0).text;
    let chosen = match pool.first() {
        Some(second) if char_len(&top) + 1 + char_len(&second.text) <= max => {
            format!("{top} {}", second.text)
        }
        _ => top,
    };

    fit_within(&chosen, max)
}

/// Excerpt, Markdown and HTML often repeat the same sentence; keep only the
/// first occurrence, compared on lowercase alphanumerics.
fn unique_sentences(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    sentences(text)
        .into_iter()
        .filter(|sentence| seen.insert(dedupe_key(sentence)))
        .collect()
}

fn dedupe_key(sentence: &str) -> String {
    sentence
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn rank(sentences: Vec<String>, keywords: &[String]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = sentences
        .into_iter()
        .map(|text| {
            let len = char_len(&text);
            Candidate {
                score: score(&text, len, keywords),
                distance: len.abs_diff(IDEAL_SENTENCE_LEN),
                text,
            }
        })
        .collect();

    // Stable sort keeps source order among full ties.
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.distance.cmp(&b.distance)));
    candidates
}

fn score(sentence: &str, len: usize, keywords: &[String]) -> usize {
    let lower = sentence.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && lower.contains(&keyword.to_lowercase()))
        .count();
    let length_bonus = usize::from(len > LENGTH_BONUS_MIN && len < LENGTH_BONUS_MAX);
    2 * hits + length_bonus
}
