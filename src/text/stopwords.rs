use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common English function words ignored by keyword extraction.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "for", "from", "had", "has", "have", "her", "here", "his", "how", "if", "in", "into", "is",
    "it", "its", "just", "more", "most", "not", "now", "of", "on", "only", "or", "our", "out",
    "over", "she", "should", "so", "some", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "why", "will", "with",
    "would", "you", "your",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Expects an already lowercased token.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
