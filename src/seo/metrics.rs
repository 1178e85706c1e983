use serde::{Deserialize, Serialize};

use crate::text::{strip_html, strip_markdown};

const WORDS_PER_MINUTE: usize = 220;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub read_time_minutes: usize,
}

impl ContentMetrics {
    pub fn measure(title: &str, excerpt: &str, html: &str) -> Self {
        let word_count = word_count(title, excerpt, html);
        Self {
            word_count,
            read_time_minutes: minutes_to_read(word_count),
        }
    }

    pub fn read_time_label(&self) -> String {
        read_time_label(self.read_time_minutes)
    }
}

/// Words across title, excerpt and canonical HTML with all markup removed.
pub fn word_count(title: &str, excerpt: &str, html: &str) -> usize {
    let combined = format!("{title} {excerpt} {html}");
    strip_html(&strip_markdown(&combined))
        .split_whitespace()
        .count()
}

/// Reading time in whole minutes, never less than one.
pub fn minutes_to_read(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}

pub fn read_time_label(minutes: usize) -> String {
    format!("{minutes} min read")
}
