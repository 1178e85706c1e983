//! Regex-driven conversion of a constrained Markdown subset into HTML.
//!
//! The conversion is an ordered list of steps; each step sees the output of
//! the previous one, so the order is part of the contract:
//!
//! 1. fenced code and 2. inline code are escaped and moved into a stash,
//!    leaving opaque tokens behind so no later rule can rewrite code;
//! 3. headings, 4. blockquotes, 5. unordered and 6. ordered lists turn
//!    line-leading markers into block tags;
//! 7. bold runs before italic so `**` is never read as two `*`;
//! 8. images run before links so `![..](..)` is not half-consumed;
//! 9. paragraph wrapping runs last and skips lines that already start with a
//!    block-level tag produced above.
//!
//! Non-code text is not escaped: inline HTML in the source passes through.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::text::escape_html;

const STASH_OPEN: char = '\u{2}';
const STASH_CLOSE: char = '\u{3}';
const FENCE_KIND: char = 'F';
const INLINE_KIND: char = 'I';

static FENCED_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[^\n]*\n?(.*?)```").unwrap());
static INLINE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static HEADING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,3})[ \t]+(.+?)[ \t]*$").unwrap());
static BLOCKQUOTE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]?(.*)$").unwrap());
static UNORDERED_ITEM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[-*][ \t]+(.+)$").unwrap());
static ORDERED_ITEM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\.[ \t]+(.+)$").unwrap());
static BOLD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static IMAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static BLOCK_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^</?(h[1-6]|ul|ol|li|blockquote|pre|p|div|table|thead|tbody|tr|td|th|hr|img|figure|section|article)\b",
    )
    .unwrap()
});
static STASH_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{2}([FI])(\\d+)\u{3}").unwrap());

/// Escaped code fragments waiting to be put back after the other rules ran.
#[derive(Default)]
struct Stash {
    fragments: Vec<String>,
}

impl Stash {
    fn put(&mut self, kind: char, html: String) -> String {
        let token = format!("{STASH_OPEN}{kind}{}{STASH_CLOSE}", self.fragments.len());
        self.fragments.push(html);
        token
    }

    fn restore(&self, text: &str) -> String {
        STASH_TOKEN_REGEX
            .replace_all(text, |caps: &Captures| {
                caps[2]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.fragments.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

type Step = fn(&str, &mut Stash) -> String;

const PIPELINE: &[(&str, Step)] = &[
    ("fenced_code", fenced_code),
    ("inline_code", inline_code),
    ("headings", headings),
    ("blockquotes", blockquotes),
    ("unordered_lists", unordered_lists),
    ("ordered_lists", ordered_lists),
    ("emphasis", emphasis),
    ("images_and_links", images_and_links),
    ("paragraphs", paragraphs),
];

pub fn markdown_to_html(markdown: &str) -> String {
    // Stash delimiters are reserved; CRLF would leave `\r` before `$`.
    let mut text: String = markdown
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| *c != STASH_OPEN && *c != STASH_CLOSE)
        .collect();

    let mut stash = Stash::default();
    for (name, step) in PIPELINE {
        text = step(&text, &mut stash);
        trace!(step = name, len = text.len(), "markdown step applied");
    }

    stash.restore(&text)
}

/// Fenced blocks become a stash token on a line of its own.
fn fenced_code(text: &str, stash: &mut Stash) -> String {
    FENCED_CODE_REGEX
        .replace_all(text, |caps: &Captures| {
            let body = caps[1].trim_end_matches('\n');
            let token = stash.put(
                FENCE_KIND,
                format!("<pre><code>{}</code></pre>", escape_html(body)),
            );
            format!("\n{token}\n")
        })
        .into_owned()
}

/// Precondition: fenced code is already stashed, so backticks left are inline.
fn inline_code(text: &str, stash: &mut Stash) -> String {
    INLINE_CODE_REGEX
        .replace_all(text, |caps: &Captures| {
            stash.put(
                INLINE_KIND,
                format!("<code>{}</code>", escape_html(&caps[1])),
            )
        })
        .into_owned()
}

/// `#` and `##` both map to `<h2>`; only `###` maps to `<h3>`.
fn headings(text: &str, _stash: &mut Stash) -> String {
    HEADING_REGEX
        .replace_all(text, |caps: &Captures| {
            let level = if caps[1].len() == 3 { 3 } else { 2 };
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

fn blockquotes(text: &str, _stash: &mut Stash) -> String {
    BLOCKQUOTE_REGEX
        .replace_all(text, "<blockquote>${1}</blockquote>")
        .into_owned()
}

fn unordered_lists(text: &str, _stash: &mut Stash) -> String {
    let items = UNORDERED_ITEM_REGEX.replace_all(text, "<li>${1}</li>");
    wrap_item_runs(&items, "ul")
}

/// Precondition: unordered runs are already wrapped onto single `<ul>` lines,
/// so only the new ordered items still start a line with `<li>`.
fn ordered_lists(text: &str, _stash: &mut Stash) -> String {
    let items = ORDERED_ITEM_REGEX.replace_all(text, "<li>${1}</li>");
    wrap_item_runs(&items, "ol")
}

/// Wrap each run of adjacent `<li>` lines in `tag`, unless the run is already
/// closed by a `</ul>`/`</ol>` on the following line.
fn wrap_item_runs(text: &str, tag: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        if !is_item_line(lines[idx]) {
            out.push(lines[idx].to_string());
            idx += 1;
            continue;
        }

        let start = idx;
        while idx < lines.len() && is_item_line(lines[idx]) {
            idx += 1;
        }
        let run = &lines[start..idx];

        let already_closed = lines.get(idx).is_some_and(|next| {
            let next = next.trim_start();
            next.starts_with("</ul>") || next.starts_with("</ol>")
        });
        if already_closed {
            out.extend(run.iter().map(|line| line.to_string()));
        } else {
            out.push(format!("<{tag}>{}</{tag}>", run.concat()));
        }
    }

    out.join("\n")
}

fn is_item_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("<li>") && line.ends_with("</li>")
}

fn emphasis(text: &str, _stash: &mut Stash) -> String {
    let bold = BOLD_REGEX.replace_all(text, "<strong>${1}</strong>");
    ITALIC_REGEX
        .replace_all(&bold, "<em>${1}</em>")
        .into_owned()
}

fn images_and_links(text: &str, _stash: &mut Stash) -> String {
    let images = IMAGE_REGEX.replace_all(text, r#"<img src="${2}" alt="${1}" />"#);
    LINK_REGEX
        .replace_all(&images, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

fn paragraphs(text: &str, _stash: &mut Stash) -> String {
    let fence_prefix = format!("{STASH_OPEN}{FENCE_KIND}");
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if BLOCK_TAG_REGEX.is_match(line) || line.starts_with(&fence_prefix) {
                line.to_string()
            } else {
                format!("<p>{line}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
