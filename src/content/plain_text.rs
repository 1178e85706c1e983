//! Promote unstructured plain text into semantic HTML, one line at a time.
//!
//! Plain text is treated as untrusted, so every piece of text is escaped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::escape_html;

const IMPLICIT_HEADING_MIN_LEN: usize = 8;
const IMPLICIT_HEADING_MAX_LEN: usize = 120;

static HASH_HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,3})\s+(.*)$").unwrap());
static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+(.*)$").unwrap());
static NUMBERED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    Item { kind: ListKind, text: &'a str },
    Quote(&'a str),
    Paragraph(&'a str),
}

/// Classify a trimmed line; the first matching rule wins.
fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = HASH_HEADING_REGEX.captures(line) {
        let level = if caps[1].len() == 3 { 3 } else { 2 };
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Heading { level, text };
    }

    if is_implicit_heading(line) {
        return Line::Heading { level: 2, text: line };
    }

    if let Some(caps) = BULLET_REGEX.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str());
        return Line::Item {
            kind: ListKind::Unordered,
            text,
        };
    }
    if let Some(caps) = NUMBERED_REGEX.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str());
        return Line::Item {
            kind: ListKind::Ordered,
            text,
        };
    }

    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        return Line::Quote(line[1..line.len() - 1].trim());
    }
    if let Some(rest) = line.strip_prefix('>') {
        return Line::Quote(rest.trim());
    }

    Line::Paragraph(line)
}

/// A capitalised line with no sentence punctuation and a title-like length.
fn is_implicit_heading(line: &str) -> bool {
    let len = line.chars().count();
    line.chars().next().is_some_and(char::is_uppercase)
        && !line.contains(['.', '!', '?'])
        && len > IMPLICIT_HEADING_MIN_LEN
        && len <= IMPLICIT_HEADING_MAX_LEN
}

pub fn plain_text_to_html(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open_list: Option<ListKind> = None;

    for raw in text.lines() {
        match classify(raw.trim()) {
            Line::Blank => close_list(&mut out, &mut open_list),
            Line::Item { kind, text } => {
                if open_list != Some(kind) {
                    close_list(&mut out, &mut open_list);
                    out.push(format!("<{}>", kind.tag()));
                    open_list = Some(kind);
                }
                out.push(format!("<li>{}</li>", escape_html(text)));
            }
            Line::Heading { level, text } => {
                close_list(&mut out, &mut open_list);
                out.push(format!("<h{level}>{}</h{level}>", escape_html(text)));
            }
            Line::Quote(text) => {
                close_list(&mut out, &mut open_list);
                out.push(format!("<blockquote>{}</blockquote>", escape_html(text)));
            }
            Line::Paragraph(text) => {
                close_list(&mut out, &mut open_list);
                out.push(format!("<p>{}</p>", escape_html(text)));
            }
        }
    }
    close_list(&mut out, &mut open_list);

    out.join("\n")
}

fn close_list(out: &mut Vec<String>, open_list: &mut Option<ListKind>) {
    if let Some(kind) = open_list.take() {
        out.push(format!("</{}>", kind.tag()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(
            classify("### Setup"),
            Line::Heading {
                level: 3,
                text: "Setup"
            }
        );
        assert_eq!(
            classify("# Setup"),
            Line::Heading {
                level: 2,
                text: "Setup"
            }
        );
        assert_eq!(
            classify("Risk First"),
            Line::Heading {
                level: 2,
                text: "Risk First"
            }
        );
        assert_eq!(
            classify("- size small"),
            Line::Item {
                kind: ListKind::Unordered,
                text: "size small"
            }
        );
        assert_eq!(
            classify("2. exit"),
            Line::Item {
                kind: ListKind::Ordered,
                text: "exit"
            }
        );
        assert_eq!(classify("\"Stay humble\""), Line::Quote("Stay humble"));
        assert_eq!(classify("> Stay humble"), Line::Quote("Stay humble"));
        assert_eq!(
            classify("Manage your downside."),
            Line::Paragraph("Manage your downside.")
        );
    }

    #[test]
    fn test_implicit_heading_bounds() {
        // Exactly 8 chars is too short.
        assert!(!is_implicit_heading("Risk Now"));
        assert!(is_implicit_heading("Risk Nows"));
        assert!(!is_implicit_heading(&format!("R{}", "a".repeat(120))));
        assert!(!is_implicit_heading("lowercase start here"));
        assert!(!is_implicit_heading("Why Risk Matters?"));
    }

    #[test]
    fn test_structures_headings_and_paragraphs() {
        let html = plain_text_to_html("Risk First\n\nManage your downside before upside.");
        assert_eq!(
            html,
            "<h2>Risk First</h2>\n<p>Manage your downside before upside.</p>"
        );
    }

    #[test]
    fn test_lists_open_and_close() {
        let html = plain_text_to_html("- one\n- two\n\n1. first\n2. second");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<ol>\n<li>first</li>\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_closes_at_end_of_input_and_on_kind_change() {
        let html = plain_text_to_html("- one\n1. first");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n</ul>\n<ol>\n<li>first</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_closes_before_other_blocks() {
        let html = plain_text_to_html("- one\nthen a closing remark.");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n</ul>\n<p>then a closing remark.</p>"
        );
    }

    #[test]
    fn test_everything_is_escaped() {
        let html = plain_text_to_html("<script>alert(1)</script> & more.");
        assert_eq!(
            html,
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more.</p>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(plain_text_to_html(""), "");
        assert_eq!(plain_text_to_html("\n\n"), "");
    }
}
