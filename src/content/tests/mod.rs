use std::fs;

use crate::content::{
    AuthoringMode, Block, ContentBuffers, HeadingLevel, markdown_to_html, plain_text_to_html,
};

#[test]
fn test_convert_markdown_article() {
    let markdown = fs::read_to_string("src/content/tests/fixtures/position-sizing.md")
        .expect("Failed to read test fixture");

    let html = markdown_to_html(&markdown);

    assert!(html.contains("<h2>Position Sizing Basics</h2>"));
    assert!(html.contains("<h2>The Two Percent Rule</h2>"));
    assert!(html.contains("<strong>lose</strong>"));
    assert!(html.contains("<em>wrong</em>"));
    assert!(html.contains("<ul><li>Risk at most 2% per trade</li><li>Cut losers fast</li></ul>"));
    assert!(html.contains("<ol><li>Define the stop</li><li>Compute the size</li></ol>"));
    assert!(html.contains("<blockquote>Survive first, then thrive.</blockquote>"));
    assert!(html.contains(r#"<a href="https://sebencapital.com/checklist">full checklist</a>"#));
    assert!(html.contains(r#"<img src="/images/equity.png" alt="Equity curve" />"#));

    // The `*` inside the code block must survive untouched.
    assert!(html.contains("<pre><code>risk = equity * 0.02</code></pre>"));
    assert!(!html.contains("<p></p>"));
}

#[test]
fn test_structure_plain_text_notes() {
    let text = fs::read_to_string("src/content/tests/fixtures/morning-notes.txt")
        .expect("Failed to read test fixture");

    let html = plain_text_to_html(&text);

    assert!(html.starts_with("<h2>Morning Review Notes</h2>"));
    assert!(html.contains("<p>Checked overnight gaps before the open.</p>"));
    assert!(html.contains(
        "<ul>\n<li>Trim winners into strength</li>\n<li>Keep stops below structure</li>\n</ul>"
    ));
    assert!(html.contains("<blockquote>Plan the trade, trade the plan</blockquote>"));
    assert!(html.contains("<p>Risk &lt;5% total &amp; stay patient.</p>"));
}

#[test]
fn test_resolver_uses_same_converters() {
    let markdown = fs::read_to_string("src/content/tests/fixtures/position-sizing.md")
        .expect("Failed to read test fixture");

    let buffers = ContentBuffers {
        markdown: markdown.clone(),
        plain_text: "Ignored while markdown is present.".to_string(),
        ..ContentBuffers::default()
    };

    assert_eq!(buffers.canonical_html(), markdown_to_html(&markdown));
}

#[test]
fn test_block_sequence_wins_in_structured_mode() {
    let buffers = ContentBuffers {
        mode: AuthoringMode::Structured,
        markdown: "# Markdown heading".to_string(),
        plain_text: "Plain paragraph.".to_string(),
        blocks: vec![
            Block::Heading {
                level: HeadingLevel::H2,
                text: "Blocks".to_string(),
            },
            Block::Paragraph {
                text: "Structured body.".to_string(),
            },
        ],
        ..ContentBuffers::default()
    };

    assert_eq!(
        buffers.canonical_html(),
        "<h2>Blocks</h2>\n<p>Structured body.</p>"
    );
}

#[test]
fn test_malformed_markdown_is_tolerated() {
    let html = markdown_to_html("**unclosed bold\n```\nopen fence\n[broken](link");
    assert!(html.contains("unclosed bold"));
    assert!(html.contains("open fence"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_markdown_never_panics_and_is_deterministic(input in ".*") {
            let first = markdown_to_html(&input);
            let second = markdown_to_html(&input);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_plain_text_never_leaks_tags(input in ".*") {
            let html = plain_text_to_html(&input);
            prop_assert!(!html.contains("<script"));
        }

        #[test]
        fn test_resolution_is_idempotent(
            html in ".*",
            markdown in ".*",
            plain in ".*",
        ) {
            let buffers = ContentBuffers {
                html,
                markdown,
                plain_text: plain,
                ..ContentBuffers::default()
            };
            prop_assert_eq!(buffers.canonical_html(), buffers.canonical_html());
        }
    }
}
