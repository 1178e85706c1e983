use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::escape_html;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("heading level must be 2 or 3, got {0}")]
    InvalidHeadingLevel(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl TryFrom<u8> for HeadingLevel {
    type Error = BlockError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            other => Err(BlockError::InvalidHeadingLevel(other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// One unit of structured content. Blocks never nest; their order in the
/// sequence is their rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Quote {
        text: String,
    },
    Code {
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
    Divider,
}

impl Block {
    pub fn to_html(&self) -> String {
        match self {
            Block::Heading { level, text } => {
                let level = u8::from(*level);
                format!("<h{level}>{}</h{level}>", escape_html(text))
            }
            Block::Paragraph { text } => format!("<p>{}</p>", escape_html(text)),
            Block::Quote { text } => format!("<blockquote>{}</blockquote>", escape_html(text)),
            Block::Code { text } => format!("<pre><code>{}</code></pre>", escape_html(text)),
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape_html(item)))
                    .collect();
                format!("<{tag}>{items}</{tag}>")
            }
            Block::Image { src, alt } => format!(
                r#"<img src="{}" alt="{}" />"#,
                escape_html(src),
                escape_html(alt.as_deref().unwrap_or_default())
            ),
            Block::Table { rows } => {
                let rows: String = rows
                    .iter()
                    .map(|row| {
                        let cells: String = row
                            .iter()
                            .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                            .collect();
                        format!("<tr>{cells}</tr>")
                    })
                    .collect();
                format!("<table>{rows}</table>")
            }
            Block::Divider => "<hr/>".to_string(),
        }
    }

    /// Markdown rendition, used as the author-text field on submission.
    pub fn to_markdown(&self) -> String {
        match self {
            Block::Heading { level, text } => {
                let hashes = "#".repeat(u8::from(*level) as usize);
                format!("{hashes} {text}")
            }
            Block::Paragraph { text } => text.clone(),
            Block::Quote { text } => text
                .lines()
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { text } => format!("```\n{text}\n```"),
            Block::List { ordered, items } => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    if *ordered {
                        format!("{}. {item}", idx + 1)
                    } else {
                        format!("- {item}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Image { src, alt } => {
                format!("![{}]({src})", alt.as_deref().unwrap_or_default())
            }
            Block::Table { rows } => rows
                .iter()
                .map(|row| format!("| {} |", row.join(" | ")))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Divider => "---".to_string(),
        }
    }
}

pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n")
}
