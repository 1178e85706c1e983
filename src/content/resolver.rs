use serde::{Deserialize, Serialize};

use crate::content::{
    blocks::{Block, blocks_to_markdown, render_blocks},
    markdown::markdown_to_html,
    plain_text::plain_text_to_html,
};

/// Which editor the author is working in. Only structured mode makes the
/// block sequence eligible as a content source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoringMode {
    #[default]
    Freeform,
    Structured,
}

/// Every editor buffer, kept at once. Stale buffers are harmless: only the
/// authoritative one feeds synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBuffers {
    pub mode: AuthoringMode,
    pub html: String,
    pub markdown: String,
    pub plain_text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    RawHtml(&'a str),
    Markdown(&'a str),
    PlainText(&'a str),
    BlockSequence(&'a [Block]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    RawHtml,
    Markdown,
    PlainText,
    BlockSequence,
}

impl ContentSource<'_> {
    pub fn kind(&self) -> SourceKind {
        match self {
            ContentSource::RawHtml(_) => SourceKind::RawHtml,
            ContentSource::Markdown(_) => SourceKind::Markdown,
            ContentSource::PlainText(_) => SourceKind::PlainText,
            ContentSource::BlockSequence(_) => SourceKind::BlockSequence,
        }
    }

    pub fn render(&self) -> String {
        match self {
            ContentSource::RawHtml(html) => html.to_string(),
            ContentSource::Markdown(markdown) => markdown_to_html(markdown),
            ContentSource::PlainText(text) => plain_text_to_html(text),
            ContentSource::BlockSequence(blocks) => render_blocks(blocks),
        }
    }
}

impl ContentBuffers {
    /// Pick the source by fixed precedence: blocks (structured mode only),
    /// raw HTML, Markdown, plain text. Edit recency plays no part.
    pub fn authoritative(&self) -> Option<ContentSource<'_>> {
        if self.mode == AuthoringMode::Structured && !self.blocks.is_empty() {
            return Some(ContentSource::BlockSequence(&self.blocks));
        }
        if has_text(&self.html) {
            return Some(ContentSource::RawHtml(&self.html));
        }
        if has_text(&self.markdown) {
            return Some(ContentSource::Markdown(&self.markdown));
        }
        if has_text(&self.plain_text) {
            return Some(ContentSource::PlainText(&self.plain_text));
        }
        None
    }

    /// The canonical HTML: the authoritative source rendered, or empty.
    pub fn canonical_html(&self) -> String {
        self.authoritative()
            .map(|source| source.render())
            .unwrap_or_default()
    }

    /// Best-effort original author text for the `content_markdown` field.
    ///
    /// Raw HTML has no Markdown form of its own, so the Markdown buffer is
    /// sent as-is in that case (possibly empty).
    pub fn author_text(&self) -> String {
        match self.authoritative() {
            Some(ContentSource::Markdown(markdown)) => markdown.to_string(),
            Some(ContentSource::PlainText(text)) => text.to_string(),
            Some(ContentSource::BlockSequence(blocks)) => blocks_to_markdown(blocks),
            Some(ContentSource::RawHtml(_)) | None => self.markdown.clone(),
        }
    }
}

fn has_text(buffer: &str) -> bool {
    !buffer.trim().is_empty()
}
