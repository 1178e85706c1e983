pub mod blocks;
pub mod markdown;
pub mod plain_text;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use blocks::{Block, BlockError, HeadingLevel, render_blocks};
pub use markdown::markdown_to_html;
pub use plain_text::plain_text_to_html;
pub use resolver::{AuthoringMode, ContentBuffers, ContentSource, SourceKind};
