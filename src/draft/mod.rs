//! The authoring draft, its override latches and the recompute engine.

pub mod engine;
pub mod model;
pub mod session;
pub mod taxonomy;

pub use engine::{Engine, SeoValues, Synthesis};
pub use model::{FeaturedImage, ImageAttachment, PostDraft, PostStatus, SeoField, SeoFields};
pub use session::{AuthoringSession, DraftEvent, SeoEdit};
pub use taxonomy::{Taxonomy, TaxonomySelection, TaxonomyTerm};

#[cfg(test)]
mod tests;
