//! Client side of the posts API: taxonomy and post lookups at session start,
//! and the final submission.

pub mod client;
pub mod errors;
pub mod types;

pub use client::ApiClient;
pub use errors::ApiError;
pub use types::SubmitReceipt;

use async_trait::async_trait;

use crate::draft::TaxonomyTerm;
use crate::submission::PostRecord;

/// Reference data an authoring session loads before synthesis runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<TaxonomyTerm>, ApiError>;

    async fn fetch_tags(&self) -> Result<Vec<TaxonomyTerm>, ApiError>;

    async fn fetch_post(&self, id: i64) -> Result<PostRecord, ApiError>;
}
