use serde::{Deserialize, Serialize};

/// What the posts endpoint returns after a create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitReceipt {
    pub id: i64,
    pub slug: String,
}
