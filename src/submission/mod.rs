//! Outbound record for the posts API, and the persisted record read back on
//! edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::draft::{PostDraft, PostStatus, Synthesis, Taxonomy};

pub const TWITTER_CARD: &str = "summary_large_image";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OgData {
    pub image: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterData {
    pub card: String,
    pub image: Option<String>,
}

impl Default for TwitterData {
    fn default() -> Self {
        Self {
            card: TWITTER_CARD.to_string(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionPayload {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content_markdown: String,
    pub content_html: String,
    pub featured_image_alt: String,
    pub seo_title: String,
    pub seo_description: String,
    pub canonical_url: String,
    pub og_data: OgData,
    pub twitter_data: TwitterData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_json: Option<Value>,
    pub author_name: String,
    pub is_featured: bool,
    pub read_time: String,
    pub word_count: usize,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub primary_category_id: Option<i64>,
    pub categories_existing_ids: Vec<i64>,
    pub categories_new: Vec<NewCategory>,
    pub tags_existing_names: Vec<String>,
    pub tags_new_names: Vec<String>,
}

/// A stored post as returned by the API: the submission shape plus its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    pub id: i64,
    pub featured_image_url: Option<String>,
    #[serde(flatten)]
    pub payload: SubmissionPayload,
}

/// Build the payload from the draft as the author currently sees it and the
/// derived values of its latest synthesis.
pub fn assemble(draft: &PostDraft, synthesis: &Synthesis, taxonomy: &Taxonomy) -> SubmissionPayload {
    let seo = &draft.seo;
    let selection = &draft.taxonomy;

    let (categories_existing_ids, categories_new) = selection.categories(taxonomy).into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut existing, mut new), term| {
            if term.is_provisional() {
                new.push(NewCategory {
                    name: term.name.clone(),
                    slug: term.slug_or_derived(),
                });
            } else {
                existing.push(term.id);
            }
            (existing, new)
        },
    );
    let (tags_existing_names, tags_new_names) = selection.partition_tags(taxonomy);

    let slug = match draft.slug.trim() {
        "" => synthesis.slug.clone(),
        slug => slug.to_string(),
    };

    let payload = SubmissionPayload {
        title: draft.title.trim().to_string(),
        slug,
        excerpt: draft.excerpt.trim().to_string(),
        content_markdown: draft.content.author_text(),
        content_html: synthesis.canonical_html.clone(),
        featured_image_alt: draft.featured_image.alt.trim().to_string(),
        seo_title: seo.title.value().clone(),
        seo_description: seo.description.value().clone(),
        canonical_url: seo.canonical_url.value().clone(),
        og_data: OgData {
            image: seo.og_image.value().clone(),
            title: seo.title.value().clone(),
            description: seo.description.value().clone(),
        },
        twitter_data: TwitterData {
            card: TWITTER_CARD.to_string(),
            image: seo.twitter_image.value().clone(),
        },
        schema_json: parse_schema(seo.schema_json.value()),
        author_name: draft.author_name.trim().to_string(),
        is_featured: draft.is_featured,
        read_time: synthesis.metrics.read_time_label(),
        word_count: synthesis.metrics.word_count,
        status: draft.status,
        published_at: draft.published_at,
        // A provisional primary category has no id the API can resolve yet.
        primary_category_id: selection.primary_category_id.filter(|id| *id > 0),
        categories_existing_ids,
        categories_new,
        tags_existing_names,
        tags_new_names,
    };

    debug!(
        slug = %payload.slug,
        words = payload.word_count,
        has_schema = payload.schema_json.is_some(),
        new_categories = payload.categories_new.len(),
        new_tags = payload.tags_new_names.len(),
        "Assembled submission payload"
    );
    payload
}

/// Structured data travels as a JSON object. Text the author broke by hand
/// is dropped rather than failing the submission.
fn parse_schema(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => {
            warn!("Structured data is not a JSON object; omitting it from the submission");
            None
        }
        Err(e) => {
            warn!(error = %e, "Structured data failed to parse; omitting it from the submission");
            None
        }
    }
}
