use std::{fs, io, path::Path};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ContentBuffers;
use crate::draft::taxonomy::TaxonomySelection;
use crate::submission::PostRecord;

/// A synthesized value plus a one-way latch.
///
/// Once the author edits the field, `dirty` stays true for the rest of the
/// session and synthesis can no longer write the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoField<T> {
    value: T,
    dirty: bool,
}

impl<T: PartialEq> SeoField<T> {
    /// A clean (non-dirty) field. Hydrated values start this way too.
    pub fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Author edit: store the value and latch the field.
    pub fn edit(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    /// Synthesis write, ignored once latched. Returns whether the value changed.
    pub fn offer(&mut self, value: T) -> bool {
        if self.dirty || self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    /// The value the author sees: their edit if latched, else `synthesized`.
    pub fn resolve<'a>(&'a self, synthesized: &'a T) -> &'a T {
        if self.dirty { &self.value } else { synthesized }
    }
}

/// The six metadata fields under latch control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoFields {
    pub title: SeoField<String>,
    pub description: SeoField<String>,
    pub canonical_url: SeoField<String>,
    pub og_image: SeoField<Option<String>>,
    pub twitter_image: SeoField<Option<String>>,
    /// Raw JSON-LD text; the author may hand-edit it into something invalid.
    pub schema_json: SeoField<String>,
}

impl SeoFields {
    pub fn dirty_count(&self) -> usize {
        [
            self.title.is_dirty(),
            self.description.is_dirty(),
            self.canonical_url.is_dirty(),
            self.og_image.is_dirty(),
            self.twitter_image.is_dirty(),
            self.schema_json.is_dirty(),
        ]
        .into_iter()
        .filter(|dirty| *dirty)
        .count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Archived,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedImage {
    pub url: Option<String>,
    pub alt: String,
}

impl FeaturedImage {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

/// An image picked locally, sent alongside the payload on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageAttachment {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let data = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            data: Bytes::from(data),
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Everything the author has entered in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    /// Set once a slug exists, whether derived from the title or typed.
    /// From then on an emptied slug stays empty.
    pub slug_generated: bool,
    pub excerpt: String,
    pub content: ContentBuffers,
    pub taxonomy: TaxonomySelection,
    pub featured_image: FeaturedImage,
    #[serde(skip)]
    pub attachment: Option<ImageAttachment>,
    pub author_name: String,
    pub is_featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub seo: SeoFields,
}

impl PostDraft {
    /// Seed a draft from a stored post. Every SEO field starts clean.
    ///
    /// The Markdown buffer is preferred; stored HTML is only loaded as the
    /// raw HTML source when no Markdown was saved, since it would otherwise
    /// outrank the Markdown it was rendered from.
    pub fn hydrate(record: &PostRecord) -> Self {
        let payload = &record.payload;

        let mut content = ContentBuffers {
            markdown: payload.content_markdown.clone(),
            ..Default::default()
        };
        if payload.content_markdown.trim().is_empty() {
            content.html = payload.content_html.clone();
        }

        let mut taxonomy = TaxonomySelection {
            category_ids: payload.categories_existing_ids.clone(),
            primary_category_id: payload.primary_category_id,
            tag_names: payload
                .tags_existing_names
                .iter()
                .chain(&payload.tags_new_names)
                .cloned()
                .collect(),
            ..Default::default()
        };
        for category in &payload.categories_new {
            taxonomy.create_category(&category.name);
        }

        let schema_json = payload
            .schema_json
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
            .unwrap_or_default();

        Self {
            title: payload.title.clone(),
            slug: payload.slug.clone(),
            slug_generated: !payload.slug.trim().is_empty(),
            excerpt: payload.excerpt.clone(),
            content,
            taxonomy,
            featured_image: FeaturedImage {
                url: record.featured_image_url.clone(),
                alt: payload.featured_image_alt.clone(),
            },
            attachment: None,
            author_name: payload.author_name.clone(),
            is_featured: payload.is_featured,
            published_at: payload.published_at,
            status: payload.status,
            seo: SeoFields {
                title: SeoField::new(payload.seo_title.clone()),
                description: SeoField::new(payload.seo_description.clone()),
                canonical_url: SeoField::new(payload.canonical_url.clone()),
                og_image: SeoField::new(payload.og_data.image.clone()),
                twitter_image: SeoField::new(payload.twitter_data.image.clone()),
                schema_json: SeoField::new(schema_json),
            },
        }
    }
}
