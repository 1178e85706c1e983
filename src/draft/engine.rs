use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::content::{ContentSource, SourceKind};
use crate::draft::model::PostDraft;
use crate::draft::taxonomy::Taxonomy;
use crate::seo::description::DescriptionSources;
use crate::seo::language::{LanguageSample, detect_language};
use crate::seo::outline::{first_heading, first_image_src};
use crate::seo::{
    ArticleSchema, ContentMetrics, SchemaInput, SeoSettings, compose_description, compose_title,
    extract_keywords,
};
use crate::submission::{self, SubmissionPayload};
use crate::text::{collapse_whitespace, slugify};

/// Synthesized values for the six latch-controlled fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoValues {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_image: Option<String>,
    pub twitter_image: Option<String>,
    pub schema_json: String,
}

/// Everything derived from one draft state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    pub source: Option<SourceKind>,
    pub canonical_html: String,
    pub metrics: ContentMetrics,
    pub keywords: Vec<String>,
    pub slug: String,
    pub seo: SeoValues,
}

/// Pure synthesis over a draft. Holds only session-immutable inputs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: SeoSettings,
    taxonomy: Taxonomy,
}

impl Engine {
    pub fn new(settings: SeoSettings, taxonomy: Taxonomy) -> Self {
        Self { settings, taxonomy }
    }

    pub fn settings(&self) -> &SeoSettings {
        &self.settings
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Derive canonical HTML, metrics and every SEO value from `draft`.
    ///
    /// `now` stands in for the clock so that equal inputs give equal output.
    pub fn synthesize(&self, draft: &PostDraft, now: DateTime<Utc>) -> Synthesis {
        let settings = &self.settings;
        let selection = &draft.taxonomy;
        let source = draft.content.authoritative();
        let canonical_html = source.map(|s| s.render()).unwrap_or_default();

        let title = collapse_whitespace(&draft.title);
        let excerpt = collapse_whitespace(&draft.excerpt);
        let slug = match draft.slug.trim() {
            "" if !draft.slug_generated => slugify(&title),
            slug => slug.to_string(),
        };

        let categories = selection.categories(&self.taxonomy);
        let primary = selection.primary_category(&self.taxonomy);
        let tags = selection.tags();

        let keywords = extract_keywords(
            &title,
            categories.iter().map(|term| term.name.as_str()),
            tags.iter().copied(),
        );
        let metrics = ContentMetrics::measure(&title, &excerpt, &canonical_html);

        let base_title = if title.is_empty() {
            first_heading(&canonical_html).unwrap_or_default()
        } else {
            title.clone()
        };
        let title_keyword = primary
            .or_else(|| categories.first().copied())
            .map(|term| term.name.as_str())
            .or_else(|| tags.first().copied());
        let seo_title = compose_title(
            &base_title,
            title_keyword,
            settings.title_max,
            &settings.brand_suffix(),
        );

        // A stale Markdown buffer must not leak into the description once
        // raw HTML has taken over.
        let author_text = match source {
            Some(ContentSource::RawHtml(_)) | None => String::new(),
            Some(_) => draft.content.author_text(),
        };
        let description = compose_description(
            DescriptionSources {
                excerpt: &excerpt,
                markdown: &author_text,
                html: &canonical_html,
            },
            &keywords,
            settings.description_max,
        );

        let canonical_url = settings.canonical_url(&slug).unwrap_or_default();
        let seo = &draft.seo;
        let fallback_image = || {
            draft
                .featured_image
                .url()
                .map(str::to_string)
                .or_else(|| first_image_src(&canonical_html))
        };
        let og_image = current_image(seo.og_image.value().as_deref()).or_else(fallback_image);
        let twitter_image = current_image(seo.twitter_image.value().as_deref()).or_else(fallback_image);

        // The JSON-LD mirrors what will actually be published, so latched
        // author values win over the ones synthesized above.
        let effective_description = seo.description.resolve(&description);
        let effective_canonical = seo.canonical_url.resolve(&canonical_url);
        let effective_image = seo.og_image.resolve(&og_image);
        let language = detect_language(LanguageSample {
            title: &title,
            excerpt: &excerpt,
            body_html: &canonical_html,
        });

        let schema_input = SchemaInput {
            title: &base_title,
            author_name: &draft.author_name,
            canonical_url: Some(effective_canonical.as_str()),
            description: effective_description,
            section: primary.map(|term| term.name.as_str()),
            keywords: categories
                .iter()
                .map(|term| term.name.as_str())
                .chain(tags.iter().copied())
                .collect(),
            word_count: metrics.word_count,
            modified_at: now,
            published_at: draft.published_at,
            image: effective_image.as_deref(),
            language: language.as_deref(),
        };
        let schema_json = ArticleSchema::build(&schema_input, settings.headline_max).to_json_string();

        Synthesis {
            source: source.map(|s| s.kind()),
            canonical_html,
            metrics,
            keywords,
            slug,
            seo: SeoValues {
                title: seo_title,
                description,
                canonical_url,
                og_image,
                twitter_image,
                schema_json,
            },
        }
    }

    /// Run synthesis and return the next draft: the slug is filled in the
    /// first time a title allows it and every non-dirty SEO field takes its
    /// synthesized value.
    pub fn recompute(&self, draft: &PostDraft, now: DateTime<Utc>) -> (PostDraft, Synthesis) {
        let synthesis = self.synthesize(draft, now);
        let mut next = draft.clone();
        let written = apply(&mut next, &synthesis);

        debug!(
            source = ?synthesis.source,
            words = synthesis.metrics.word_count,
            keywords = synthesis.keywords.len(),
            written,
            dirty = next.seo.dirty_count(),
            "Recomputed draft"
        );
        (next, synthesis)
    }

    /// One-shot recompute and payload assembly, for callers without a session.
    pub fn assemble(&self, draft: &PostDraft, now: DateTime<Utc>) -> SubmissionPayload {
        let (next, synthesis) = self.recompute(draft, now);
        submission::assemble(&next, &synthesis, &self.taxonomy)
    }
}

/// An image already on the field stays until the author replaces it.
fn current_image(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Write synthesized values into the draft. Returns how many fields changed.
fn apply(draft: &mut PostDraft, synthesis: &Synthesis) -> usize {
    let mut written = 0;
    if draft.slug.trim().is_empty() && !draft.slug_generated && !synthesis.slug.is_empty() {
        draft.slug = synthesis.slug.clone();
        draft.slug_generated = true;
        written += 1;
    }

    let values = &synthesis.seo;
    let seo = &mut draft.seo;
    written += [
        seo.title.offer(values.title.clone()),
        seo.description.offer(values.description.clone()),
        seo.canonical_url.offer(values.canonical_url.clone()),
        seo.og_image.offer(values.og_image.clone()),
        seo.twitter_image.offer(values.twitter_image.clone()),
        seo.schema_json.offer(values.schema_json.clone()),
    ]
    .into_iter()
    .filter(|changed| *changed)
    .count();
    written
}
