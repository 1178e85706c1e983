use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::{ApiError, SessionSource};
use crate::content::{AuthoringMode, Block};
use crate::draft::engine::{Engine, Synthesis};
use crate::draft::model::{FeaturedImage, ImageAttachment, PostDraft, PostStatus};
use crate::draft::taxonomy::{Taxonomy, TaxonomyTerm};
use crate::seo::SeoSettings;
use crate::submission::{self, SubmissionPayload};

/// A direct author edit to one of the latched SEO fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeoEdit {
    Title(String),
    Description(String),
    CanonicalUrl(String),
    OgImage(Option<String>),
    TwitterImage(Option<String>),
    SchemaJson(String),
}

/// One author input. Every event triggers a full recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    TitleChanged(String),
    SlugChanged(String),
    ExcerptChanged(String),
    HtmlChanged(String),
    MarkdownChanged(String),
    PlainTextChanged(String),
    ModeChanged(AuthoringMode),
    BlocksChanged(Vec<Block>),
    CategoriesSelected(Vec<i64>),
    CategoryCreated(String),
    PrimaryCategoryChanged(Option<i64>),
    TagsChanged(Vec<String>),
    FeaturedImageChanged(FeaturedImage),
    AttachmentSelected(Option<ImageAttachment>),
    AuthorChanged(String),
    FeaturedToggled(bool),
    PublishAtChanged(Option<DateTime<Utc>>),
    StatusChanged(PostStatus),
    SeoEdited(SeoEdit),
}

impl DraftEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleChanged(_) => "title",
            Self::SlugChanged(_) => "slug",
            Self::ExcerptChanged(_) => "excerpt",
            Self::HtmlChanged(_) => "html",
            Self::MarkdownChanged(_) => "markdown",
            Self::PlainTextChanged(_) => "plain_text",
            Self::ModeChanged(_) => "mode",
            Self::BlocksChanged(_) => "blocks",
            Self::CategoriesSelected(_) => "categories",
            Self::CategoryCreated(_) => "category_created",
            Self::PrimaryCategoryChanged(_) => "primary_category",
            Self::TagsChanged(_) => "tags",
            Self::FeaturedImageChanged(_) => "featured_image",
            Self::AttachmentSelected(_) => "attachment",
            Self::AuthorChanged(_) => "author",
            Self::FeaturedToggled(_) => "is_featured",
            Self::PublishAtChanged(_) => "published_at",
            Self::StatusChanged(_) => "status",
            Self::SeoEdited(_) => "seo_edit",
        }
    }
}

/// State for one draft being authored: the draft, the engine with its
/// session-immutable taxonomy, and the latest synthesis.
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    id: Uuid,
    engine: Engine,
    post_id: Option<i64>,
    draft: PostDraft,
    last: Synthesis,
    clock: fn() -> DateTime<Utc>,
}

impl AuthoringSession {
    /// A session over an existing draft. Nothing is written until the first
    /// event; `synthesis()` holds a preview meanwhile.
    pub fn new(engine: Engine, draft: PostDraft, post_id: Option<i64>) -> Self {
        let clock: fn() -> DateTime<Utc> = Utc::now;
        let last = engine.synthesize(&draft, clock());
        Self {
            id: Uuid::new_v4(),
            engine,
            post_id,
            draft,
            last,
            clock,
        }
    }

    /// Load taxonomy and, when editing, the stored post.
    ///
    /// Taxonomy failures degrade to empty lists. A failed post lookup is
    /// returned, since there is no draft to edit without it.
    #[instrument(skip(source, settings))]
    pub async fn bootstrap<S>(
        source: &S,
        post_id: Option<i64>,
        settings: SeoSettings,
    ) -> Result<Self, ApiError>
    where
        S: SessionSource + ?Sized,
    {
        let (categories, tags) = tokio::join!(source.fetch_categories(), source.fetch_tags());
        let taxonomy = Taxonomy {
            categories: or_empty(categories, "categories"),
            tags: or_empty(tags, "tags"),
        };

        let draft = match post_id {
            Some(id) => PostDraft::hydrate(&source.fetch_post(id).await?),
            None => PostDraft::default(),
        };

        let session = Self::new(Engine::new(settings, taxonomy), draft, post_id);
        info!(
            session = %session.id,
            categories = session.engine.taxonomy().categories.len(),
            tags = session.engine.taxonomy().tags.len(),
            "Authoring session ready"
        );
        Ok(session)
    }

    /// Replace the clock used for `dateModified`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self.last = self.engine.synthesize(&self.draft, clock());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn post_id(&self) -> Option<i64> {
        self.post_id
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn synthesis(&self) -> &Synthesis {
        &self.last
    }

    /// Apply one author input, then recompute.
    #[instrument(skip_all, fields(session = %self.id, event = event.name()))]
    pub fn handle(&mut self, event: DraftEvent) -> &Synthesis {
        let draft = &mut self.draft;
        match event {
            DraftEvent::TitleChanged(title) => draft.title = title,
            DraftEvent::SlugChanged(slug) => {
                draft.slug = slug;
                draft.slug_generated = true;
            }
            DraftEvent::ExcerptChanged(excerpt) => draft.excerpt = excerpt,
            DraftEvent::HtmlChanged(html) => draft.content.html = html,
            DraftEvent::MarkdownChanged(markdown) => draft.content.markdown = markdown,
            DraftEvent::PlainTextChanged(text) => draft.content.plain_text = text,
            DraftEvent::ModeChanged(mode) => draft.content.mode = mode,
            DraftEvent::BlocksChanged(blocks) => draft.content.blocks = blocks,
            DraftEvent::CategoriesSelected(ids) => draft.taxonomy.category_ids = ids,
            DraftEvent::CategoryCreated(name) => {
                if !name.trim().is_empty() {
                    draft.taxonomy.create_category(&name);
                }
            }
            DraftEvent::PrimaryCategoryChanged(id) => draft.taxonomy.primary_category_id = id,
            DraftEvent::TagsChanged(tags) => draft.taxonomy.tag_names = tags,
            DraftEvent::FeaturedImageChanged(image) => draft.featured_image = image,
            DraftEvent::AttachmentSelected(attachment) => draft.attachment = attachment,
            DraftEvent::AuthorChanged(author) => draft.author_name = author,
            DraftEvent::FeaturedToggled(featured) => draft.is_featured = featured,
            DraftEvent::PublishAtChanged(at) => draft.published_at = at,
            DraftEvent::StatusChanged(status) => draft.status = status,
            DraftEvent::SeoEdited(edit) => {
                let seo = &mut draft.seo;
                match edit {
                    SeoEdit::Title(value) => seo.title.edit(value),
                    SeoEdit::Description(value) => seo.description.edit(value),
                    SeoEdit::CanonicalUrl(value) => seo.canonical_url.edit(value),
                    SeoEdit::OgImage(value) => seo.og_image.edit(value),
                    SeoEdit::TwitterImage(value) => seo.twitter_image.edit(value),
                    SeoEdit::SchemaJson(value) => seo.schema_json.edit(value),
                }
            }
        }

        let (next, synthesis) = self.engine.recompute(&self.draft, (self.clock)());
        self.draft = next;
        self.last = synthesis;
        &self.last
    }

    /// The payload for the current draft, as last recomputed.
    pub fn submission(&self) -> SubmissionPayload {
        submission::assemble(&self.draft, &self.last, self.engine.taxonomy())
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.draft.attachment.as_ref()
    }
}

fn or_empty(result: Result<Vec<TaxonomyTerm>, ApiError>, kind: &str) -> Vec<TaxonomyTerm> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, kind, "Taxonomy unavailable, continuing without it");
        Vec::new()
    })
}
