pub mod description;
pub mod keywords;
pub mod language;
pub mod metrics;
pub mod outline;
pub mod schema;
pub mod title;

pub use description::compose_description;
pub use keywords::extract_keywords;
pub use metrics::{ContentMetrics, minutes_to_read, read_time_label, word_count};
pub use schema::{ArticleSchema, SchemaInput};
pub use title::compose_title;

use crate::config::Config;

pub const META_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;
pub const HEADLINE_MAX: usize = 110;

const DEFAULT_BRAND_NAME: &str = "Seben Capital";
const DEFAULT_SITE_URL: &str = "https://sebencapital.com";
const DEFAULT_ARTICLE_PATH: &str = "/blog/";

/// Limits and site identity used by every composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoSettings {
    pub title_max: usize,
    pub description_max: usize,
    pub headline_max: usize,
    pub brand_name: String,
    /// Site origin without a trailing slash.
    pub site_url: String,
    /// Article path prefix with leading and trailing slash.
    pub article_path: String,
}

impl SeoSettings {
    pub fn brand_suffix(&self) -> String {
        format!(" | {}", self.brand_name)
    }

    /// Public URL of an article, or `None` while it has no slug.
    pub fn canonical_url(&self, slug: &str) -> Option<String> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }
        Some(format!("{}{}{}", self.site_url, self.article_path, slug))
    }
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            title_max: META_TITLE_MAX,
            description_max: META_DESCRIPTION_MAX,
            headline_max: HEADLINE_MAX,
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            article_path: DEFAULT_ARTICLE_PATH.to_string(),
        }
    }
}

impl From<&Config> for SeoSettings {
    fn from(config: &Config) -> Self {
        Self {
            brand_name: config.brand_name().to_string(),
            site_url: config.site_url().as_str().trim_end_matches('/').to_string(),
            article_path: config.article_path().to_string(),
            ..Self::default()
        }
    }
}
