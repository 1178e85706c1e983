//! Configuration handling for the authoring engine.
//!
//! Everything is read from environment variables with development defaults,
//! the same way the binaries expect. URL values are validated up front so the
//! engine and the API client can rely on them being well-formed.

use std::env;
use thiserror::Error;
use url::Url;

/// Environment variable names.
pub const ENV_SITE_URL: &str = "FOLIO_SITE_URL";
pub const ENV_API_BASE_URL: &str = "FOLIO_API_BASE_URL";
pub const ENV_BRAND_NAME: &str = "FOLIO_BRAND_NAME";
pub const ENV_ARTICLE_PATH: &str = "FOLIO_ARTICLE_PATH";

/// Default development values used when environment variables are absent.
const DEFAULT_SITE_URL: &str = "https://sebencapital.com";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/";
const DEFAULT_BRAND_NAME: &str = "Seben Capital";
const DEFAULT_ARTICLE_PATH: &str = "/blog/";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    site_url: Url,
    api_base_url: Url,
    brand_name: String,
    article_path: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        site_url: Url,
        api_base_url: Url,
        brand_name: impl Into<String>,
        article_path: impl AsRef<str>,
    ) -> Self {
        Self {
            site_url,
            api_base_url,
            brand_name: brand_name.into(),
            article_path: normalize_article_path(article_path.as_ref()),
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_url = parse_url(ENV_SITE_URL, DEFAULT_SITE_URL)?;
        let api_base_url = parse_url(ENV_API_BASE_URL, DEFAULT_API_BASE_URL)?;

        let brand_name =
            env::var(ENV_BRAND_NAME).unwrap_or_else(|_| DEFAULT_BRAND_NAME.to_string());
        if brand_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: ENV_BRAND_NAME,
                reason: "brand name cannot be empty".to_string(),
            });
        }

        let article_path =
            env::var(ENV_ARTICLE_PATH).unwrap_or_else(|_| DEFAULT_ARTICLE_PATH.to_string());

        Ok(Self::new(
            site_url,
            api_base_url,
            brand_name.trim(),
            article_path,
        ))
    }

    /// Public site origin used to build canonical URLs.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }
    /// Base URL of the persistence API (taxonomy, posts).
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }
    /// Brand appended to SEO titles when it fits.
    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }
    /// Path prefix for article URLs, always with leading and trailing slash.
    pub fn article_path(&self) -> &str {
        &self.article_path
    }
}

fn parse_url(key: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidValue {
        field: key,
        reason: err.to_string(),
    })
}

fn normalize_article_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_SITE_URL,
            ENV_API_BASE_URL,
            ENV_BRAND_NAME,
            ENV_ARTICLE_PATH,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.site_url().as_str(), "https://sebencapital.com/");
        assert_eq!(cfg.api_base_url().as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.brand_name(), DEFAULT_BRAND_NAME);
        assert_eq!(cfg.article_path(), DEFAULT_ARTICLE_PATH);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_SITE_URL, "https://example.org");
            env::set_var(ENV_API_BASE_URL, "https://api.example.org/v2/");
            env::set_var(ENV_BRAND_NAME, "  Example Press ");
            env::set_var(ENV_ARTICLE_PATH, "insights");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.site_url().as_str(), "https://example.org/");
        assert_eq!(cfg.api_base_url().as_str(), "https://api.example.org/v2/");
        assert_eq!(cfg.brand_name(), "Example Press");
        assert_eq!(cfg.article_path(), "/insights/");
        clear_env();
    }

    #[test]
    fn rejects_invalid_site_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_SITE_URL, "not a url");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_SITE_URL));
        clear_env();
    }

    #[test]
    fn rejects_blank_brand() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BRAND_NAME, "   ");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn article_path_is_normalized() {
        assert_eq!(normalize_article_path("blog"), "/blog/");
        assert_eq!(normalize_article_path("/blog/posts/"), "/blog/posts/");
        assert_eq!(normalize_article_path(""), "/");
    }
}
