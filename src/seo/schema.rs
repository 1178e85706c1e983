//! JSON-LD `Article` object for search engines.
//!
//! Fields whose source value is absent are left out entirely, never emitted
//! as `null` or an empty string.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::text::fit_within;

const SCHEMA_CONTEXT: &str = "https://schema.org";
const ARTICLE_TYPE: &str = "Article";
const PERSON_TYPE: &str = "Person";

#[derive(Debug, Clone, Default)]
pub struct SchemaInput<'a> {
    pub title: &'a str,
    pub author_name: &'a str,
    pub canonical_url: Option<&'a str>,
    pub description: &'a str,
    pub section: Option<&'a str>,
    pub keywords: Vec<&'a str>,
    pub word_count: usize,
    pub modified_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub image: Option<&'a str>,
    pub language: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_entity_of_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub word_count: usize,
    pub date_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_language: Option<String>,
}

impl ArticleSchema {
    pub fn build(input: &SchemaInput<'_>, headline_max: usize) -> Self {
        let keywords = input
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let canonical = present(input.canonical_url.unwrap_or_default());

        Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: ARTICLE_TYPE.to_string(),
            headline: present(&fit_within(input.title, headline_max)),
            author: present(input.author_name).map(|name| Person {
                kind: PERSON_TYPE.to_string(),
                name,
            }),
            url: canonical.clone(),
            main_entity_of_page: canonical,
            description: present(input.description),
            article_section: input.section.and_then(present),
            keywords: present(&keywords),
            word_count: input.word_count,
            date_modified: iso_timestamp(input.modified_at),
            date_published: input.published_at.map(iso_timestamp),
            image: input.image.and_then(present),
            in_language: input.language.and_then(present),
        }
    }

    /// Pretty JSON, as shown to the author in the structured-data editor.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
