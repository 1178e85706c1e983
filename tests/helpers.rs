use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use folio::{
    api::ApiClient,
    draft::{AuthoringSession, Engine, PostDraft, Taxonomy, TaxonomyTerm},
    seo::SeoSettings,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

pub fn term(id: i64, name: &str) -> TaxonomyTerm {
    TaxonomyTerm {
        id,
        name: name.to_string(),
        slug: folio::text::slugify(name),
    }
}

pub fn site_taxonomy() -> Taxonomy {
    Taxonomy {
        categories: vec![term(1, "Risk"), term(2, "Psychology")],
        tags: vec![term(10, "Drawdown"), term(11, "Sizing")],
    }
}

pub fn new_session() -> AuthoringSession {
    AuthoringSession::new(
        Engine::new(SeoSettings::default(), site_taxonomy()),
        PostDraft::default(),
        None,
    )
    .with_clock(fixed_now)
}

pub fn client_for(uri: &str) -> ApiClient {
    ApiClient::new(Url::parse(&format!("{uri}/api")).unwrap())
}
