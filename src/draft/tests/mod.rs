use std::fs;

use chrono::{DateTime, TimeZone, Utc};

use crate::draft::{Engine, PostDraft, Taxonomy};
use crate::seo::SeoSettings;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

fn load_fixture() -> (PostDraft, Engine) {
    let draft = fs::read_to_string("src/draft/tests/fixtures/risk-draft.json")
        .expect("Failed to read draft fixture");
    let taxonomy = fs::read_to_string("src/draft/tests/fixtures/taxonomy.json")
        .expect("Failed to read taxonomy fixture");

    let draft: PostDraft = serde_json::from_str(&draft).expect("Invalid draft fixture");
    let taxonomy: Taxonomy = serde_json::from_str(&taxonomy).expect("Invalid taxonomy fixture");
    (draft, Engine::new(SeoSettings::default(), taxonomy))
}

#[test]
fn test_fixture_payload() {
    let (draft, engine) = load_fixture();
    let payload = engine.assemble(&draft, fixed_now());

    assert_eq!(payload.slug, "risk-management-101");
    assert_eq!(payload.seo_title, "Risk Management 101 | Seben Capital");
    assert!(payload.content_html.starts_with("<h2>Risk First</h2>"));
    assert!(payload.seo_description.contains("risk management"));
    assert!(payload.seo_description.chars().count() <= 160);
    assert_eq!(payload.primary_category_id, Some(1));
    assert_eq!(payload.tags_existing_names, vec!["Sizing"]);
    assert_eq!(payload.tags_new_names, vec!["Journaling"]);

    let schema = payload.schema_json.expect("schema should parse");
    assert_eq!(schema["author"]["name"], "Ada Analyst");
    assert_eq!(schema["articleSection"], "Risk");
    assert_eq!(schema["keywords"], "Risk, Sizing, Journaling");
    assert_eq!(schema["inLanguage"], "en");
}

#[test]
fn test_fixture_recompute_is_byte_identical() {
    let (draft, engine) = load_fixture();
    let (once, first) = engine.recompute(&draft, fixed_now());
    let (twice, second) = engine.recompute(&once, fixed_now());

    assert_eq!(first.canonical_html, second.canonical_html);
    assert_eq!(
        serde_json::to_string(&once).unwrap(),
        serde_json::to_string(&twice).unwrap()
    );
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recompute_is_idempotent(
            title in ".{0,80}",
            excerpt in ".{0,200}",
            markdown in "[#*>\\-`!\\[\\]()a-zA-Z0-9 \n.]{0,400}",
        ) {
            let (mut draft, engine) = load_fixture();
            draft.title = title;
            draft.excerpt = excerpt;
            draft.content.markdown = markdown;

            let (once, first) = engine.recompute(&draft, fixed_now());
            let (twice, second) = engine.recompute(&once, fixed_now());
            prop_assert_eq!(once, twice);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn latched_fields_never_move(
            edit in ".{0,60}",
            titles in proptest::collection::vec(".{0,60}", 1..6),
        ) {
            let (mut draft, engine) = load_fixture();
            draft.seo.title.edit(edit.clone());
            for title in titles {
                draft.title = title;
                draft = engine.recompute(&draft, fixed_now()).0;
                prop_assert_eq!(draft.seo.title.value(), &edit);
                prop_assert!(draft.seo.title.is_dirty());
            }
        }
    }
}
