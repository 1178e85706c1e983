#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use folio::content::{markdown_to_html, plain_text_to_html};
use folio::draft::{Engine, PostDraft};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).to_string();

    // Converters are total: any input renders without panicking
    let _ = markdown_to_html(&text);
    let _ = plain_text_to_html(&text);

    let mut draft = PostDraft::default();
    draft.title = text.lines().next().unwrap_or_default().to_string();
    draft.content.markdown = text;

    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    let engine = Engine::default();
    let (once, first) = engine.recompute(&draft, now);
    let (twice, second) = engine.recompute(&once, now);
    assert_eq!(once, twice);
    assert_eq!(first, second);
});
