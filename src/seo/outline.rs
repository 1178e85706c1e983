//! Lookups into canonical HTML used as fallbacks by the composers.

use scraper::{Html, Selector};

use crate::text::collapse_whitespace;

/// Text of the first non-empty heading, in document order.
pub fn first_heading(html: &str) -> Option<String> {
    let document = Html::parse_fragment(html);
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").ok()?;

    document
        .select(&selector)
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

/// `src` of the first image with a non-empty source.
pub fn first_image_src(html: &str) -> Option<String> {
    let document = Html::parse_fragment(html);
    let selector = Selector::parse("img[src]").ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_heading_in_document_order() {
        let html = "<p>intro</p><h3>Later  level</h3><h2>Second</h2>";
        assert_eq!(first_heading(html).as_deref(), Some("Later level"));
    }

    #[test]
    fn test_first_heading_skips_empty() {
        let html = "<h2>  </h2><h2>Real <em>one</em></h2>";
        assert_eq!(first_heading(html).as_deref(), Some("Real one"));
    }

    #[test]
    fn test_no_heading() {
        assert_eq!(first_heading("<p>nothing</p>"), None);
        assert_eq!(first_heading(""), None);
    }

    #[test]
    fn test_first_image_src() {
        let html = r#"<p>x</p><img alt="no source"><img src=" /a.png "><img src="/b.png">"#;
        assert_eq!(first_image_src(html).as_deref(), Some("/a.png"));
        assert_eq!(first_image_src("<p>none</p>"), None);
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = "<h2>Broken <p>unclosed";
        assert_eq!(first_heading(html).as_deref(), Some("Broken unclosed"));
    }
}
