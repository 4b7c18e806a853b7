// src/checker/html.rs
// =============================================================================
// This module pulls single attribute values out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM, tolerating broken markup the way browsers do
// - Lower-cases tag and attribute names for us
// - Accepts double-quoted, single-quoted and unquoted attribute values
//
// On top of that we add the matching rules crawlers use:
// - Attribute values are compared case-insensitively
// - `rel` is a whitespace separated token list ("icon shortcut" has "icon")
// - A tag with a blank required attribute never matches
// - A matching tag with a blank target attribute is skipped, not returned
// =============================================================================

use scraper::node::Element;
use scraper::{Html, Selector};

// Returns the `target_attr` value of the first `tag` whose `required_attr`
// matches `required_value`, or an empty string when nothing matches.
//
// Example:
//   html = r#"<meta property="og:image" content="https://x.test/a.png">"#
//   extract_attribute(html, "meta", "property", "og:image", "content")
//     -> "https://x.test/a.png"
pub fn extract_attribute(
    html: &str,
    tag: &str,
    required_attr: &str,
    required_value: &str,
    target_attr: &str,
) -> String {
    let wanted = required_value.trim();
    let token_list = required_attr.eq_ignore_ascii_case("rel");

    first_target(html, tag, target_attr, |element| {
        let value = match attr_ignore_case(element, required_attr) {
            Some(v) => v.trim(),
            None => return false,
        };
        if value.is_empty() {
            return false;
        }
        if token_list {
            has_token(value, wanted)
        } else {
            value.eq_ignore_ascii_case(wanted)
        }
    })
}

// Finds the first <link rel="... icon ..."> whose href is usable.
//
// Embedded `data:` icons are skipped because a reachability request cannot
// say anything about them.
pub fn extract_favicon_href(html: &str) -> String {
    first_target(html, "link", "href", |element| {
        let rel = attr_ignore_case(element, "rel").unwrap_or("");
        if !has_token(rel, "icon") {
            return false;
        }
        let href = attr_ignore_case(element, "href").unwrap_or("").trim();
        !href.is_empty() && !is_data_uri(href)
    })
}

pub(crate) fn is_data_uri(value: &str) -> bool {
    value
        .trim_start()
        .get(..5)
        .map(|prefix| prefix.eq_ignore_ascii_case("data:"))
        .unwrap_or(false)
}

// Walks every `tag` in document order and returns the first non-blank
// `target_attr` among the tags accepted by `accept`.
fn first_target<F>(html: &str, tag: &str, target_attr: &str, accept: F) -> String
where
    F: Fn(&Element) -> bool,
{
    // A selector built from anything other than a bare tag name would match
    // something else entirely.
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return String::new();
    }

    let tag = tag.to_ascii_lowercase();
    let selector = match Selector::parse(&tag) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    let document = Html::parse_document(html);
    for element in document.select(&selector) {
        let element = element.value();
        if !accept(element) {
            continue;
        }
        if let Some(target) = attr_ignore_case(element, target_attr) {
            let target = target.trim();
            if !target.is_empty() {
                return target.to_string();
            }
        }
    }

    String::new()
}

fn attr_ignore_case<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element
        .attrs()
        .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn has_token(list: &str, token: &str) -> bool {
    list.split_whitespace().any(|t| t.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_meta_content() {
        let html = r#"<head><meta property="og:image" content="https://x.test/og.png"></head>"#;
        assert_eq!(
            extract_attribute(html, "meta", "property", "og:image", "content"),
            "https://x.test/og.png"
        );
    }

    #[test]
    fn test_all_quoting_forms() {
        let double = r#"<link rel="canonical" href="https://a.test/">"#;
        let single = r#"<link rel='canonical' href='https://b.test/'>"#;
        let bare = r#"<link rel=canonical href=https://c.test/>"#;
        assert_eq!(extract_attribute(double, "link", "rel", "canonical", "href"), "https://a.test/");
        assert_eq!(extract_attribute(single, "link", "rel", "canonical", "href"), "https://b.test/");
        assert_eq!(extract_attribute(bare, "link", "rel", "canonical", "href"), "https://c.test/");
    }

    #[test]
    fn test_case_insensitive_names_and_values() {
        let html = r#"<LINK REL="Apple-Touch-Icon" HREF="/touch.png">"#;
        assert_eq!(
            extract_attribute(html, "LINK", "rel", "apple-touch-icon", "href"),
            "/touch.png"
        );
        let meta = r#"<meta PROPERTY="OG:Image" content="https://x.test/a.png">"#;
        assert_eq!(
            extract_attribute(meta, "meta", "property", "og:image", "content"),
            "https://x.test/a.png"
        );
    }

    #[test]
    fn test_rel_matches_whole_tokens_only() {
        let html = r#"<link rel="icon shortcut" href="/fav.ico">"#;
        assert_eq!(extract_attribute(html, "link", "rel", "icon", "href"), "/fav.ico");

        let partial = r#"<link rel="apple-touch-icon" href="/touch.png">"#;
        assert_eq!(extract_attribute(partial, "link", "rel", "icon", "href"), "");
    }

    #[test]
    fn test_non_rel_attributes_compare_whole_value() {
        let html = r#"<meta name="twitter:image:src" content="https://x.test/t.png">"#;
        assert_eq!(extract_attribute(html, "meta", "name", "twitter:image", "content"), "");
    }

    #[test]
    fn test_blank_required_attribute_is_skipped() {
        let html = r#"<link rel="  " href="/nope"><link rel="manifest" href="/app.webmanifest">"#;
        assert_eq!(
            extract_attribute(html, "link", "rel", "manifest", "href"),
            "/app.webmanifest"
        );
    }

    #[test]
    fn test_blank_target_continues_to_next_tag() {
        let html = r#"
            <meta property="og:image" content="  ">
            <meta property="og:image" content="https://x.test/second.png">
        "#;
        assert_eq!(
            extract_attribute(html, "meta", "property", "og:image", "content"),
            "https://x.test/second.png"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<link rel="icon" href="/first.png"><link rel="icon" href="/second.png">"#;
        for _ in 0..3 {
            assert_eq!(extract_attribute(html, "link", "rel", "icon", "href"), "/first.png");
        }
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert_eq!(extract_attribute("<p>hello</p>", "link", "rel", "canonical", "href"), "");
        assert_eq!(extract_attribute("", "meta", "name", "x", "content"), "");
    }

    #[test]
    fn test_favicon_skips_data_uris() {
        let html = r#"
            <link rel="icon" href="data:image/png;base64,AAAA">
            <link rel="shortcut icon" href="/favicon.ico">
        "#;
        assert_eq!(extract_favicon_href(html), "/favicon.ico");
    }

    #[test]
    fn test_favicon_skips_blank_href() {
        let html = r#"<link rel="icon" href=""><link rel="icon" href="/real.svg">"#;
        assert_eq!(extract_favicon_href(html), "/real.svg");
    }

    #[test]
    fn test_favicon_missing() {
        let html = r#"<link rel="apple-touch-icon" href="/touch.png">"#;
        assert_eq!(extract_favicon_href(html), "");
    }

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("DATA:image/svg+xml,<svg/>"));
        assert!(!is_data_uri("/data/icon.png"));
        assert!(!is_data_uri("dat"));
    }
}
