// src/checker/patterns.rs
// =============================================================================
// Text pattern checks that don't need a parse tree.
//
// - JSON-LD: a <script type="application/ld+json"> tag exists in the page
// - Sitemap freshness: the sitemap carries at least one <lastmod> element
// - Robots: robots.txt declares a `Sitemap:` directive with an absolute URL
//
// The same three contracts are applied to the local build inputs and to the
// deployed copies, so they live here once.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

static JSON_LD: LazyLock<Regex> = LazyLock::new(|| {
    // `type` must be its own attribute (not data-type) and the value must end
    // right after ld+json.
    Regex::new(
        r#"(?i)<script\b[^>]*?\stype\s*=\s*(?:"\s*application/ld\+json\s*"|'\s*application/ld\+json\s*'|application/ld\+json(?:\s|/?>))"#,
    )
    .expect("JSON-LD pattern is valid")
});

static LASTMOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<lastmod>\s*[^<\s][^<]*</lastmod>").expect("lastmod pattern is valid")
});

static SITEMAP_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*sitemap\s*:\s*https?://\S+").expect("sitemap directive pattern is valid")
});

pub fn has_json_ld(html: &str) -> bool {
    JSON_LD.is_match(html)
}

pub fn has_lastmod(sitemap: &str) -> bool {
    LASTMOD.is_match(sitemap)
}

pub fn has_sitemap_directive(robots: &str) -> bool {
    SITEMAP_DIRECTIVE.is_match(robots)
}
