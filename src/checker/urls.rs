// src/checker/urls.rs
// =============================================================================
// URL resolution rules shared by every deployed-site check.
//
// We use the `url` crate (WHATWG URL standard, same as browsers) to:
// - Parse absolute URLs and normalize their serialization
// - Resolve relative hrefs against a page or manifest URL
//
// Every function here returns an empty string instead of an error. An empty
// string is what the checks treat as "no usable URL", so callers never have
// to special-case parse failures.
// =============================================================================

use url::Url;

use super::html::is_data_uri;

// Returns the normalized URL only if `raw` is already absolute and https.
//
// Used for og:image / twitter:image, which crawlers require to be absolute.
//
// Examples:
//   "https://x.test/a.png" -> "https://x.test/a.png"
//   "http://x.test/a.png"  -> ""
//   "/a.png"               -> ""
pub fn absolute_https_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) if url.scheme() == "https" => url.to_string(),
        _ => String::new(),
    }
}

// Resolves `raw` (relative or absolute) against a site base URL.
//
// The base is treated as a directory (`base + "/"`) so that a project-page
// base such as https://owner.github.io/repo yields children of /repo/.
pub fn resolve_https_url(raw: &str, base: &str) -> String {
    let directory = format!("{}/", base.trim_end_matches('/'));
    resolve_https_from(raw, &directory)
}

// Resolves `raw` against a document URL exactly as a browser would, e.g.
// manifest icon srcs are relative to the manifest, not the site.
pub fn resolve_https_from(raw: &str, document_url: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || is_data_uri(raw) {
        return String::new();
    }

    let base = match Url::parse(document_url) {
        Ok(base) => base,
        Err(_) => return String::new(),
    };

    match base.join(raw) {
        Ok(url) if url.scheme() == "https" => url.to_string(),
        _ => String::new(),
    }
}

// Canonical form for comparing two URLs for logical equality:
// trailing slashes removed, lower-cased.
pub fn normalize_for_match(value: &str) -> String {
    value.trim().trim_end_matches('/').to_lowercase()
}

// Validates a repository homepage URL.
//
// Only http/https are accepted, credentials are rejected, query and fragment
// are dropped and exactly one trailing slash is removed.
pub fn resolve_homepage(raw: &str) -> String {
    let mut url = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(_) => return String::new(),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return String::new();
    }
    if !url.username().is_empty() || url.password().is_some() {
        return String::new();
    }

    url.set_query(None);
    url.set_fragment(None);

    let serialized = url.to_string();
    match serialized.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => serialized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_https_accepts_https_only() {
        assert_eq!(absolute_https_url("https://x.test"), "https://x.test/");
        assert_eq!(absolute_https_url(" https://x.test/og.png "), "https://x.test/og.png");
        assert_eq!(absolute_https_url("http://x.test"), "");
        assert_eq!(absolute_https_url("ftp://x.test"), "");
        assert_eq!(absolute_https_url("/og.png"), "");
        assert_eq!(absolute_https_url(""), "");
    }

    #[test]
    fn test_resolve_relative_against_project_base() {
        let base = "https://octo.github.io/repo";
        assert_eq!(
            resolve_https_url("icons/icon.png", base),
            "https://octo.github.io/repo/icons/icon.png"
        );
        assert_eq!(
            resolve_https_url("/favicon.ico", base),
            "https://octo.github.io/favicon.ico"
        );
        assert_eq!(
            resolve_https_url("https://cdn.test/x.png", base),
            "https://cdn.test/x.png"
        );
    }

    #[test]
    fn test_resolve_rejects_blank_data_and_non_https() {
        let base = "https://octo.github.io/repo";
        assert_eq!(resolve_https_url("   ", base), "");
        assert_eq!(resolve_https_url("data:image/png;base64,AAAA", base), "");
        assert_eq!(resolve_https_url("http://insecure.test/x.png", base), "");
        assert_eq!(resolve_https_url("icon.png", "http://octo.github.io/repo"), "");
    }

    #[test]
    fn test_resolve_from_manifest_url() {
        let manifest = "https://octo.github.io/repo/static/manifest.json";
        assert_eq!(
            resolve_https_from("icon-192.png", manifest),
            "https://octo.github.io/repo/static/icon-192.png"
        );
        assert_eq!(resolve_https_from("icon.png", "not a url"), "");
    }

    #[test]
    fn test_normalize_for_match() {
        assert_eq!(normalize_for_match("https://X.test/Repo//"), "https://x.test/repo");
        assert_eq!(
            normalize_for_match("https://x.test/repo"),
            normalize_for_match("https://x.test/repo/")
        );
    }

    #[test]
    fn test_resolve_homepage() {
        assert_eq!(resolve_homepage("https://a.example.org/"), "https://a.example.org");
        assert_eq!(
            resolve_homepage("https://a.example.org/path/?q=1#f"),
            "https://a.example.org/path"
        );
        assert_eq!(resolve_homepage("http://a.example.org/x"), "http://a.example.org/x");
        assert_eq!(resolve_homepage("ftp://a.example.org"), "");
        assert_eq!(resolve_homepage("https://u:p@a.example.org"), "");
        assert_eq!(resolve_homepage("https://u@a.example.org"), "");
        assert_eq!(resolve_homepage("not-a-url"), "");
        assert_eq!(resolve_homepage(""), "");
    }
}
