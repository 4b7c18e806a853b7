// src/checker/mod.rs
// =============================================================================
// This module contains the leaf building blocks of the checklist.
//
// Submodules:
// - html: Pulls one attribute value out of the first matching HTML tag
// - patterns: Regex contracts for JSON-LD, sitemap <lastmod>, robots Sitemap:
// - urls: Resolves and normalizes URLs the way browsers and crawlers do
// - freshness: Classifies how old a generatedAt timestamp is
// - http: Makes bounded-time GET requests that never fail past the call
//
// It also defines CheckResult, the one record every check produces.
// =============================================================================

mod freshness;
mod html;
mod http;
mod patterns;
mod urls;

use serde::Serialize;

pub use freshness::{evaluate_freshness, DEFAULT_MAX_AGE_HOURS};
pub use html::{extract_attribute, extract_favicon_href};
pub use http::{FetchOutcome, Fetcher};
pub use patterns::{has_json_ld, has_lastmod, has_sitemap_directive};
pub use urls::{absolute_https_url, normalize_for_match, resolve_homepage, resolve_https_from, resolve_https_url};

// The outcome of one checklist item
//
// `label` is the stable identifier of the check; it is unique within a run
// and the report keys off it. `details` is always filled in for failing
// checks so a human knows what to fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub label: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CheckResult {
    pub fn pass(label: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: true,
            details: Some(details.into()),
        }
    }

    pub fn warn(label: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: false,
            details: Some(details.into()),
        }
    }

    /// Builds a result from a boolean, using one details string for both outcomes
    pub fn from_bool(label: impl Into<String>, ok: bool, details: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok,
            details: Some(details.into()),
        }
    }
}
