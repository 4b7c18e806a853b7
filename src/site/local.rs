// src/site/local.rs
// =============================================================================
// Checks over the local build inputs, before anything touches the network.
//
// A missing or unreadable file is read as empty content: the check that
// needs it fails with a clear message instead of the run aborting. Bytes that
// aren't valid UTF-8 are replaced, so one stray byte doesn't hide a match.
// =============================================================================

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::checker::{has_json_ld, has_lastmod, has_sitemap_directive, CheckResult};
use crate::config::{LOCAL_INDEX, LOCAL_ROBOTS, LOCAL_SITEMAP};

pub const LOCAL_JSON_LD_LABEL: &str = "Local index.html has JSON-LD structured data";
pub const LOCAL_LASTMOD_LABEL: &str = "Local sitemap.xml has <lastmod>";
pub const LOCAL_ROBOTS_LABEL: &str = "Local robots.txt declares an absolute Sitemap";

pub fn local_checks(root: &Path) -> Vec<CheckResult> {
    let index = read_or_empty(&root.join(LOCAL_INDEX));
    let sitemap = read_or_empty(&root.join(LOCAL_SITEMAP));
    let robots = read_or_empty(&root.join(LOCAL_ROBOTS));

    vec![
        pattern_check(
            LOCAL_JSON_LD_LABEL,
            has_json_ld(&index),
            "Found <script type=\"application/ld+json\">",
            "No <script type=\"application/ld+json\"> in index.html",
        ),
        pattern_check(
            LOCAL_LASTMOD_LABEL,
            has_lastmod(&sitemap),
            "Sitemap carries <lastmod>",
            "No <lastmod> in public/sitemap.xml",
        ),
        pattern_check(
            LOCAL_ROBOTS_LABEL,
            has_sitemap_directive(&robots),
            "robots.txt declares Sitemap",
            "No \"Sitemap: https://...\" line in public/robots.txt",
        ),
    ]
}

pub(super) fn pattern_check(label: &str, found: bool, pass: &str, fail: &str) -> CheckResult {
    CheckResult::from_bool(label, found, if found { pass } else { fail })
}

fn read_or_empty(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(error) => {
            debug!(path = %path.display(), %error, "local file unreadable, treating as empty");
            String::new()
        }
    }
}
