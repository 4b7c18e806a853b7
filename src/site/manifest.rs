// src/site/manifest.rs
// =============================================================================
// PWA manifest checks.
//
// 1. Find <link rel="manifest">, resolve it against the site base, fetch it
// 2. Parse it as JSON and look for an icon per required size, e.g. 192x192.
//    An icon's `sizes` is a token list ("192x192 96x96" covers 192x192) and
//    its `src` resolves relative to the manifest URL, not the site base.
// 3. Request every icon URL we resolved, concurrently
//
// Missing sizes and sizes whose src isn't a usable https URL are reported
// separately inside one details message.
// =============================================================================

use futures::future::join_all;
use serde_json::Value;

use crate::checker::{extract_attribute, resolve_https_from, resolve_https_url, CheckResult, Fetcher};

pub const MANIFEST_LABEL: &str = "Deployed manifest declares required icons";
pub const MANIFEST_ICONS_LABEL: &str = "Deployed manifest icons are reachable";

// Where one required icon size ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResolution {
    pub size: String,
    pub url: Option<String>,
}

fn unresolved(sizes: &[&str]) -> Vec<IconResolution> {
    sizes
        .iter()
        .map(|size| IconResolution {
            size: size.to_string(),
            url: None,
        })
        .collect()
}

// Runs both manifest checks; always returns exactly two results
pub async fn manifest_checks(
    fetcher: &Fetcher,
    html: &str,
    base_url: &str,
    sizes: &[&str],
) -> Vec<CheckResult> {
    let (declared, icons) = locate_manifest(fetcher, html, base_url, sizes).await;
    let reachable = icon_reachability(fetcher, &icons).await;
    vec![declared, reachable]
}

async fn locate_manifest(
    fetcher: &Fetcher,
    html: &str,
    base_url: &str,
    sizes: &[&str],
) -> (CheckResult, Vec<IconResolution>) {
    let href = extract_attribute(html, "link", "rel", "manifest", "href");
    if href.is_empty() {
        return (
            CheckResult::warn(MANIFEST_LABEL, "Missing <link rel=\"manifest\"> on deployed homepage"),
            unresolved(sizes),
        );
    }

    let manifest_url = resolve_https_url(&href, base_url);
    if manifest_url.is_empty() {
        return (
            CheckResult::warn(
                MANIFEST_LABEL,
                format!("Manifest href is not a valid https URL: {}", href),
            ),
            unresolved(sizes),
        );
    }

    let outcome = fetcher.fetch(&manifest_url).await;
    if !outcome.is_ok() {
        return (
            CheckResult::warn(
                MANIFEST_LABEL,
                format!("Manifest unreachable ({}): {}", outcome.status_label(), manifest_url),
            ),
            unresolved(sizes),
        );
    }

    evaluate_manifest(&outcome.body, &manifest_url, sizes)
}

// Checks a fetched manifest body for the required icon sizes
pub fn evaluate_manifest(
    body: &str,
    manifest_url: &str,
    sizes: &[&str],
) -> (CheckResult, Vec<IconResolution>) {
    let manifest: Value = match serde_json::from_str(body) {
        Ok(manifest) => manifest,
        Err(_) => {
            return (
                CheckResult::warn(
                    MANIFEST_LABEL,
                    format!("Manifest at {} is not valid JSON", manifest_url),
                ),
                unresolved(sizes),
            )
        }
    };

    let icons: &[Value] = manifest
        .get("icons")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut missing = Vec::new();
    let mut invalid = Vec::new();
    let mut resolutions = Vec::new();

    for &size in sizes {
        let candidates: Vec<&Value> = icons.iter().filter(|icon| declares_size(icon, size)).collect();

        let url = candidates
            .iter()
            .filter_map(|icon| icon.get("src").and_then(Value::as_str))
            .map(|src| resolve_https_from(src, manifest_url))
            .find(|url| !url.is_empty());

        if candidates.is_empty() {
            missing.push(size);
        } else if url.is_none() {
            invalid.push(size);
        }

        resolutions.push(IconResolution {
            size: size.to_string(),
            url,
        });
    }

    let mut problems = Vec::new();
    if !missing.is_empty() {
        problems.push(format!("Missing icon sizes: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        problems.push(format!("Icons without a valid https src: {}", invalid.join(", ")));
    }

    let result = if problems.is_empty() {
        CheckResult::pass(
            MANIFEST_LABEL,
            format!("Manifest declares {} icons", sizes.join(", ")),
        )
    } else {
        CheckResult::warn(MANIFEST_LABEL, problems.join("; "))
    };

    (result, resolutions)
}

fn declares_size(icon: &Value, size: &str) -> bool {
    icon.get("sizes")
        .and_then(Value::as_str)
        .map(|sizes| sizes.split_whitespace().any(|s| s.eq_ignore_ascii_case(size)))
        .unwrap_or(false)
}

// Requests the resolved icons together; unresolved sizes count as failures
async fn icon_reachability(fetcher: &Fetcher, icons: &[IconResolution]) -> CheckResult {
    let requests = icons.iter().map(|icon| async move {
        match &icon.url {
            Some(url) => Some(fetcher.fetch_status(url).await),
            None => None,
        }
    });
    let outcomes = join_all(requests).await;

    let mut all_ok = true;
    let mut parts = Vec::new();
    for (icon, outcome) in icons.iter().zip(outcomes) {
        match outcome {
            Some(outcome) => {
                all_ok &= outcome.is_ok();
                parts.push(format!("{}: {}", icon.size, outcome.status_label()));
            }
            None => {
                all_ok = false;
                parts.push(format!("{}: not resolved", icon.size));
            }
        }
    }

    CheckResult::from_bool(MANIFEST_ICONS_LABEL, all_ok, parts.join(", "))
}
