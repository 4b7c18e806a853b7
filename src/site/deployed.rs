// src/site/deployed.rs
// =============================================================================
// Checks against the live deployment.
//
// How it works:
// 1. Fetch the homepage, robots.txt, sitemap.xml and data/activity.json
//    together and wait for all four to settle
// 2. Read values out of the homepage (canonical, og:*, twitter:*, manifest,
//    favicon, apple-touch-icon) and resolve them to URLs
// 3. Request each resolved URL in turn; manifest icons are requested together
//
// A request that times out or fails comes back as `status: None` and only the
// check that needed it fails. Results are returned in a fixed order.
// =============================================================================

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::local::pattern_check;
use super::manifest::manifest_checks;
use crate::checker::{
    absolute_https_url, evaluate_freshness, extract_attribute, extract_favicon_href, has_json_ld,
    has_lastmod, has_sitemap_directive, normalize_for_match, resolve_https_url, CheckResult,
    FetchOutcome, Fetcher,
};

pub const REACHABLE_LABEL: &str = "Deployed homepage responds with 200";
pub const JSON_LD_LABEL: &str = "Deployed homepage has JSON-LD structured data";
pub const CANONICAL_LABEL: &str = "Deployed canonical URL matches the homepage";
pub const OG_IMAGE_LABEL: &str = "Deployed og:image is reachable";
pub const OG_DIMENSIONS_LABEL: &str = "Deployed og:image declares width and height";
pub const TWITTER_IMAGE_LABEL: &str = "Deployed twitter:image is reachable";
pub const FAVICON_LABEL: &str = "Deployed favicon is reachable";
pub const APPLE_TOUCH_ICON_LABEL: &str = "Deployed apple-touch-icon is reachable";
pub const ROBOTS_LABEL: &str = "Deployed robots.txt declares an absolute Sitemap";
pub const SITEMAP_LABEL: &str = "Deployed sitemap.xml has <lastmod>";
pub const ACTIVITY_LABEL: &str = "Deployed activity data is fresh";

pub struct DeployedInputs<'a> {
    pub base_url: &'a str,
    pub icon_sizes: &'a [&'a str],
    pub now: DateTime<Utc>,
    pub max_age_hours: f64,
}

pub async fn deployed_checks(fetcher: &Fetcher, inputs: &DeployedInputs<'_>) -> Vec<CheckResult> {
    let base = inputs.base_url;
    let home_url = format!("{}/", base);
    let robots_url = format!("{}/robots.txt", base);
    let sitemap_url = format!("{}/sitemap.xml", base);
    let activity_url = format!("{}/data/activity.json", base);

    let (home, robots, sitemap, activity) = tokio::join!(
        fetcher.fetch(&home_url),
        fetcher.fetch(&robots_url),
        fetcher.fetch(&sitemap_url),
        fetcher.fetch(&activity_url),
    );

    let html = home.ok_body();
    let mut results = Vec::new();

    results.push(CheckResult::from_bool(
        REACHABLE_LABEL,
        home.is_ok(),
        format!("{} -> {}", home.url, home.status_label()),
    ));
    results.push(pattern_check(
        JSON_LD_LABEL,
        has_json_ld(html),
        "Found <script type=\"application/ld+json\">",
        "No <script type=\"application/ld+json\"> on deployed homepage",
    ));
    results.push(check_canonical(html, base));

    let og_image = meta_content(html, "og:image");
    results.push(check_absolute_image(fetcher, OG_IMAGE_LABEL, "og:image", &og_image).await);
    results.push(check_og_dimensions(html));

    let twitter_image = twitter_image(html);
    results.push(
        check_absolute_image(fetcher, TWITTER_IMAGE_LABEL, "twitter:image", &twitter_image).await,
    );

    results.extend(manifest_checks(fetcher, html, base, inputs.icon_sizes).await);

    let favicon = extract_favicon_href(html);
    results.push(check_linked_asset(fetcher, FAVICON_LABEL, "favicon", &favicon, base).await);

    let touch_icon = extract_attribute(html, "link", "rel", "apple-touch-icon", "href");
    results.push(
        check_linked_asset(fetcher, APPLE_TOUCH_ICON_LABEL, "apple-touch-icon", &touch_icon, base)
            .await,
    );

    results.push(check_fetched_text(
        ROBOTS_LABEL,
        &robots,
        has_sitemap_directive,
        "robots.txt declares Sitemap",
        "robots.txt has no \"Sitemap: https://...\" line",
    ));
    results.push(check_fetched_text(
        SITEMAP_LABEL,
        &sitemap,
        has_lastmod,
        "Sitemap carries <lastmod>",
        "sitemap.xml has no <lastmod>",
    ));
    results.push(check_activity(&activity, inputs.now, inputs.max_age_hours));

    results
}

// og:* is specified with `property`, but plenty of sites use `name`
fn meta_content(html: &str, key: &str) -> String {
    let by_property = extract_attribute(html, "meta", "property", key, "content");
    if !by_property.is_empty() {
        return by_property;
    }
    extract_attribute(html, "meta", "name", key, "content")
}

// The legacy twitter:image:src key only counts when twitter:image is absent
fn twitter_image(html: &str) -> String {
    let current = meta_content(html, "twitter:image");
    if !current.is_empty() {
        return current;
    }
    meta_content(html, "twitter:image:src")
}

pub fn check_canonical(html: &str, base: &str) -> CheckResult {
    let canonical = extract_attribute(html, "link", "rel", "canonical", "href");
    let expected = format!("{}/", base);

    if canonical.is_empty() {
        CheckResult::warn(CANONICAL_LABEL, "Missing canonical link on deployed homepage")
    } else if normalize_for_match(&canonical) == normalize_for_match(&expected) {
        CheckResult::pass(CANONICAL_LABEL, format!("Canonical matches {}", expected))
    } else {
        CheckResult::warn(
            CANONICAL_LABEL,
            format!("Canonical {} does not match expected {}", canonical, expected),
        )
    }
}

// Social images must already be absolute https URLs; relative values are
// not resolved because crawlers won't resolve them either.
async fn check_absolute_image(fetcher: &Fetcher, label: &str, name: &str, raw: &str) -> CheckResult {
    if raw.is_empty() {
        return CheckResult::warn(label, format!("Missing {} metadata", name));
    }

    let url = absolute_https_url(raw);
    if url.is_empty() {
        return CheckResult::warn(label, format!("{} is not an absolute https URL: {}", name, raw));
    }

    reachability(fetcher, label, name, &url).await
}

async fn check_linked_asset(
    fetcher: &Fetcher,
    label: &str,
    name: &str,
    href: &str,
    base: &str,
) -> CheckResult {
    if href.is_empty() {
        return CheckResult::warn(label, format!("Missing {} link on deployed homepage", name));
    }

    let url = resolve_https_url(href, base);
    if url.is_empty() {
        return CheckResult::warn(label, format!("{} href is not a valid https URL: {}", name, href));
    }

    reachability(fetcher, label, name, &url).await
}

async fn reachability(fetcher: &Fetcher, label: &str, name: &str, url: &str) -> CheckResult {
    let outcome = fetcher.fetch_status(url).await;
    if outcome.is_ok() {
        CheckResult::pass(label, format!("{} reachable: {}", name, url))
    } else {
        CheckResult::warn(
            label,
            format!("{} unreachable ({}): {}", name, outcome.status_label(), url),
        )
    }
}

pub fn check_og_dimensions(html: &str) -> CheckResult {
    let width = meta_content(html, "og:image:width");
    let height = meta_content(html, "og:image:height");

    match (width.is_empty(), height.is_empty()) {
        (true, true) => {
            CheckResult::warn(OG_DIMENSIONS_LABEL, "Missing og:image:width and og:image:height")
        }
        (true, false) => CheckResult::warn(OG_DIMENSIONS_LABEL, "Missing og:image:width"),
        (false, true) => CheckResult::warn(OG_DIMENSIONS_LABEL, "Missing og:image:height"),
        (false, false) => match (positive_integer(&width), positive_integer(&height)) {
            (Some(w), Some(h)) => CheckResult::pass(OG_DIMENSIONS_LABEL, format!("{}x{}", w, h)),
            _ => CheckResult::warn(
                OG_DIMENSIONS_LABEL,
                format!(
                    "og:image:width and og:image:height must be positive integers (got {:?} x {:?})",
                    width, height
                ),
            ),
        },
    }
}

fn positive_integer(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

// Only a 200 response counts; anything else is checked as empty content
fn check_fetched_text(
    label: &str,
    outcome: &FetchOutcome,
    contract: fn(&str) -> bool,
    pass: &str,
    fail: &str,
) -> CheckResult {
    if !outcome.is_ok() {
        return CheckResult::warn(
            label,
            format!("Could not fetch {} ({})", outcome.url, outcome.status_label()),
        );
    }
    pattern_check(label, contract(outcome.ok_body()), pass, fail)
}

pub fn check_activity(outcome: &FetchOutcome, now: DateTime<Utc>, max_age_hours: f64) -> CheckResult {
    if !outcome.is_ok() {
        return CheckResult::warn(ACTIVITY_LABEL, "Could not fetch deployed activity data");
    }

    let activity: Value = match serde_json::from_str(&outcome.body) {
        Ok(activity) => activity,
        Err(_) => return CheckResult::warn(ACTIVITY_LABEL, "Invalid activity.json format"),
    };

    let generated_at = activity.get("generatedAt").unwrap_or(&Value::Null);
    let evaluation = evaluate_freshness(generated_at, now, max_age_hours);
    CheckResult::from_bool(ACTIVITY_LABEL, evaluation.ok, evaluation.details)
}
