// src/github/checks.rs
// =============================================================================
// Checks derived from the repository metadata.
//
// - Topics: every required topic is present (case-insensitive)
// - Homepage: points at the hosting domain, and is a valid http(s) URL
// - Description: mentions the project keyword
//
// These only run when the metadata request succeeded.
// =============================================================================

use std::collections::HashSet;

use super::fetch::RepoMetadata;
use crate::checker::{resolve_homepage, CheckResult};
use crate::config::Settings;

pub const TOPICS_LABEL: &str = "GitHub topics include the required set";
pub const HOMEPAGE_DOMAIN_LABEL: &str = "GitHub homepage points at the hosted site";
pub const HOMEPAGE_VALID_LABEL: &str = "GitHub homepage is a valid URL";
pub const DESCRIPTION_LABEL: &str = "GitHub description mentions the project keyword";

pub fn metadata_checks(meta: &RepoMetadata, settings: &Settings) -> Vec<CheckResult> {
    vec![
        check_topics(meta.topics(), settings.required_topics),
        check_homepage_domain(meta.homepage(), &settings.hosting_domain),
        check_homepage_valid(meta.homepage()),
        check_description(meta.description(), &settings.description_keyword),
    ]
}

// Missing topics are listed in the order of `required`
pub fn check_topics(topics: &[String], required: &[&str]) -> CheckResult {
    let present: HashSet<String> = topics.iter().map(|t| t.trim().to_lowercase()).collect();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|topic| !present.contains(&topic.to_lowercase()))
        .collect();

    if missing.is_empty() {
        CheckResult::pass(
            TOPICS_LABEL,
            format!("All {} required topics present", required.len()),
        )
    } else {
        CheckResult::warn(TOPICS_LABEL, format!("Missing topics: {}", missing.join(", ")))
    }
}

pub fn check_homepage_domain(homepage: &str, domain: &str) -> CheckResult {
    let homepage = homepage.trim();
    if homepage.is_empty() {
        return CheckResult::warn(HOMEPAGE_DOMAIN_LABEL, "Repository homepage is not set");
    }

    let ok = homepage.to_lowercase().contains(&domain.to_lowercase());
    let details = if ok {
        homepage.to_string()
    } else {
        format!("Homepage {} is not on {}", homepage, domain)
    };
    CheckResult::from_bool(HOMEPAGE_DOMAIN_LABEL, ok, details)
}

pub fn check_homepage_valid(homepage: &str) -> CheckResult {
    let resolved = resolve_homepage(homepage);
    if resolved.is_empty() {
        CheckResult::warn(
            HOMEPAGE_VALID_LABEL,
            format!(
                "Homepage {:?} is not a plain http(s) URL without credentials",
                homepage.trim()
            ),
        )
    } else {
        CheckResult::pass(HOMEPAGE_VALID_LABEL, resolved)
    }
}

pub fn check_description(description: &str, keyword: &str) -> CheckResult {
    let ok = description.to_lowercase().contains(&keyword.to_lowercase());
    let details = if ok {
        format!("Description mentions \"{}\"", keyword)
    } else if description.trim().is_empty() {
        "Repository description is empty".to_string()
    } else {
        format!("Description does not mention \"{}\"", keyword)
    };
    CheckResult::from_bool(DESCRIPTION_LABEL, ok, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUIRED_TOPICS;

    fn topics(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_two_of_nine_topics() {
        let result = check_topics(&topics(&["dashboard", "react"]), &REQUIRED_TOPICS);
        assert!(!result.ok);
        assert_eq!(
            result.details.as_deref(),
            Some(
                "Missing topics: github-activity, data-visualization, pwa, typescript, vite, \
                 github-pages, open-source"
            )
        );
    }

    #[test]
    fn test_all_topics_case_insensitive() {
        let mut all = topics(&REQUIRED_TOPICS);
        all[0] = "DashBoard".to_string();
        all.push("extra".to_string());
        let result = check_topics(&all, &REQUIRED_TOPICS);
        assert!(result.ok);
    }

    #[test]
    fn test_no_topics() {
        let result = check_topics(&[], &["a", "b"]);
        assert_eq!(result.details.as_deref(), Some("Missing topics: a, b"));
    }

    #[test]
    fn test_homepage_domain() {
        assert!(check_homepage_domain("https://octo.GitHub.io/dash", "github.io").ok);
        assert!(!check_homepage_domain("https://dash.example.com", "github.io").ok);
        let unset = check_homepage_domain("", "github.io");
        assert!(!unset.ok);
        assert_eq!(unset.details.as_deref(), Some("Repository homepage is not set"));
    }

    #[test]
    fn test_homepage_valid() {
        let ok = check_homepage_valid("https://octo.github.io/dash/");
        assert!(ok.ok);
        assert_eq!(ok.details.as_deref(), Some("https://octo.github.io/dash"));
        assert!(!check_homepage_valid("https://u:p@octo.github.io").ok);
        assert!(!check_homepage_valid("").ok);
    }

    #[test]
    fn test_description_keyword() {
        assert!(check_description("GitHub activity Dashboard", "dashboard").ok);
        assert!(!check_description("A website", "dashboard").ok);
        assert_eq!(
            check_description("", "dashboard").details.as_deref(),
            Some("Repository description is empty")
        );
    }

    #[test]
    fn test_metadata_checks_labels_in_order() {
        let settings = Settings::new(".");
        let meta = RepoMetadata::default();
        let labels: Vec<String> = metadata_checks(&meta, &settings)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(
            labels,
            vec![TOPICS_LABEL, HOMEPAGE_DOMAIN_LABEL, HOMEPAGE_VALID_LABEL, DESCRIPTION_LABEL]
        );
    }
}
