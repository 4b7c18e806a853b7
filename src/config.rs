// src/config.rs
// =============================================================================
// Run settings: built-in defaults, overridden by CLI flags and environment.
//
// Environment variables (read once per run):
// - VISIBILITY_USER_AGENT: User-Agent for every request (trimmed)
// - GH_TOKEN / GITHUB_TOKEN: optional GitHub token, GH_TOKEN preferred
// - GITHUB_API_URL: API base, for GitHub Enterprise or a local mock
//
// Tokens are only ever placed in an Authorization header. Settings does not
// derive Debug so the token can't end up in a log line by accident.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::checker::DEFAULT_MAX_AGE_HOURS;
use crate::cli::Cli;

pub const DEFAULT_REPO_OWNER: &str = "octo-labs";
pub const DEFAULT_REPO_NAME: &str = "activity-dashboard";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BASE_URL: &str = "https://octo-labs.github.io/activity-dashboard";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const HOSTING_DOMAIN: &str = "github.io";
pub const DESCRIPTION_KEYWORD: &str = "dashboard";

/// Topics the repository must carry, in reporting order
pub const REQUIRED_TOPICS: [&str; 9] = [
    "dashboard",
    "react",
    "github-activity",
    "data-visualization",
    "pwa",
    "typescript",
    "vite",
    "github-pages",
    "open-source",
];

/// Square icon sizes the web app manifest must declare
pub const REQUIRED_ICON_SIZES: [&str; 2] = ["192x192", "512x512"];

/// Local build inputs, relative to the project root
pub const LOCAL_INDEX: &str = "index.html";
pub const LOCAL_SITEMAP: &str = "public/sitemap.xml";
pub const LOCAL_ROBOTS: &str = "public/robots.txt";

pub struct Settings {
    pub root: PathBuf,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub default_base_url: String,
    pub hosting_domain: String,
    pub description_keyword: String,
    pub required_topics: &'static [&'static str],
    pub required_icon_sizes: &'static [&'static str],
    pub user_agent: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub max_age_hours: f64,
}

impl Settings {
    /// Built-in defaults only; nothing is read from the environment
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            owner: DEFAULT_REPO_OWNER.to_string(),
            repo: DEFAULT_REPO_NAME.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
            hosting_domain: HOSTING_DOMAIN.to_string(),
            description_keyword: DESCRIPTION_KEYWORD.to_string(),
            required_topics: &REQUIRED_TOPICS,
            required_icon_sizes: &REQUIRED_ICON_SIZES,
            user_agent: resolve_user_agent(None),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
        }
    }

    /// Defaults, then CLI flags, then environment
    pub fn from_cli(cli: &Cli) -> Self {
        let mut settings = Self::new(cli.root.clone());

        if let Some(slug) = &cli.repo {
            settings.owner = slug.owner.clone();
            settings.repo = slug.name.clone();
        }

        settings.timeout = Duration::from_secs(cli.timeout_secs);
        settings.max_age_hours = cli.max_age_hours;

        settings.user_agent = resolve_user_agent(std::env::var("VISIBILITY_USER_AGENT").ok());
        settings.token = resolve_token(
            std::env::var("GH_TOKEN").ok(),
            std::env::var("GITHUB_TOKEN").ok(),
        );
        if let Ok(api_url) = std::env::var("GITHUB_API_URL") {
            let api_url = api_url.trim().trim_end_matches('/');
            if !api_url.is_empty() {
                settings.api_url = api_url.to_string();
            }
        }

        settings
    }
}

// The override wins unless it is absent or blank
pub fn resolve_user_agent(override_value: Option<String>) -> String {
    override_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| format!("visibility-check/{}", env!("CARGO_PKG_VERSION")))
}

// GH_TOKEN is preferred; blank values count as unset
pub fn resolve_token(gh_token: Option<String>, github_token: Option<String>) -> Option<String> {
    [gh_token, github_token]
        .into_iter()
        .flatten()
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_user_agent_override() {
        assert_eq!(resolve_user_agent(Some("  my-bot/2  ".to_string())), "my-bot/2");
    }

    #[test]
    fn test_user_agent_falls_back_when_blank_or_absent() {
        let default = format!("visibility-check/{}", env!("CARGO_PKG_VERSION"));
        assert_eq!(resolve_user_agent(None), default);
        assert_eq!(resolve_user_agent(Some("   ".to_string())), default);
    }

    #[test]
    fn test_gh_token_preferred() {
        assert_eq!(
            resolve_token(Some("gh".to_string()), Some("github".to_string())),
            Some("gh".to_string())
        );
        assert_eq!(
            resolve_token(Some(" ".to_string()), Some("github".to_string())),
            Some("github".to_string())
        );
        assert_eq!(resolve_token(None, None), None);
    }

    #[test]
    fn test_required_lists() {
        assert_eq!(REQUIRED_TOPICS.len(), 9);
        assert_eq!(REQUIRED_TOPICS[0], "dashboard");
        assert_eq!(REQUIRED_TOPICS[1], "react");
        assert_eq!(REQUIRED_ICON_SIZES, ["192x192", "512x512"]);
    }

    #[test]
    fn test_from_cli_applies_flags() {
        let cli = Cli::try_parse_from([
            "visibility-check",
            "--repo",
            "https://github.com/someone/site.git",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.owner, "someone");
        assert_eq!(settings.repo, "site");
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_from_cli_keeps_default_repo_without_flag() {
        let cli = Cli::try_parse_from(["visibility-check"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.owner, DEFAULT_REPO_OWNER);
        assert_eq!(settings.repo, DEFAULT_REPO_NAME);
    }
}
