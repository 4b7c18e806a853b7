// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Running `visibility-check` with no arguments runs the full checklist
// against the built-in repository and project root. Every flag is optional.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::checker::DEFAULT_MAX_AGE_HOURS;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::github::parse_repo_slug;

/// An `owner/repo` pair, validated while the arguments are parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

#[derive(Parser, Debug)]
#[command(
    name = "visibility-check",
    version,
    about = "Verify a deployed site exposes the metadata search engines, social crawlers and PWA installers expect",
    long_about = "visibility-check runs a checklist over the local build inputs, the GitHub repository \
                  metadata and the deployed site: structured data, canonical URL, Open Graph and \
                  Twitter images, manifest icons, favicon, sitemap/robots and data freshness. \
                  Failing checks are reported as warnings; the exit status is always 0."
)]
pub struct Cli {
    /// Project root containing index.html and public/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Repository to check, as owner/repo or a GitHub URL
    ///
    /// Example: --repo https://github.com/octo-labs/activity-dashboard
    #[arg(long, value_parser = parse_repo_arg)]
    pub repo: Option<RepoSlug>,

    /// Output results in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum age of the deployed activity data, in hours
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_HOURS)]
    pub max_age_hours: f64,

    /// Log each request to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// A malformed slug is a usage error, reported by clap before anything runs
fn parse_repo_arg(value: &str) -> Result<RepoSlug, String> {
    parse_repo_slug(value)
        .map(|(owner, name)| RepoSlug { owner, name })
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["visibility-check"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.repo, None);
        assert!(!cli.json);
        assert_eq!(cli.timeout_secs, 5);
        assert_eq!(cli.max_age_hours, 18.0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "visibility-check",
            "--root",
            "site",
            "--repo",
            "a/b",
            "--json",
            "--timeout-secs",
            "2",
            "--max-age-hours",
            "24",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("site"));
        assert_eq!(
            cli.repo,
            Some(RepoSlug {
                owner: "a".to_string(),
                name: "b".to_string(),
            })
        );
        assert!(cli.json);
        assert_eq!(cli.timeout_secs, 2);
        assert_eq!(cli.max_age_hours, 24.0);
        assert!(cli.verbose);
    }

    #[test]
    fn test_bad_repo_is_a_usage_error() {
        let err = Cli::try_parse_from(["visibility-check", "--repo", "just-a-name"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Expected owner/repo"));

        assert!(Cli::try_parse_from(["visibility-check", "--repo", "gitlab.com/a/b"]).is_err());
    }
}
