// src/site/mod.rs
// =============================================================================
// This module drives the whole checklist.
//
// Stages, always in this order and never revisited:
//   LocalChecks -> RepoMetadata -> BaseUrlResolution -> DeployedFanOut
//
// Whatever goes wrong in one stage only turns that stage's checks into
// warnings. A GitHub API failure skips the metadata checks and the deployed
// checks run against the default base URL instead.
// =============================================================================

mod deployed;
mod local;
mod manifest;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

use crate::checker::{CheckResult, Fetcher};
use crate::config::Settings;
use crate::github::{fetch_repo_metadata, metadata_checks};

use deployed::DeployedInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    LocalChecks,
    RepoMetadata,
    BaseUrlResolution,
    DeployedFanOut,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LocalChecks => "local checks",
            Stage::RepoMetadata => "repository metadata",
            Stage::BaseUrlResolution => "base URL resolution",
            Stage::DeployedFanOut => "deployed site",
        };
        f.write_str(name)
    }
}

// The URL every deployed-site check is relative to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlResolution {
    /// scheme + host + path, without a trailing slash
    pub base_url: String,
    pub used_fallback: bool,
}

// Prefers the repository homepage; falls back to the built-in default.
//
// Only one trailing slash is removed, matching how the homepage is entered
// in the repository settings.
pub fn resolve_base_url(homepage: Option<&str>, default_base_url: &str) -> BaseUrlResolution {
    let homepage = homepage.map(str::trim).unwrap_or("");
    if !homepage.is_empty() && homepage.starts_with("http") {
        let base_url = homepage.strip_suffix('/').unwrap_or(homepage);
        return BaseUrlResolution {
            base_url: base_url.to_string(),
            used_fallback: false,
        };
    }

    let default_base_url = default_base_url.trim();
    BaseUrlResolution {
        base_url: default_base_url
            .strip_suffix('/')
            .unwrap_or(default_base_url)
            .to_string(),
        used_fallback: true,
    }
}

/// Runs the full checklist with a fresh client and the current time
pub async fn run_checklist(settings: &Settings) -> Result<Vec<CheckResult>> {
    let fetcher = Fetcher::new(&settings.user_agent, settings.timeout)?;
    Ok(run_checklist_with(&fetcher, settings, Utc::now()).await)
}

pub async fn run_checklist_with(
    fetcher: &Fetcher,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    enter(Stage::LocalChecks);
    results.extend(local::local_checks(&settings.root));

    enter(Stage::RepoMetadata);
    let homepage = match fetch_repo_metadata(fetcher, settings).await {
        Ok(meta) => {
            results.extend(metadata_checks(&meta, settings));
            meta.homepage
        }
        Err(error) => {
            warn!(
                repo = %format!("{}/{}", settings.owner, settings.repo),
                %error,
                "could not fetch repository metadata, skipping metadata checks"
            );
            None
        }
    };

    enter(Stage::BaseUrlResolution);
    let resolution = resolve_base_url(homepage.as_deref(), &settings.default_base_url);
    if resolution.used_fallback {
        warn!(
            base_url = %resolution.base_url,
            "repository homepage unavailable, checking the default deployment"
        );
    } else {
        debug!(base_url = %resolution.base_url, "using repository homepage");
    }

    enter(Stage::DeployedFanOut);
    let inputs = DeployedInputs {
        base_url: &resolution.base_url,
        icon_sizes: settings.required_icon_sizes,
        now,
        max_age_hours: settings.max_age_hours,
    };
    results.extend(deployed::deployed_checks(fetcher, &inputs).await);

    debug_assert!(labels_unique(&results), "check labels must be unique");
    results
}

fn enter(stage: Stage) {
    info!(%stage, "running");
}

fn labels_unique(results: &[CheckResult]) -> bool {
    let mut seen = HashSet::new();
    results.iter().all(|result| seen.insert(result.label.as_str()))
}
