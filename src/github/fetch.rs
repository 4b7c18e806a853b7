// src/github/fetch.rs
// =============================================================================
// This module fetches repository metadata from the GitHub REST API.
//
// One request: GET {api}/repos/{owner}/{repo}
// - Accept: application/vnd.github.v3+json
// - User-Agent: from VISIBILITY_USER_AGENT or the built-in default
// - Authorization: token <token>, only when GH_TOKEN/GITHUB_TOKEN is set
//
// Failures are returned as a typed MetadataError. The orchestrator treats
// any of them the same way: skip the metadata checks, fall back to the
// default deployed base URL, keep going.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::checker::Fetcher;
use crate::config::Settings;

// The subset of the repository payload we check. Every field may be
// missing or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RepoMetadata {
    pub fn topics(&self) -> &[String] {
        self.topics.as_deref().unwrap_or(&[])
    }

    pub fn homepage(&self) -> &str {
        self.homepage.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("GitHub API returned HTTP {0}")]
    Status(u16),

    #[error("GitHub API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("GitHub API request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("GitHub API response is not repository JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

pub async fn fetch_repo_metadata(
    fetcher: &Fetcher,
    settings: &Settings,
) -> Result<RepoMetadata, MetadataError> {
    let url = format!(
        "{}/repos/{}/{}",
        settings.api_url.trim_end_matches('/'),
        settings.owner,
        settings.repo
    );

    let mut request = fetcher
        .client()
        .get(&url)
        .header(ACCEPT, "application/vnd.github.v3+json")
        .header(USER_AGENT, settings.user_agent.as_str());

    if let Some(token) = &settings.token {
        request = request.header(AUTHORIZATION, format!("token {}", token));
    }

    let exchange = async {
        let response = request.send().await.map_err(MetadataError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }
        response
            .json::<RepoMetadata>()
            .await
            .map_err(MetadataError::Decode)
    };

    match tokio::time::timeout(fetcher.timeout(), exchange).await {
        Ok(result) => result,
        Err(_) => Err(MetadataError::Timeout(fetcher.timeout())),
    }
}

// Parses a repository reference into (owner, repo)
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo
pub fn parse_repo_slug(input: &str) -> Result<(String, String)> {
    let trimmed = input
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let (path, from_url) = match trimmed.strip_prefix("github.com/") {
        Some(path) => (path, true),
        None if trimmed.contains("://") || trimmed.starts_with("github.com") => {
            return Err(anyhow!("Not a GitHub repository URL: {}", input));
        }
        None => (trimmed, false),
    };

    let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
    // A bare slug is exactly owner/repo; URLs may carry /tree/main etc.
    let shape_ok = if from_url { parts.len() >= 2 } else { parts.len() == 2 };
    if !shape_ok || parts[0].is_empty() || parts[1].is_empty() {
        return Err(anyhow!("Expected owner/repo, got: {}", input));
    }

    let owner = parts[0].to_string();
    let repo = parts[1].trim_end_matches(".git").to_string();
    if repo.is_empty() {
        return Err(anyhow!("Expected owner/repo, got: {}", input));
    }

    Ok((owner, repo))
}
