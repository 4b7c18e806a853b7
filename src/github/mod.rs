// src/github/mod.rs
// =============================================================================
// This module handles the GitHub side of the checklist.
//
// - fetch: one authenticated request for repository metadata
// - checks: topics, homepage and description checks over that metadata
// =============================================================================

mod checks;
mod fetch;

pub use checks::metadata_checks;
pub use fetch::{fetch_repo_metadata, parse_repo_slug};
