// src/report.rs
// =============================================================================
// Turns the ordered check results into text or JSON.
//
// Text layout, one line per check in the order the checks ran:
//
//   PASS  Local sitemap.xml has <lastmod>
//   WARN  Deployed canonical URL matches the homepage
//         Missing canonical link on deployed homepage
//
// followed by a summary and, when anything failed, a warning line. Failures
// are advisory: rendering never decides the exit status.
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::checker::CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.ok).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [CheckResult],
    summary: Summary,
}

pub fn render_text(results: &[CheckResult]) -> String {
    let mut out = String::new();

    for result in results {
        let status = if result.ok { "PASS" } else { "WARN" };
        let _ = writeln!(out, "{}  {}", status, result.label);
        if !result.ok {
            if let Some(details) = &result.details {
                let _ = writeln!(out, "      {}", details);
            }
        }
    }

    let summary = Summary::from_results(results);
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 {}/{} checks passed", summary.passed, summary.total);
    if summary.failed > 0 {
        let _ = writeln!(
            out,
            "⚠️  {} check(s) need attention (warnings only, exit status is unaffected)",
            summary.failed
        );
    }

    out
}

pub fn render_json(results: &[CheckResult]) -> Result<String> {
    let report = JsonReport {
        results,
        summary: Summary::from_results(results),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
