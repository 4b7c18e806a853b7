// src/checker/freshness.rs
// =============================================================================
// Decides whether the deployed activity data is recent enough.
//
// The data pipeline writes a `generatedAt` timestamp into activity.json.
// We classify it as:
// - missing (not a string at all)
// - invalid (a string that isn't a timestamp)
// - in the future (clock skew or a bad writer; always a failure)
// - fresh or stale, depending on its age against a threshold in hours
// =============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub const DEFAULT_MAX_AGE_HOURS: f64 = 18.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FreshnessEvaluation {
    pub ok: bool,
    pub details: String,
}

// Evaluates `generated_at` (whatever the JSON held) against `now`.
pub fn evaluate_freshness(
    generated_at: &Value,
    now: DateTime<Utc>,
    max_age_hours: f64,
) -> FreshnessEvaluation {
    let raw = match generated_at.as_str() {
        Some(raw) => raw,
        None => {
            return FreshnessEvaluation {
                ok: false,
                details: "Missing generatedAt in deployed activity.json".to_string(),
            }
        }
    };

    let generated = match parse_timestamp(raw) {
        Some(generated) => generated,
        None => {
            return FreshnessEvaluation {
                ok: false,
                details: "Invalid timestamp in deployed activity.json".to_string(),
            }
        }
    };

    let age_ms = (now - generated).num_milliseconds();
    if age_ms < 0 {
        let ahead = (-age_ms as f64 / MS_PER_HOUR).round();
        return FreshnessEvaluation {
            ok: false,
            details: format!("generatedAt is {}h in the future ({})", ahead, raw.trim()),
        };
    }

    let age_hours = age_ms as f64 / MS_PER_HOUR;
    FreshnessEvaluation {
        ok: age_hours <= max_age_hours,
        details: format!(
            "Data generated {}h ago (max {}h)",
            age_hours.round(),
            max_age_hours
        ),
    }
}

// RFC 3339 first; zone-less forms are read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
