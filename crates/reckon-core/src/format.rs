//! Output format handling for reckon
//!
//! - human: readable, aligned output for terminal use
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReckonError;

/// Output format for reckon commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReckonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReckonError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a score for display; NaN scores print as `NaN` rather than a number
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.4}", score)
    }
}

/// Convert a score to JSON; NaN has no JSON representation and becomes `null`
pub fn score_to_json(score: f64) -> serde_json::Value {
    serde_json::Number::from_f64(score)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
