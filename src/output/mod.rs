mod cli;
mod json;

pub use cli::print_cli_table;
pub use json::print_json;

use crate::model::{ProjectReport, ResolvedDependency};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'table' or 'json'", s)),
        }
    }
}

/// A project report together with its dependencies, when requested.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSection {
    #[serde(flatten)]
    pub project: ProjectReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<ResolvedDependency>>,
}

/// Everything a single CLI invocation prints.
#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ResolvedDependency>,
}

impl TrackReport {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            projects: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

impl Default for TrackReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn print_result(report: &TrackReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_cli_table(report),
        OutputFormat::Json => print_json(report),
    }
}

/// Format report to string for file output
pub fn format_result_to_string(report: &TrackReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(cli::render_tables(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table"), Ok(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("JSON"), Ok(OutputFormat::Json));
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_json_shape() {
        let report = TrackReport {
            projects: vec![ProjectSection {
                project: ProjectReport {
                    id: "p-1".to_string(),
                    name: "web".to_string(),
                    description: "Web app".to_string(),
                    vulnerable: false,
                    severity: Severity::None,
                },
                dependencies: None,
            }],
            ..TrackReport::new()
        };

        let json: serde_json::Value =
            serde_json::from_str(&format_result_to_string(&report, OutputFormat::Json).unwrap())
                .unwrap();

        assert_eq!(json["projects"][0]["name"], "web");
        assert_eq!(json["projects"][0]["severity"], "None");
        assert_eq!(json["projects"][0]["vulnerable"], false);
        assert!(json["projects"][0].get("dependencies").is_none());
        assert!(json.get("dependencies").is_none());
    }
}
