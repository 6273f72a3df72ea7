use super::VulnerabilityPayload;
use serde::{Deserialize, Serialize};

/// The `{id, score}` view of a vulnerability kept on a dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilitySummary {
    pub id: String,
    pub score: f64,
}

/// A dependency after its vulnerabilities have been looked up.
///
/// `vulnerable` is true exactly when `vulnerabilities` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub name: String,
    pub vulnerable: bool,
    pub vulnerabilities: Vec<VulnerabilitySummary>,
}

impl ResolvedDependency {
    pub fn from_payload(name: impl Into<String>, payload: &VulnerabilityPayload) -> Self {
        let vulnerabilities: Vec<VulnerabilitySummary> = payload
            .vulns
            .iter()
            .map(|v| VulnerabilitySummary {
                id: v.id.clone(),
                score: v.score.normalize(),
            })
            .collect();

        Self {
            name: name.into(),
            vulnerable: !vulnerabilities.is_empty(),
            vulnerabilities,
        }
    }
}
