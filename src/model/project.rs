use crate::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The caller-supplied part of a project registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A registered project.
///
/// `dependencies` holds identifiers into the dependency registry, in the
/// order they were first seen in the requirement list. Vulnerability data is
/// never stored on the project itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: impl Into<String>, draft: ProjectDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            dependencies: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Presentation view of a project with its aggregated risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub vulnerable: bool,
    pub severity: Severity,
}
