//! Core data types for vulnerability payloads, dependencies, and projects.
//!
//! - [`VulnerabilityPayload`] - Result of one lookup against the vulnerability source
//! - [`VulnerabilityRecord`] - A single entry in a payload
//! - [`ResolvedDependency`] - A dependency with its vulnerability summaries
//! - [`Project`] - A registered project referencing resolved dependencies
//! - [`ProjectReport`] - Aggregated view of a project for presentation
//!
//! # Example
//!
//! ```
//! use vulntrack::{ResolvedDependency, VulnerabilityPayload};
//!
//! let payload: VulnerabilityPayload =
//!     serde_json::from_str(r#"{"vulns": [{"id": "PYSEC-2023-62", "score": "7.5"}]}"#).unwrap();
//! let dependency = ResolvedDependency::from_payload("flask", &payload);
//!
//! assert!(dependency.vulnerable);
//! ```

mod dependency;
mod payload;
mod project;

pub use dependency::*;
pub use payload::*;
pub use project::*;
