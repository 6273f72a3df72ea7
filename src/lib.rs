pub mod cache;
pub mod checker;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod registry;
pub mod requirement;
pub mod score;
pub mod severity;
pub mod tracker;

pub use cache::VulnerabilityCache;
pub use config::Config;
pub use error::{FetchError, TrackerError};
pub use model::{
    Project, ProjectDraft, ProjectReport, ResolvedDependency,
    VulnerabilityPayload, VulnerabilityRecord, VulnerabilitySummary,
};
pub use score::Score;
pub use severity::Severity;
pub use tracker::Tracker;
