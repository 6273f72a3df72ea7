use thiserror::Error;

/// Failure of a single lookup against the vulnerability source.
///
/// These never escape the fetcher; they are logged and replaced with an
/// empty payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("vulnerability source returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Lookup failures surfaced by the tracker's registries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Dependency not found: {0}")]
    DependencyNotFound(String),
}
