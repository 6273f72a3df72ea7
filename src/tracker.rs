//! Project registration and reporting.
//!
//! [`Tracker`] ties the pipeline together: requirement lines are reduced to
//! identifiers, resolved as one batch, and stored as [`ResolvedDependency`]
//! records in a registry shared by every project. Projects only hold
//! identifiers, so their reports always reflect the latest lookup of each
//! dependency.
//!
//! # Example
//!
//! ```no_run
//! use vulntrack::{Config, ProjectDraft, Tracker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let tracker = Tracker::from_config(&Config::default())?;
//!     let draft = ProjectDraft::new("api", "Public API service");
//!
//!     let project = tracker.register(draft, &["flask==2.0.1", "requests>=2.0"]).await;
//!     let report = tracker.report(&project);
//!
//!     println!("{}: {}", report.name, report.severity);
//!     Ok(())
//! }
//! ```

use crate::cache::VulnerabilityCache;
use crate::checker::{BatchResolver, OsvClient, VulnerabilityFetcher, VulnerabilitySource};
use crate::config::Config;
use crate::error::{FetchError, TrackerError};
use crate::model::{Project, ProjectDraft, ProjectReport, ResolvedDependency};
use crate::registry::{MemoryStore, Store};
use crate::requirement::extract_identifier;
use crate::severity::classify;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct Tracker {
    resolver: BatchResolver,
    projects: Arc<dyn Store<Project>>,
    dependencies: Arc<dyn Store<ResolvedDependency>>,
}

impl Tracker {
    pub fn new(
        resolver: BatchResolver,
        projects: Arc<dyn Store<Project>>,
        dependencies: Arc<dyn Store<ResolvedDependency>>,
    ) -> Self {
        Self {
            resolver,
            projects,
            dependencies,
        }
    }

    /// Creates a tracker with empty in-memory registries.
    pub fn in_memory(source: Arc<dyn VulnerabilitySource>, cache: Arc<VulnerabilityCache>) -> Self {
        let fetcher = VulnerabilityFetcher::new(source, cache);
        Self::new(
            BatchResolver::new(fetcher),
            Arc::new(MemoryStore::<Project>::new()),
            Arc::new(MemoryStore::<ResolvedDependency>::new()),
        )
    }

    /// Creates an in-memory tracker querying OSV.dev with the configured
    /// endpoint, timeout, and cache TTL.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = OsvClient::with_options(&config.osv_api_url, config.request_timeout())?;
        let cache = VulnerabilityCache::with_ttl(config.cache_ttl());
        Ok(Self::in_memory(Arc::new(client), Arc::new(cache)))
    }

    /// Registers a project and resolves its requirement lines.
    ///
    /// Lines that cannot be parsed are used verbatim as identifiers and
    /// lookups that fail resolve to no vulnerabilities, so registration
    /// always succeeds. Repeated identifiers are listed once, at their first
    /// position.
    pub async fn register<S: AsRef<str>>(&self, draft: ProjectDraft, lines: &[S]) -> Project {
        let id = Uuid::new_v4().to_string();
        let mut project = Project::new(id.clone(), draft);
        self.projects.set(id.clone(), project.clone());

        let identifiers: Vec<String> = lines
            .iter()
            .map(|line| extract_identifier(line.as_ref()))
            .collect();

        let mut resolved = self.resolver.resolve(&identifiers).await;
        let mut seen = HashSet::new();

        for identifier in identifiers {
            if !seen.insert(identifier.clone()) {
                continue;
            }

            let payload = resolved.remove(&identifier).unwrap_or_default();
            let dependency = ResolvedDependency::from_payload(identifier.clone(), &payload);
            self.dependencies.set(identifier.clone(), dependency);

            project.dependencies.push(identifier);
            self.projects.set(id.clone(), project.clone());
        }

        info!(
            project = %project.id,
            name = %project.name,
            dependencies = project.dependencies.len(),
            "registered project"
        );

        project
    }

    /// Resolves bare identifiers into the dependency registry without
    /// attaching them to a project.
    pub async fn resolve_dependencies(&self, identifiers: &[String]) -> Vec<ResolvedDependency> {
        let mut resolved = self.resolver.resolve(identifiers).await;
        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for identifier in identifiers {
            if !seen.insert(identifier.as_str()) {
                continue;
            }

            let payload = resolved.remove(identifier).unwrap_or_default();
            let dependency = ResolvedDependency::from_payload(identifier.clone(), &payload);
            self.dependencies.set(identifier.clone(), dependency.clone());
            dependencies.push(dependency);
        }

        dependencies
    }

    /// Builds the report for a project from the current dependency registry.
    pub fn report(&self, project: &Project) -> ProjectReport {
        let dependencies = self.lookup_all(&project.dependencies);

        let vulnerable = dependencies.iter().any(|d| d.vulnerable);
        let severity = classify(
            dependencies
                .iter()
                .flat_map(|d| d.vulnerabilities.iter().map(|v| v.score)),
        );

        ProjectReport {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            vulnerable,
            severity,
        }
    }

    pub fn project(&self, id: &str) -> Result<Project, TrackerError> {
        self.projects
            .get(id)
            .ok_or_else(|| TrackerError::ProjectNotFound(id.to_string()))
    }

    /// Reports for every registered project, oldest first.
    pub fn list_projects(&self) -> Vec<ProjectReport> {
        let mut projects = self.projects.values();
        projects.sort_by_key(|p| p.created_at);
        projects.iter().map(|p| self.report(p)).collect()
    }

    /// Resolved dependencies of a project, in the project's order.
    pub fn project_dependencies(&self, id: &str) -> Result<Vec<ResolvedDependency>, TrackerError> {
        let project = self.project(id)?;
        Ok(self.lookup_all(&project.dependencies))
    }

    pub fn dependency(&self, name: &str) -> Result<ResolvedDependency, TrackerError> {
        self.dependencies
            .get(name)
            .ok_or_else(|| TrackerError::DependencyNotFound(name.to_string()))
    }

    /// Every resolved dependency, sorted by name.
    pub fn all_dependencies(&self) -> Vec<ResolvedDependency> {
        let mut dependencies = self.dependencies.values();
        dependencies.sort_by(|a, b| a.name.cmp(&b.name));
        dependencies
    }

    fn lookup_all(&self, identifiers: &[String]) -> Vec<ResolvedDependency> {
        identifiers
            .iter()
            .filter_map(|identifier| {
                let dependency = self.dependencies.get(identifier);
                if dependency.is_none() {
                    debug!(identifier = %identifier, "dependency missing from registry");
                }
                dependency
            })
            .collect()
    }
}
