//! Vulnerability lookup.
//!
//! - [`OsvClient`] queries OSV.dev for one identifier at a time
//! - [`VulnerabilityFetcher`] adds caching and the empty-payload fallback
//! - [`BatchResolver`] fans lookups out concurrently and joins the results

mod batch;
mod fetcher;
mod osv;
#[cfg(test)]
pub(crate) mod testing;

pub use batch::BatchResolver;
pub use fetcher::VulnerabilityFetcher;
pub use osv::{OsvClient, ECOSYSTEM, OSV_QUERY_URL};

use crate::error::FetchError;
use crate::model::VulnerabilityPayload;
use async_trait::async_trait;

/// An external source of vulnerability data.
#[async_trait]
pub trait VulnerabilitySource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Looks up the vulnerabilities known for one dependency identifier.
    async fn query(&self, identifier: &str) -> Result<VulnerabilityPayload, FetchError>;
}
