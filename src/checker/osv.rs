use crate::error::FetchError;
use crate::model::VulnerabilityPayload;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Default OSV.dev query endpoint.
pub const OSV_QUERY_URL: &str = "https://api.osv.dev/v1/query";

/// The only ecosystem dependencies are resolved against.
pub const ECOSYSTEM: &str = "PyPI";

/// Default bound on a single query.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
}

impl OsvClient {
    /// Creates a client for the public OSV.dev endpoint with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(OSV_QUERY_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client for a custom endpoint and per-request timeout.
    pub fn with_options(api_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let user_agent = format!("vulntrack/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[derive(Serialize)]
struct OsvPackage<'a> {
    name: &'a str,
    ecosystem: &'a str,
}

#[derive(Serialize)]
struct OsvQuery<'a> {
    package: OsvPackage<'a>,
}

#[async_trait]
impl super::VulnerabilitySource for OsvClient {
    fn name(&self) -> &'static str {
        "OSV.dev"
    }

    async fn query(&self, identifier: &str) -> Result<VulnerabilityPayload, FetchError> {
        let query = OsvQuery {
            package: OsvPackage {
                name: identifier,
                ecosystem: ECOSYSTEM,
            },
        };

        let response = self.client.post(&self.api_url).json(&query).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let payload: VulnerabilityPayload = response.json().await?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::VulnerabilitySource;

    #[test]
    fn test_query_body_shape() {
        let query = OsvQuery {
            package: OsvPackage {
                name: "flask",
                ecosystem: ECOSYSTEM,
            },
        };

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"package": {"name": "flask", "ecosystem": "PyPI"}})
        );
    }

    #[test]
    fn test_osv_client_default() {
        let client = OsvClient::new().unwrap();
        assert_eq!(client.name(), "OSV.dev");
        assert_eq!(client.api_url(), OSV_QUERY_URL);
    }
}
