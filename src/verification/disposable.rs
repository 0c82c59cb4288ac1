//! Disposable-domain reputation lookups.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::DisposableCheck;
use async_trait::async_trait;
use url::Url;

/// Fetches the raw reputation payload for a probe address.
#[async_trait]
pub trait ReputationLookup: Send + Sync {
    async fn fetch(&self, probe_address: &str) -> Result<String>;
}

/// Reputation lookup over HTTP GET, passing the probe address as `?email=`.
pub struct HttpReputationLookup {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpReputationLookup {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(&config.disposable_api_url)?;
        Ok(Self { client, base_url })
    }

    fn request_url(&self, probe_address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("email", probe_address);
        url
    }
}

#[async_trait]
impl ReputationLookup for HttpReputationLookup {
    async fn fetch(&self, probe_address: &str) -> Result<String> {
        let url = self.request_url(probe_address);
        tracing::debug!(target: "verification_disposable", "GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Synthetic address used to ask about a whole domain.
pub(crate) fn probe_address(domain: &str) -> String {
    format!("test@{}", domain)
}

/// Decides whether `domain` is disposable.
///
/// Trusted providers never reach the network. When the lookup is
/// unavailable the domain is treated as not disposable; only unexpected
/// errors are returned.
pub(crate) async fn disposable_status(
    config: &Config,
    lookup: &dyn ReputationLookup,
    domain: &str,
) -> Result<DisposableCheck> {
    if config.is_trusted_provider(domain) {
        tracing::debug!(target: "verification_disposable", "{} is a trusted provider", domain);
        return Ok(DisposableCheck::not_disposable(format!(
            "{} is a well-known provider",
            domain
        )));
    }

    match lookup.fetch(&probe_address(domain)).await {
        Ok(body) if body.contains(&config.disposable_marker) => {
            tracing::info!(target: "verification_disposable", "{} flagged as disposable", domain);
            Ok(DisposableCheck::disposable(format!(
                "{} is a disposable domain",
                domain
            )))
        }
        Ok(_) => Ok(DisposableCheck::not_disposable(format!(
            "{} is not a disposable domain",
            domain
        ))),
        Err(e) if e.is_network_unavailable() => {
            tracing::warn!(target: "verification_disposable", "Reputation lookup for {} failed: {}", domain, e);
            Ok(DisposableCheck::not_disposable(format!(
                "Disposable check unavailable: {}",
                e
            )))
        }
        Err(e) => Err(e),
    }
}
