//! Provides a builder pattern for constructing `Config` instances.

use super::file::ConfigFile;
use super::validation::validate_config;
use super::Config;
use crate::core::error::{AppError, Result};
use std::time::Duration;

/// Builds a [`Config`], layering file values and explicit overrides on top of the defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every value present in `file`. `path` is recorded for diagnostics.
    ///
    /// Fails if a value cannot be represented, e.g. an overflowing TTL.
    pub fn with_file(mut self, file: ConfigFile, path: Option<String>) -> Result<Self> {
        let c = &mut self.config;

        if let Some(secs) = file.network.request_timeout {
            c.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.network.user_agent {
            c.user_agent = agent;
        }

        if let Some(secs) = file.dns.dns_timeout {
            c.dns_timeout = Duration::from_secs(secs);
        }
        if let Some(servers) = file.dns.dns_servers {
            c.dns_servers = servers;
        }

        if let Some(enabled) = file.smtp.enable_smtp_probe {
            c.enable_smtp_probe = enabled;
        }
        if let Some(secs) = file.smtp.smtp_timeout {
            c.smtp_timeout = Duration::from_secs(secs);
        }
        if let Some(port) = file.smtp.smtp_port {
            c.smtp_port = port;
        }

        if let Some(enabled) = file.disposable.enable_disposable_check {
            c.enable_disposable_check = enabled;
        }
        if let Some(url) = file.disposable.disposable_api_url {
            c.disposable_api_url = url;
        }
        if let Some(marker) = file.disposable.disposable_marker {
            c.disposable_marker = marker;
        }
        if let Some(providers) = file.disposable.trusted_providers {
            c.trusted_providers = providers
                .into_iter()
                .map(|p| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
        }

        if let Some(hours) = file.memo.memo_ttl_hours {
            let secs = hours.checked_mul(60 * 60).ok_or_else(|| {
                AppError::Config(format!("memo_ttl_hours {} is too large", hours))
            })?;
            c.memo_ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = file.memo.memo_capacity {
            c.memo_capacity = capacity;
        }

        if let Some(n) = file.runtime.max_concurrency {
            c.max_concurrency = n;
        }

        c.loaded_config_path = path;
        Ok(self)
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.config.dns_timeout = timeout;
        self
    }

    pub fn dns_servers(mut self, servers: Vec<String>) -> Self {
        self.config.dns_servers = servers;
        self
    }

    pub fn enable_smtp_probe(mut self, enabled: bool) -> Self {
        self.config.enable_smtp_probe = enabled;
        self
    }

    pub fn smtp_timeout(mut self, timeout: Duration) -> Self {
        self.config.smtp_timeout = timeout;
        self
    }

    pub fn smtp_port(mut self, port: u16) -> Self {
        self.config.smtp_port = port;
        self
    }

    pub fn enable_disposable_check(mut self, enabled: bool) -> Self {
        self.config.enable_disposable_check = enabled;
        self
    }

    pub fn disposable_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.disposable_api_url = url.into();
        self
    }

    pub fn disposable_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.disposable_marker = marker.into();
        self
    }

    pub fn memo_ttl(mut self, ttl: Duration) -> Self {
        self.config.memo_ttl = ttl;
        self
    }

    pub fn memo_capacity(mut self, capacity: usize) -> Self {
        self.config.memo_capacity = capacity;
        self
    }

    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.config.max_concurrency = n;
        self
    }

    /// Validates and returns the final configuration.
    pub fn build(self) -> Result<Config> {
        validate_config(&self.config)?;
        Ok(self.config)
    }
}
