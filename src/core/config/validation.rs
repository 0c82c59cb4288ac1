//! Sanity checks applied to a fully assembled `Config`.

use super::Config;
use crate::core::error::{AppError, Result};
use std::net::IpAddr;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "request_timeout must be greater than zero".to_string(),
        ));
    }
    if config.dns_timeout.is_zero() {
        return Err(AppError::Config(
            "dns_timeout must be greater than zero".to_string(),
        ));
    }
    if config.smtp_timeout.is_zero() {
        return Err(AppError::Config(
            "smtp_timeout must be greater than zero".to_string(),
        ));
    }
    if config.smtp_port == 0 {
        return Err(AppError::Config("smtp_port must not be 0".to_string()));
    }
    if config.memo_ttl.is_zero() {
        return Err(AppError::Config(
            "memo_ttl must be greater than zero".to_string(),
        ));
    }
    if config.memo_capacity == 0 {
        return Err(AppError::Config(
            "memo_capacity must be greater than zero".to_string(),
        ));
    }
    if config.max_concurrency == 0 {
        return Err(AppError::Config(
            "max_concurrency must be greater than zero".to_string(),
        ));
    }

    for server in &config.dns_servers {
        server.parse::<IpAddr>().map_err(|e| {
            AppError::Config(format!("Invalid DNS server address '{}': {}", server, e))
        })?;
    }

    if config.enable_disposable_check {
        if config.disposable_marker.is_empty() {
            return Err(AppError::Config(
                "disposable_marker must not be empty".to_string(),
            ));
        }
        url::Url::parse(&config.disposable_api_url).map_err(|e| {
            AppError::Config(format!(
                "Invalid disposable_api_url '{}': {}",
                config.disposable_api_url, e
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_bad_dns_server() {
        let mut config = Config::default();
        config.dns_servers = vec!["not-an-ip".to_string()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("not-an-ip"));
    }

    #[test]
    fn rejects_zero_smtp_timeout() {
        let mut config = Config::default();
        config.smtp_timeout = Duration::ZERO;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn api_url_only_checked_when_enabled() {
        let mut config = Config::default();
        config.disposable_api_url = "::nope::".to_string();
        assert!(validate_config(&config).is_err());

        config.enable_disposable_check = false;
        assert!(validate_config(&config).is_ok());
    }
}
