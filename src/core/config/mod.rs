//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::{find_config_file, load_config_file, CONFIG_ENV_VAR};

use std::collections::HashSet;
use std::time::Duration;

/// Runtime configuration settings used by the email-vetter core logic.
#[derive(Clone)]
pub struct Config {
    pub request_timeout: Duration,
    pub user_agent: String,

    pub dns_timeout: Duration,
    pub dns_servers: Vec<String>,

    pub enable_smtp_probe: bool,
    pub smtp_timeout: Duration,
    pub smtp_port: u16,

    pub enable_disposable_check: bool,
    pub disposable_api_url: String,
    pub disposable_marker: String,
    pub trusted_providers: HashSet<String>,

    pub memo_ttl: Duration,
    pub memo_capacity: usize,

    pub max_concurrency: usize,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let trusted_providers: HashSet<String> = [
            "gmail.com",
            "googlemail.com",
            "yahoo.com",
            "hotmail.com",
            "outlook.com",
            "live.com",
            "msn.com",
            "aol.com",
            "icloud.com",
            "me.com",
            "protonmail.com",
            "proton.me",
            "gmx.com",
            "zoho.com",
            "yandex.com",
            "mail.com",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let dns_servers = vec![
            "8.8.8.8".to_string(),
            "8.8.4.4".to_string(),
            "1.1.1.1".to_string(),
            "1.0.0.1".to_string(),
        ];

        Config {
            request_timeout: Duration::from_secs(10),
            user_agent: format!("email-vetter-core/{}", env!("CARGO_PKG_VERSION")),
            dns_timeout: Duration::from_secs(5),
            dns_servers,
            enable_smtp_probe: false,
            smtp_timeout: Duration::from_secs(5),
            smtp_port: 25,
            enable_disposable_check: true,
            disposable_api_url: "https://disposable.debounce.io/".to_string(),
            disposable_marker: "\"disposable\":\"true\"".to_string(),
            trusted_providers,
            memo_ttl: Duration::from_secs(24 * 60 * 60),
            memo_capacity: 10_000,
            max_concurrency: std::thread::available_parallelism()
                .map_or(1, |n| n.get())
                .max(1),
            loaded_config_path: None,
        }
    }

    /// True if `domain` is a well-known consumer provider that is never disposable.
    pub fn is_trusted_provider(&self, domain: &str) -> bool {
        self.trusted_providers.contains(&domain.to_ascii_lowercase())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("dns_timeout", &self.dns_timeout)
            .field("dns_servers_count", &self.dns_servers.len())
            .field("enable_smtp_probe", &self.enable_smtp_probe)
            .field("smtp_timeout", &self.smtp_timeout)
            .field("smtp_port", &self.smtp_port)
            .field("enable_disposable_check", &self.enable_disposable_check)
            .field("disposable_api_url", &self.disposable_api_url)
            .field("disposable_marker", &self.disposable_marker)
            .field("trusted_providers_count", &self.trusted_providers.len())
            .field("memo_ttl", &self.memo_ttl)
            .field("memo_capacity", &self.memo_capacity)
            .field("max_concurrency", &self.max_concurrency)
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}
