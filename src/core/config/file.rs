//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) network: NetworkConfig,
    #[serde(default)]
    pub(crate) dns: DnsConfig,
    #[serde(default)]
    pub(crate) smtp: SmtpConfig,
    #[serde(default)]
    pub(crate) disposable: DisposableConfig,
    #[serde(default)]
    pub(crate) memo: MemoConfig,
    #[serde(default)]
    pub(crate) runtime: RuntimeConfig,
}

impl ConfigFile {
    /// Parses the contents of a TOML configuration file.
    pub fn from_toml_str(contents: &str) -> crate::core::error::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct NetworkConfig {
    pub(crate) request_timeout: Option<u64>,
    pub(crate) user_agent: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DnsConfig {
    pub(crate) dns_timeout: Option<u64>,
    pub(crate) dns_servers: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct SmtpConfig {
    pub(crate) enable_smtp_probe: Option<bool>,
    pub(crate) smtp_timeout: Option<u64>,
    pub(crate) smtp_port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DisposableConfig {
    pub(crate) enable_disposable_check: Option<bool>,
    pub(crate) disposable_api_url: Option<String>,
    pub(crate) disposable_marker: Option<String>,
    pub(crate) trusted_providers: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct MemoConfig {
    pub(crate) memo_ttl_hours: Option<u64>,
    pub(crate) memo_capacity: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuntimeConfig {
    pub(crate) max_concurrency: Option<usize>,
}
