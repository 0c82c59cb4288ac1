//! Mail-exchange lookups.
//!
//! [`MxResolver`] is the seam the validator talks to; [`TrustDnsMxResolver`]
//! is the production implementation backed by `trust-dns-resolver`.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{MxHost, MxStatus};
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves MX records for a domain.
///
/// Implementations report "nothing there" as [`AppError::NxDomain`] or
/// [`AppError::NoDnsRecords`], and a lookup that did not complete as
/// [`AppError::DnsTimeout`] or [`AppError::Dns`].
#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>>;
}

/// MX resolver using the configured public name servers.
pub struct TrustDnsMxResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl TrustDnsMxResolver {
    pub fn new(config: &Config) -> Result<Self> {
        let ips = config
            .dns_servers
            .iter()
            .map(|s| s.parse::<IpAddr>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let resolver_config = if ips.is_empty() {
            ResolverConfig::default()
        } else {
            let group = NameServerConfigGroup::from_ips_clear(&ips, 53, true);
            ResolverConfig::from_parts(None, vec![], group)
        };

        let mut opts = ResolverOpts::default();
        opts.timeout = config.dns_timeout;
        opts.attempts = 1;

        tracing::debug!(
            target: "verification_dns",
            "Initialized resolver with {} name server(s), timeout {:?}",
            ips.len(),
            config.dns_timeout
        );

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            timeout: config.dns_timeout,
        })
    }
}

#[async_trait]
impl MxResolver for TrustDnsMxResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>> {
        let lookup = match tokio::time::timeout(self.timeout, self.resolver.mx_lookup(domain)).await
        {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                let mapped = match e.kind() {
                    ResolveErrorKind::NoRecordsFound { response_code, .. }
                        if *response_code == ResponseCode::NXDomain =>
                    {
                        Some(AppError::NxDomain(domain.to_string()))
                    }
                    ResolveErrorKind::NoRecordsFound { .. } => {
                        Some(AppError::NoDnsRecords(domain.to_string()))
                    }
                    ResolveErrorKind::Timeout => Some(AppError::DnsTimeout(domain.to_string())),
                    _ => None,
                };
                return Err(mapped.unwrap_or_else(|| AppError::Dns(e)));
            }
            Err(_) => return Err(AppError::DnsTimeout(domain.to_string())),
        };

        let hosts: Vec<MxHost> = lookup
            .iter()
            .map(|mx| MxHost {
                exchange: mx.exchange().to_utf8().trim_end_matches('.').to_string(),
                preference: mx.preference(),
            })
            .collect();

        if hosts.is_empty() {
            return Err(AppError::NoDnsRecords(domain.to_string()));
        }
        Ok(hosts)
    }
}

/// Folds a raw lookup into an [`MxStatus`].
///
/// Network-unavailable errors become `Absent` or `LookupFailed`; anything else
/// is returned as an error for the caller to treat as unexpected.
pub(crate) fn classify_lookup(domain: &str, lookup: Result<Vec<MxHost>>) -> Result<MxStatus> {
    match lookup {
        Ok(hosts) if hosts.is_empty() => Ok(MxStatus::Absent(format!(
            "no MX records for {}",
            domain
        ))),
        Ok(mut hosts) => {
            hosts.sort_by_key(|h| h.preference);
            tracing::debug!(target: "verification_dns", "{} MX record(s) for {}", hosts.len(), domain);
            Ok(MxStatus::Present(hosts))
        }
        Err(AppError::NxDomain(_)) => {
            tracing::debug!(target: "verification_dns", "NXDOMAIN for {}", domain);
            Ok(MxStatus::Absent(format!("domain {} does not exist", domain)))
        }
        Err(AppError::NoDnsRecords(_)) => {
            tracing::debug!(target: "verification_dns", "No MX records for {}", domain);
            Ok(MxStatus::Absent(format!("no MX records for {}", domain)))
        }
        Err(e) if e.is_network_unavailable() => {
            tracing::warn!(target: "verification_dns", "MX lookup for {} failed: {}", domain, e);
            Ok(MxStatus::LookupFailed(e.to_string()))
        }
        Err(e) => Err(e),
    }
}
