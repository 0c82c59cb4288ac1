//! Value types produced by the plausibility checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the syntactic check on an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheck {
    pub format_valid: bool,
    /// Substring after the last `@`. Empty when `format_valid` is false.
    pub domain: String,
}

/// A single mail-exchange record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxHost {
    pub exchange: String,
    pub preference: u16,
}

/// Result of looking up MX records for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MxStatus {
    /// The resolver returned at least one record.
    Present(Vec<MxHost>),
    /// The resolver answered authoritatively that there is nothing to deliver to.
    Absent(String),
    /// The lookup itself did not complete.
    LookupFailed(String),
}

impl MxStatus {
    pub fn has_mx(&self) -> bool {
        matches!(self, MxStatus::Present(hosts) if !hosts.is_empty())
    }

    /// The host with the lowest preference number, if any.
    pub fn primary(&self) -> Option<&MxHost> {
        match self {
            MxStatus::Present(hosts) => hosts.iter().min_by_key(|h| h.preference),
            _ => None,
        }
    }

    pub fn note(&self) -> String {
        match self {
            MxStatus::Present(hosts) => match self.primary() {
                Some(primary) => format!(
                    "MX records found ({} host(s), primary {})",
                    hosts.len(),
                    primary.exchange
                ),
                None => "MX lookup returned no hosts".to_string(),
            },
            MxStatus::Absent(reason) => format!("No MX records: {}", reason),
            MxStatus::LookupFailed(reason) => format!("MX lookup failed: {}", reason),
        }
    }
}

/// Outcome of the disposable-domain reputation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposableCheck {
    pub is_disposable: bool,
    pub message: String,
}

impl DisposableCheck {
    pub fn not_disposable(message: impl Into<String>) -> Self {
        Self {
            is_disposable: false,
            message: message.into(),
        }
    }

    pub fn disposable(message: impl Into<String>) -> Self {
        Self {
            is_disposable: true,
            message: message.into(),
        }
    }
}

/// Best-effort verdict for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub format_valid: bool,
    pub domain: String,
    pub has_mx: bool,
    /// `None` when the SMTP probe is disabled.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub smtp_reachable: Option<bool>,
    /// `None` when the reputation check is disabled.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_disposable: Option<bool>,
    pub is_valid: bool,
    /// Display text only.
    pub details: String,
}

impl ValidationResult {
    /// A result for an address that failed the syntax check.
    pub fn invalid_format(details: impl Into<String>) -> Self {
        Self {
            format_valid: false,
            domain: String::new(),
            has_mx: false,
            smtp_reachable: None,
            is_disposable: None,
            is_valid: false,
            details: details.into(),
        }
    }
}

/// A memoized verdict and the time it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoEntry {
    pub result: ValidationResult,
    pub observed_at: DateTime<Utc>,
}
