// src/utils/smtp/result.rs
//! Defines the outcome type for SMTP-port reachability probes.

use std::time::Duration;

/// Represents the outcome of a single raw connect attempt to a mail exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The TCP handshake completed before the timeout.
    Connected { host: String },
    /// The connect attempt failed (refused, unreachable, resolution error).
    Failed { host: String, reason: String },
    /// No answer within the allotted time; the attempt was aborted.
    TimedOut { host: String, after: Duration },
    /// There was no mail exchange to connect to.
    NoMailExchange,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Connected { .. })
    }

    /// Short human-readable description, used in result details.
    pub fn describe(&self) -> String {
        match self {
            ProbeOutcome::Connected { host } => format!("SMTP port reachable on {}", host),
            ProbeOutcome::Failed { host, reason } => {
                format!("SMTP connect to {} failed: {}", host, reason)
            }
            ProbeOutcome::TimedOut { host, after } => {
                format!("SMTP connect to {} timed out after {:.1?}", host, after)
            }
            ProbeOutcome::NoMailExchange => "No mail exchange to probe".to_string(),
        }
    }
}
