//! Raw TCP connect probe against a mail exchange.

use super::result::ProbeOutcome;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Attempts a single TCP connect to `host:port`, bounded by `connect_timeout`.
///
/// No SMTP dialogue takes place. The stream is dropped as soon as the
/// handshake completes, and a connect still pending at the deadline is
/// dropped with it, so no socket outlives this call.
pub async fn probe_port(host: &str, port: u16, connect_timeout: Duration) -> ProbeOutcome {
    let host = host.trim_end_matches('.').to_string();
    tracing::debug!(target: "verification_smtp", "Probing {}:{} (timeout {:?})", host, port, connect_timeout);

    match timeout(connect_timeout, TcpStream::connect((host.as_str(), port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            tracing::debug!(target: "verification_smtp", "Connected to {}:{}", host, port);
            ProbeOutcome::Connected { host }
        }
        Ok(Err(e)) => {
            tracing::debug!(target: "verification_smtp", "Connect to {}:{} failed: {}", host, port, e);
            ProbeOutcome::Failed {
                host,
                reason: e.to_string(),
            }
        }
        Err(_) => {
            tracing::debug!(target: "verification_smtp", "Connect to {}:{} timed out", host, port);
            ProbeOutcome::TimedOut {
                host,
                after: connect_timeout,
            }
        }
    }
}
