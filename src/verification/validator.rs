//! Orchestrates the individual checks into a single verdict.

use super::disposable::{disposable_status, HttpReputationLookup, ReputationLookup};
use super::dns::{classify_lookup, MxResolver, TrustDnsMxResolver};
use super::format::check_format;
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{DisposableCheck, FormatCheck, MemoEntry, MxStatus, ValidationResult};
use crate::memo::{is_fresh, InMemoryMemo, ResultMemo};
use crate::utils::smtp::{probe_port, ProbeOutcome};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Combination rule for the final verdict.
///
/// Valid iff the format is valid, the MX lookup either found records or
/// could not complete, and the domain is not disposable. A failed lookup
/// does not reject the address; the SMTP probe never affects the verdict.
pub fn derive_verdict(
    format_valid: bool,
    mx: &MxStatus,
    disposable: Option<&DisposableCheck>,
) -> bool {
    let mx_ok = match mx {
        MxStatus::Present(_) => mx.has_mx(),
        MxStatus::LookupFailed(_) => true,
        MxStatus::Absent(_) => false,
    };
    let disposable = disposable.is_some_and(|d| d.is_disposable);
    format_valid && mx_ok && !disposable
}

/// Signals collected so far by one validation run.
struct Signals {
    notes: Vec<String>,
    disposable: Option<DisposableCheck>,
    mx: Option<MxStatus>,
    smtp: Option<ProbeOutcome>,
}

impl Signals {
    fn new() -> Self {
        Self {
            notes: vec!["Format valid".to_string()],
            disposable: None,
            mx: None,
            smtp: None,
        }
    }

    /// Builds the verdict from whatever was gathered.
    ///
    /// `cut_short` is the error that stopped the run early. An MX status that
    /// was never obtained counts as an unavailable lookup, so the address is
    /// kept unless a signal already gathered rejects it.
    fn into_result(mut self, domain: &str, cut_short: Option<AppError>) -> ValidationResult {
        let mx = self
            .mx
            .take()
            .unwrap_or_else(|| MxStatus::LookupFailed("not checked".to_string()));
        let is_valid = derive_verdict(true, &mx, self.disposable.as_ref());

        match &cut_short {
            Some(e) => self.notes.push(format!(
                "partial validation only, remaining checks skipped: {}",
                e
            )),
            None if is_valid && matches!(mx, MxStatus::LookupFailed(_)) => {
                self.notes
                    .push("Accepted without MX confirmation".to_string());
            }
            None => {}
        }

        ValidationResult {
            format_valid: true,
            domain: domain.to_string(),
            has_mx: mx.has_mx(),
            smtp_reachable: self.smtp.map(|outcome| outcome.is_reachable()),
            is_disposable: self.disposable.map(|d| d.is_disposable),
            is_valid,
            details: self.notes.join("; "),
        }
    }
}

/// Email plausibility checker.
///
/// Collaborators are injected so that tests can replace DNS, the reputation
/// service and the memo clock. [`EmailValidator::new`] wires the production
/// implementations.
pub struct EmailValidator {
    config: Arc<Config>,
    resolver: Arc<dyn MxResolver>,
    reputation: Arc<dyn ReputationLookup>,
    memo: Arc<dyn ResultMemo>,
}

impl EmailValidator {
    pub fn new(config: Config) -> Result<Self> {
        let resolver = Arc::new(TrustDnsMxResolver::new(&config)?);
        let reputation = Arc::new(HttpReputationLookup::new(&config)?);
        let memo = Arc::new(InMemoryMemo::new(config.memo_capacity, config.memo_ttl));
        Ok(Self::with_components(config, resolver, reputation, memo))
    }

    /// Freshness of memoized results is decided by `memo`'s own TTL;
    /// `config.memo_ttl` only sizes the store that [`Self::new`] builds.
    pub fn with_components(
        config: Config,
        resolver: Arc<dyn MxResolver>,
        reputation: Arc<dyn ReputationLookup>,
        memo: Arc<dyn ResultMemo>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            reputation,
            memo,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn check_format(&self, address: &str) -> FormatCheck {
        check_format(address)
    }

    /// Looks up MX records for `domain`. Never fails; see [`MxStatus`].
    pub async fn check_mx(&self, domain: &str) -> MxStatus {
        match self.mx_status(domain).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(target: "validator", "Unexpected MX lookup error for {}: {}", domain, e);
                MxStatus::LookupFailed(e.to_string())
            }
        }
    }

    /// True only if the primary mail exchange accepted a TCP connect on the SMTP port.
    pub async fn check_smtp_reachable(&self, domain: &str) -> bool {
        self.smtp_probe(domain).await.is_reachable()
    }

    /// Like [`Self::check_smtp_reachable`], keeping the detailed outcome.
    pub async fn smtp_probe(&self, domain: &str) -> ProbeOutcome {
        match self.smtp_status(domain).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(target: "validator", "Unexpected error probing {}: {}", domain, e);
                ProbeOutcome::NoMailExchange
            }
        }
    }

    pub async fn check_disposable(&self, domain: &str) -> DisposableCheck {
        match disposable_status(&self.config, self.reputation.as_ref(), domain).await {
            Ok(check) => check,
            Err(e) => {
                tracing::warn!(target: "validator", "Unexpected disposable check error for {}: {}", domain, e);
                DisposableCheck::not_disposable(format!("Disposable check failed: {}", e))
            }
        }
    }

    /// Runs every enabled check for `address` and derives the verdict.
    pub async fn validate(&self, address: &str) -> ValidationResult {
        if address.trim().is_empty() {
            return ValidationResult::invalid_format("Email address is empty");
        }

        let format = check_format(address);
        if !format.format_valid {
            tracing::debug!(target: "validator", "Invalid format: {:?}", address);
            return ValidationResult::invalid_format("Invalid email format");
        }

        let started = Instant::now();
        let mut signals = Signals::new();
        let result = match self.run_checks(&format.domain, &mut signals).await {
            Ok(()) => signals.into_result(&format.domain, None),
            Err(e) => {
                tracing::warn!(target: "validator", "Validation of {} cut short: {}", address, e);
                signals.into_result(&format.domain, Some(e))
            }
        };

        tracing::info!(
            target: "validator",
            "{} -> valid={} ({:.2?})",
            address,
            result.is_valid,
            started.elapsed()
        );
        result
    }

    /// Returns a memoized verdict if one is still fresh, otherwise validates and stores.
    pub async fn validate_with_memo(&self, address: &str) -> ValidationResult {
        if let Some(entry) = self.memo.get(address) {
            if is_fresh(entry.observed_at, self.memo.now(), self.memo.ttl()) {
                tracing::debug!(target: "memo", "Memo hit for {}", address);
                return entry.result;
            }
            tracing::debug!(target: "memo", "Memo entry for {} expired", address);
        }

        let result = self.validate(address).await;
        self.memo.put(
            address,
            MemoEntry {
                result: result.clone(),
                observed_at: self.memo.now(),
            },
        );
        result
    }

    /// Validates `addresses` with at most `max_concurrency` checks in flight.
    ///
    /// Results come back in input order.
    pub async fn check_many<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Vec<(String, ValidationResult)> {
        let concurrency = self.config.max_concurrency.max(1);
        stream::iter(addresses.iter().map(|a| a.as_ref().to_string()))
            .map(|address| async move {
                let result = self.validate_with_memo(&address).await;
                (address, result)
            })
            .buffered(concurrency)
            .collect()
            .await
    }

    async fn mx_status(&self, domain: &str) -> Result<MxStatus> {
        classify_lookup(domain, self.resolver.lookup_mx(domain).await)
    }

    async fn smtp_status(&self, domain: &str) -> Result<ProbeOutcome> {
        let status = self.mx_status(domain).await?;
        let Some(primary) = status.primary() else {
            return Ok(ProbeOutcome::NoMailExchange);
        };
        Ok(probe_port(
            &primary.exchange,
            self.config.smtp_port,
            self.config.smtp_timeout,
        )
        .await)
    }

    async fn run_checks(&self, domain: &str, signals: &mut Signals) -> Result<()> {
        if self.config.enable_disposable_check {
            let check = disposable_status(&self.config, self.reputation.as_ref(), domain).await?;
            signals.notes.push(check.message.clone());
            signals.disposable = Some(check);
        }

        let mx = self.mx_status(domain).await?;
        signals.notes.push(mx.note());
        signals.mx = Some(mx);

        if self.config.enable_smtp_probe {
            let outcome = self.smtp_status(domain).await?;
            signals.notes.push(outcome.describe());
            signals.smtp = Some(outcome);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::MxHost;

    fn present() -> MxStatus {
        MxStatus::Present(vec![MxHost {
            exchange: "mx.example.com".into(),
            preference: 10,
        }])
    }

    #[test]
    fn verdict_requires_format() {
        assert!(!derive_verdict(false, &present(), None));
    }

    #[test]
    fn verdict_accepts_present_or_failed_lookup() {
        assert!(derive_verdict(true, &present(), None));
        assert!(derive_verdict(
            true,
            &MxStatus::LookupFailed(AppError::DnsTimeout("x".into()).to_string()),
            None
        ));
        assert!(!derive_verdict(true, &MxStatus::Absent("none".into()), None));
    }

    #[test]
    fn verdict_rejects_disposable() {
        let flagged = DisposableCheck::disposable("throwaway");
        let clean = DisposableCheck::not_disposable("fine");
        assert!(!derive_verdict(true, &present(), Some(&flagged)));
        assert!(derive_verdict(true, &present(), Some(&clean)));
    }

    #[test]
    fn cut_short_run_keeps_gathered_disposable_verdict() {
        let mut signals = Signals::new();
        signals.disposable = Some(DisposableCheck::disposable("throwaway"));

        let result =
            signals.into_result("mailinator.com", Some(AppError::Task("aborted".into())));
        assert_eq!(result.is_disposable, Some(true));
        assert!(!result.is_valid);
        assert!(result.details.contains("partial validation only"));
    }

    #[test]
    fn cut_short_run_keeps_gathered_mx_status() {
        let mut signals = Signals::new();
        signals.mx = Some(present());

        let result = signals.into_result("example.com", Some(AppError::Task("aborted".into())));
        assert!(result.has_mx);
        assert!(result.is_valid);
        assert_eq!(result.smtp_reachable, None);
    }

    #[test]
    fn cut_short_run_without_signals_stays_valid() {
        let result =
            Signals::new().into_result("example.com", Some(AppError::Task("aborted".into())));
        assert!(result.format_valid);
        assert!(!result.has_mx);
        assert!(result.is_valid);
    }
}
