use email_vetter_core::{ConfigBuilder, EmailValidator};
use std::time::Duration;

// Holds with or without network access: either the resolver answers
// NXDOMAIN or the lookup fails, and neither sets `has_mx`.
#[tokio::test]
async fn nonexistent_domain_resolves_without_fault() {
    let config = ConfigBuilder::new()
        .dns_timeout(Duration::from_secs(2))
        .enable_disposable_check(false)
        .build()
        .unwrap();
    let validator = EmailValidator::new(config).unwrap();

    let result = validator
        .validate("user@nonexistent-domain-xyz123.invalid")
        .await;

    assert!(result.format_valid);
    assert_eq!(result.domain, "nonexistent-domain-xyz123.invalid");
    assert!(!result.has_mx);
}
