//! Syntactic plausibility check for `local@domain.tld` addresses.

use crate::core::models::FormatCheck;
use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately permissive: no RFC 5322 grammar and no TLD list.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email pattern failed to compile. This is a bug.")
});

/// Checks `address` against the permissive email pattern. Performs no I/O.
pub fn check_format(address: &str) -> FormatCheck {
    if !EMAIL_PATTERN.is_match(address) {
        return FormatCheck {
            format_valid: false,
            domain: String::new(),
        };
    }

    let domain = address
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_string())
        .unwrap_or_default();

    FormatCheck {
        format_valid: !domain.is_empty(),
        domain,
    }
}
