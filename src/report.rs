//! Rendering of verdicts for terminal output and contact-record columns.

use crate::core::models::ValidationResult;
use serde::Serialize;

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn yes_no_skipped(value: Option<bool>) -> &'static str {
    value.map_or("Skipped", yes_no)
}

/// The validation columns stored alongside a contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFields {
    #[serde(rename = "Email_valid")]
    pub email_valid: String,
    #[serde(rename = "Format_valid")]
    pub format_valid: String,
    #[serde(rename = "Has_MX")]
    pub has_mx: String,
    #[serde(rename = "SMTP_check")]
    pub smtp_check: String,
    #[serde(rename = "Validation_details")]
    pub validation_details: String,
}

impl RecordFields {
    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            email_valid: yes_no(result.is_valid).to_string(),
            format_valid: yes_no(result.format_valid).to_string(),
            has_mx: yes_no(result.has_mx).to_string(),
            smtp_check: yes_no_skipped(result.smtp_reachable).to_string(),
            validation_details: result.details.clone(),
        }
    }
}

/// One-line verdict, e.g. `✅ jane@example.com (format ✓, mx ✓, smtp -, disposable ✗)`.
pub fn summary_line(address: &str, result: &ValidationResult) -> String {
    let mark = |value: Option<bool>| match value {
        Some(true) => "✓",
        Some(false) => "✗",
        None => "-",
    };
    format!(
        "{} {} (format {}, mx {}, smtp {}, disposable {}) {}",
        if result.is_valid { "✅" } else { "❌" },
        address,
        mark(Some(result.format_valid)),
        mark(Some(result.has_mx)),
        mark(result.smtp_reachable),
        mark(result.is_disposable),
        result.details
    )
}
