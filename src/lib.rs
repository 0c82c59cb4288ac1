//! email-vetter core: best-effort plausibility checks for email addresses.
//!
//! An address is checked for syntax, MX presence, optional SMTP-port
//! reachability and disposable-domain reputation. Network signals fail
//! soft, and verdicts are memoized for a configurable time.

pub mod core;
pub mod memo;
pub mod report;
pub mod utils;
pub mod verification;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    DisposableCheck, FormatCheck, MemoEntry, MxHost, MxStatus, ValidationResult,
};
pub use crate::memo::{Clock, InMemoryMemo, ManualClock, ResultMemo, SystemClock};
pub use crate::report::{summary_line, RecordFields};
pub use crate::utils::smtp::ProbeOutcome;
pub use crate::verification::{
    check_format, derive_verdict, EmailValidator, MxResolver, ReputationLookup,
};
