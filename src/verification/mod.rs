//! The individual plausibility checks and the validator that combines them.

pub mod disposable;
pub mod dns;
pub mod format;
pub mod validator;

pub use disposable::{HttpReputationLookup, ReputationLookup};
pub use dns::{MxResolver, TrustDnsMxResolver};
pub use format::check_format;
pub use validator::{derive_verdict, EmailValidator};
