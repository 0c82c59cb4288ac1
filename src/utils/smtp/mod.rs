//! SMTP-port reachability probing.

pub mod probe;
pub mod result;

pub use probe::probe_port;
pub use result::ProbeOutcome;
