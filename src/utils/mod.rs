//! Low-level network helpers used by the verification checks.

pub mod smtp;
