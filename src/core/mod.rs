//! Core types shared by every check: configuration, errors and result models.

pub mod config;
pub mod error;
pub mod models;
