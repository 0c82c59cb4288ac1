//! Defines the custom error types for the email-vetter library.

use std::{io, net::AddrParseError};
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for the plausibility checks.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., clients, resolvers).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("HTTP Status Error: {0}")]
    HttpStatus(u16),

    /// Error during DNS resolution.
    #[error("DNS Resolution Error: {0}")]
    Dns(#[from] trust_dns_resolver::error::ResolveError),

    /// Specific DNS error indicating the domain does not exist.
    #[error("Domain Not Found (NXDOMAIN): {0}")]
    NxDomain(String),

    /// Specific DNS error indicating no MX records were found.
    #[error("No DNS Records Found (MX): {0}")]
    NoDnsRecords(String),

    /// DNS operation timed out.
    #[error("DNS Timeout for domain: {0}")]
    DnsTimeout(String),

    /// Error parsing an IP address or socket address.
    #[error("Address Parsing Error: {0}")]
    AddrParse(#[from] AddrParseError),

    /// Error related to concurrency or task execution.
    #[error("Task Execution Error: {0}")]
    Task(String),
}

impl AppError {
    /// True for failures caused by an unavailable network signal.
    ///
    /// These are recovered where they occur and only downgrade the signal
    /// they affect. Every other variant is treated as unexpected.
    pub fn is_network_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::Request(_)
                | AppError::HttpStatus(_)
                | AppError::Dns(_)
                | AppError::NxDomain(_)
                | AppError::NoDnsRecords(_)
                | AppError::DnsTimeout(_)
        )
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(format!("Invalid TOML: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
