//! Command-line argument definitions.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One summary line per address.
    Text,
    /// A JSON array of results.
    Json,
    /// Contact-record validation columns as JSON.
    Record,
}

#[derive(Parser, Debug)]
#[command(
    name = "email-vetter",
    version,
    about = "Best-effort email plausibility checks"
)]
pub struct Cli {
    /// Addresses to check.
    pub emails: Vec<String>,

    /// File with one address per line. Blank lines and `#` comments are skipped.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "EMAIL_VETTER_CONFIG")]
    pub config: Option<String>,

    /// Probe port 25 on the primary mail exchange.
    #[arg(long)]
    pub smtp_probe: bool,

    /// Skip the disposable-domain reputation lookup.
    #[arg(long)]
    pub no_disposable_check: bool,

    /// Maximum number of addresses checked at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses address lines from an input file's contents.
pub fn parse_address_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_positional_emails() {
        let cli = Cli::try_parse_from([
            "email-vetter",
            "--smtp-probe",
            "--output",
            "json",
            "a@example.com",
            "b@example.com",
        ])
        .unwrap();
        assert!(cli.smtp_probe);
        assert!(!cli.no_disposable_check);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.emails, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let lines = parse_address_lines("# header\n\n a@example.com \nb@example.com\n");
        assert_eq!(lines, vec!["a@example.com", "b@example.com"]);
    }
}
