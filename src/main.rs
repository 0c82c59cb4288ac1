mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{parse_address_lines, Cli, OutputFormat};
use email_vetter_core::core::config::load_config_file;
use email_vetter_core::{summary_line, ConfigBuilder, EmailValidator, RecordFields};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = ConfigBuilder::new();
    if let Some((file, path)) = load_config_file(cli.config.as_deref())? {
        builder = builder.with_file(file, Some(path))?;
    }
    if cli.smtp_probe {
        builder = builder.enable_smtp_probe(true);
    }
    if cli.no_disposable_check {
        builder = builder.enable_disposable_check(false);
    }
    if let Some(n) = cli.concurrency {
        builder = builder.max_concurrency(n);
    }
    let config = builder.build().context("Invalid configuration")?;
    tracing::debug!("Using configuration: {:?}", config);

    let mut addresses = cli.emails.clone();
    if let Some(path) = &cli.input {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path))?;
        addresses.extend(parse_address_lines(&contents));
    }
    if addresses.is_empty() {
        bail!("No email addresses given. Pass them as arguments or use --input.");
    }

    let validator = EmailValidator::new(config).context("Failed to initialize validator")?;
    tracing::info!("Checking {} address(es)", addresses.len());
    let results = validator.check_many(addresses.as_slice()).await;

    match cli.output {
        OutputFormat::Text => {
            for (address, result) in &results {
                println!("{}", summary_line(address, result));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = results
                .iter()
                .map(|(address, result)| {
                    serde_json::json!({ "email": address, "result": result })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Record => {
            let rows: Vec<serde_json::Value> = results
                .iter()
                .map(|(address, result)| {
                    serde_json::json!({
                        "Work_email": address,
                        "fields": RecordFields::from_result(result),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
