use anyhow::Result;
use clap::Parser;
use domainer::batch::{parse_batch, read_url_list, BatchReport};
use domainer::config::DomainerConfig;
use domainer::utils::logger::init_logger;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Split URLs into protocol, credentials, subdomain, domain, TLD, port,
/// path, query and fragment.
#[derive(Debug, Parser)]
#[command(name = "domainer", version, about)]
struct Cli {
    /// URLs or bare domains to parse
    #[arg(required_unless_present = "batch")]
    urls: Vec<String>,

    /// Read URLs from a file, one per line
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,

    /// Resolve each hostname to an IP address
    #[arg(long)]
    resolve: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Public suffix list file to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    suffix_list: Option<PathBuf>,

    /// Number of URLs parsed at once
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = effective_config(&cli, DomainerConfig::load(cli.config.as_deref())?);

    init_logger(config.log_dir.as_deref(), &config.log_filter)?;

    let mut urls = cli.urls.clone();
    if let Some(path) = &cli.batch {
        let loaded = read_url_list(path)?;
        info!("Loaded {} URLs from {}", loaded.len(), path.display());
        urls.extend(loaded);
    }

    let parser = Arc::new(config.build_parser()?);
    let report = parse_batch(parser, urls, config.resolve, config.max_concurrent).await?;

    print_report(&report, cli.pretty)?;
    report.ensure_all_succeeded()
}

/// Command-line flags win over the file and environment configuration
fn effective_config(cli: &Cli, loaded: DomainerConfig) -> DomainerConfig {
    loaded.with_overrides(cli.suffix_list.clone(), cli.resolve, cli.concurrency)
}

fn print_report(report: &BatchReport, pretty: bool) -> Result<()> {
    for entry in &report.entries {
        match &entry.result {
            Ok(parsed) => {
                let json = if pretty {
                    serde_json::to_string_pretty(parsed)?
                } else {
                    serde_json::to_string(parsed)?
                };
                println!("{}", json);
            }
            Err(e) => eprintln!("{}: {}", entry.input, e),
        }
    }

    info!(
        "Processed {} URLs ({} ok, {} failed) in {:?}, {:?} per URL",
        report.entries.len(),
        report.successful(),
        report.failed(),
        report.elapsed,
        report.average()
    );
    Ok(())
}
