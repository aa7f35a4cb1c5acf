use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. With a `log_dir`, logs
/// go to a timestamped file in that directory; otherwise to stderr so they
/// never mix with results printed on stdout.
pub fn init_logger(log_dir: Option<&str>, default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))?;

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    match log_dir {
        Some(log_dir) => {
            if !Path::new(log_dir).exists() {
                fs::create_dir_all(log_dir)?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/domainer_{}.log", log_dir, timestamp);

            let subscriber = builder
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(fs::File::create(log_file)?)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    info!("Logger initialized");
    Ok(())
}
