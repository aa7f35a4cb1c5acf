use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::domain_parser::{DomainerError, HostResolver, ParsedUrl, SuffixLookup, UrlParser};

/// Outcome of parsing a single URL from a batch
#[derive(Debug)]
pub struct BatchEntry {
    pub input: String,
    pub result: std::result::Result<ParsedUrl, DomainerError>,
}

/// Results of a batch run, in input order
#[derive(Debug)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of URLs that parsed successfully
    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    /// Number of URLs that failed at any stage
    pub fn failed(&self) -> usize {
        self.entries.len() - self.successful()
    }

    /// Entries that failed, paired with their errors
    ///
    /// # Returns
    /// * An iterator of `(input, error)` pairs in input order
    pub fn errors(&self) -> impl Iterator<Item = (&str, &DomainerError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e.input.as_str(), err)))
    }

    /// Mean wall-clock time per URL, or zero for an empty batch
    pub fn average(&self) -> Duration {
        if self.entries.is_empty() {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.entries.len() as f64)
        }
    }

    /// Fails if any URL in the batch failed to parse
    ///
    /// # Returns
    /// * `Result<()>` - Ok when every entry succeeded, otherwise an error
    ///   naming how many failed
    pub fn ensure_all_succeeded(&self) -> Result<()> {
        let failed = self.failed();
        if failed > 0 {
            anyhow::bail!("{} of {} URLs failed to parse", failed, self.entries.len());
        }
        Ok(())
    }
}

/// Reads URLs from a file, one per line. Blank lines and lines starting
/// with `#` are skipped.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Parses many URLs concurrently.
///
/// URLs are processed in chunks of `max_concurrent`. Each parse runs on the
/// blocking pool because resolution blocks on the system resolver.
///
/// # Arguments
/// * `parser` - Shared parser used by every task
/// * `urls` - URLs or bare domains to parse
/// * `resolve` - Whether to also resolve each hostname
/// * `max_concurrent` - Chunk size; values below 1 are treated as 1
///
/// # Returns
/// * `Result<BatchReport>` - One entry per input in input order; only a
///   panicked task makes the whole batch fail
pub async fn parse_batch<S, R>(
    parser: Arc<UrlParser<S, R>>,
    urls: Vec<String>,
    resolve: bool,
    max_concurrent: usize,
) -> Result<BatchReport>
where
    S: SuffixLookup + 'static,
    R: HostResolver + 'static,
{
    let start = Instant::now();
    let chunk_size = max_concurrent.max(1);
    info!("Processing {} URLs, {} at a time", urls.len(), chunk_size);

    let mut entries = Vec::with_capacity(urls.len());

    for chunk in urls.chunks(chunk_size) {
        let tasks = chunk.iter().cloned().map(|url| {
            let parser = Arc::clone(&parser);
            tokio::task::spawn_blocking(move || {
                let result = if resolve {
                    parser.parse_with_resolution(&url)
                } else {
                    parser.parse(&url)
                };
                BatchEntry { input: url, result }
            })
        });

        for joined in futures::future::join_all(tasks).await {
            let entry = joined.context("URL parsing task panicked")?;
            match &entry.result {
                Ok(_) => debug!("Parsed {}", entry.input),
                Err(e) => warn!("Failed to parse {}: {}", entry.input, e),
            }
            entries.push(entry);
        }
    }

    let report = BatchReport {
        entries,
        elapsed: start.elapsed(),
    };
    info!(
        "Batch complete: {} succeeded, {} failed in {:?}",
        report.successful(),
        report.failed(),
        report.elapsed
    );

    Ok(report)
}
