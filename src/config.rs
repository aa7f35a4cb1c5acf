use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain_parser::{BuiltinSuffixList, SuffixList, SuffixLookup, SystemResolver, UrlParser};

/// Default number of URLs parsed concurrently in batch mode
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Parser type built from configuration, with the suffix list chosen at runtime
pub type ConfiguredParser = UrlParser<Box<dyn SuffixLookup>, SystemResolver>;

/// Runtime configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DomainerConfig {
    /// PSL file to use instead of the built-in list
    pub suffix_list_path: Option<PathBuf>,

    /// Whether hostnames are resolved to an IP address
    pub resolve: bool,

    /// Maximum number of URLs processed at once in batch mode
    pub max_concurrent: usize,

    /// Directory for log files (logs go to stderr if None)
    pub log_dir: Option<String>,

    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for DomainerConfig {
    fn default() -> Self {
        Self {
            suffix_list_path: None,
            resolve: false,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            log_dir: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl DomainerConfig {
    /// Loads configuration from an optional file, then `DOMAINER_*`
    /// environment variables. Later sources override earlier ones.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`DomainerConfig::load`], reading the `DOMAINER_*` variables
    /// from `env` instead of the process environment when it is given.
    ///
    /// # Arguments
    /// * `path` - Optional TOML, YAML or JSON file; it must exist if given
    /// * `env` - Variables keyed by their full name, e.g. `DOMAINER_RESOLVE`
    ///
    /// # Returns
    /// * `Result<DomainerConfig>` - Defaults overlaid by the file, then by
    ///   the environment
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("DOMAINER")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to load configuration")?;

        let config: DomainerConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.max_concurrent == 0 {
            anyhow::bail!("max_concurrent must be at least 1");
        }

        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded configuration.
    ///
    /// A flag only takes effect when given; `concurrency` is clamped to 1.
    pub fn with_overrides(
        mut self,
        suffix_list: Option<PathBuf>,
        resolve: bool,
        concurrency: Option<usize>,
    ) -> Self {
        if suffix_list.is_some() {
            self.suffix_list_path = suffix_list;
        }
        if resolve {
            self.resolve = true;
        }
        if let Some(concurrency) = concurrency {
            self.max_concurrent = concurrency.max(1);
        }
        self
    }

    /// Builds the suffix lookup selected by this configuration.
    pub fn suffix_lookup(&self) -> Result<Box<dyn SuffixLookup>> {
        match &self.suffix_list_path {
            Some(path) => Ok(Box::new(SuffixList::from_file(path)?)),
            None => Ok(Box::new(BuiltinSuffixList)),
        }
    }

    pub fn build_parser(&self) -> Result<ConfiguredParser> {
        Ok(UrlParser::new().with_suffixes(self.suffix_lookup()?))
    }
}
