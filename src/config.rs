//! Runtime configuration: command line and environment, over an optional
//! TOML file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use tracing::debug;

/// How long to wait for the address lookup service before using plain text.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(5);
/// How long a booking submission may take before it counts as failed.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for this application.
    #[error("invalid config file {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The platform does not provide a data directory.
    #[error("could not determine data directory")]
    NoDataDir,
}

/// Command-line arguments. Each option can also come from the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "leadbook", version, about = "Book a home-trade service from the terminal")]
pub struct Cli {
    /// Booking intake URL; bookings are queued in the local outbox when unset
    #[arg(long, env = "LEADBOOK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Google Places API key for address autocomplete
    #[arg(long, env = "LEADBOOK_PLACES_API_KEY", hide_env_values = true)]
    pub places_api_key: Option<String>,

    /// Seconds to wait for address lookup before falling back to plain text
    #[arg(long, env = "LEADBOOK_SCRIPT_TIMEOUT_SECS")]
    pub script_timeout_secs: Option<u64>,

    /// Seconds before an unanswered booking submission fails
    #[arg(long, env = "LEADBOOK_SUBMIT_TIMEOUT_SECS")]
    pub submit_timeout_secs: Option<u64>,

    /// Config file (default: <config dir>/leadbook/config.toml)
    #[arg(long, env = "LEADBOOK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub places_api_key: Option<String>,
    pub script_timeout_secs: Option<u64>,
    pub submit_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Reads and parses `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`load`](Self::load), but a missing file is an empty config.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// Resolved settings the application runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub places_api_key: Option<String>,
    pub script_timeout: Duration,
    pub submit_timeout: Duration,
    pub data_dir: PathBuf,
}

impl Config {
    /// Loads the config file named by `cli` (or the default one, if present)
    /// and applies `cli` on top.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = match cli.config {
            Some(ref path) => FileConfig::load(path)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load_optional(&path)?,
                None => FileConfig::default(),
            },
        };
        let default_data_dir = dirs::data_dir().map(|d| d.join("leadbook"));
        Self::merge(cli, file, default_data_dir)
    }

    /// Combines the sources: command line/environment first, then the file,
    /// then built-in defaults. Blank strings count as unset.
    pub fn merge(
        cli: Cli,
        file: FileConfig,
        default_data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_dir = file
            .data_dir
            .or(default_data_dir)
            .ok_or(ConfigError::NoDataDir)?;
        Ok(Self {
            endpoint: non_blank(cli.endpoint).or_else(|| non_blank(file.endpoint)),
            places_api_key: non_blank(cli.places_api_key).or_else(|| non_blank(file.places_api_key)),
            script_timeout: cli
                .script_timeout_secs
                .or(file.script_timeout_secs)
                .map_or(DEFAULT_SCRIPT_TIMEOUT, Duration::from_secs),
            submit_timeout: cli
                .submit_timeout_secs
                .or(file.submit_timeout_secs)
                .map_or(DEFAULT_SUBMIT_TIMEOUT, Duration::from_secs),
            data_dir,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("leadbook.log")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadbook").join("config.toml"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
