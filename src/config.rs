use crate::cli::Cli;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    server: RawServerConfig,

    #[serde(default)]
    database: RawDatabaseConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabaseConfig {
    path: Option<PathBuf>,
    #[serde(default, rename = "busyTimeout", with = "humantime_serde")]
    busy_timeout: Option<Duration>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub busy_timeout: Duration,
}

impl Config {
    /// Build the final configuration from the command line and the optional config file it points to
    /// Command line arguments take precedence over the config file, which takes precedence over the defaults.
    pub fn load(cli: &Cli, data_dir: &Path) -> Result<Self> {
        let raw = match &cli.config {
            Some(path) => {
                let toml_str = read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&toml_str).with_context(|| {
                    format!("Failed to deserialize TOML config file {}", path.display())
                })?
            }
            None => RawConfig::default(),
        };
        Ok(Self::from_raw(raw, cli, data_dir))
    }

    fn from_raw(raw: RawConfig, cli: &Cli, data_dir: &Path) -> Self {
        Self {
            host: cli
                .host
                .clone()
                .or(raw.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: cli.port.or(raw.server.port).unwrap_or(DEFAULT_PORT),
            database_path: cli
                .database
                .clone()
                .or(raw.database.path)
                .unwrap_or_else(|| data_dir.join("perfstor.db")),
            busy_timeout: raw.database.busy_timeout.unwrap_or(DEFAULT_BUSY_TIMEOUT),
        }
    }
}
