//! Process configuration, loaded once at startup.
//!
//! Sources, later wins: built-in defaults, the JSON file named by `DA_CLIENT_CONFIG`,
//! then individual environment variables.

use connector_avail::AvailConfig;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 2000;

pub const CONFIG_PATH_VAR: &str = "DA_CLIENT_CONFIG";
pub const PORT_VAR: &str = "DA_CLIENT_PORT";
pub const STATUS_INTERVAL_VAR: &str = "STATUS_INTERVAL_MS";
pub const WS_URL_VAR: &str = "AVAIL_WS_URL";
pub const SEED_VAR: &str = "AVAIL_SEED";
pub const APP_ID_VAR: &str = "AVAIL_APP_ID";
pub const TIMEOUT_VAR: &str = "AVAIL_TIMEOUT_SECS";
pub const VALIDATE_CODEGEN_VAR: &str = "AVAIL_VALIDATE_CODEGEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open config file {path}: {source}")]
    Open { path: String, source: std::io::Error },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },

    #[error("no seed phrase configured, set {}", SEED_VAR)]
    MissingSeed,

    #[error("invalid ws url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
    #[serde(default)]
    pub avail: AvailConfig,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_status_interval_ms() -> u64 {
    DEFAULT_STATUS_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            status_interval_ms: default_status_interval_ms(),
            avail: AvailConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with variables read through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut conf = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Config::from_file(Path::new(&path))?,
            None => Config::default(),
        };
        conf.apply_overrides(&lookup)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(PORT_VAR) {
            self.port = parse_var(PORT_VAR, v)?;
        }
        if let Some(v) = lookup(STATUS_INTERVAL_VAR) {
            self.status_interval_ms = parse_var(STATUS_INTERVAL_VAR, v)?;
        }
        if let Some(v) = lookup(WS_URL_VAR) {
            self.avail.ws_url = v;
        }
        if let Some(v) = lookup(SEED_VAR) {
            self.avail.seed = v;
        }
        if let Some(v) = lookup(APP_ID_VAR) {
            self.avail.app_id = parse_var(APP_ID_VAR, v)?;
        }
        if let Some(v) = lookup(TIMEOUT_VAR) {
            self.avail.timeout_secs = parse_var(TIMEOUT_VAR, v)?;
        }
        if let Some(v) = lookup(VALIDATE_CODEGEN_VAR) {
            self.avail.validate_codegen = parse_var(VALIDATE_CODEGEN_VAR, v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.avail.seed.trim().is_empty() {
            return Err(ConfigError::MissingSeed);
        }
        let url = Url::parse(&self.avail.ws_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.avail.ws_url.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(ConfigError::InvalidUrl {
                url: self.avail.ws_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.status_interval_ms == 0 {
            return Err(ConfigError::Zero(STATUS_INTERVAL_VAR));
        }
        if self.avail.timeout_secs == 0 {
            return Err(ConfigError::Zero(TIMEOUT_VAR));
        }
        Ok(())
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar { var, value })
}
