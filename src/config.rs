//! Application configuration.

use crate::consts::cli_consts::source;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const CONFIG_DIR: &str = ".chonk";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "chonk-stats.log";

/// Data source settings injected into the GraphQL client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint receiving the stats query.
    pub endpoint: String,
    /// Value of the API key header.
    pub api_key: String,
    /// Query text; `{holder_limit}` is replaced with [`Config::holder_limit`].
    pub query_template: String,
    /// Number of top holders to request.
    pub holder_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: source::DEFAULT_ENDPOINT.to_string(),
            api_key: source::DEFAULT_API_KEY.to_string(),
            query_template: source::DEFAULT_QUERY_TEMPLATE.to_string(),
            holder_limit: source::DEFAULT_HOLDER_LIMIT,
        }
    }
}

impl Config {
    /// Create Config with the given endpoint and key and the default query.
    pub fn new(endpoint: String, api_key: String) -> Self {
        Config {
            endpoint,
            api_key,
            ..Config::default()
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        api_key: Option<String>,
        holder_limit: Option<u32>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = api_key {
            self.api_key = api_key;
        }
        if let Some(limit) = holder_limit {
            self.holder_limit = limit;
        }
        self
    }

    /// The query sent to the endpoint, with the holder limit filled in.
    pub fn render_query(&self) -> String {
        self.query_template.replace(
            source::HOLDER_LIMIT_PLACEHOLDER,
            &self.holder_limit.to_string(),
        )
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the config file if it exists, falling back to defaults otherwise.
    ///
    /// # Errors
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn config_dir() -> Result<PathBuf, std::io::Error> {
    home::home_dir()
        .map(|home| home.join(CONFIG_DIR))
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })
}

/// Path of the config file, `~/.chonk/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Path of the TUI log file, `~/.chonk/chonk-stats.log`.
pub fn get_log_path() -> Result<PathBuf, std::io::Error> {
    Ok(config_dir()?.join(LOG_FILE))
}
