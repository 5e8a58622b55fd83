//! Configuration for the Matrix connection
//!
//! Loads configuration from a JSON file. The file is searched at the
//! explicit `-c` path, then `~/.config/trixping.json`, then
//! `/etc/trixping.json`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// User config file, relative to the home directory.
pub const USER_CONFIG_FILE: &str = ".config/trixping.json";

/// System-wide fallback config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/trixping.json";

/// Matrix client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub username: String,
    pub token: String,
    pub server: String,
    pub room: String,
}

impl Config {
    /// Resolve the config path and load it.
    /// A `.env` file is loaded first so that `${VAR}` placeholders can be
    /// resolved from the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_dotenv();
        let path = Self::resolve_path(explicit)?;
        Self::load_from_file(path)
    }

    /// Determine the configuration file to use.
    ///
    /// An explicit path wins unconditionally; the default candidates are
    /// only used when they exist.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(USER_CONFIG_FILE);
            if user_path.exists() {
                return Ok(user_path);
            }
        }

        let system_path = PathBuf::from(SYSTEM_CONFIG_FILE);
        if system_path.exists() {
            return Ok(system_path);
        }

        Err(Error::ConfigNotFound)
    }

    /// Load configuration from a specific file.
    ///
    /// Read failures and parse failures are reported as distinct errors,
    /// both naming the offending path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.display().to_string(),
                source: e,
            })?;

        config.username = Self::resolve_env_string(config.username);
        config.token = Self::resolve_env_string(config.token);
        config.server = Self::resolve_env_string(config.server);
        config.room = Self::resolve_env_string(config.room);

        Ok(config)
    }

    /// Resolve a value: a `${VAR}` placeholder is replaced by the
    /// environment variable's value. An unset variable leaves the literal
    /// placeholder in place.
    fn resolve_env_string(value: String) -> String {
        if let Some(var_name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
            if let Ok(env_val) = env::var(var_name) {
                return env_val;
            }
        }
        value
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
