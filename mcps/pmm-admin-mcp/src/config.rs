//! Configuration loading
//!
//! Config is searched in order:
//! 1. `PMM_RECONCILE_CONFIG` env var
//! 2. `./pmm-reconcile.toml`
//! 3. `$XDG_CONFIG_HOME/pmm-reconcile/config.toml`
//! 4. `~/.pmm-reconcile.toml`
//! 5. Default config if none found

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pmm::error::{PmmError, PmmResult};

/// Env var pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "PMM_RECONCILE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pmm_admin: PmmAdminConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmmAdminConfig {
    /// Program spawned in place of the `pmm-admin` token
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Arguments of the listing command
    #[serde(default = "default_list_args")]
    pub list_args: Vec<String>,
}

fn default_binary() -> String {
    "pmm-admin".to_string()
}

fn default_list_args() -> Vec<String> {
    vec!["list".to_string()]
}

impl Default for PmmAdminConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            list_args: default_list_args(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Default timeout per pmm-admin invocation, in seconds
    #[serde(default = "default_timeout")]
    pub default_secs: u64,
    /// Maximum timeout in seconds (hard cap)
    #[serde(default = "default_max_timeout")]
    pub max_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_timeout() -> u64 {
    300
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_secs: default_timeout(),
            max_secs: default_max_timeout(),
        }
    }
}

impl TimeoutConfig {
    /// Resolve a requested timeout against the default and the hard cap
    pub fn resolve(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_secs)
            .min(self.max_secs)
            .max(1)
    }
}

impl Config {
    /// Load config from the standard locations, falling back to defaults
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub fn load() -> Self {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                match Self::load_from_path(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}={}", CONFIG_ENV_VAR, path.display());
                        return config;
                    }
                    Err(e) => tracing::warn!("{}", e),
                }
            } else {
                tracing::warn!("{}={} does not exist", CONFIG_ENV_VAR, env_path);
            }
        }

        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("{}", e),
            }
        }

        tracing::debug!("Using default configuration");
        Config::default()
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> PmmResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PmmError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| PmmError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("pmm-reconcile.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pmm-reconcile").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".pmm-reconcile.toml"));
        }

        paths
    }
}
