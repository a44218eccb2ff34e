use std::path::{Path, PathBuf};

use lineage_types::error::LineageError;
use lineage_types::primitives::GenesisHash;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Environment variable that overrides the default data directory.
pub const HOME_ENV: &str = "LINEAGE_HOME";

/// Contents of `lineage.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Keystore location. `--data-dir` and `LINEAGE_HOME` take precedence.
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Named networks, so `--genesis testnet` can stand in for a hash.
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub genesis_hash: GenesisHash,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: AppConfig = toml::from_str(&contents).map_err(|e| CliError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self, CliError> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Pick the data directory: flag, then `LINEAGE_HOME`, then the config
    /// file, then `~/.lineage`.
    pub fn resolve_data_dir(&self, flag: Option<&str>) -> Result<PathBuf, CliError> {
        let env = std::env::var(HOME_ENV).ok();
        pick_data_dir(
            flag,
            env.as_deref(),
            self.data_dir.as_deref(),
            dirs::home_dir(),
        )
        .ok_or_else(|| CliError::ConfigError {
            reason: "could not determine home directory; pass --data-dir".to_string(),
        })
    }

    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.name == name)
    }

    /// Name of the configured network with this genesis, if any.
    pub fn network_name(&self, genesis: &GenesisHash) -> Option<&str> {
        self.networks
            .iter()
            .find(|n| n.genesis_hash == *genesis)
            .map(|n| n.name.as_str())
    }

    /// Accept either a configured network name or a literal genesis hash.
    pub fn resolve_genesis(&self, arg: &str) -> Result<GenesisHash, LineageError> {
        match self.network(arg) {
            Some(network) => Ok(network.genesis_hash),
            None => arg.parse(),
        }
    }
}

fn pick_data_dir(
    flag: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    [flag, env, configured]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".lineage")))
}
