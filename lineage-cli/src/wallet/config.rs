use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::WalletError;
use super::store::{ensure_private_dir, write_private, AccountStore};

/// Keystore state stored in `<data_dir>/config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletState {
    /// Address of the currently active account.
    #[serde(default)]
    pub active_account: Option<String>,
}

impl WalletState {
    fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.json")
    }

    /// Load state from disk, or the default if there is none yet.
    pub fn load(data_dir: &Path) -> Result<Self, WalletError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), WalletError> {
        ensure_private_dir(data_dir)?;
        let data = serde_json::to_string_pretty(self)?;
        write_private(&Self::path(data_dir), data.as_bytes())
    }

    /// Get the active account address, or error if none set.
    pub fn active_account(&self) -> Result<&str, WalletError> {
        self.active_account
            .as_deref()
            .ok_or(WalletError::NoActiveAccount)
    }

    pub fn is_active(&self, address: &str) -> bool {
        self.active_account.as_deref() == Some(address)
    }

    /// Make `address` active. It must name a stored account.
    pub fn set_active(&mut self, store: &AccountStore, address: &str) -> Result<(), WalletError> {
        let ks = store.load(address)?;
        self.active_account = Some(ks.address);
        Ok(())
    }
}
