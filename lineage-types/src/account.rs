use serde::{Deserialize, Serialize};

use crate::primitives::GenesisHash;

/// Directory entry describing one stored account.
///
/// `address` is kept in its text form; the directory is matched by exact
/// string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genesis_hash: Option<GenesisHash>,
    /// Address of the account this one was derived from, if any.
    #[serde(default)]
    pub parent_address: Option<String>,
    /// Derivation path applied to the parent, if any.
    #[serde(default)]
    pub suri: Option<String>,
}

impl AccountRecord {
    /// A record for an account that was not derived from another one.
    pub fn root(address: impl Into<String>, genesis_hash: Option<GenesisHash>) -> Self {
        Self {
            address: address.into(),
            name: None,
            genesis_hash,
            parent_address: None,
            suri: None,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.parent_address.is_some()
    }
}
