//! Capabilities the wizard depends on but does not implement.

use std::fmt;

use async_trait::async_trait;
use lineage_crypto::suri::public_path;
use lineage_types::account::AccountRecord;
use lineage_types::primitives::GenesisHash;
use secrecy::SecretString;

use crate::error::BackendError;
use crate::state::PathState;

/// Read access to the account directory.
///
/// The directory is shared mutable state owned elsewhere; every call returns
/// a fresh snapshot.
pub trait AccountDirectory: Send + Sync {
    fn accounts(&self) -> Vec<AccountRecord>;
}

/// Everything needed to create one derived account.
pub struct DeriveRequest {
    pub parent_address: String,
    pub suri: String,
    pub parent_password: SecretString,
    pub name: String,
    pub password: SecretString,
    pub genesis_hash: Option<GenesisHash>,
}

impl fmt::Debug for DeriveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeriveRequest")
            .field("parent_address", &self.parent_address)
            .field("suri", &public_path(&self.suri))
            .field("name", &self.name)
            .field("genesis_hash", &self.genesis_hash)
            .finish_non_exhaustive()
    }
}

/// Key derivation and secret storage.
#[async_trait]
pub trait DeriveBackend: Send + Sync {
    /// Unlock the parent with `parent_password` and compute the address
    /// `suri` would derive, without storing anything.
    ///
    /// A password that does not unlock the parent fails with
    /// [`BackendError::WrongPassword`] before the path is applied.
    fn preview_derivation(
        &self,
        parent_address: &str,
        suri: &str,
        parent_password: &SecretString,
    ) -> Result<PathState, BackendError>;

    /// Create and persist the derived account.
    ///
    /// Either the account exists afterwards with the requested name, genesis
    /// and password, or nothing was written.
    async fn derive_account(&self, request: DeriveRequest) -> Result<(), BackendError>;
}

/// Fire-and-forget navigation.
pub trait Navigator: Send + Sync {
    fn on_action(&self, route: &str);
}
