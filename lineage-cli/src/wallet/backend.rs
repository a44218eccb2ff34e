//! The local keystore as a derivation backend.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use zeroize::Zeroizing;

use lineage_crypto::address::format_address;
use lineage_crypto::hd::derive_keypair;
use lineage_crypto::keys::Keypair;
use lineage_derive::finalize::validate_name;
use lineage_derive::{AccountDirectory, BackendError, DeriveBackend, DeriveRequest, PathState};
use lineage_types::account::AccountRecord;

use super::error::WalletError;
use super::keystore::Keystore;
use super::store::AccountStore;

/// Serves the wizard from an [`AccountStore`].
///
/// Every directory read goes to disk, so accounts created by another
/// process are seen on the next call.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    store: AccountStore,
}

impl LocalBackend {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    fn unlock_parent(
        &self,
        parent_address: &str,
        parent_password: &SecretString,
    ) -> Result<Keypair, WalletError> {
        self.store
            .load(parent_address)?
            .unlock(parent_password.expose_secret())
    }
}

impl AccountDirectory for LocalBackend {
    fn accounts(&self) -> Vec<AccountRecord> {
        match self.store.records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not read the account directory");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DeriveBackend for LocalBackend {
    /// One unlock serves both the password check and the preview.
    fn preview_derivation(
        &self,
        parent_address: &str,
        suri: &str,
        parent_password: &SecretString,
    ) -> Result<PathState, BackendError> {
        let parent = self.unlock_parent(parent_address, parent_password)?;
        let seed = Zeroizing::new(parent.seed());
        let child = derive_keypair(&seed, suri).map_err(WalletError::from)?;
        Ok(PathState {
            address: format_address(&child.address()),
            suri: suri.to_string(),
        })
    }

    async fn derive_account(&self, request: DeriveRequest) -> Result<(), BackendError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || create_derived(&store, request))
            .await
            .map_err(|e| BackendError::Other(format!("derivation task failed: {}", e)))?
            .map_err(BackendError::from)
    }
}

/// Unlock the parent, derive the child and store it, all or nothing.
fn create_derived(store: &AccountStore, request: DeriveRequest) -> Result<(), WalletError> {
    let name = validate_name(&request.name)?;
    let parent = store.load(&request.parent_address)?;
    let parent_keypair = parent.unlock(request.parent_password.expose_secret())?;
    let seed = Zeroizing::new(parent_keypair.seed());
    let child = derive_keypair(&seed, &request.suri)?;

    let ks = Keystore::derived(
        &name,
        &parent.address,
        &request.suri,
        &child,
        request.password.expose_secret(),
        request.genesis_hash,
    )?;
    store.insert(&ks)
}
