use std::sync::Arc;

use lineage_crypto::suri::{public_path, DerivationPath};
use lineage_types::account::AccountRecord;
use lineage_types::primitives::GenesisHash;
use secrecy::SecretString;
use tracing::debug;

use crate::backend::DeriveBackend;
use crate::error::PathError;
use crate::genesis::next_derivation_path;
use crate::state::{ConfirmState, PathState};

/// Step 1: collect a derivation path and the parent's password.
///
/// Every input change drops the current preview, so a preview always belongs
/// to the inputs currently held. `confirm` hands out the parent password
/// exactly once; a second confirmation needs the password again.
pub struct PathSelectionStep {
    backend: Arc<dyn DeriveBackend>,
    accounts: Vec<AccountRecord>,
    parent_address: String,
    parent_genesis: Option<GenesisHash>,
    is_locked: bool,
    suri: String,
    parent_password: Option<SecretString>,
    preview: Option<PathState>,
    error: Option<PathError>,
}

impl PathSelectionStep {
    pub fn new(
        backend: Arc<dyn DeriveBackend>,
        accounts: Vec<AccountRecord>,
        parent_address: impl Into<String>,
        parent_genesis: Option<GenesisHash>,
        is_locked: bool,
    ) -> Self {
        let parent_address = parent_address.into();
        let suri = next_derivation_path(&accounts, &parent_address);
        Self {
            backend,
            accounts,
            parent_address,
            parent_genesis,
            is_locked,
            suri,
            parent_password: None,
            preview: None,
            error: None,
        }
    }

    pub fn parent_address(&self) -> &str {
        &self.parent_address
    }

    pub fn parent_genesis(&self) -> Option<GenesisHash> {
        self.parent_genesis
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// The path currently entered (initially the suggested next path).
    pub fn suri(&self) -> &str {
        &self.suri
    }

    pub fn preview(&self) -> Option<&PathState> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&PathError> {
        self.error.as_ref()
    }

    pub fn has_parent_password(&self) -> bool {
        self.parent_password.is_some()
    }

    pub fn set_path(&mut self, suri: impl Into<String>) {
        self.suri = suri.into();
        self.invalidate();
    }

    /// Accept a typed parent password. Refused when the step is locked.
    pub fn set_parent_password(&mut self, password: SecretString) -> Result<(), PathError> {
        if self.is_locked {
            return Err(PathError::SecretLocked);
        }
        self.parent_password = Some(password);
        self.invalidate();
        Ok(())
    }

    /// Accept a parent password from an external source (the locked case).
    pub fn supply_external_secret(&mut self, password: SecretString) {
        self.parent_password = Some(password);
        self.invalidate();
    }

    /// Validate the current inputs and compute the derived address.
    ///
    /// The result is remembered as the preview (or as the step error).
    pub fn validate(&mut self) -> Result<PathState, PathError> {
        let result = self.check();
        match &result {
            Ok(preview) => {
                self.preview = Some(preview.clone());
                self.error = None;
            }
            Err(e) => {
                debug!(parent = %self.parent_address, error = %e, "derivation path rejected");
                self.preview = None;
                self.error = Some(e.clone());
            }
        }
        result
    }

    /// Confirm the current path, yielding the payload for the finalization step.
    pub fn confirm(&mut self) -> Result<ConfirmState, PathError> {
        let account = match self.preview.take() {
            Some(preview) => preview,
            None => self.validate()?,
        };
        let parent_password = self
            .parent_password
            .take()
            .ok_or(PathError::MissingParentPassword)?;
        self.preview = None;
        debug!(
            parent = %self.parent_address,
            path = public_path(&account.suri),
            derived = %account.address,
            "derivation path confirmed"
        );
        Ok(ConfirmState {
            parent_address: self.parent_address.clone(),
            account,
            parent_password,
        })
    }

    fn invalidate(&mut self) {
        self.preview = None;
        self.error = None;
    }

    fn check(&self) -> Result<PathState, PathError> {
        DerivationPath::parse(&self.suri)?;
        let password = self
            .parent_password
            .as_ref()
            .ok_or(PathError::MissingParentPassword)?;

        let preview =
            self.backend
                .preview_derivation(&self.parent_address, &self.suri, password)?;

        if preview.address == self.parent_address
            || self.accounts.iter().any(|a| a.address == preview.address)
        {
            return Err(PathError::AlreadyExists(preview.address));
        }
        Ok(preview)
    }
}
