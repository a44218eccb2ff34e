//! Scripted collaborators for wizard tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lineage_crypto::suri::{public_path, DerivationPath};
use lineage_types::account::AccountRecord;
use lineage_types::primitives::GenesisHash;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Notify;

use crate::backend::{AccountDirectory, DeriveBackend, DeriveRequest, Navigator};
use crate::error::BackendError;
use crate::state::PathState;

pub fn secret(s: &str) -> SecretString {
    SecretString::new(s.into())
}

/// What the backend saw for one `derive_account` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub parent_address: String,
    pub suri: String,
    pub name: String,
    pub parent_password: String,
    pub password: String,
    pub genesis_hash: Option<GenesisHash>,
}

/// Derives `"{parent}{path}"` as the child address and accepts one parent password.
pub struct FakeBackend {
    parent_password: String,
    preview_calls: AtomicUsize,
    derive_calls: AtomicUsize,
    results: Mutex<VecDeque<Result<(), BackendError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn new(parent_password: &str) -> Self {
        Self {
            parent_password: parent_password.to_string(),
            preview_calls: AtomicUsize::new(0),
            derive_calls: AtomicUsize::new(0),
            results: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Every `derive_account` call waits for one permit on `gate`.
    pub fn gated(parent_password: &str, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(parent_password)
        }
    }

    pub fn push_result(&self, result: Result<(), BackendError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn preview_calls(&self) -> usize {
        self.preview_calls.load(Ordering::SeqCst)
    }

    pub fn derive_calls(&self) -> usize {
        self.derive_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DeriveBackend for FakeBackend {
    fn preview_derivation(
        &self,
        parent_address: &str,
        suri: &str,
        parent_password: &SecretString,
    ) -> Result<PathState, BackendError> {
        self.preview_calls.fetch_add(1, Ordering::SeqCst);
        if parent_password.expose_secret() != self.parent_password {
            return Err(BackendError::WrongPassword);
        }
        let path =
            DerivationPath::parse(suri).map_err(|e| BackendError::InvalidPath(e.to_string()))?;
        if !path.is_fully_hard() {
            return Err(BackendError::InvalidPath("soft junction".to_string()));
        }
        Ok(PathState {
            address: format!("{}{}", parent_address, public_path(suri)),
            suri: suri.to_string(),
        })
    }

    async fn derive_account(&self, request: DeriveRequest) -> Result<(), BackendError> {
        self.derive_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            parent_address: request.parent_address.clone(),
            suri: request.suri.clone(),
            name: request.name.clone(),
            parent_password: request.parent_password.expose_secret().to_string(),
            password: request.password.expose_secret().to_string(),
            genesis_hash: request.genesis_hash,
        });
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    accounts: Mutex<Vec<AccountRecord>>,
}

impl FakeDirectory {
    pub fn with(accounts: Vec<AccountRecord>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    pub fn replace(&self, accounts: Vec<AccountRecord>) {
        *self.accounts.lock().unwrap() = accounts;
    }
}

impl AccountDirectory for FakeDirectory {
    fn accounts(&self) -> Vec<AccountRecord> {
        self.accounts.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn on_action(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}
