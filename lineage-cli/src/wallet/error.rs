use lineage_crypto::hd::DerivationError;
use lineage_derive::{BackendError, PathError, WizardError};
use lineage_types::error::LineageError;
use thiserror::Error;

/// Errors that can occur in keystore operations.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no active account set; run `lineage use <ADDRESS>` to select one")]
    NoActiveAccount,

    #[error("account '{0}' not found")]
    AccountNotFound(String),

    #[error("account '{0}' already exists")]
    AccountAlreadyExists(String),

    #[error("invalid password: decryption failed")]
    InvalidPassword,

    #[error("crypto error: {0}")]
    CryptoError(#[from] LineageError),

    #[error("derivation error: {0}")]
    DerivationError(#[from] DerivationError),

    #[error("{0}")]
    PathError(#[from] PathError),

    #[error("{0}")]
    WizardError(#[from] WizardError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::SerializationError(e.to_string())
    }
}

impl From<dialoguer::Error> for WalletError {
    fn from(e: dialoguer::Error) -> Self {
        WalletError::IoError(std::io::Error::other(e))
    }
}

/// How the keystore reports failures to the derivation wizard.
impl From<WalletError> for BackendError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::InvalidPassword => BackendError::WrongPassword,
            WalletError::AccountNotFound(address) => BackendError::AccountNotFound(address),
            WalletError::AccountAlreadyExists(address) => BackendError::AlreadyExists(address),
            WalletError::DerivationError(e) => BackendError::InvalidPath(e.to_string()),
            WalletError::IoError(e) => BackendError::Storage(e.to_string()),
            WalletError::SerializationError(reason) => BackendError::Storage(reason),
            other => BackendError::Other(other.to_string()),
        }
    }
}
