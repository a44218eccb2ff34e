use lineage_crypto::suri::SuriError;
use thiserror::Error;

use crate::state::StepKind;

/// Failures reported by the key backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("wrong password")]
    WrongPassword,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("account {0} already exists")]
    AlreadyExists(String),

    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Other(String),
}

/// Why a commit failed, reduced to what is safe to show the user.
///
/// The backend's detailed error only goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitFailure {
    WrongPassword,
    InvalidPath,
    AlreadyExists,
    Storage,
    Other,
}

impl CommitFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            CommitFailure::WrongPassword | CommitFailure::InvalidPath => {
                "Could not derive the account. Go back and check the path and parent password."
            }
            CommitFailure::AlreadyExists => "An account with this address already exists.",
            CommitFailure::Storage => "Could not save the new account. Please try again.",
            CommitFailure::Other => "Could not create the derived account. Please try again.",
        }
    }
}

impl From<&BackendError> for CommitFailure {
    fn from(e: &BackendError) -> Self {
        match e {
            BackendError::WrongPassword => CommitFailure::WrongPassword,
            BackendError::InvalidPath(_) => CommitFailure::InvalidPath,
            BackendError::AlreadyExists(_) => CommitFailure::AlreadyExists,
            BackendError::Storage(_) => CommitFailure::Storage,
            BackendError::AccountNotFound(_) | BackendError::Other(_) => CommitFailure::Other,
        }
    }
}

/// Errors from the path-selection step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("malformed derivation path: {0}")]
    Malformed(#[from] SuriError),

    #[error("parent password required")]
    MissingParentPassword,

    #[error("the parent password is supplied externally for this account")]
    SecretLocked,

    #[error("wrong parent password")]
    WrongPassword,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("account {0} already exists")]
    AlreadyExists(String),

    #[error("backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for PathError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::WrongPassword => PathError::WrongPassword,
            BackendError::InvalidPath(reason) => PathError::InvalidPath(reason),
            BackendError::AlreadyExists(address) => PathError::AlreadyExists(address),
            other => PathError::Backend(other),
        }
    }
}

/// Errors from wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("not allowed while {0}")]
    InvalidTransition(StepKind),

    #[error("a commit is already in flight")]
    Busy,

    #[error("path was confirmed for parent {found}, not {expected}")]
    ForeignParent { expected: String, found: String },

    #[error("the wizard has been closed")]
    Closed,

    #[error("invalid account name: {0}")]
    InvalidName(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),
}
