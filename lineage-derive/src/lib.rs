//! Derive a child account from an existing parent account.
//!
//! The wizard runs in two steps. [`PathSelectionStep`] collects a derivation
//! path and the parent's password, and previews the resulting address through
//! the [`DeriveBackend`]. [`DeriveWizard`] then collects the new account's name
//! and password and commits the derivation exactly once, navigating to the
//! account list on success.
//!
//! Key material never leaves the backend: the wizard only moves path
//! expressions, addresses and [`secrecy::SecretString`] passwords.

pub mod backend;
pub mod controller;
pub mod error;
pub mod finalize;
pub mod genesis;
pub mod select_parent;
pub mod state;

#[cfg(test)]
mod test_support;

pub use backend::{AccountDirectory, DeriveBackend, DeriveRequest, Navigator};
pub use controller::{CommitHandle, DeriveWizard, WizardContext};
pub use error::{BackendError, CommitFailure, PathError, WizardError};
pub use finalize::AccountFinalizationStep;
pub use select_parent::PathSelectionStep;
pub use state::{AddressState, CommitOutcome, ConfirmState, PathState, PhaseKind, StepKind};
