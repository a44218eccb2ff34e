use std::fmt;

use lineage_crypto::suri::public_path;
use secrecy::SecretString;

/// The parent account, identified by its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressState {
    pub address: String,
}

/// A proposed derivation: the derived address and the path that yields it.
///
/// `address` is computed by the backend, never locally. `Debug` leaves out
/// any `///password` suffix of `suri`.
#[derive(Clone, PartialEq, Eq)]
pub struct PathState {
    pub address: String,
    pub suri: String,
}

impl fmt::Debug for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathState")
            .field("address", &self.address)
            .field("suri", &public_path(&self.suri))
            .finish()
    }
}

/// The confirmed output of path selection.
///
/// Only [`PathSelectionStep::confirm`](crate::select_parent::PathSelectionStep::confirm)
/// builds one, after the path and parent password passed validation against
/// `parent_address`.
pub struct ConfirmState {
    pub(crate) parent_address: String,
    pub(crate) account: PathState,
    pub(crate) parent_password: SecretString,
}

impl ConfirmState {
    pub fn account(&self) -> &PathState {
        &self.account
    }

    /// The parent the path was validated against.
    pub fn parent_address(&self) -> &str {
        &self.parent_address
    }
}

impl fmt::Debug for ConfirmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmState")
            .field("parent_address", &self.parent_address)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

/// Sub-state of the finalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Busy,
    Errored,
}

/// Observable wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    SelectingPath,
    Finalizing(PhaseKind),
    Completed,
    Closed,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::SelectingPath => write!(f, "selecting a path"),
            StepKind::Finalizing(PhaseKind::Idle) => write!(f, "finalizing"),
            StepKind::Finalizing(PhaseKind::Busy) => write!(f, "creating the account"),
            StepKind::Finalizing(PhaseKind::Errored) => write!(f, "finalizing after an error"),
            StepKind::Completed => write!(f, "completed"),
            StepKind::Closed => write!(f, "closed"),
        }
    }
}

/// Result of one commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The account exists and navigation to the account list was requested.
    Completed,
    /// The backend rejected the commit; the wizard is back in `Finalizing`.
    Failed(crate::error::CommitFailure),
    /// The result arrived after the wizard was closed and was dropped.
    Discarded,
}
