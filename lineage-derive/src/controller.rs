use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lineage_crypto::suri::public_path;
use lineage_types::constants::ACCOUNT_LIST_ROUTE;
use lineage_types::primitives::GenesisHash;
use secrecy::{ExposeSecret, SecretString};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::backend::{AccountDirectory, DeriveBackend, DeriveRequest, Navigator};
use crate::error::{CommitFailure, WizardError};
use crate::finalize::AccountFinalizationStep;
use crate::genesis::resolve_genesis;
use crate::select_parent::PathSelectionStep;
use crate::state::{AddressState, CommitOutcome, ConfirmState, PathState, PhaseKind, StepKind};

/// The collaborators a wizard talks to.
#[derive(Clone)]
pub struct WizardContext {
    pub backend: Arc<dyn DeriveBackend>,
    pub directory: Arc<dyn AccountDirectory>,
    pub navigator: Arc<dyn Navigator>,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Busy,
    Errored(CommitFailure),
}

enum Step {
    SelectingPath,
    Finalizing { confirmed: ConfirmState, phase: Phase },
    Completed,
    Closed,
}

struct Shared {
    step: Step,
    draft: AccountFinalizationStep,
    /// Bumped on teardown; a commit result carrying an older epoch is dropped.
    epoch: u64,
}

impl Shared {
    fn kind(&self) -> StepKind {
        match &self.step {
            Step::SelectingPath => StepKind::SelectingPath,
            Step::Finalizing { phase, .. } => StepKind::Finalizing(match phase {
                Phase::Idle => PhaseKind::Idle,
                Phase::Busy => PhaseKind::Busy,
                Phase::Errored(_) => PhaseKind::Errored,
            }),
            Step::Completed => StepKind::Completed,
            Step::Closed => StepKind::Closed,
        }
    }
}

fn refuse(kind: StepKind) -> WizardError {
    match kind {
        StepKind::Closed => WizardError::Closed,
        StepKind::Finalizing(PhaseKind::Busy) => WizardError::Busy,
        other => WizardError::InvalidTransition(other),
    }
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Two-step derivation wizard for one parent account.
///
/// ```text
/// SelectingPath --confirm--> Finalizing(idle) --submit--> Finalizing(busy)
///       ^                      |    ^                        |        |
///       +--------back----------+    +--------failure---------+     success
///                                                                     |
///                                                   Completed (navigate "/")
/// ```
///
/// The busy flag is set synchronously inside [`submit`](Self::submit) before
/// the backend call is spawned, and is the only guard against a second
/// commit. Dropping the wizard closes it; a commit still in flight then
/// resolves to [`CommitOutcome::Discarded`] without touching any state.
pub struct DeriveWizard {
    parent: AddressState,
    is_locked: bool,
    ctx: WizardContext,
    shared: Arc<Mutex<Shared>>,
}

impl DeriveWizard {
    pub fn new(ctx: WizardContext, parent_address: impl Into<String>, is_locked: bool) -> Self {
        let parent = AddressState {
            address: parent_address.into(),
        };
        debug!(parent = %parent.address, is_locked, "derive wizard opened");
        Self {
            parent,
            is_locked,
            ctx,
            shared: Arc::new(Mutex::new(Shared {
                step: Step::SelectingPath,
                draft: AccountFinalizationStep::default(),
                epoch: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        lock_shared(&self.shared)
    }

    pub fn parent_address(&self) -> &str {
        &self.parent.address
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Genesis of the parent, read from the current directory.
    pub fn parent_genesis(&self) -> Option<GenesisHash> {
        resolve_genesis(&self.ctx.directory.accounts(), &self.parent.address)
    }

    pub fn step_kind(&self) -> StepKind {
        self.lock().kind()
    }

    /// Step number for a "step N of 2" header.
    pub fn header_step(&self) -> u8 {
        match self.step_kind() {
            StepKind::SelectingPath => 1,
            _ => 2,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.step_kind() == StepKind::Finalizing(PhaseKind::Busy)
    }

    /// The confirmed derivation, present only while finalizing.
    pub fn account(&self) -> Option<PathState> {
        match &self.lock().step {
            Step::Finalizing { confirmed, .. } => Some(confirmed.account.clone()),
            _ => None,
        }
    }

    pub fn has_parent_password(&self) -> bool {
        matches!(self.lock().step, Step::Finalizing { .. })
    }

    pub fn name(&self) -> Option<String> {
        self.lock().draft.name().map(str::to_string)
    }

    pub fn has_password(&self) -> bool {
        self.lock().draft.has_password()
    }

    pub fn last_failure(&self) -> Option<CommitFailure> {
        match &self.lock().step {
            Step::Finalizing {
                phase: Phase::Errored(failure),
                ..
            } => Some(*failure),
            _ => None,
        }
    }

    /// Whether the create control should be enabled.
    pub fn can_submit(&self) -> bool {
        let shared = self.lock();
        matches!(
            shared.step,
            Step::Finalizing {
                phase: Phase::Idle | Phase::Errored(_),
                ..
            }
        ) && shared.draft.is_ready()
    }

    /// Open step 1 against a fresh directory snapshot.
    pub fn path_selection(&self) -> Result<PathSelectionStep, WizardError> {
        let kind = self.step_kind();
        if kind != StepKind::SelectingPath {
            return Err(refuse(kind));
        }
        let accounts = self.ctx.directory.accounts();
        let genesis = resolve_genesis(&accounts, &self.parent.address);
        Ok(PathSelectionStep::new(
            self.ctx.backend.clone(),
            accounts,
            self.parent.address.clone(),
            genesis,
            self.is_locked,
        ))
    }

    /// Move to step 2 with the confirmed path and parent password.
    pub fn confirm_derivation(&self, confirmed: ConfirmState) -> Result<(), WizardError> {
        let mut shared = self.lock();
        let kind = shared.kind();
        if kind != StepKind::SelectingPath {
            return Err(refuse(kind));
        }
        if confirmed.parent_address != self.parent.address {
            return Err(WizardError::ForeignParent {
                expected: self.parent.address.clone(),
                found: confirmed.parent_address,
            });
        }
        debug!(derived = %confirmed.account.address, "entering finalization");
        shared.step = Step::Finalizing {
            confirmed,
            phase: Phase::Idle,
        };
        Ok(())
    }

    pub fn set_name(&self, raw: &str) -> Result<(), WizardError> {
        self.edit(|draft| draft.set_name(raw))
    }

    pub fn set_password(&self, password: SecretString) -> Result<(), WizardError> {
        self.edit(|draft| draft.set_password(password))
    }

    /// Apply an edit to the step-2 fields. Any edit clears a previous failure.
    fn edit<F>(&self, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut AccountFinalizationStep) -> Result<(), WizardError>,
    {
        let mut guard = self.lock();
        let shared = &mut *guard;
        let kind = shared.kind();
        match &mut shared.step {
            Step::Finalizing {
                phase: phase @ (Phase::Idle | Phase::Errored(_)),
                ..
            } => {
                *phase = Phase::Idle;
                f(&mut shared.draft)
            }
            _ => Err(refuse(kind)),
        }
    }

    /// Return to step 1, dropping the confirmed path and parent password.
    ///
    /// The name survives; the new password must be entered again.
    pub fn back(&self) -> Result<(), WizardError> {
        let mut shared = self.lock();
        match shared.kind() {
            StepKind::Finalizing(PhaseKind::Idle | PhaseKind::Errored) => {}
            other => return Err(refuse(other)),
        }
        shared.step = Step::SelectingPath;
        shared.draft.clear_password();
        debug!("back to path selection");
        Ok(())
    }

    /// Clear a recorded commit failure.
    pub fn dismiss_error(&self) -> Result<(), WizardError> {
        let mut shared = self.lock();
        let kind = shared.kind();
        match &mut shared.step {
            Step::Finalizing { phase, .. } if !matches!(phase, Phase::Busy) => {
                *phase = Phase::Idle;
                Ok(())
            }
            _ => Err(refuse(kind)),
        }
    }

    /// Start the commit if every input is present and none is in flight.
    ///
    /// Returns `None`, without calling the backend or changing state, when
    /// the wizard is not finalizing, a commit is already running, or the name
    /// or password is missing. Must be called within a Tokio runtime.
    pub fn submit(&self) -> Option<CommitHandle> {
        let (request, epoch, derived) = {
            let mut guard = self.lock();
            let shared = &mut *guard;
            let kind = shared.kind();
            let Step::Finalizing { confirmed, phase } = &mut shared.step else {
                debug!(step = %kind, "commit ignored outside finalization");
                return None;
            };
            if matches!(phase, Phase::Busy) {
                debug!("commit ignored: one is already in flight");
                return None;
            }
            let Some((name, password)) = shared.draft.ready() else {
                debug!("commit ignored: name or password missing");
                return None;
            };

            let genesis_hash =
                resolve_genesis(&self.ctx.directory.accounts(), &self.parent.address);
            *phase = Phase::Busy;

            let request = DeriveRequest {
                parent_address: self.parent.address.clone(),
                suri: confirmed.account.suri.clone(),
                parent_password: SecretString::new(
                    confirmed.parent_password.expose_secret().into(),
                ),
                name,
                password,
                genesis_hash,
            };
            (request, shared.epoch, confirmed.account.address.clone())
        };

        info!(
            parent = %request.parent_address,
            path = public_path(&request.suri),
            derived = %derived,
            genesis = ?request.genesis_hash,
            "creating derived account"
        );
        let task = tokio::spawn(resolve_commit(
            self.ctx.backend.clone(),
            self.ctx.navigator.clone(),
            self.shared.clone(),
            epoch,
            request,
        ));
        Some(CommitHandle {
            task,
            shared: self.shared.clone(),
            epoch,
        })
    }

    /// Submit and wait for the result.
    pub async fn commit(&self) -> Option<CommitOutcome> {
        let handle = self.submit()?;
        Some(handle.outcome().await)
    }

    /// Close the wizard, dropping every secret it holds.
    pub fn teardown(&self) {
        let mut shared = self.lock();
        if matches!(shared.step, Step::Closed) {
            return;
        }
        shared.step = Step::Closed;
        shared.draft.clear();
        shared.epoch += 1;
        debug!(parent = %self.parent.address, "derive wizard closed");
    }
}

impl Drop for DeriveWizard {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn resolve_commit(
    backend: Arc<dyn DeriveBackend>,
    navigator: Arc<dyn Navigator>,
    shared: Arc<Mutex<Shared>>,
    epoch: u64,
    request: DeriveRequest,
) -> CommitOutcome {
    let result = backend.derive_account(request).await;

    let mut guard = lock_shared(&shared);
    if guard.epoch != epoch {
        debug!("commit resolved after the wizard closed; result dropped");
        return CommitOutcome::Discarded;
    }
    match result {
        Ok(()) => {
            guard.step = Step::Completed;
            guard.draft.clear();
            drop(guard);
            info!("derived account created");
            navigator.on_action(ACCOUNT_LIST_ROUTE);
            CommitOutcome::Completed
        }
        Err(e) => {
            let failure = CommitFailure::from(&e);
            warn!(kind = ?failure, error = %e, "derived account commit failed");
            if let Step::Finalizing { phase, .. } = &mut guard.step {
                *phase = Phase::Errored(failure);
            }
            CommitOutcome::Failed(failure)
        }
    }
}

/// A commit in flight.
///
/// Dropping the handle does not cancel the commit; the wizard still applies
/// its result.
pub struct CommitHandle {
    task: JoinHandle<CommitOutcome>,
    shared: Arc<Mutex<Shared>>,
    epoch: u64,
}

impl CommitHandle {
    pub async fn outcome(self) -> CommitOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "commit task did not finish");
                let mut shared = lock_shared(&self.shared);
                if shared.epoch != self.epoch {
                    return CommitOutcome::Discarded;
                }
                if let Step::Finalizing { phase, .. } = &mut shared.step {
                    *phase = Phase::Errored(CommitFailure::Other);
                }
                CommitOutcome::Failed(CommitFailure::Other)
            }
        }
    }
}
