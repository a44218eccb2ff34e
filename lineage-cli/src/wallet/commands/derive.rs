use std::sync::Arc;

use lineage_crypto::address::normalize_address;
use lineage_crypto::suri::{public_path, DerivationPath};
use lineage_derive::{
    CommitOutcome, ConfirmState, DeriveWizard, PathError, WizardContext,
};
use lineage_types::constants::ACCOUNT_LIST_ROUTE;
use secrecy::SecretString;
use tracing::debug;

use crate::wallet::backend::LocalBackend;
use crate::wallet::error::WalletError;
use crate::wallet::format::{format_genesis, print_error, print_info, print_step, print_success};
use crate::wallet::navigator::CliNavigator;
use crate::wallet::prompt::{prompt_new_password, prompt_password, prompt_text, select};
use crate::wallet::ui::spinner;
use crate::wallet::WalletContext;

/// Where a locked parent's password comes from.
pub const PARENT_SECRET_ENV: &str = "LINEAGE_PARENT_PASSWORD";

const STEPS: u8 = 2;

enum Next {
    Created,
    Back,
    Cancel,
}

pub async fn run(
    ctx: &WalletContext,
    parent: Option<&str>,
    locked: bool,
    path: Option<&str>,
) -> Result<(), WalletError> {
    let parent = match parent {
        Some(p) => normalize_address(p)?,
        None => ctx.state()?.active_account()?.to_string(),
    };
    let parent_ks = ctx.store.load(&parent)?;

    let backend = Arc::new(LocalBackend::new(ctx.store.clone()));
    let navigator = Arc::new(CliNavigator::default());
    let wizard = DeriveWizard::new(
        WizardContext {
            backend: backend.clone(),
            directory: backend,
            navigator: navigator.clone(),
        },
        parent.clone(),
        locked,
    );

    println!();
    print_info("Parent", &format!("{} ({})", parent_ks.name(), parent));
    if let Some(g) = wizard.parent_genesis() {
        print_info("Network", &format_genesis(Some(&g), ctx.config.network_name(&g)));
    }

    let mut preset = path.map(str::to_string);
    loop {
        print_step(wizard.header_step(), STEPS, "Choose a derivation path");
        let Some(confirmed) = select_path(&wizard, preset.take(), locked)? else {
            continue;
        };
        print_info("Derived address", &confirmed.account().address);
        wizard.confirm_derivation(confirmed)?;

        print_step(wizard.header_step(), STEPS, "Name and protect the new account");
        loop {
            let current = wizard.name();
            let raw = prompt_text("Account name", current.as_deref())?;
            match wizard.set_name(&raw) {
                Ok(()) => break,
                Err(e) => print_error(&e.to_string(), None),
            }
        }
        wizard.set_password(prompt_new_password("New account password")?)?;

        match commit(&wizard).await? {
            Next::Created => break,
            Next::Back => wizard.back()?,
            Next::Cancel => {
                wizard.teardown();
                println!("  Cancelled; nothing was created.");
                return Ok(());
            }
        }
    }

    print_success("Derived account created.");
    for route in navigator.take_routes() {
        if route == ACCOUNT_LIST_ROUTE {
            super::list::run(ctx, false)?;
        } else {
            debug!(route = %route, "ignoring unknown route");
        }
    }
    Ok(())
}

/// Collect a path and parent secret, returning `None` when the user should
/// try again.
fn select_path(
    wizard: &DeriveWizard,
    preset: Option<String>,
    locked: bool,
) -> Result<Option<ConfirmState>, WalletError> {
    let mut step = wizard.path_selection()?;
    let suri = match preset {
        Some(p) => p,
        None => prompt_text("Derivation path", Some(step.suri()))?,
    };
    if let Err(e) = DerivationPath::parse(&suri) {
        print_error(
            &e.to_string(),
            Some("Paths look like //0 or //savings//1, optionally ending in ///password"),
        );
        return Ok(None);
    }
    step.set_path(suri);

    if locked {
        let secret = std::env::var(PARENT_SECRET_ENV).map_err(|_| {
            WalletError::Other(format!(
                "the parent account is locked; set {} to supply its password",
                PARENT_SECRET_ENV
            ))
        })?;
        step.supply_external_secret(SecretString::new(secret.into()));
    } else {
        step.set_parent_password(prompt_password("Parent password")?)?;
    }

    match step.confirm() {
        Ok(confirmed) => {
            debug!(path = public_path(&confirmed.account().suri), "path confirmed");
            Ok(Some(confirmed))
        }
        // Retrying cannot change an externally supplied secret.
        Err(PathError::WrongPassword) if locked => Err(PathError::WrongPassword.into()),
        Err(e) => {
            let hint = match e {
                PathError::WrongPassword => Some("The parent password is the one used to encrypt the parent account"),
                PathError::InvalidPath(_) => Some("Only hard junctions (//) are supported"),
                _ => None,
            };
            print_error(&e.to_string(), hint);
            Ok(None)
        }
    }
}

/// Ask to create, go back or cancel, and run the commit when asked.
async fn commit(wizard: &DeriveWizard) -> Result<Next, WalletError> {
    loop {
        match select("Create the account?", &["Create", "Back", "Cancel"])? {
            1 => return Ok(Next::Back),
            2 => return Ok(Next::Cancel),
            _ => {}
        }

        let pb = spinner("Deriving and encrypting the new account...");
        let outcome = wizard.commit().await;
        pb.finish_and_clear();

        match outcome {
            Some(CommitOutcome::Completed) => return Ok(Next::Created),
            Some(CommitOutcome::Failed(failure)) => {
                print_error(failure.user_message(), None);
                wizard.dismiss_error()?;
            }
            Some(CommitOutcome::Discarded) | None => {
                return Err(WalletError::Other(
                    "the wizard closed before the account was created".to_string(),
                ))
            }
        }
    }
}
