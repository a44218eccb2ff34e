//! The derivation wizard running against the on-disk keystore.

use std::sync::Arc;

use lineage_cli::wallet::backend::LocalBackend;
use lineage_cli::wallet::keystore::Keystore;
use lineage_cli::wallet::navigator::CliNavigator;
use lineage_cli::wallet::store::AccountStore;
use lineage_crypto::address::format_address;
use lineage_crypto::hd::derive_keypair;
use lineage_crypto::seed::generate_mnemonic;
use lineage_derive::{
    CommitFailure, CommitOutcome, DeriveWizard, PathError, PhaseKind, StepKind, WizardContext,
};
use lineage_types::primitives::GenesisHash;
use secrecy::SecretString;
use tempfile::TempDir;

const ROOT_PASSWORD: &str = "root-password";
const CHILD_PASSWORD: &str = "child-password";

fn secret(s: &str) -> SecretString {
    SecretString::new(s.into())
}

struct Fixture {
    _tmp: TempDir,
    store: AccountStore,
    root: Keystore,
    genesis: GenesisHash,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let genesis = GenesisHash::new([0x42; 32]);
    let root =
        Keystore::from_mnemonic("root", &generate_mnemonic(), ROOT_PASSWORD, Some(genesis))
            .unwrap();
    store.insert(&root).unwrap();
    Fixture {
        _tmp: tmp,
        store,
        root,
        genesis,
    }
}

fn wizard(store: &AccountStore, parent: &str, locked: bool) -> (DeriveWizard, Arc<CliNavigator>) {
    let backend = Arc::new(LocalBackend::new(store.clone()));
    let navigator = Arc::new(CliNavigator::default());
    let ctx = WizardContext {
        backend: backend.clone(),
        directory: backend,
        navigator: navigator.clone(),
    };
    (DeriveWizard::new(ctx, parent, locked), navigator)
}

/// Walk both steps for `suri` and leave the wizard ready to commit.
fn prepare(wizard: &DeriveWizard, suri: &str, name: &str) {
    let mut step = wizard.path_selection().unwrap();
    step.set_path(suri);
    step.set_parent_password(secret(ROOT_PASSWORD)).unwrap();
    wizard.confirm_derivation(step.confirm().unwrap()).unwrap();
    wizard.set_name(name).unwrap();
    wizard.set_password(secret(CHILD_PASSWORD)).unwrap();
}

#[tokio::test]
async fn test_derive_creates_child_account() {
    let f = fixture();
    let (wizard, navigator) = wizard(&f.store, &f.root.address, false);

    let mut step = wizard.path_selection().unwrap();
    assert_eq!(step.suri(), "//0");
    assert_eq!(step.parent_genesis(), Some(f.genesis));
    step.set_parent_password(secret(ROOT_PASSWORD)).unwrap();
    let preview = step.validate().unwrap();
    wizard.confirm_derivation(step.confirm().unwrap()).unwrap();
    wizard.set_name("savings").unwrap();
    wizard.set_password(secret(CHILD_PASSWORD)).unwrap();

    assert_eq!(wizard.commit().await, Some(CommitOutcome::Completed));
    assert_eq!(navigator.take_routes(), vec!["/".to_string()]);

    let child = f.store.load(&preview.address).unwrap();
    assert_eq!(child.name(), "savings");
    assert_eq!(child.file.parent_address.as_deref(), Some(f.root.address.as_str()));
    assert_eq!(child.file.suri.as_deref(), Some("//0"));
    assert_eq!(child.file.genesis_hash, Some(f.genesis));
    assert!(!child.file.has_mnemonic);

    // The stored key is exactly the derivation of the parent's key.
    let parent_seed = f.root.unlock(ROOT_PASSWORD).unwrap().seed();
    let expected = derive_keypair(&parent_seed, "//0").unwrap();
    let unlocked = child.unlock(CHILD_PASSWORD).unwrap();
    assert_eq!(unlocked.public_key(), expected.public_key());
    assert_eq!(format_address(&expected.address()), preview.address);
    assert!(child.unlock(ROOT_PASSWORD).is_err());
}

#[tokio::test]
async fn test_next_path_skips_existing_children() {
    let f = fixture();
    let (first, _) = wizard(&f.store, &f.root.address, false);
    prepare(&first, "//0", "first");
    assert_eq!(first.commit().await, Some(CommitOutcome::Completed));

    let (second, _) = wizard(&f.store, &f.root.address, false);
    assert_eq!(second.path_selection().unwrap().suri(), "//1");
}

#[tokio::test]
async fn test_wrong_parent_password_blocks_confirmation() {
    let f = fixture();
    let (wizard, _) = wizard(&f.store, &f.root.address, false);
    let mut step = wizard.path_selection().unwrap();
    step.set_parent_password(secret("not-the-password")).unwrap();
    assert_eq!(step.validate().unwrap_err(), PathError::WrongPassword);
    assert!(step.confirm().is_err());
    assert_eq!(wizard.step_kind(), StepKind::SelectingPath);
}

#[tokio::test]
async fn test_soft_junction_rejected_by_backend() {
    let f = fixture();
    let (wizard, _) = wizard(&f.store, &f.root.address, false);
    let mut step = wizard.path_selection().unwrap();
    step.set_path("//0/soft");
    step.set_parent_password(secret(ROOT_PASSWORD)).unwrap();
    assert!(matches!(
        step.validate().unwrap_err(),
        PathError::InvalidPath(_)
    ));
}

#[tokio::test]
async fn test_existing_child_rejected_at_preview() {
    let f = fixture();
    let (first, _) = wizard(&f.store, &f.root.address, false);
    prepare(&first, "//5", "five");
    assert_eq!(first.commit().await, Some(CommitOutcome::Completed));

    let (again, _) = wizard(&f.store, &f.root.address, false);
    let mut step = again.path_selection().unwrap();
    step.set_path("//5");
    step.set_parent_password(secret(ROOT_PASSWORD)).unwrap();
    assert!(matches!(
        step.validate().unwrap_err(),
        PathError::AlreadyExists(_)
    ));
}

#[tokio::test]
async fn test_concurrent_wizards_second_commit_fails_cleanly() {
    let f = fixture();
    let (a, nav_a) = wizard(&f.store, &f.root.address, false);
    let (b, nav_b) = wizard(&f.store, &f.root.address, false);
    prepare(&a, "//0", "from-a");
    prepare(&b, "//0", "from-b");

    assert_eq!(a.commit().await, Some(CommitOutcome::Completed));
    assert_eq!(
        b.commit().await,
        Some(CommitOutcome::Failed(CommitFailure::AlreadyExists))
    );

    assert_eq!(nav_a.take_routes().len(), 1);
    assert!(nav_b.take_routes().is_empty());
    assert_eq!(b.step_kind(), StepKind::Finalizing(PhaseKind::Errored));
    assert_eq!(b.name().as_deref(), Some("from-b"));
    assert!(b.has_password());

    let stored: Vec<String> = f
        .store
        .list()
        .unwrap()
        .iter()
        .map(|ks| ks.name().to_string())
        .collect();
    assert_eq!(stored.len(), 2);
    assert!(stored.contains(&"from-a".to_string()));
}

#[tokio::test]
async fn test_path_password_changes_address_but_is_not_stored() {
    let f = fixture();
    let (plain, _) = wizard(&f.store, &f.root.address, false);
    prepare(&plain, "//0", "plain");
    let plain_address = plain.account().unwrap().address;
    assert_eq!(plain.commit().await, Some(CommitOutcome::Completed));

    let (hidden, _) = wizard(&f.store, &f.root.address, false);
    prepare(&hidden, "//0///hidden", "hidden");
    let hidden_address = hidden.account().unwrap().address;
    assert_ne!(plain_address, hidden_address);
    assert_eq!(hidden.commit().await, Some(CommitOutcome::Completed));

    let child = f.store.load(&hidden_address).unwrap();
    assert_eq!(child.file.suri.as_deref(), Some("//0"));
    let raw = serde_json::to_string(&child.file).unwrap();
    assert!(!raw.contains("hidden///"));
    assert!(!raw.contains("///hidden"));
}

#[tokio::test]
async fn test_locked_parent_uses_external_secret() {
    let f = fixture();
    let (wizard, navigator) = wizard(&f.store, &f.root.address, true);
    let mut step = wizard.path_selection().unwrap();
    assert_eq!(
        step.set_parent_password(secret(ROOT_PASSWORD)).unwrap_err(),
        PathError::SecretLocked
    );
    step.supply_external_secret(secret(ROOT_PASSWORD));
    wizard.confirm_derivation(step.confirm().unwrap()).unwrap();
    wizard.set_name("locked-child").unwrap();
    wizard.set_password(secret(CHILD_PASSWORD)).unwrap();

    assert_eq!(wizard.commit().await, Some(CommitOutcome::Completed));
    assert_eq!(navigator.take_routes(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_grandchild_inherits_nothing_but_genesis_lookup() {
    let f = fixture();
    let (first, _) = wizard(&f.store, &f.root.address, false);
    prepare(&first, "//0", "child");
    let child_address = first.account().unwrap().address;
    assert_eq!(first.commit().await, Some(CommitOutcome::Completed));

    // The child has its own password; derive below it.
    let (second, _) = wizard(&f.store, &child_address, false);
    assert_eq!(second.parent_genesis(), Some(f.genesis));
    let mut step = second.path_selection().unwrap();
    step.set_parent_password(secret(CHILD_PASSWORD)).unwrap();
    second.confirm_derivation(step.confirm().unwrap()).unwrap();
    second.set_name("grandchild").unwrap();
    second.set_password(secret("grandchild-password")).unwrap();
    assert_eq!(second.commit().await, Some(CommitOutcome::Completed));

    let records = f.store.records().unwrap();
    let grandchild = records
        .iter()
        .find(|r| r.name.as_deref() == Some("grandchild"))
        .unwrap();
    assert_eq!(grandchild.parent_address.as_deref(), Some(child_address.as_str()));
    assert_eq!(grandchild.genesis_hash, Some(f.genesis));
}
