use lineage_cli::wallet::error::WalletError;
use lineage_cli::wallet::keystore::Keystore;
use lineage_cli::wallet::store::AccountStore;
use lineage_crypto::seed::generate_mnemonic;
use lineage_types::primitives::GenesisHash;

fn new_account(name: &str) -> Keystore {
    Keystore::from_mnemonic(name, &generate_mnemonic(), "password", None).unwrap()
}

#[test]
fn test_insert_then_load_and_list() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    assert!(store.list().unwrap().is_empty());

    let ks = new_account("main");
    store.insert(&ks).unwrap();

    assert!(store.exists(&ks.address).unwrap());
    let loaded = store.load(&ks.address).unwrap();
    assert_eq!(loaded.name(), "main");
    assert_eq!(loaded.public_key, ks.public_key);
    assert_eq!(store.list().unwrap().len(), 1);

    let records = store.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, ks.address);
    assert!(!records[0].is_derived());
}

#[test]
fn test_load_accepts_uppercase_address() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let ks = new_account("main");
    store.insert(&ks).unwrap();

    let upper = format!("0x{}", ks.address.trim_start_matches("0x").to_uppercase());
    assert_eq!(store.load(&upper).unwrap().address, ks.address);
}

#[test]
fn test_duplicate_insert_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let mnemonic = generate_mnemonic();
    let first = Keystore::from_mnemonic("first", &mnemonic, "password", None).unwrap();
    let second = Keystore::from_mnemonic("second", &mnemonic, "password", None).unwrap();
    store.insert(&first).unwrap();

    assert!(matches!(
        store.insert(&second),
        Err(WalletError::AccountAlreadyExists(_))
    ));
    // The original file is untouched.
    assert_eq!(store.load(&first.address).unwrap().name(), "first");
}

#[test]
fn test_no_temporary_files_left_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let ks = new_account("main");
    store.insert(&ks).unwrap();
    let _ = store.insert(&ks);

    let names: Vec<String> = std::fs::read_dir(tmp.path().join("accounts"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("{}.json", ks.address)]);
}

#[test]
fn test_missing_account() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let missing = format!("0x{}", "11".repeat(20));
    assert!(matches!(
        store.load(&missing),
        Err(WalletError::AccountNotFound(_))
    ));
}

#[test]
fn test_malformed_address_never_touches_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    assert!(matches!(
        store.load("../../etc/passwd"),
        Err(WalletError::CryptoError(_))
    ));
}

#[test]
fn test_unreadable_files_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    store.insert(&new_account("main")).unwrap();
    std::fs::write(tmp.path().join("accounts").join("garbage.json"), "{").unwrap();

    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_genesis_hash_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let genesis = GenesisHash::new([7; 32]);
    let ks = Keystore::from_mnemonic("main", &generate_mnemonic(), "password", Some(genesis))
        .unwrap();
    store.insert(&ks).unwrap();

    assert_eq!(store.records().unwrap()[0].genesis_hash, Some(genesis));
}

#[cfg(unix)]
#[test]
fn test_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path());
    let ks = new_account("main");
    store.insert(&ks).unwrap();

    let dir_mode = std::fs::metadata(tmp.path().join("accounts"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(dir_mode & 0o777, 0o700);

    let file = tmp.path().join("accounts").join(format!("{}.json", ks.address));
    let file_mode = std::fs::metadata(file).unwrap().permissions().mode();
    assert_eq!(file_mode & 0o777, 0o600);
}
