use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use lineage_crypto::address::normalize_address;
use lineage_types::account::AccountRecord;
use tracing::{debug, info, warn};

use super::error::WalletError;
use super::keystore::{AccountFile, Keystore};

/// Distinguishes temporary files of concurrent inserts within one process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Account files under `<data_dir>/accounts/<address>.json`.
#[derive(Debug, Clone)]
pub struct AccountStore {
    data_dir: PathBuf,
}

impl AccountStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn accounts_dir(&self) -> PathBuf {
        self.data_dir.join("accounts")
    }

    /// File path for an address. The address is normalized first, so user
    /// input can never name a path outside the accounts directory.
    fn path_for(&self, address: &str) -> Result<PathBuf, WalletError> {
        let address = normalize_address(address)?;
        Ok(self.accounts_dir().join(format!("{}.json", address)))
    }

    pub fn exists(&self, address: &str) -> Result<bool, WalletError> {
        Ok(self.path_for(address)?.exists())
    }

    /// Load one account by address.
    pub fn load(&self, address: &str) -> Result<Keystore, WalletError> {
        let path = self.path_for(address)?;
        if !path.exists() {
            return Err(WalletError::AccountNotFound(address.to_string()));
        }
        read_account(&path)
    }

    /// All readable accounts, oldest first. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<Keystore>, WalletError> {
        let dir = self.accounts_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut accounts = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_account = path.extension().and_then(|e| e.to_str()) == Some("json")
                && !path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'));
            if !is_account {
                continue;
            }
            match read_account(&path) {
                Ok(ks) => accounts.push(ks),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable account file"),
            }
        }
        accounts.sort_by(|a, b| {
            a.file
                .created_at
                .cmp(&b.file.created_at)
                .then_with(|| a.file.name.cmp(&b.file.name))
        });
        Ok(accounts)
    }

    pub fn records(&self) -> Result<Vec<AccountRecord>, WalletError> {
        Ok(self.list()?.iter().map(Keystore::to_record).collect())
    }

    /// Write a new account file.
    ///
    /// The file is written to a temporary name and then linked into place,
    /// which fails instead of replacing an existing account.
    pub fn insert(&self, ks: &Keystore) -> Result<(), WalletError> {
        let dir = self.accounts_dir();
        ensure_private_dir(&self.data_dir)?;
        ensure_private_dir(&dir)?;

        let target = self.path_for(&ks.address)?;
        let tmp = dir.join(format!(
            ".{}.{}.{}.tmp",
            ks.address.trim_start_matches("0x"),
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let data = serde_json::to_string_pretty(&ks.file)?;
        write_private(&tmp, data.as_bytes())?;

        let linked = std::fs::hard_link(&tmp, &target);
        if let Err(e) = std::fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %e, "failed to remove temporary account file");
        }
        match linked {
            Ok(()) => {
                info!(address = %ks.address, name = %ks.file.name, "account saved");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(WalletError::AccountAlreadyExists(ks.address.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn read_account(path: &Path) -> Result<Keystore, WalletError> {
    debug!(path = %path.display(), "reading account file");
    let data = std::fs::read_to_string(path)?;
    let file: AccountFile = serde_json::from_str(&data)?;
    Keystore::from_file(file)
}

/// Create `dir` if needed, owner-only on Unix.
pub(crate) fn ensure_private_dir(dir: &Path) -> Result<(), WalletError> {
    std::fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Write `data` to `path`, owner read/write only on Unix.
pub(crate) fn write_private(path: &Path, data: &[u8]) -> Result<(), WalletError> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, data)?;
    }

    Ok(())
}
