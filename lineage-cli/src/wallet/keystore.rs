use bip39::Mnemonic;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use lineage_crypto::address::format_address;
use lineage_crypto::encryption::{
    open, password_keypair, random_salt, seal, SealedBox, PASSWORD_SALT_LEN,
};
use lineage_crypto::hd::derive_root_keypair;
use lineage_crypto::keys::Keypair;
use lineage_crypto::seed::mnemonic_to_seed;
use lineage_crypto::suri::public_path;
use lineage_types::account::AccountRecord;
use lineage_types::constants::ACCOUNT_FILE_VERSION;
use lineage_types::primitives::{GenesisHash, PublicKey};

use super::error::WalletError;

/// Serializable sealed box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedBlob {
    pub ephemeral_pubkey: String,
    pub nonce: String,
    pub ciphertext: String,
}

impl EncryptedBlob {
    fn from_sealed(sealed: &SealedBox) -> Self {
        Self {
            ephemeral_pubkey: hex::encode(sealed.ephemeral_pubkey),
            nonce: hex::encode(sealed.nonce),
            ciphertext: hex::encode(&sealed.ciphertext),
        }
    }

    fn to_sealed(&self) -> Result<SealedBox, WalletError> {
        Ok(SealedBox {
            ephemeral_pubkey: decode_fixed("ephemeral pubkey", &self.ephemeral_pubkey)?,
            nonce: decode_fixed("nonce", &self.nonce)?,
            ciphertext: hex::decode(&self.ciphertext)
                .map_err(|e| WalletError::SerializationError(format!("ciphertext: {}", e)))?,
        })
    }
}

fn decode_fixed<const N: usize>(what: &str, text: &str) -> Result<[u8; N], WalletError> {
    let bytes = hex::decode(text)
        .map_err(|e| WalletError::SerializationError(format!("{}: {}", what, e)))?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        WalletError::SerializationError(format!(
            "{}: expected {} bytes, got {}",
            what,
            N,
            bytes.len()
        ))
    })
}

/// On-disk account file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFile {
    pub version: u32,
    pub name: String,
    pub created_at: u64,
    pub address: String,
    pub public_key: String,
    #[serde(default)]
    pub genesis_hash: Option<GenesisHash>,
    #[serde(default)]
    pub parent_address: Option<String>,
    /// Derivation path from the parent, without any password suffix.
    #[serde(default)]
    pub suri: Option<String>,
    pub has_mnemonic: bool,
    /// Argon2id salt for this file's password.
    pub salt: String,
    /// The account's 32-byte secret seed.
    pub encrypted_seed: EncryptedBlob,
    pub encrypted_mnemonic: Option<EncryptedBlob>,
}

/// In-memory representation of a loaded account.
pub struct Keystore {
    pub address: String,
    pub public_key: PublicKey,
    pub file: AccountFile,
}

impl Keystore {
    /// Create a root account from a mnemonic and password.
    pub fn from_mnemonic(
        name: &str,
        mnemonic: &Mnemonic,
        password: &str,
        genesis_hash: Option<GenesisHash>,
    ) -> Result<Self, WalletError> {
        let seed = mnemonic_to_seed(mnemonic, "");
        let keypair = derive_root_keypair(&seed);
        let phrase = Zeroizing::new(mnemonic.to_string());
        Self::build(name, &keypair, password, genesis_hash, Some(phrase.as_str()))
    }

    /// Create an account derived from `parent_address` along `suri`.
    ///
    /// `child` is the already derived keypair. Only the public part of the
    /// path is recorded.
    pub fn derived(
        name: &str,
        parent_address: &str,
        suri: &str,
        child: &Keypair,
        password: &str,
        genesis_hash: Option<GenesisHash>,
    ) -> Result<Self, WalletError> {
        let mut ks = Self::build(name, child, password, genesis_hash, None)?;
        ks.file.parent_address = Some(parent_address.to_string());
        ks.file.suri = Some(public_path(suri).to_string());
        Ok(ks)
    }

    fn build(
        name: &str,
        keypair: &Keypair,
        password: &str,
        genesis_hash: Option<GenesisHash>,
        mnemonic: Option<&str>,
    ) -> Result<Self, WalletError> {
        let salt = random_salt();
        let sealing = password_keypair(password, &salt)?;

        let seed = Zeroizing::new(keypair.seed());
        let encrypted_seed = seal(&sealing, &seed[..])?;
        let encrypted_mnemonic = mnemonic
            .map(|phrase| seal(&sealing, phrase.as_bytes()))
            .transpose()?;

        let address = format_address(&keypair.address());
        let public_key = keypair.public_key();
        let file = AccountFile {
            version: ACCOUNT_FILE_VERSION,
            name: name.to_string(),
            created_at: chrono::Utc::now().timestamp().max(0) as u64,
            address: address.clone(),
            public_key: hex::encode(public_key),
            genesis_hash,
            parent_address: None,
            suri: None,
            has_mnemonic: mnemonic.is_some(),
            salt: hex::encode(salt),
            encrypted_seed: EncryptedBlob::from_sealed(&encrypted_seed),
            encrypted_mnemonic: encrypted_mnemonic.as_ref().map(EncryptedBlob::from_sealed),
        };

        Ok(Self {
            address,
            public_key,
            file,
        })
    }

    /// Rebuild from a parsed file, checking the fields that must be well formed.
    pub fn from_file(file: AccountFile) -> Result<Self, WalletError> {
        if file.version != ACCOUNT_FILE_VERSION {
            return Err(WalletError::SerializationError(format!(
                "unsupported account file version {}",
                file.version
            )));
        }
        let address = lineage_crypto::address::normalize_address(&file.address)?;
        let public_key = decode_fixed("public key", &file.public_key)?;
        Ok(Self {
            address,
            public_key,
            file,
        })
    }

    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// Decrypt the account's keypair.
    pub fn unlock(&self, password: &str) -> Result<Keypair, WalletError> {
        let salt: [u8; PASSWORD_SALT_LEN] = decode_fixed("salt", &self.file.salt)?;
        let opening = password_keypair(password, &salt)?;
        let sealed = self.file.encrypted_seed.to_sealed()?;
        let seed_bytes = open(&opening, &sealed).map_err(|_| WalletError::InvalidPassword)?;

        let seed = Zeroizing::new(<[u8; 32]>::try_from(&seed_bytes[..]).map_err(|_| {
            WalletError::SerializationError("stored seed must be 32 bytes".to_string())
        })?);
        let keypair = Keypair::from_seed(&seed);
        if keypair.public_key() != self.public_key {
            return Err(WalletError::SerializationError(
                "decrypted key does not match the stored public key".to_string(),
            ));
        }
        Ok(keypair)
    }

    /// Decrypt the mnemonic phrase if the account has one.
    pub fn decrypt_mnemonic(&self, password: &str) -> Result<Option<Zeroizing<String>>, WalletError> {
        let Some(blob) = &self.file.encrypted_mnemonic else {
            return Ok(None);
        };
        let salt: [u8; PASSWORD_SALT_LEN] = decode_fixed("salt", &self.file.salt)?;
        let opening = password_keypair(password, &salt)?;
        let bytes = open(&opening, &blob.to_sealed()?).map_err(|_| WalletError::InvalidPassword)?;
        let phrase = std::str::from_utf8(&bytes[..])
            .map_err(|e| WalletError::SerializationError(e.to_string()))?;
        Ok(Some(Zeroizing::new(phrase.to_string())))
    }

    /// The directory entry for this account.
    pub fn to_record(&self) -> AccountRecord {
        AccountRecord {
            address: self.address.clone(),
            name: Some(self.file.name.clone()),
            genesis_hash: self.file.genesis_hash,
            parent_address: self.file.parent_address.clone(),
            suri: self.file.suri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_crypto::hd::derive_keypair;
    use lineage_crypto::seed::generate_mnemonic;

    #[test]
    fn test_create_and_unlock_roundtrip() {
        let mnemonic = generate_mnemonic();
        let ks = Keystore::from_mnemonic("main", &mnemonic, "mypassword", None).unwrap();

        let keypair = ks.unlock("mypassword").unwrap();
        assert_eq!(keypair.public_key(), ks.public_key);
        assert_eq!(format_address(&keypair.address()), ks.address);
    }

    #[test]
    fn test_wrong_password_fails() {
        let mnemonic = generate_mnemonic();
        let ks = Keystore::from_mnemonic("main", &mnemonic, "correct", None).unwrap();
        assert!(matches!(ks.unlock("wrong"), Err(WalletError::InvalidPassword)));
    }

    #[test]
    fn test_mnemonic_decrypt_roundtrip() {
        let mnemonic = generate_mnemonic();
        let phrase = mnemonic.to_string();
        let ks = Keystore::from_mnemonic("main", &mnemonic, "pass", None).unwrap();

        let recovered = ks.decrypt_mnemonic("pass").unwrap().unwrap();
        assert_eq!(recovered.as_str(), phrase);
    }

    #[test]
    fn test_same_mnemonic_same_address() {
        let mnemonic = generate_mnemonic();
        let a = Keystore::from_mnemonic("a", &mnemonic, "pass-one", None).unwrap();
        let b = Keystore::from_mnemonic("b", &mnemonic, "pass-two", None).unwrap();
        assert_eq!(a.address, b.address);
        assert_ne!(a.file.salt, b.file.salt);
    }

    #[test]
    fn test_derived_records_public_path_only() {
        let child = derive_keypair(&[9u8; 32], "//0///secret").unwrap();
        let genesis = Some(GenesisHash::new([3; 32]));
        let ks = Keystore::derived("child", "0xparent", "//0///secret", &child, "pass", genesis)
            .unwrap();

        assert!(!ks.file.has_mnemonic);
        assert!(ks.file.encrypted_mnemonic.is_none());
        let record = ks.to_record();
        assert_eq!(record.parent_address.as_deref(), Some("0xparent"));
        assert_eq!(record.suri.as_deref(), Some("//0"));
        assert_eq!(record.genesis_hash, genesis);
        assert_eq!(record.name.as_deref(), Some("child"));
        assert!(ks.decrypt_mnemonic("pass").unwrap().is_none());
        assert_eq!(ks.unlock("pass").unwrap().public_key(), child.public_key());
    }

    #[test]
    fn test_file_json_roundtrip() {
        let ks = Keystore::from_mnemonic("main", &generate_mnemonic(), "pass", None).unwrap();
        let json = serde_json::to_string(&ks.file).unwrap();
        let file: AccountFile = serde_json::from_str(&json).unwrap();
        let reloaded = Keystore::from_file(file).unwrap();
        assert_eq!(reloaded.address, ks.address);
        assert_eq!(reloaded.unlock("pass").unwrap().public_key(), ks.public_key);
    }

    #[test]
    fn test_from_file_rejects_unknown_version() {
        let mut ks = Keystore::from_mnemonic("main", &generate_mnemonic(), "pass", None).unwrap();
        ks.file.version = ACCOUNT_FILE_VERSION + 1;
        assert!(Keystore::from_file(ks.file).is_err());
    }

    #[test]
    fn test_blob_with_bad_nonce_length_is_rejected() {
        let blob = EncryptedBlob {
            ephemeral_pubkey: hex::encode([0u8; 32]),
            nonce: hex::encode([0u8; 12]),
            ciphertext: String::new(),
        };
        assert!(matches!(
            blob.to_sealed(),
            Err(WalletError::SerializationError(_))
        ));
    }
}
