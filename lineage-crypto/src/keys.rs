use lineage_types::primitives::{Address, PublicKey};

use crate::address::pubkey_to_address;

/// Wrapper around an Ed25519 keypair.
///
/// `SigningKey` is built with the "zeroize" feature, so key material is wiped
/// when the keypair is dropped.
pub struct Keypair {
    inner: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.inner.verifying_key().to_bytes()
    }

    /// Address of this keypair's public key.
    pub fn address(&self) -> Address {
        pubkey_to_address(&self.public_key())
    }

    pub fn signing_key(&self) -> &ed25519_dalek::SigningKey {
        &self.inner
    }

    /// Get the 32-byte seed (secret key bytes) of this keypair.
    pub fn seed(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}
