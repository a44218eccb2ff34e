use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use lineage_types::error::LineageError;
use rand::RngCore;
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};
use zeroize::Zeroizing;

use crate::keys::Keypair;

/// Length of the per-account password salt.
pub const PASSWORD_SALT_LEN: usize = 16;

/// Output of an encryption operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    /// Ephemeral X25519 public key (32 bytes).
    pub ephemeral_pubkey: [u8; 32],
    /// XChaCha20-Poly1305 nonce (24 bytes).
    pub nonce: [u8; 24],
    /// Encrypted ciphertext with authentication tag.
    pub ciphertext: Vec<u8>,
}

/// Derive an X25519 static secret from an Ed25519 keypair using BLAKE3 KDF.
/// Both seal and open use this same derivation so the shared secrets match.
fn keypair_to_x25519_secret(keypair: &Keypair) -> StaticSecret {
    let sk_bytes = Zeroizing::new(keypair.signing_key().to_bytes());
    let x_secret = crate::hash::blake3_kdf("lineage-ed25519-to-x25519", &sk_bytes[..]);
    StaticSecret::from(x_secret)
}

/// Generate a random password salt.
pub fn random_salt() -> [u8; PASSWORD_SALT_LEN] {
    let mut salt = [0u8; PASSWORD_SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Stretch a password into the keypair that seals an account's secrets.
///
/// Argon2id with default parameters over the account's own salt.
pub fn password_keypair(
    password: &str,
    salt: &[u8; PASSWORD_SALT_LEN],
) -> Result<Keypair, LineageError> {
    let mut seed = Zeroizing::new([0u8; 32]);
    argon2::Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut seed[..])
        .map_err(|e| LineageError::EncryptionFailed {
            reason: e.to_string(),
        })?;
    Ok(Keypair::from_seed(&seed))
}

/// Encrypt `plaintext` so that only `recipient` can open it.
///
/// Uses ephemeral X25519 Diffie-Hellman + XChaCha20-Poly1305 AEAD.
pub fn seal(recipient: &Keypair, plaintext: &[u8]) -> Result<SealedBox, LineageError> {
    let recipient_x = X25519Public::from(&keypair_to_x25519_secret(recipient));

    let mut rng = rand::rngs::OsRng;
    let ephemeral_secret = StaticSecret::random_from_rng(rng);
    let ephemeral_public = X25519Public::from(&ephemeral_secret);

    let shared_secret = ephemeral_secret.diffie_hellman(&recipient_x);
    let encryption_key = Zeroizing::new(crate::hash::blake3_kdf(
        "lineage-encryption-key",
        shared_secret.as_bytes(),
    ));

    let mut nonce_bytes = [0u8; 24];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let cipher = XChaCha20Poly1305::new_from_slice(&encryption_key[..]).map_err(|e| {
        LineageError::EncryptionFailed {
            reason: e.to_string(),
        }
    })?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LineageError::EncryptionFailed {
            reason: e.to_string(),
        })?;

    Ok(SealedBox {
        ephemeral_pubkey: ephemeral_public.to_bytes(),
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt a sealed box with the recipient's keypair.
pub fn open(keypair: &Keypair, sealed: &SealedBox) -> Result<Zeroizing<Vec<u8>>, LineageError> {
    let recipient_secret = keypair_to_x25519_secret(keypair);
    let ephemeral_x = X25519Public::from(sealed.ephemeral_pubkey);
    let shared_secret = recipient_secret.diffie_hellman(&ephemeral_x);
    let encryption_key = Zeroizing::new(crate::hash::blake3_kdf(
        "lineage-encryption-key",
        shared_secret.as_bytes(),
    ));

    let cipher = XChaCha20Poly1305::new_from_slice(&encryption_key[..]).map_err(|e| {
        LineageError::DecryptionFailed {
            reason: e.to_string(),
        }
    })?;
    cipher
        .decrypt(XNonce::from_slice(&sealed.nonce), sealed.ciphertext.as_slice())
        .map(Zeroizing::new)
        .map_err(|e| LineageError::DecryptionFailed {
            reason: e.to_string(),
        })
}
