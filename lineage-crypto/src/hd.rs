use lineage_types::constants::LINEAGE_COIN_TYPE;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::hash::blake3_kdf_multi;
use crate::keys::Keypair;
use crate::suri::{DerivationPath, Junction, SuriError};

/// Errors raised while applying a derivation path to a seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("soft junction '/{0}' is not supported for ed25519 keys")]
    SoftJunction(String),

    #[error("malformed derivation path: {0}")]
    Path(#[from] SuriError),
}

/// Derive the root Ed25519 keypair of a mnemonic account using SLIP-0010.
///
/// Path: m/44'/{LINEAGE_COIN_TYPE}'/0'/0'/0'
///
/// All path components are hardened (required for Ed25519 by SLIP-0010).
pub fn derive_root_keypair(seed: &[u8; 64]) -> Keypair {
    let path = [44, LINEAGE_COIN_TYPE, 0, 0, 0];
    let derived = Zeroizing::new(slip10_ed25519::derive_ed25519_private_key(seed, &path));
    Keypair::from_seed(&derived)
}

/// Apply `path` to a parent's 32-byte secret seed, returning the child seed.
///
/// Every junction must be hard. A password suffix, if present, is mixed in
/// after the last junction.
pub fn derive_child_seed(
    parent_seed: &[u8; 32],
    path: &DerivationPath,
) -> Result<Zeroizing<[u8; 32]>, DerivationError> {
    let mut seed = Zeroizing::new(*parent_seed);
    for junction in path.junctions() {
        match junction {
            Junction::Hard(_) => {
                let cc = junction.chain_code();
                *seed = blake3_kdf_multi("lineage-hdkd-hard", &[&seed[..], &cc[..]]);
            }
            Junction::Soft(segment) => {
                return Err(DerivationError::SoftJunction(segment.clone()));
            }
        }
    }
    if let Some(password) = path.password() {
        *seed = blake3_kdf_multi(
            "lineage-hdkd-password",
            &[&seed[..], password.as_bytes()],
        );
    }
    Ok(seed)
}

/// Derive the child keypair for `suri` from a parent seed.
pub fn derive_keypair(parent_seed: &[u8; 32], suri: &str) -> Result<Keypair, DerivationError> {
    let path = DerivationPath::parse(suri)?;
    let child = derive_child_seed(parent_seed, &path)?;
    Ok(Keypair::from_seed(&child))
}
