use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{ADDRESS_LEN, GENESIS_HASH_LEN};
use crate::error::LineageError;

/// 32-byte BLAKE3 hash.
pub type Hash = [u8; 32];

/// 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// 20-byte address derived from BLAKE3(pubkey)[0..20].
pub type Address = [u8; ADDRESS_LEN];

/// Identifier of the network an account belongs to.
///
/// Text form is `0x` followed by 64 lowercase hex characters. Parsing accepts
/// the bare hex form as well.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenesisHash([u8; GENESIS_HASH_LEN]);

impl GenesisHash {
    pub const fn new(bytes: [u8; GENESIS_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; GENESIS_HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for GenesisHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GenesisHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenesisHash({self})")
    }
}

impl FromStr for GenesisHash {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        if hex_str.len() != GENESIS_HASH_LEN * 2 {
            return Err(LineageError::InvalidGenesisHash {
                reason: format!(
                    "expected {} hex chars, got {}",
                    GENESIS_HASH_LEN * 2,
                    hex_str.len()
                ),
            });
        }
        let bytes = hex::decode(hex_str).map_err(|e| LineageError::InvalidGenesisHash {
            reason: e.to_string(),
        })?;
        let mut out = [0u8; GENESIS_HASH_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for GenesisHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GenesisHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
