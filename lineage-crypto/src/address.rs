use lineage_types::constants::ADDRESS_LEN;
use lineage_types::error::LineageError;
use lineage_types::primitives::{Address, PublicKey};

use crate::hash::blake3_hash;

/// Derive an address from a public key.
/// Address = BLAKE3(pubkey)[0..20]
pub fn pubkey_to_address(pubkey: &PublicKey) -> Address {
    let hash = blake3_hash(pubkey);
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&hash[..ADDRESS_LEN]);
    address
}

/// Format an Address as a 0x-prefixed hex string.
pub fn format_address(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Parse a hex address string (with or without 0x prefix) into an Address.
pub fn parse_address(s: &str) -> Result<Address, LineageError> {
    let hex_str = s.strip_prefix("0x").unwrap_or(s);
    if hex_str.len() != ADDRESS_LEN * 2 {
        return Err(LineageError::InvalidAddress {
            reason: format!("expected {} hex chars, got {}", ADDRESS_LEN * 2, hex_str.len()),
        });
    }
    let bytes = hex::decode(hex_str).map_err(|e| LineageError::InvalidAddress {
        reason: format!("invalid hex: {}", e),
    })?;
    let mut addr = [0u8; ADDRESS_LEN];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Normalize user-supplied address text to the canonical lowercase 0x form.
pub fn normalize_address(s: &str) -> Result<String, LineageError> {
    parse_address(s.trim()).map(|a| format_address(&a))
}
