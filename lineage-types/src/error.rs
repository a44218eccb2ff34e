use thiserror::Error;

/// Error codes shared across the lineage crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineageError {
    // ─── Crypto Errors ───────────────────────────────────────────────────────
    #[error("invalid mnemonic phrase")]
    InvalidMnemonic,

    #[error("encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error("decryption failed: {reason}")]
    DecryptionFailed { reason: String },

    // ─── Encoding Errors ─────────────────────────────────────────────────────
    #[error("invalid genesis hash: {reason}")]
    InvalidGenesisHash { reason: String },

    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_failed_display() {
        let err = LineageError::DecryptionFailed {
            reason: "aead tag mismatch".to_string(),
        };
        assert!(err.to_string().contains("aead tag mismatch"));
    }

    #[test]
    fn test_invalid_genesis_display() {
        let err = LineageError::InvalidGenesisHash {
            reason: "expected 64 hex chars".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid genesis hash: expected 64 hex chars"
        );
    }
}
