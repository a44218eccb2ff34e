use bip39::Mnemonic;
use lineage_types::error::LineageError;
use zeroize::Zeroizing;

/// Generate a new 24-word BIP-39 mnemonic.
pub fn generate_mnemonic() -> Mnemonic {
    // 24 words = 256 bits of entropy = 32 bytes
    let mut entropy = Zeroizing::new([0u8; 32]);
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy[..]);
    Mnemonic::from_entropy(&entropy[..]).expect("32 bytes is valid entropy for 24 words")
}

/// Parse a mnemonic from a string of space-separated words.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, LineageError> {
    Mnemonic::parse_normalized(phrase).map_err(|_| LineageError::InvalidMnemonic)
}

/// Derive a 64-byte seed from a mnemonic with an optional passphrase.
/// Uses BIP-39 PBKDF2 derivation.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> Zeroizing<[u8; 64]> {
    Zeroizing::new(mnemonic.to_seed(passphrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mnemonic_is_24_words() {
        assert_eq!(generate_mnemonic().word_count(), 24);
    }

    #[test]
    fn test_mnemonic_roundtrip() {
        let mnemonic = generate_mnemonic();
        let recovered = parse_mnemonic(&mnemonic.to_string()).unwrap();
        assert_eq!(mnemonic.to_string(), recovered.to_string());
    }

    #[test]
    fn test_mnemonic_different_passphrase_different_seed() {
        let mnemonic = generate_mnemonic();
        assert_ne!(
            *mnemonic_to_seed(&mnemonic, ""),
            *mnemonic_to_seed(&mnemonic, "password")
        );
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        assert_eq!(
            parse_mnemonic("not a valid mnemonic phrase").unwrap_err(),
            LineageError::InvalidMnemonic
        );
    }
}
