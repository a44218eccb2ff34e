// ─── Account Parameters ──────────────────────────────────────────────────────

/// Maximum length of an account display name, in characters.
pub const MAX_ACCOUNT_NAME_LEN: usize = 32;

/// Minimum length of an account password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length of an account address in bytes (BLAKE3(pubkey)[0..20]).
pub const ADDRESS_LEN: usize = 20;

/// Length of a genesis hash in bytes.
pub const GENESIS_HASH_LEN: usize = 32;

// ─── Derivation Parameters ───────────────────────────────────────────────────

/// Maximum number of junctions accepted in a single derivation path.
pub const MAX_DERIVATION_DEPTH: usize = 32;

/// Maximum length of a derivation path expression, in bytes.
pub const MAX_SURI_LEN: usize = 512;

/// SLIP-0010 coin type used for root accounts created from a mnemonic.
pub const LINEAGE_COIN_TYPE: u32 = 0x4c4e;

// ─── Keystore Parameters ─────────────────────────────────────────────────────

/// Current on-disk account file version.
pub const ACCOUNT_FILE_VERSION: u32 = 1;

/// Route the wizard requests after a successful commit (the account list).
pub const ACCOUNT_LIST_ROUTE: &str = "/";
