use lineage_types::account::AccountRecord;
use lineage_types::primitives::GenesisHash;

/// Genesis hash of the account at `parent_address`, if the directory has one.
///
/// A miss is not an error: derivation proceeds without network context.
pub fn resolve_genesis(accounts: &[AccountRecord], parent_address: &str) -> Option<GenesisHash> {
    accounts
        .iter()
        .find(|a| a.address == parent_address)
        .and_then(|a| a.genesis_hash)
}

/// Suggest the next unused `//N` path below `parent_address`.
///
/// Starts from the number of existing children and skips indices already
/// taken by a child's recorded path.
pub fn next_derivation_path(accounts: &[AccountRecord], parent_address: &str) -> String {
    let children: Vec<&AccountRecord> = accounts
        .iter()
        .filter(|a| a.parent_address.as_deref() == Some(parent_address))
        .collect();

    let mut index = children.len();
    loop {
        let candidate = format!("//{}", index);
        if !children
            .iter()
            .any(|c| c.suri.as_deref() == Some(candidate.as_str()))
        {
            return candidate;
        }
        index += 1;
    }
}
