pub mod create;
pub mod derive;
pub mod export;
pub mod import;
pub mod list;
pub mod use_account;

use lineage_types::primitives::GenesisHash;

use super::error::WalletError;
use super::format::{format_genesis, print_success, style_bold};
use super::keystore::Keystore;
use super::ui::{info_table, print_table};
use super::WalletContext;

/// Resolve an optional `--genesis` argument.
fn genesis_arg(ctx: &WalletContext, arg: Option<&str>) -> Result<Option<GenesisHash>, WalletError> {
    Ok(arg.map(|g| ctx.config.resolve_genesis(g)).transpose()?)
}

/// Store a new root account, make it active if nothing is, and print it.
fn save_new_account(ctx: &WalletContext, ks: &Keystore, heading: &str) -> Result<(), WalletError> {
    ctx.store.insert(ks)?;

    let mut state = ctx.state()?;
    if state.active_account.is_none() {
        state.active_account = Some(ks.address.clone());
        ctx.save_state(&state)?;
    }

    let network = ks.file.genesis_hash.as_ref().map(|g| {
        format_genesis(Some(g), ctx.config.network_name(g))
    });

    println!();
    println!(
        "  {} {}",
        style_bold().apply_to(heading),
        style_bold().apply_to(ks.name())
    );
    let mut table = info_table();
    table.add_row(vec!["Address", ks.address.as_str()]);
    table.add_row(vec!["Public key".to_string(), hex::encode(ks.public_key)]);
    if let Some(network) = network {
        table.add_row(vec!["Network".to_string(), network]);
    }
    print_table(&table);
    print_success("Account saved and encrypted.");
    Ok(())
}
