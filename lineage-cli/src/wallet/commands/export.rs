use lineage_crypto::address::normalize_address;
use secrecy::ExposeSecret;

use crate::wallet::error::WalletError;
use crate::wallet::format::{format_address_short, print_error, style_bold, style_warn};
use crate::wallet::prompt::{confirm, prompt_password};
use crate::wallet::WalletContext;

pub fn run(ctx: &WalletContext, address: Option<&str>) -> Result<(), WalletError> {
    let address = match address {
        Some(a) => normalize_address(a)?,
        None => ctx.state()?.active_account()?.to_string(),
    };
    let ks = ctx.store.load(&address)?;

    if !ks.file.has_mnemonic {
        let hint = ks.file.parent_address.as_deref().map(|p| {
            format!(
                "it is derived from {}; export that account instead",
                format_address_short(p)
            )
        });
        print_error(
            &format!("'{}' has no recovery phrase", ks.name()),
            hint.as_deref(),
        );
        return Ok(());
    }

    println!();
    println!(
        "  {}",
        style_warn().apply_to("WARNING: This will display the account's recovery phrase.")
    );
    if !confirm("Continue?")? {
        println!("  Cancelled.");
        return Ok(());
    }

    let password = prompt_password("Enter password")?;
    match ks.decrypt_mnemonic(password.expose_secret())? {
        Some(phrase) => {
            println!();
            println!("  {}", style_bold().apply_to("Mnemonic:"));
            println!("  {}", phrase.as_str());
            println!();
        }
        None => print_error("the account file holds no recovery phrase", None),
    }
    Ok(())
}
