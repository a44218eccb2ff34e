use lineage_crypto::seed::generate_mnemonic;
use lineage_derive::finalize::validate_name;
use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::wallet::error::WalletError;
use crate::wallet::format::print_mnemonic_box;
use crate::wallet::keystore::Keystore;
use crate::wallet::prompt::prompt_new_password;
use crate::wallet::WalletContext;

pub fn run(ctx: &WalletContext, name: &str, genesis: Option<&str>) -> Result<(), WalletError> {
    let name = validate_name(name)?;
    let genesis = super::genesis_arg(ctx, genesis)?;

    let mnemonic = generate_mnemonic();
    let phrase = Zeroizing::new(mnemonic.to_string());
    let words: Vec<&str> = phrase.split_whitespace().collect();

    let password = prompt_new_password("Enter password")?;
    let ks = Keystore::from_mnemonic(&name, &mnemonic, password.expose_secret(), genesis)?;
    super::save_new_account(ctx, &ks, "Account created:")?;

    print_mnemonic_box(&words);
    Ok(())
}
