use dialoguer::{Confirm, Input, Password, Select};
use lineage_derive::finalize::validate_password;
use secrecy::SecretString;

use super::error::WalletError;
use super::format::print_error;

/// Prompt for a password (hidden input).
pub fn prompt_password(prompt: &str) -> Result<SecretString, WalletError> {
    let password = Password::new().with_prompt(prompt).interact()?;
    Ok(SecretString::new(password.into()))
}

/// Prompt for a new password with confirmation, repeating until it is
/// acceptable.
pub fn prompt_new_password(prompt: &str) -> Result<SecretString, WalletError> {
    loop {
        let password = Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;
        let password = SecretString::new(password.into());
        match validate_password(&password) {
            Ok(()) => return Ok(password),
            Err(e) => print_error(&e.to_string(), None),
        }
    }
}

/// Prompt for a line of text, pre-filled with `default` if given.
pub fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String, WalletError> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    Ok(input.interact_text()?)
}

/// Ask the user to pick one of `items`, returning its index.
pub fn select(prompt: &str, items: &[&str]) -> Result<usize, WalletError> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool, WalletError> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
