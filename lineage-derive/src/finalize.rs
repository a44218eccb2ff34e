use lineage_types::constants::{MAX_ACCOUNT_NAME_LEN, MIN_PASSWORD_LEN};
use secrecy::{ExposeSecret, SecretString};

use crate::error::WizardError;

/// Trim and check a display name.
pub fn validate_name(raw: &str) -> Result<String, WizardError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(WizardError::InvalidName("name is empty".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_ACCOUNT_NAME_LEN {
        return Err(WizardError::InvalidName(format!(
            "{} characters, at most {} allowed",
            len, MAX_ACCOUNT_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

pub fn validate_password(password: &SecretString) -> Result<(), WizardError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
        return Err(WizardError::InvalidPassword(format!(
            "must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Step 2: the name and new password for the derived account.
///
/// An invalid entry clears the field, so a stale valid value never survives
/// a rejected edit.
#[derive(Debug, Default)]
pub struct AccountFinalizationStep {
    name: Option<String>,
    password: Option<SecretString>,
}

impl AccountFinalizationStep {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn set_name(&mut self, raw: &str) -> Result<(), WizardError> {
        match validate_name(raw) {
            Ok(name) => {
                self.name = Some(name);
                Ok(())
            }
            Err(e) => {
                self.name = None;
                Err(e)
            }
        }
    }

    pub fn set_password(&mut self, password: SecretString) -> Result<(), WizardError> {
        match validate_password(&password) {
            Ok(()) => {
                self.password = Some(password);
                Ok(())
            }
            Err(e) => {
                self.password = None;
                Err(e)
            }
        }
    }

    pub fn clear_password(&mut self) {
        self.password = None;
    }

    pub fn clear(&mut self) {
        self.name = None;
        self.password = None;
    }

    pub fn is_ready(&self) -> bool {
        self.name.is_some() && self.password.is_some()
    }

    /// Copies of name and password for a commit, or `None` if either is missing.
    pub(crate) fn ready(&self) -> Option<(String, SecretString)> {
        let name = self.name.clone()?;
        let password = self.password.as_ref()?;
        Some((name, SecretString::new(password.expose_secret().into())))
    }
}
