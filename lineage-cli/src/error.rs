use thiserror::Error;

use crate::wallet::error::WalletError;

/// Errors that end a `lineage` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("{0}")]
    WalletError(#[from] WalletError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
