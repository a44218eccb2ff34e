pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod keystore;
pub mod navigator;
pub mod prompt;
pub mod store;
pub mod ui;

use std::path::PathBuf;

use cli::WalletCommand;
use config::WalletState;
use error::WalletError;
use store::AccountStore;

use crate::config::AppConfig;

/// What every keystore command needs: where accounts live and the loaded config.
pub struct WalletContext {
    pub store: AccountStore,
    pub config: AppConfig,
}

impl WalletContext {
    pub fn new(data_dir: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            store: AccountStore::new(data_dir),
            config,
        }
    }

    pub fn state(&self) -> Result<WalletState, WalletError> {
        WalletState::load(self.store.data_dir())
    }

    pub fn save_state(&self, state: &WalletState) -> Result<(), WalletError> {
        state.save(self.store.data_dir())
    }
}

/// Run a keystore subcommand.
pub async fn run(ctx: &WalletContext, command: WalletCommand) -> Result<(), WalletError> {
    match command {
        WalletCommand::Create { name, genesis } => {
            commands::create::run(ctx, &name, genesis.as_deref())
        }
        WalletCommand::Import { name, genesis } => {
            commands::import::run(ctx, &name, genesis.as_deref())
        }
        WalletCommand::List { json } => commands::list::run(ctx, json),
        WalletCommand::Use { address } => commands::use_account::run(ctx, &address),
        WalletCommand::Export { address } => commands::export::run(ctx, address.as_deref()),
        WalletCommand::Derive {
            parent,
            locked,
            path,
        } => commands::derive::run(ctx, parent.as_deref(), locked, path.as_deref()).await,
    }
}
