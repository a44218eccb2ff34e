use clap::Subcommand;

/// Keystore subcommands.
#[derive(Subcommand)]
pub enum WalletCommand {
    /// Create a new account with a fresh mnemonic
    Create {
        /// Account name
        #[arg(long)]
        name: String,
        /// Network the account belongs to: a name from lineage.toml or a 0x genesis hash
        #[arg(long)]
        genesis: Option<String>,
    },
    /// Import an account from a mnemonic phrase
    Import {
        /// Account name
        #[arg(long, default_value = "imported")]
        name: String,
        /// Network the account belongs to: a name from lineage.toml or a 0x genesis hash
        #[arg(long)]
        genesis: Option<String>,
    },
    /// List all accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the active account
    Use {
        /// Address of the account to activate
        address: String,
    },
    /// Show the recovery phrase of a root account
    Export {
        /// Account address (defaults to the active account)
        #[arg(long)]
        address: Option<String>,
    },
    /// Derive a new account from an existing one
    Derive {
        /// Parent account address (defaults to the active account)
        #[arg(long)]
        parent: Option<String>,
        /// Read the parent password from LINEAGE_PARENT_PASSWORD instead of prompting
        #[arg(long)]
        locked: bool,
        /// Derivation path, e.g. "//0" or "//savings///pass"
        #[arg(long)]
        path: Option<String>,
    },
}
