use clap::Parser;

use crate::config::AppConfig;
use crate::error::CliError;
use crate::wallet::cli::WalletCommand;
use crate::wallet::WalletContext;

#[derive(Parser)]
#[command(
    name = "lineage",
    about = "Encrypted keystore with hierarchical account derivation",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "lineage.toml")]
    pub config: String,
    /// Override data directory path
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
    #[command(subcommand)]
    pub command: WalletCommand,
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");
    let ctx = WalletContext::new(data_dir, config);
    crate::wallet::run(&ctx, cli.command).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_derive_flags() {
        let cli = Cli::try_parse_from([
            "lineage",
            "--data-dir",
            "/tmp/x",
            "derive",
            "--locked",
            "--path",
            "//1",
        ])
        .unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert_eq!(cli.config, "lineage.toml");
        match cli.command {
            WalletCommand::Derive {
                parent,
                locked,
                path,
            } => {
                assert!(parent.is_none());
                assert!(locked);
                assert_eq!(path.as_deref(), Some("//1"));
            }
            _ => panic!("expected derive"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lineage", "list", "--json", "--config", "other.toml"])
            .unwrap();
        assert_eq!(cli.config, "other.toml");
        assert!(matches!(cli.command, WalletCommand::List { json: true }));
    }

    #[test]
    fn test_parse_export_defaults_to_active_account() {
        let cli = Cli::try_parse_from(["lineage", "export"]).unwrap();
        assert!(matches!(cli.command, WalletCommand::Export { address: None }));
    }
}
