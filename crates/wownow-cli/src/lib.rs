//! WowNow local vault command-line interface.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wownow_core::env::vars;

/// WowNow - inspect and edit the client's encrypted local storage
#[derive(Parser)]
#[command(name = "wownow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = vars::CONFIG, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the local storage file (overrides config)
    #[arg(long, env = vars::STORE, global = true)]
    pub store: Option<PathBuf>,

    /// Origin mixed into the storage key (overrides config)
    #[arg(long, env = vars::ORIGIN, global = true)]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt and store a JSON value
    Save {
        /// Storage key
        key: String,

        /// Value as JSON text
        json: String,
    },

    /// Decrypt and print a stored value
    Load {
        /// Storage key
        key: String,
    },

    /// List stored keys
    Keys,

    /// Remove a stored key
    Remove {
        /// Storage key
        key: String,
    },

    /// Remove every stored key
    Clear,

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = commands::Overrides {
        config: cli.config,
        store: cli.store,
        origin: cli.origin,
    };

    match cli.command {
        Commands::Save { key, json } => commands::store::save(&overrides, &key, &json).await,
        Commands::Load { key } => commands::store::load(&overrides, &key).await,
        Commands::Keys => commands::store::keys(&overrides),
        Commands::Remove { key } => commands::store::remove(&overrides, &key).await,
        Commands::Clear => commands::store::clear(&overrides).await,
        Commands::Config(args) => commands::config::run(&overrides, args),
        Commands::Version => {
            println!("wownow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["wownow", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_save() {
        let cli = Cli::try_parse_from(["wownow", "save", "k1", r#"{"a":1}"#]).unwrap();
        match cli.command {
            Commands::Save { key, json } => {
                assert_eq!(key, "k1");
                assert_eq!(json, r#"{"a":1}"#);
            }
            _ => panic!("Expected Save command"),
        }
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wownow",
            "load",
            "produceStore",
            "--store",
            "/tmp/ls.json",
            "--origin",
            "app.iwownow.ai",
        ])
        .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/ls.json")));
        assert_eq!(cli.origin.as_deref(), Some("app.iwownow.ai"));
        assert!(matches!(cli.command, Commands::Load { .. }));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["wownow", "config", "show"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.command, commands::config::ConfigCommand::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_parse_verbose_count() {
        let cli = Cli::try_parse_from(["wownow", "-vv", "keys"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_save_requires_value() {
        assert!(Cli::try_parse_from(["wownow", "save", "k1"]).is_err());
    }
}
