//! Configuration management commands.

use clap::Args;
use wownow_core::config::Config;

use super::Overrides;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: String,
    },

    /// Write the default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

/// Run the config command.
pub fn run(overrides: &Overrides, args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = overrides.resolve_config()?;
            println!("{}", render(&config)?);
        }

        ConfigCommand::Get { key } => {
            let config = overrides.resolve_config()?;
            let json = serde_json::to_value(&config)?;

            let value = key
                .split('.')
                .try_fold(&json, |acc, k| acc.get(k));

            match value {
                Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
                None => anyhow::bail!("Key not found: {}", key),
            }
        }

        ConfigCommand::Init { force } => {
            let path = overrides.config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }

        ConfigCommand::Path => {
            println!("{}", overrides.config_path()?.display());
        }

        ConfigCommand::Validate => {
            overrides.resolve_config()?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

/// Effective config as JSON, with the resolved origin filled in.
fn render(config: &Config) -> anyhow::Result<String> {
    let mut json = serde_json::to_value(config)?;
    json["encryption"]["origin"] = config.encryption.resolve_origin().into();
    Ok(serde_json::to_string_pretty(&json)?)
}
