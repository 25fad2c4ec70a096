//! CLI argument routing integration tests.

use clap::Parser;
use wownow_cli::{Cli, Commands};

#[test]
fn test_routes_storage_commands() {
    let cli = Cli::try_parse_from(["wownow", "keys"]).unwrap();
    assert!(matches!(cli.command, Commands::Keys));

    let cli = Cli::try_parse_from(["wownow", "remove", "produceStore"]).unwrap();
    assert!(matches!(cli.command, Commands::Remove { ref key } if key == "produceStore"));

    let cli = Cli::try_parse_from(["wownow", "clear"]).unwrap();
    assert!(matches!(cli.command, Commands::Clear));
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["wownow", "gateway"]).is_err());
}

#[test]
fn test_config_flag() {
    let cli = Cli::try_parse_from(["wownow", "--config", "/tmp/w.json5", "config", "path"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/w.json5")));
}
