//! CLI for the CDM content delivery client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cdm_core::config;
use cdm_core::pool::ContentId;
use std::path::Path;

use commands::{
    run_checksum, run_key_get, run_key_set, run_name_get, run_name_set, run_servers,
};

/// Top-level CLI for the CDM content delivery client.
#[derive(Debug, Parser)]
#[command(name = "cdm")]
#[command(about = "CDM: game-content delivery endpoint selection client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve and print the ranked delivery servers for a content id.
    Servers {
        /// Content identifier to resolve servers for.
        content_id: ContentId,
    },

    /// Inspect or edit the content display-name cache.
    Name {
        #[command(subcommand)]
        action: NameAction,
    },

    /// Inspect or edit the content decryption-key cache.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Compute SHA-256 of a downloaded file, optionally against an expected digest.
    Checksum {
        /// Path to the file.
        path: String,
        /// Expected hex digest; exits non-zero on mismatch.
        #[arg(long)]
        expected: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum NameAction {
    /// Print the cached name for a content id.
    Get { content_id: ContentId },
    /// Store a name for a content id.
    Set { content_id: ContentId, name: String },
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Print the cached key for a content id as hex.
    Get { content_id: ContentId },
    /// Store a hex-encoded key for a content id.
    Set { content_id: ContentId, hex_key: String },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Servers { content_id } => run_servers(&cfg, content_id)?,
            CliCommand::Name { action } => match action {
                NameAction::Get { content_id } => run_name_get(content_id)?,
                NameAction::Set { content_id, name } => run_name_set(content_id, &name)?,
            },
            CliCommand::Key { action } => match action {
                KeyAction::Get { content_id } => run_key_get(content_id)?,
                KeyAction::Set {
                    content_id,
                    hex_key,
                } => run_key_set(content_id, &hex_key)?,
            },
            CliCommand::Checksum { path, expected } => {
                run_checksum(Path::new(&path), expected.as_deref())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_servers_command() {
        let cli = Cli::try_parse_from(["cdm", "servers", "730"]).unwrap();
        match cli.command {
            CliCommand::Servers { content_id } => assert_eq!(content_id, 730),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_name_subcommands() {
        let cli = Cli::try_parse_from(["cdm", "name", "set", "440", "Team Fortress 2"]).unwrap();
        match cli.command {
            CliCommand::Name {
                action: NameAction::Set { content_id, name },
            } => {
                assert_eq!(content_id, 440);
                assert_eq!(name, "Team Fortress 2");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_key_and_checksum() {
        let cli = Cli::try_parse_from(["cdm", "key", "get", "730"]).unwrap();
        assert!(matches!(
            cli.command,
            CliCommand::Key {
                action: KeyAction::Get { content_id: 730 }
            }
        ));

        let cli =
            Cli::try_parse_from(["cdm", "checksum", "game.bin", "--expected", "00ff"]).unwrap();
        match cli.command {
            CliCommand::Checksum { path, expected } => {
                assert_eq!(path, "game.bin");
                assert_eq!(expected.as_deref(), Some("00ff"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_content_id() {
        assert!(Cli::try_parse_from(["cdm", "servers", "tf2"]).is_err());
    }
}
