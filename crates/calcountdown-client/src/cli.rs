//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// calcountdown - time left until the next calendar event
#[derive(Debug, Parser)]
#[command(name = "calcountdown")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to the calendars file
    #[arg(long, short, env = "CALCOUNTDOWN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// HTTP timeout in seconds for feed downloads
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// A calendar query, as typed after the command name.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Calendar identifier and filter keyword, e.g. `lol lcs`
    pub query: Vec<String>,

    /// Channel the query came from; its name selects a calendar
    #[arg(long)]
    pub channel: Option<String>,
}

impl QueryArgs {
    /// The query words joined with single spaces.
    pub fn param(&self) -> String {
        self.query.join(" ")
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the countdown to the next matching event
    Next {
        #[command(flatten)]
        query: QueryArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Report whether an event is in progress (exit status 1 if not)
    InEvent {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Show help for calendars and filters
    Help {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the parsed configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_next_with_query_words() {
        let cli = Cli::try_parse_from(["calcountdown", "next", "lol", "lcs", "--json"]).unwrap();
        match cli.command {
            Command::Next { query, json } => {
                assert_eq!(query.param(), "lol lcs");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_channel_and_global_flags() {
        let cli = Cli::try_parse_from([
            "calcountdown",
            "--debug",
            "--config",
            "/tmp/calendars.json",
            "in-event",
            "--channel",
            "#esports",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/calendars.json")));
        match cli.command {
            Command::InEvent { query } => {
                assert_eq!(query.channel.as_deref(), Some("#esports"));
                assert_eq!(query.param(), "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_config_action() {
        let cli = Cli::try_parse_from(["calcountdown", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Validate
            }
        ));
    }
}
