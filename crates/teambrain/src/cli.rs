//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use teambrain_api::config::DEFAULT_PORT;
use teambrain_core::config::STATE_DIR_ENV;

/// Team Brain - find time when the whole team is free
#[derive(Parser, Debug)]
#[command(name = "teambrain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Allowed CORS origins (repeat or comma-separate; default any)
        #[arg(long = "cors-origin", value_delimiter = ',')]
        cors_origins: Vec<String>,

        /// Answer searches from stored reports only, without asking
        /// members' assistants
        #[arg(long)]
        cached: bool,

        /// Seconds to wait for all calendars before treating the rest as free
        #[arg(long, default_value_t = 45)]
        timeout_secs: u64,
    },

    /// Manage members
    #[command(subcommand)]
    User(UserCommand),

    /// Manage teams
    #[command(subcommand)]
    Team(TeamCommand),

    /// Compute common slots offline from a JSON file
    Slots {
        /// Input file with the search window and each member's busy times
        #[arg(short, long)]
        input: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a member and print their API key
    Create {
        /// Display name
        name: String,

        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Link or unlink a member's messaging assistant
    SetRelayKey {
        /// Member ID
        member: String,

        /// Relay API key (omit to unlink)
        key: Option<String>,
    },

    /// Show a member, their teams and the busy times they have reported
    Show {
        /// Member ID
        member: String,
    },

    /// List members
    List,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Create a team owned by a member
    Create {
        /// Team name
        name: String,

        /// Creating member's ID
        #[arg(short, long)]
        member: String,
    },

    /// Join a team by invite code
    Join {
        /// Invite code
        code: String,

        /// Joining member's ID
        #[arg(short, long)]
        member: String,
    },

    /// Show a team and its members
    Show {
        /// Team ID
        team: String,
    },

    /// List teams
    List {
        /// Only teams this member belongs to
        #[arg(short, long)]
        member: Option<String>,
    },
}

impl Cli {
    /// Returns the state directory path, using the default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(teambrain_core::config::state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::parse_from(["teambrain", "serve"]);
        match cli.command {
            Commands::Serve {
                host,
                port,
                cors_origins,
                cached,
                timeout_secs,
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, DEFAULT_PORT);
                assert!(cors_origins.is_empty());
                assert!(!cached);
                assert_eq!(timeout_secs, 45);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_cors_list() {
        let cli = Cli::parse_from([
            "teambrain",
            "serve",
            "--cors-origin",
            "http://a.test,http://b.test",
        ]);
        match cli.command {
            Commands::Serve { cors_origins, .. } => {
                assert_eq!(cors_origins, vec!["http://a.test", "http://b.test"]);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_relay_key_clear() {
        let cli = Cli::parse_from(["teambrain", "user", "set-relay-key", "member-1"]);
        match cli.command {
            Commands::User(UserCommand::SetRelayKey { member, key }) => {
                assert_eq!(member, "member-1");
                assert!(key.is_none());
            }
            _ => panic!("Expected SetRelayKey command"),
        }
    }

    #[test]
    fn test_cli_parse_user_show() {
        let cli = Cli::parse_from(["teambrain", "user", "show", "member-1"]);
        match cli.command {
            Commands::User(UserCommand::Show { member }) => assert_eq!(member, "member-1"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_parse_team_join() {
        let cli = Cli::parse_from(["teambrain", "team", "join", "ABC123", "-m", "member-1"]);
        match cli.command {
            Commands::Team(TeamCommand::Join { code, member }) => {
                assert_eq!(code, "ABC123");
                assert_eq!(member, "member-1");
            }
            _ => panic!("Expected Join command"),
        }
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["teambrain", "slots", "-i", "in.json", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
