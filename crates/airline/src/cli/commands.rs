//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Flights command arguments.
#[derive(Debug, Args)]
pub struct FlightsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Book command arguments.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Flight numbers to book, one seat each, in order
    #[arg(required = true, value_name = "FLIGHT")]
    pub flights: Vec<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_command_debug() {
        let cmd = BookCommand {
            flights: vec!["AA100".to_string()],
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("AA100"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Validate { file: None };
        assert!(format!("{cmd:?}").contains("Validate"));
    }
}
