//! Command-line arguments and REPL line grammar.
//!
//! REPL lines are split shell-style (`shlex`) and parsed by clap in
//! multicall mode, so `add "Nasi Goreng" 2 15000` works as typed.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::ApiError;

/// Process arguments.
#[derive(Debug, Parser)]
#[command(name = "struk", version, about = "Draft, issue and export receipts")]
pub struct Cli {
    /// Config file (default: platform config dir / config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Receipt service base URL, overriding config and environment
    #[arg(short, long)]
    pub backend: Option<String>,
}

/// One REPL line.
#[derive(Debug, Parser)]
#[command(multicall = true, disable_help_subcommand = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a line item
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// Remove the item at INDEX (see `show`)
    #[command(alias = "rm")]
    Remove { index: usize },
    /// Set the customer name (no argument clears it)
    Customer { name: Vec<String> },
    /// Set the notes (no argument clears them)
    Notes { text: Vec<String> },
    /// Print the receipt preview
    Show,
    /// Issue the receipt through the receipt service
    Submit,
    /// Save the confirmed receipt as PNG
    #[command(alias = "download")]
    Export,
    /// Start a new receipt
    Reset,
    /// Test the connection to the receipt service
    Ping,
    /// List commands and whether they are available now
    Help,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// Parses one input line. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<Command>, ApiError> {
    let words = shlex::split(line).ok_or_else(|| ApiError::usage("Unbalanced quotes"))?;
    if words.is_empty() {
        return Ok(None);
    }

    Line::try_parse_from(words)
        .map(|line| Some(line.command))
        .map_err(|e| ApiError::usage(e.render().to_string().trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_add_with_quotes() {
        let command = parse_line(r#"add "Nasi Goreng" 2 15000"#).unwrap();
        assert_eq!(
            command,
            Some(Command::Add {
                name: "Nasi Goreng".into(),
                quantity: "2".into(),
                price: "15000".into(),
            })
        );
    }

    #[test]
    fn test_parse_negative_quantity_is_passed_through() {
        let command = parse_line("add X -3 10").unwrap();
        assert!(matches!(command, Some(Command::Add { quantity, .. }) if quantity == "-3"));
    }

    #[test]
    fn test_parse_free_text() {
        let command = parse_line("notes Lunas via transfer").unwrap();
        assert_eq!(
            command,
            Some(Command::Notes {
                text: vec!["Lunas".into(), "via".into(), "transfer".into()]
            })
        );
        assert_eq!(
            parse_line("customer").unwrap(),
            Some(Command::Customer { name: vec![] })
        );
    }

    #[test]
    fn test_parse_aliases_and_blank() {
        assert_eq!(parse_line("download").unwrap(), Some(Command::Export));
        assert_eq!(parse_line("rm 1").unwrap(), Some(Command::Remove { index: 1 }));
        assert_eq!(parse_line("help").unwrap(), Some(Command::Help));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("fly").unwrap_err().code, ErrorCode::UsageError);
        assert_eq!(parse_line("remove x").unwrap_err().code, ErrorCode::UsageError);
        assert_eq!(parse_line("add \"open").unwrap_err().code, ErrorCode::UsageError);
    }
}
