use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockroom_core::{DomainError, ItemKey};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Browse the stock catalog and buy items.")]
pub struct CommandLine {
    /// Catalog file (overrides STOCKROOM_CATALOG_PATH)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Audit log file (overrides STOCKROOM_AUDIT_LOG_PATH)
    #[arg(long, global = true)]
    pub audit_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every department with prices and stock
    #[command(alias = "ls")]
    List,
    /// Buy an item, given as `department/item` or a bare item key; without
    /// one, list what can be bought
    #[command(alias = "b")]
    Buy {
        target: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        quantity: u64,
        /// Your name, recorded in the audit log
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Keep the target as typed; the catalog resolves `electronics/laptop`,
/// `home/garden/rake` or a bare `laptop`.
pub fn parse_target(target: &str) -> Result<ItemKey, DomainError> {
    if target.trim().is_empty() {
        return Err(DomainError::invalid_key("item cannot be blank"));
    }
    Ok(ItemKey::new(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_kept_as_typed() {
        assert_eq!(parse_target("electronics/laptop").unwrap().as_str(), "electronics/laptop");
        assert_eq!(parse_target("home/garden/rake").unwrap().as_str(), "home/garden/rake");
        assert_eq!(parse_target("laptop").unwrap().as_str(), "laptop");
    }

    #[test]
    fn blank_target_is_rejected() {
        assert!(matches!(parse_target("  "), Err(DomainError::InvalidKey(_))));
    }

    #[test]
    fn cli_parses_buy() {
        let cli = CommandLine::try_parse_from(["stockroom", "buy", "electronics/laptop", "-q", "2", "--name", "Alice"]).unwrap();
        match cli.command {
            Commands::Buy { target, quantity, name } => {
                assert_eq!(target.as_deref(), Some("electronics/laptop"));
                assert_eq!(quantity, 2);
                assert_eq!(name.as_deref(), Some("Alice"));
            }
            Commands::List => panic!("Expected buy"),
        }
    }

    #[test]
    fn cli_parses_buy_without_target() {
        let cli = CommandLine::try_parse_from(["stockroom", "buy"]).unwrap();
        match cli.command {
            Commands::Buy { target, quantity, .. } => {
                assert!(target.is_none());
                assert_eq!(quantity, 1);
            }
            Commands::List => panic!("Expected buy"),
        }
    }
}
