//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use swatch::{Level, Status};

/// Swatch: design-system component catalog
#[derive(Parser)]
#[command(name = "swatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "SWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog store
    #[arg(long, global = true, env = "SWATCH_STORE_DIR", default_value = ".swatch")]
    pub store_dir: PathBuf,

    /// Base URL of a remote catalog (enables the remote stage)
    #[arg(long, global = true, env = "SWATCH_REMOTE")]
    pub remote: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the catalog and report where it came from
    Load {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List components, optionally filtered
    List {
        /// Only this level (atom, molecule, organism)
        #[arg(short, long, value_parser = parse_level)]
        level: Option<Level>,

        /// Only this status (draft, ready)
        #[arg(short, long, value_parser = parse_status)]
        status: Option<Status>,

        /// Only components carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Free-text search over name, description, notes and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one component in full
    Show {
        /// Component id
        #[arg(value_name = "ID")]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog counts and dependency health
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import components from a JSON file
    Import {
        /// Path to the import file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Preview only; save nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Export the catalog as JSON
    Export {
        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include builtin components
        #[arg(long)]
        include_builtins: bool,

        /// Omit the metadata block
        #[arg(long)]
        no_metadata: bool,
    },

    /// Remove a user-authored component
    Remove {
        /// Component id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Drop the cached catalog and thumbnails
    ClearCache,
}

fn parse_level(s: &str) -> Result<Level, String> {
    Level::parse(s).ok_or_else(|| format!("Unknown level: {}. Use atom, molecule, or organism.", s))
}

fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| format!("Unknown status: {}. Use draft or ready.", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_filters() {
        let cli =
            Cli::try_parse_from(["swatch", "list", "--level", "Molecule", "-s", "ready"]).unwrap();
        match cli.command {
            Commands::List { level, status, .. } => {
                assert_eq!(level, Some(Level::Molecule));
                assert_eq!(status, Some(Status::Ready));
            }
            _ => panic!("expected list"),
        }
        assert!(Cli::try_parse_from(["swatch", "list", "--level", "cell"]).is_err());
    }
}
