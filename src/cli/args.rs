//! CLI argument definitions using clap derive

use crate::labels::parse_label;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// doccache - labelled document cache
///
/// Stores documents with key=value labels on disk and finds them again
/// by label.
#[derive(Parser, Debug)]
#[command(name = "doccache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOCCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory (overrides cache.data_dir)
    #[arg(long, global = true, env = "DOCCACHE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Cache subdirectory (overrides cache.subdir)
    #[arg(long, global = true)]
    pub subdir: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a document
    Add(AddArgs),

    /// List cached documents
    List(ListArgs),

    /// Find documents by label
    Find(FindArgs),

    /// Print the body of the first document with a label
    Cat(CatArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Labels to attach (KEY=VALUE, repeatable)
    #[arg(short, long = "label", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,

    /// File to store (reads stdin if omitted or "-")
    pub file: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the find command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Label key
    pub key: String,

    /// Label value to match exactly
    pub value: String,

    /// Show every match instead of the first
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the cat command
#[derive(Parser, Debug)]
pub struct CatArgs {
    /// Label key
    pub key: String,

    /// Label value to match exactly
    pub value: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one name per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_labels() {
        let cli = Cli::parse_from([
            "doccache",
            "add",
            "-l",
            "type=consensus",
            "--label",
            "flavor=ns",
            "doc.txt",
        ]);

        match cli.command {
            Commands::Add(args) => {
                assert_eq!(
                    args.labels,
                    vec![
                        ("type".to_string(), "consensus".to_string()),
                        ("flavor".to_string(), "ns".to_string()),
                    ]
                );
                assert_eq!(args.file, Some(PathBuf::from("doc.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reject_label_without_equals() {
        assert!(Cli::try_parse_from(["doccache", "add", "-l", "novalue"]).is_err());
    }

    #[test]
    fn parse_global_overrides() {
        let cli = Cli::parse_from([
            "doccache",
            "find",
            "type",
            "diff",
            "--all",
            "--data-dir",
            "/tmp/dc",
            "--subdir",
            "diffs",
            "-vv",
        ]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/dc")));
        assert_eq!(cli.subdir.as_deref(), Some("diffs"));
        assert!(matches!(cli.command, Commands::Find(FindArgs { all: true, .. })));
    }
}
