//! CLI argument definitions.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Butterfly species identification from photographs.
#[derive(Debug, Parser)]
#[command(name = "bioscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the species the classifier knows about.
    Species {
        /// Species action to perform.
        #[command(subcommand)]
        action: SpeciesAction,
    },
    /// Look up conservation, habitat and encyclopedia data for a species.
    Lookup {
        /// Species name (e.g. "Monarch").
        name: String,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Species subcommand actions.
#[derive(Debug, Subcommand)]
pub enum SpeciesAction {
    /// List the species index (class id and name).
    List,
    /// Show conservation status and habitat for a species.
    Info {
        /// Species name.
        name: String,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Path to ONNX model file (overrides config).
    #[arg(long, env = "BIOSCAN_MODEL_PATH", global = true)]
    pub model_path: Option<PathBuf>,

    /// Path to CSV label source (overrides config).
    #[arg(long, env = "BIOSCAN_LABELS_PATH", global = true)]
    pub labels_path: Option<PathBuf>,

    /// Report format (text or json).
    #[arg(short, long, env = "BIOSCAN_FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file (default: platform config directory).
    #[arg(long, env = "BIOSCAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Skip encyclopedia lookups.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress progress output and informational logs.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace+ORT debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["bioscan", "monarch.jpg"]).unwrap();
        assert_eq!(cli.inputs, vec![PathBuf::from("monarch.jpg")]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "bioscan",
            "wing.png",
            "--format",
            "json",
            "--offline",
            "--fail-fast",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.analyze.format, Some(OutputFormat::Json));
        assert!(cli.analyze.offline);
        assert!(cli.analyze.fail_fast);
        assert_eq!(cli.analyze.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["bioscan", "a.jpg", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_cli_parse_species_info() {
        let cli = Cli::try_parse_from(["bioscan", "species", "info", "Red Admiral"]).unwrap();
        match cli.command {
            Some(Command::Species {
                action: SpeciesAction::Info { name },
            }) => assert_eq!(name, "Red Admiral"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_lookup_offline() {
        let cli = Cli::try_parse_from(["bioscan", "lookup", "Monarch", "--offline"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Lookup { .. })));
        assert!(cli.analyze.offline);
    }

    #[test]
    fn test_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bioscan",
            "lookup",
            "Glasswing",
            "--offline",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.analyze.offline);
        assert_eq!(cli.analyze.format, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from([
            "bioscan",
            "species",
            "list",
            "--labels-path",
            "labels.csv",
            "--model-path",
            "expert.onnx",
        ])
        .unwrap();
        assert_eq!(cli.analyze.labels_path, Some(PathBuf::from("labels.csv")));
        assert_eq!(cli.analyze.model_path, Some(PathBuf::from("expert.onnx")));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["bioscan", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bioscan", "species", "list", "-q"]).unwrap();
        assert!(cli.analyze.quiet);
    }
}
