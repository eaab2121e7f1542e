//! Command-line interface for mongosnap
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Applying command-line overrides on top of the configuration file
//!
//! Every flag is optional; a bare invocation runs the export with the
//! documented defaults.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// mongosnap - point-in-time JSON snapshot of a MongoDB collection
#[derive(Parser, Debug)]
#[command(
    name = "mongosnap",
    version,
    about = "Export one MongoDB collection to a pretty-printed JSON file",
    long_about = "Authenticates with a service-account key file, fetches every document
of one named collection, and writes an id-to-document JSON mapping to a local
file, overwriting any previous export."
)]
pub struct CliArgs {
    /// Path to the service-account key file
    #[arg(short = 'k', long = "key", value_name = "FILE")]
    pub credential: Option<PathBuf>,

    /// Database holding the collection
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Collection to export
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Output file path (overwritten on every run)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (suppress the completion line)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface combining parsed arguments with the loaded configuration
pub struct CliInterface {
    args: CliArgs,
    config: Config,
}

impl CliInterface {
    /// Parse arguments, load configuration, and apply overrides
    ///
    /// # Returns
    /// * `Result<Self>` - Initialized interface or a configuration error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::from_args(args)
    }

    /// Build an interface from already-parsed arguments
    ///
    /// Separated from [`CliInterface::new`] so tests can inject arguments.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = Config::load(args.config_file.as_deref())?;
        apply_overrides(&mut config, &args);
        config.validate()?;

        Ok(Self { args, config })
    }

    /// Get parsed command-line arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Get the effective configuration (file values plus CLI overrides)
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path to the service-account key file
    pub fn credential_path(&self) -> &Path {
        &self.config.export.credential_path
    }

    /// Effective logging level, honoring `-v` and `--vv`
    pub fn log_level(&self) -> tracing::Level {
        if self.args.very_verbose {
            tracing::Level::TRACE
        } else if self.args.verbose {
            tracing::Level::DEBUG
        } else {
            self.config.logging.level.to_tracing_level()
        }
    }
}

/// Apply command-line overrides onto the loaded configuration
fn apply_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(ref path) = args.credential {
        config.export.credential_path = path.clone();
    }
    if let Some(ref database) = args.database {
        config.export.database = database.clone();
    }
    if let Some(ref collection) = args.collection {
        config.export.collection = collection.clone();
    }
    if let Some(ref output) = args.output {
        config.export.output_path = output.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["mongosnap"]).unwrap();
        assert!(args.credential.is_none());
        assert!(args.collection.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_parse_full_invocation() {
        let args = CliArgs::try_parse_from([
            "mongosnap",
            "-k",
            "./key.json",
            "--database",
            "school",
            "--collection",
            "examResults",
            "-o",
            "./out.json",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.credential, Some(PathBuf::from("./key.json")));
        assert_eq!(args.database.as_deref(), Some("school"));
        assert_eq!(args.collection.as_deref(), Some("examResults"));
        assert_eq!(args.output, Some(PathBuf::from("./out.json")));
        assert!(args.quiet);
    }

    #[test]
    fn test_overrides_applied() {
        let args = CliArgs::try_parse_from([
            "mongosnap",
            "--collection",
            "examResults",
            "-o",
            "./out.json",
        ])
        .unwrap();

        let mut config = Config::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.export.collection, "examResults");
        assert_eq!(config.export.output_path, PathBuf::from("./out.json"));
        // Untouched fields keep defaults
        assert_eq!(config.export.database, "app");
    }

    #[test]
    fn test_log_level_flags() {
        let args = CliArgs::try_parse_from(["mongosnap", "-v"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);

        let args = CliArgs::try_parse_from(["mongosnap", "--vv"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }
}
