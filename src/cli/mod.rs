//! Command-line interface.
//!
//! This module contains the clap command structures and the subcommand
//! implementations that wire configuration, download, checks and
//! publishing together.

pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::{AuditError, AuditResult};

/// Default location of the downloaded spreadsheet.
pub const DEFAULT_LOCAL_FILE: &str = "/tmp/staff_list.xlsx";

/// Top-level arguments shared by every subcommand.
#[derive(Debug, Parser)]
#[command(name = "staff-audit")]
#[command(about = "Staff roster account audit and wiki staff list publisher", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true, env = "STAFF_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Enable informational logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Local path for the downloaded spreadsheet
    #[arg(short, long, global = true, default_value = DEFAULT_LOCAL_FILE)]
    pub file: PathBuf,

    /// Keep the downloaded spreadsheet after the run
    #[arg(short, long, global = true)]
    pub keep: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The configuration file path.
    ///
    /// Fails with [`AuditError::InvalidConfig`] when neither `--config` nor
    /// `STAFF_AUDIT_CONFIG` names one.
    pub fn config_path(&self) -> AuditResult<&Path> {
        self.config
            .as_deref()
            .ok_or_else(|| AuditError::InvalidConfig {
                field: "config".to_string(),
                message: "pass --config <path> or set STAFF_AUDIT_CONFIG".to_string(),
            })
    }

    /// The log level requested by flags, if any. `--debug` wins over
    /// `--verbose`.
    pub fn log_level(&self) -> Option<&'static str> {
        if self.debug {
            Some("debug")
        } else if self.verbose {
            Some("info")
        } else {
            None
        }
    }
}

/// The jobs the tool runs.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that accounts of departed staff have been closed
    Check(CheckArgs),

    /// Publish the staff list to the wiki
    Publish(PublishArgs),
}

/// Options of the `check` job.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Override the configured grace period for this run
    #[arg(long, value_name = "DAYS")]
    pub grace_days: Option<u32>,

    /// Also print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Options of the `publish` job.
#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    /// Build the page update without uploading it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_with_defaults() {
        let cli = Cli::try_parse_from(["staff-audit", "-c", "audit.yaml", "check"]).unwrap();
        assert_eq!(cli.config_path().unwrap(), Path::new("audit.yaml"));
        assert_eq!(cli.file, PathBuf::from(DEFAULT_LOCAL_FILE));
        assert!(!cli.keep);
        assert_eq!(cli.log_level(), None);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.grace_days, None);
                assert!(!args.json);
            }
            other => panic!("Expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_check_options() {
        let cli = Cli::try_parse_from([
            "staff-audit",
            "--config",
            "audit.yaml",
            "check",
            "--grace-days",
            "7",
            "--json",
            "-k",
            "-f",
            "/var/tmp/roster.xlsx",
        ])
        .unwrap();
        assert!(cli.keep);
        assert_eq!(cli.file, PathBuf::from("/var/tmp/roster.xlsx"));
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.grace_days, Some(7));
                assert!(args.json);
            }
            other => panic!("Expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_publish_dry_run() {
        let cli =
            Cli::try_parse_from(["staff-audit", "-c", "audit.yaml", "publish", "--dry-run"])
                .unwrap();
        match cli.command {
            Commands::Publish(args) => assert!(args.dry_run),
            other => panic!("Expected publish, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_wins_over_verbose() {
        let cli = Cli::try_parse_from(["staff-audit", "-c", "a.yaml", "-v", "-d", "check"]).unwrap();
        assert_eq!(cli.log_level(), Some("debug"));

        let cli = Cli::try_parse_from(["staff-audit", "-c", "a.yaml", "check", "-v"]).unwrap();
        assert_eq!(cli.log_level(), Some("info"));
    }

    #[test]
    fn test_negative_grace_days_rejected() {
        let result =
            Cli::try_parse_from(["staff-audit", "-c", "a.yaml", "check", "--grace-days", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["staff-audit", "check", "-c", "audit.yaml", "--json"]).unwrap();
        assert_eq!(cli.config_path().unwrap(), Path::new("audit.yaml"));

        let cli =
            Cli::try_parse_from(["staff-audit", "publish", "--config", "wiki.yaml"]).unwrap();
        assert_eq!(cli.config_path().unwrap(), Path::new("wiki.yaml"));
    }

    #[test]
    fn test_missing_config_path_is_invalid_config() {
        let cli = Cli {
            config: None,
            debug: false,
            verbose: false,
            file: PathBuf::from(DEFAULT_LOCAL_FILE),
            keep: false,
            command: Commands::Publish(PublishArgs { dry_run: false }),
        };
        match cli.config_path() {
            Err(AuditError::InvalidConfig { field, .. }) => assert_eq!(field, "config"),
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["staff-audit", "-c", "a.yaml"]).is_err());
    }
}
