mod check_cmd;
mod match_cmd;
mod terminal_output;
mod validate_cmd;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use permcheck_config::{
    config_dir, config_file_path, load_and_prepare, log_report, PermcheckConfig, ValidationReport,
};
use permcheck_logging::{init_logger, LogOptions};
use terminal_output::note_error;

#[derive(Parser)]
#[command(name = "permcheck")]
#[command(about = "permcheck — verify granted permissions without exercising them")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.permcheck/permcheck.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured permission checks
    Check {
        /// Only run the check with this name
        #[arg(short, long)]
        name: Option<String>,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the config file
    ValidateConfig,
    /// Test whether a concrete action matches a pattern
    Match {
        /// Concrete action, e.g. Provider/resource/read
        action: String,
        /// Pattern with at most one wildcard, e.g. Provider/*
        pattern: String,
    },
}

/// How a command finished, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed,
    InvalidConfig,
}

impl Outcome {
    fn from_passed(passed: bool) -> Self {
        if passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }

    fn code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
            Outcome::InvalidConfig => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    let outcome = match cli.command {
        Commands::Match { action, pattern } => {
            start_logging(&LogOptions::default());
            Outcome::from_passed(match_cmd::run(&action, &pattern)?)
        }
        Commands::ValidateConfig => match prepare(&config_path).await {
            Ok((config, report)) if validate_cmd::run(&config, &report) => Outcome::Passed,
            Ok(_) => Outcome::InvalidConfig,
            Err(e) => config_load_failed(&config_path, &e),
        },
        Commands::Check { name, json } => match prepare(&config_path).await {
            Ok((config, report)) if !report.is_valid() => {
                validate_cmd::run(&config, &report);
                Outcome::InvalidConfig
            }
            Ok((config, report)) => {
                validate_cmd::print_findings(&report);
                let passed = check_cmd::run(&config, &config_path, name.as_deref(), json).await?;
                Outcome::from_passed(passed)
            }
            Err(e) => config_load_failed(&config_path, &e),
        },
    };

    Ok(outcome.into())
}

/// Load the config, start logging with its settings, then log the report.
async fn prepare(config_path: &Path) -> Result<(PermcheckConfig, ValidationReport)> {
    let (config, report) = load_and_prepare(config_path).await?;
    start_logging(&log_options(&config));
    log_report(&report);
    info!(path = %config_path.display(), checks = config.checks.len(), "Using config");
    Ok((config, report))
}

/// Start the logger; an unusable log directory falls back to console only.
fn start_logging(options: &LogOptions) {
    let Err(e) = init_logger(options) else {
        return;
    };
    let console_only = LogOptions {
        dir: None,
        ..options.clone()
    };
    if init_logger(&console_only).is_ok() {
        warn!(error = %format!("{e:#}"), "File logging disabled");
    }
}

fn config_load_failed(config_path: &Path, err: &anyhow::Error) -> Outcome {
    note_error(&format!(
        "Failed to load config {}: {err:#}",
        config_path.display()
    ));
    Outcome::InvalidConfig
}

fn log_options(config: &PermcheckConfig) -> LogOptions {
    let defaults = LogOptions::default();
    let Some(logging) = &config.logging else {
        return defaults;
    };
    LogOptions {
        level: logging.level.clone().unwrap_or(defaults.level),
        json: logging.json.unwrap_or(defaults.json),
        dir: logging.dir.as_ref().map(PathBuf::from),
    }
}
