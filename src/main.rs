//! Staff audit CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use staff_audit::cli::commands::{check, publish};
use staff_audit::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over the verbosity flags.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.log_level() {
        Some(level) => EnvFilter::new(format!("warn,staff_audit={}", level)),
        None => EnvFilter::new("warn"),
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Check(args) => check::execute(&cli, args).await,
        Commands::Publish(args) => publish::execute(&cli, args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
