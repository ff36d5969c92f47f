//! The `check` job: download the roster, run the compliance checks and
//! report accounts that should have been closed.

use std::io::Write;

use chrono::Local;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::checks::{GracePeriod, emit_report, run_checks};
use crate::cli::{CheckArgs, Cli};
use crate::config::ConfigLoader;
use crate::error::{AuditError, AuditResult};
use crate::models::ViolationReport;
use crate::workbook::Workbook;

use super::{fetch_spreadsheet, remove_local_copy};

/// Runs the compliance checks, printing the JSON report to stdout.
pub async fn execute(cli: &Cli, args: &CheckArgs) -> AuditResult<()> {
    let span = info_span!("check", run_id = %Uuid::new_v4());
    let mut stdout = std::io::stdout();
    run(cli, args, &mut stdout).instrument(span).await.map(|_| ())
}

/// Runs the compliance checks and returns the report.
///
/// With `--json` the report is also written to `out`. Once the download has
/// succeeded the local copy is cleaned up whatever the checks did. A failure
/// of the checks wins over a cleanup failure; a cleanup failure is returned
/// only after the report has been logged and written.
pub async fn run<W: Write>(
    cli: &Cli,
    args: &CheckArgs,
    out: &mut W,
) -> AuditResult<ViolationReport> {
    let loader = ConfigLoader::load(cli.config_path()?)?;
    let grace = args
        .grace_days
        .map(GracePeriod::days)
        .unwrap_or_else(|| loader.checks().grace_period());

    fetch_spreadsheet(&loader, &cli.file).await?;

    let outcome = Workbook::open(&cli.file).and_then(|workbook| {
        run_checks(&workbook, loader.checks(), grace, Local::now().naive_local())
    });
    let cleanup = remove_local_copy(&cli.file, cli.keep);

    finish(outcome, cleanup, args.json, out)
}

fn finish<W: Write>(
    outcome: AuditResult<ViolationReport>,
    cleanup: AuditResult<()>,
    json: bool,
    out: &mut W,
) -> AuditResult<ViolationReport> {
    let report = outcome?;

    emit_report(&report);
    if json {
        write_json(&report, out)?;
    }
    info!(users_with_warnings = report.len(), "Checks finished");

    cleanup?;
    Ok(report)
}

fn write_json<W: Write>(report: &ViolationReport, out: &mut W) -> AuditResult<()> {
    let failed = |message: String| AuditError::Io {
        path: "<stdout>".to_string(),
        message,
    };
    serde_json::to_writer_pretty(&mut *out, report).map_err(|e| failed(e.to_string()))?;
    writeln!(out).map_err(|e| failed(e.to_string()))
}
