//! The `publish` job: download the roster, render the staff list and push
//! it to the wiki page.

use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::cli::{Cli, PublishArgs};
use crate::config::ConfigLoader;
use crate::error::{AuditError, AuditResult};
use crate::publish::render_staff_table;
use crate::remote::{ConfluenceClient, PublishOutcome};
use crate::workbook::Workbook;

use super::{fetch_spreadsheet, remove_local_copy};

/// Publishes the staff list.
pub async fn execute(cli: &Cli, args: &PublishArgs) -> AuditResult<()> {
    let span = info_span!("publish", run_id = %Uuid::new_v4(), dry_run = args.dry_run);
    run(cli, args).instrument(span).await.map(|_| ())
}

/// Downloads the roster, renders it and updates the configured page.
///
/// The wiki settings are validated before anything is downloaded. Once the
/// download has succeeded the local copy is cleaned up whatever rendering or
/// the wiki did, and a rendering or wiki failure wins over a cleanup failure.
pub async fn run(cli: &Cli, args: &PublishArgs) -> AuditResult<PublishOutcome> {
    let loader = ConfigLoader::load(cli.config_path()?)?;
    let confluence = loader.confluence()?;
    let client = ConfluenceClient::new(confluence, args.dry_run)?;

    fetch_spreadsheet(&loader, &cli.file).await?;

    let outcome = match render_file(&cli.file, &confluence.source_name) {
        Ok(html) => client.update_page(&confluence.page_id, &html).await,
        Err(e) => Err(e),
    };
    let cleanup = remove_local_copy(&cli.file, cli.keep);

    let outcome = outcome?;
    match &outcome {
        PublishOutcome::DryRun(update) => {
            info!(version = update.version.number, "Dry run finished, page left unchanged")
        }
        PublishOutcome::Published { version } => {
            info!(page_id = %confluence.page_id, version, "Staff list published")
        }
    }
    cleanup?;
    Ok(outcome)
}

fn render_file(path: &Path, source: &str) -> AuditResult<String> {
    let document_updated = modified_time(path)?;
    let workbook = Workbook::open(path)?;
    let sheet = workbook.first_sheet()?;
    info!(sheet = sheet.name(), "Rendering staff list");
    render_staff_table(sheet, source, document_updated, Local::now().naive_local())
}

fn modified_time(path: &Path) -> AuditResult<NaiveDateTime> {
    let modified = std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| AuditError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}
