//! Subcommand implementations.

pub mod check;
pub mod publish;

use std::path::Path;

use tracing::{debug, info};

use crate::config::ConfigLoader;
use crate::error::{AuditError, AuditResult};
use crate::remote::NextcloudClient;

/// Downloads the configured spreadsheet to `destination`.
pub(crate) async fn fetch_spreadsheet(loader: &ConfigLoader, destination: &Path) -> AuditResult<()> {
    let client = NextcloudClient::new(loader.nextcloud())?;
    client.download_spreadsheet(destination).await
}

/// Removes the downloaded copy unless `keep` is set.
///
/// A file that is already gone counts as removed.
pub fn remove_local_copy(path: &Path, keep: bool) -> AuditResult<()> {
    if keep {
        info!(path = %path.display(), "Keeping the downloaded file");
        return Ok(());
    }

    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed downloaded file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuditError::CleanupFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}
