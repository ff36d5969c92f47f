//! Spreadsheet download from the file store.
//!
//! Files are fetched over WebDAV with basic authentication and written to a
//! local path. The remote `Last-Modified` time is carried over to the local
//! copy so the published page can state when the roster last changed.

use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset};
use reqwest::header::LAST_MODIFIED;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::NextcloudConfig;
use crate::error::{AuditError, AuditResult};

/// Request timeout for downloads.
const DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the file store.
#[derive(Debug, Clone)]
pub struct NextcloudClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    remote_file_path: String,
}

impl NextcloudClient {
    /// Creates a client from the file store settings.
    pub fn new(config: &NextcloudConfig) -> AuditResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuditError::DownloadFailed {
                url: config.base_url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            remote_file_path: config.remote_file_path.trim_start_matches('/').to_string(),
        })
    }

    /// The WebDAV URL of the spreadsheet.
    pub fn download_url(&self) -> String {
        format!(
            "{}/remote.php/dav/files/{}/{}",
            self.base_url, self.username, self.remote_file_path
        )
    }

    /// Downloads the spreadsheet to `destination`, replacing any existing
    /// file.
    ///
    /// Anything other than `200 OK` fails with [`AuditError::DownloadFailed`]
    /// and leaves `destination` untouched.
    pub async fn download_spreadsheet(&self, destination: &Path) -> AuditResult<()> {
        let url = self.download_url();
        let failed = |message: String| AuditError::DownloadFailed {
            url: url.clone(),
            message,
        };

        info!("Downloading spreadsheet");
        debug!(url = %url, "Using URL");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(failed(format!("unexpected status {}", status)));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_http_date);

        let body = response.bytes().await.map_err(|e| failed(e.to_string()))?;

        tokio::fs::write(destination, &body)
            .await
            .map_err(|e| AuditError::Io {
                path: destination.display().to_string(),
                message: e.to_string(),
            })?;

        if let Some(modified) = last_modified {
            if let Err(e) = set_modified(destination, modified) {
                warn!(
                    path = %destination.display(),
                    error = %e,
                    "Could not apply remote modification time"
                );
            }
        }

        info!(bytes = body.len(), "Spreadsheet downloaded successfully");
        Ok(())
    }
}

/// Parses an HTTP date such as `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(value.trim()).ok()
}

fn set_modified(path: &Path, modified: DateTime<FixedOffset>) -> std::io::Result<()> {
    let file = std::fs::File::options().write(true).open(path)?;
    file.set_modified(SystemTime::from(modified))
}
