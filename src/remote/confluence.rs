//! Wiki page publishing through the Confluence v2 pages API.
//!
//! An update fetches the current page, replaces its body and submits it with
//! the version number incremented by one. In dry-run mode the update is
//! built and logged but never submitted.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ConfluenceConfig;
use crate::error::{AuditError, AuditResult};

/// Request timeout for wiki calls.
const WIKI_TIMEOUT_SECS: u64 = 60;

/// A page as returned by `GET /wiki/api/v2/pages/{id}?body-format=storage`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Page id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Current version.
    pub version: PageVersion,
    /// Current body.
    pub body: PageBody,
}

/// A page version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVersion {
    /// Monotonically increasing version number.
    pub number: u64,
}

/// Page body wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBody {
    /// Body in storage format.
    pub storage: StorageBody,
}

/// A body in Confluence storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBody {
    /// The XHTML content.
    pub value: String,
    /// Always `storage`.
    #[serde(default = "storage_representation")]
    pub representation: String,
}

fn storage_representation() -> String {
    "storage".to_string()
}

/// The request body for `PUT /wiki/api/v2/pages/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageUpdate {
    /// Page id, unchanged.
    pub id: String,
    /// Always `current`.
    pub status: String,
    /// Page title, unchanged.
    pub title: String,
    /// The new body.
    pub body: PageBody,
    /// The previous version plus one.
    pub version: PageVersion,
}

impl PageUpdate {
    /// Builds an update replacing `page`'s body with `html`.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_audit::remote::{Page, PageBody, PageUpdate, PageVersion, StorageBody};
    ///
    /// let page = Page {
    ///     id: "42".to_string(),
    ///     title: "Staff list".to_string(),
    ///     version: PageVersion { number: 7 },
    ///     body: PageBody {
    ///         storage: StorageBody {
    ///             value: "<p>old</p>".to_string(),
    ///             representation: "storage".to_string(),
    ///         },
    ///     },
    /// };
    ///
    /// let update = PageUpdate::replacing_body(&page, "<p>new</p>");
    /// assert_eq!(update.version.number, 8);
    /// assert_eq!(update.body.storage.value, "<p>new</p>");
    /// ```
    pub fn replacing_body(page: &Page, html: &str) -> Self {
        Self {
            id: page.id.clone(),
            status: "current".to_string(),
            title: page.title.clone(),
            body: PageBody {
                storage: StorageBody {
                    value: html.to_string(),
                    representation: storage_representation(),
                },
            },
            version: PageVersion {
                number: page.version.number + 1,
            },
        }
    }
}

/// What a publish call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The update was built but not submitted.
    DryRun(PageUpdate),
    /// The page was updated to this version.
    Published {
        /// The new version number.
        version: u64,
    },
}

/// HTTP client for the wiki.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: Client,
    base_url: String,
    username: String,
    api_key: String,
    dry_run: bool,
}

impl ConfluenceClient {
    /// Creates a client from the wiki settings.
    pub fn new(config: &ConfluenceConfig, dry_run: bool) -> AuditResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(WIKI_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuditError::WikiRequestFailed {
                url: config.base_url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
            dry_run,
        })
    }

    /// The API URL of a page.
    pub fn page_url(&self, page_id: &str) -> String {
        format!("{}/wiki/api/v2/pages/{}", self.base_url, page_id)
    }

    /// Fetches the current page with its body in storage format.
    pub async fn fetch_page(&self, page_id: &str) -> AuditResult<Page> {
        let url = self.page_url(page_id);
        let failed = |message: String| AuditError::WikiRequestFailed {
            url: url.clone(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .query(&[("body-format", "storage")])
            .basic_auth(&self.username, Some(&self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("unexpected status {}", status)));
        }

        response
            .json::<Page>()
            .await
            .map_err(|e| failed(format!("invalid page response: {}", e)))
    }

    /// Replaces the page body with `html`.
    pub async fn update_page(&self, page_id: &str, html: &str) -> AuditResult<PublishOutcome> {
        let page = self.fetch_page(page_id).await?;
        debug!(
            page_id = %page.id,
            title = %page.title,
            version = page.version.number,
            "Fetched current page"
        );

        let update = PageUpdate::replacing_body(&page, html);

        if self.dry_run {
            info!("Dry run mode: not uploading changes to the wiki");
            match serde_json::to_string_pretty(&update) {
                Ok(dump) => debug!("Content to be uploaded:\n{}", dump),
                Err(e) => debug!(error = %e, "Could not serialize page update for display"),
            }
            return Ok(PublishOutcome::DryRun(update));
        }

        let url = self.page_url(page_id);
        let response = self
            .http
            .put(&url)
            .basic_auth(&self.username, Some(&self.api_key))
            .header("Accept", "application/json")
            .json(&update)
            .send()
            .await
            .map_err(|e| AuditError::WikiRequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::WikiRequestFailed {
                url,
                message: format!("unexpected status {}: {}", status, body),
            });
        }

        info!(version = update.version.number, "Wiki page updated");
        Ok(PublishOutcome::Published {
            version: update.version.number,
        })
    }
}
