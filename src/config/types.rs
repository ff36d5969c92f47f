//! Configuration types for the staff audit.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::{Deserialize, Deserializer, Serialize};

use crate::checks::{DEFAULT_GRACE_PERIOD_DAYS, GracePeriod};

/// Connection settings for the file store holding the staff spreadsheet.
///
/// These keys sit at the top level of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextcloudConfig {
    /// Base URL of the file store (e.g., "https://cloud.example.org").
    pub base_url: String,
    /// Account used for basic authentication and the WebDAV path.
    pub username: String,
    /// Password or app token for basic authentication.
    pub password: String,
    /// Path of the spreadsheet inside the account's files.
    pub remote_file_path: String,
}

/// Settings for the compliance checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Days after an employment end date before accounts must be closed.
    pub grace_period_days: u32,
    /// Name of the sheet listing staff.
    pub staff_sheet: String,
    /// Name of the sheet listing waivers.
    pub exceptions_sheet: String,
    /// Header of the column holding the per-employee identifier.
    pub identifier_column: String,
    /// Header of the column holding the employment end date.
    pub employment_end_column: String,
}

impl CheckSettings {
    /// Returns the configured grace period.
    pub fn grace_period(&self) -> GracePeriod {
        GracePeriod::days(self.grace_period_days)
    }
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            staff_sheet: "Staff".to_string(),
            exceptions_sheet: "Exceptions".to_string(),
            identifier_column: "nbis mail".to_string(),
            employment_end_column: "employment end".to_string(),
        }
    }
}

/// Connection settings for the wiki page holding the published staff list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfluenceConfig {
    /// Base URL of the wiki site (e.g., "https://example.atlassian.net").
    pub base_url: String,
    /// Account used for basic authentication.
    pub username: String,
    /// API token for basic authentication.
    pub api_key: String,
    /// Space the page lives in. Informational only.
    #[serde(default)]
    pub space_key: Option<String>,
    /// Numeric page id. Accepts a YAML string or integer.
    #[serde(deserialize_with = "string_or_number")]
    pub page_id: String,
    /// Where the roster is kept, named in the page footer.
    #[serde(default = "default_source_name")]
    pub source_name: String,
}

/// Footer source used when the configuration names none.
pub const DEFAULT_SOURCE_NAME: &str = "Data Center's NextCloud instance";

fn default_source_name() -> String {
    DEFAULT_SOURCE_NAME.to_string()
}

/// The complete configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// File store settings.
    #[serde(flatten)]
    pub nextcloud: NextcloudConfig,
    /// Check settings; every key is optional.
    #[serde(default)]
    pub checks: CheckSettings,
    /// Wiki settings; only the publish job needs them.
    #[serde(default)]
    pub confluence: Option<ConfluenceConfig>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(value) => value,
        Raw::Number(value) => value.to_string(),
    })
}
