//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the audit
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AuditError, AuditResult};

use super::types::{AuditConfig, CheckSettings, ConfluenceConfig, NextcloudConfig};

/// Loads, validates and provides access to the audit configuration.
///
/// # File Layout
///
/// ```yaml
/// base_url: https://cloud.example.org
/// username: auditor
/// password: secret
/// remote_file_path: Admin/staff.xlsx
/// checks:
///   grace_period_days: 30
/// confluence:
///   base_url: https://example.atlassian.net
///   username: bot@example.org
///   api_key: token
///   page_id: "123456"
/// ```
///
/// # Example
///
/// ```no_run
/// use staff_audit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/staff-audit.yaml")?;
/// println!("Grace period: {} days", loader.checks().grace_period_days);
/// # Ok::<(), staff_audit::error::AuditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AuditConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// Returns an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or is missing a required key
    /// - A value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| AuditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|err| match err {
            AuditError::ConfigParseError { message, .. } => AuditError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(content: &str) -> AuditResult<Self> {
        let config: AuditConfig =
            serde_yaml::from_str(content).map_err(|e| AuditError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Validates configuration after parsing.
    pub fn validate(config: &AuditConfig) -> AuditResult<()> {
        let nextcloud = &config.nextcloud;
        require_non_empty("base_url", &nextcloud.base_url)?;
        require_non_empty("username", &nextcloud.username)?;
        require_non_empty("remote_file_path", &nextcloud.remote_file_path)?;

        let checks = &config.checks;
        require_non_empty("checks.staff_sheet", &checks.staff_sheet)?;
        require_non_empty("checks.exceptions_sheet", &checks.exceptions_sheet)?;
        require_non_empty("checks.identifier_column", &checks.identifier_column)?;
        require_non_empty("checks.employment_end_column", &checks.employment_end_column)?;

        if let Some(confluence) = &config.confluence {
            require_non_empty("confluence.base_url", &confluence.base_url)?;
            require_non_empty("confluence.username", &confluence.username)?;
            require_non_empty("confluence.page_id", &confluence.page_id)?;
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Returns the file store settings.
    pub fn nextcloud(&self) -> &NextcloudConfig {
        &self.config.nextcloud
    }

    /// Returns the check settings.
    pub fn checks(&self) -> &CheckSettings {
        &self.config.checks
    }

    /// Returns the wiki settings.
    ///
    /// Fails with [`AuditError::InvalidConfig`] when the file has no
    /// `confluence` section.
    pub fn confluence(&self) -> AuditResult<&ConfluenceConfig> {
        self.config
            .confluence
            .as_ref()
            .ok_or_else(|| AuditError::InvalidConfig {
                field: "confluence".to_string(),
                message: "section is required to publish the staff list".to_string(),
            })
    }
}

fn require_non_empty(field: &str, value: &str) -> AuditResult<()> {
    if value.trim().is_empty() {
        return Err(AuditError::InvalidConfig {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r"
base_url: https://cloud.example.org
username: auditor
password: secret
remote_file_path: Admin/staff.xlsx
confluence:
  base_url: https://example.atlassian.net
  username: bot@example.org
  api_key: token
  page_id: 42
";

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_configuration() {
        let file = write_config(VALID);
        let loader = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(loader.nextcloud().username, "auditor");
        assert_eq!(loader.checks().grace_period_days, 30);
        assert_eq!(loader.confluence().unwrap().page_id, "42");
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/staff-audit.yaml") {
            Err(AuditError::ConfigNotFound { path }) => {
                assert!(path.contains("staff-audit.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_file_path() {
        let file = write_config("base_url: [unterminated");
        match ConfigLoader::load(file.path()) {
            Err(AuditError::ConfigParseError { path, .. }) => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("Expected ConfigParseError error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let result = ConfigLoader::from_yaml("base_url: https://cloud.example.org\n");
        assert!(matches!(result, Err(AuditError::ConfigParseError { .. })));
    }

    #[test]
    fn test_empty_remote_path_is_invalid() {
        let yaml = r"
base_url: https://cloud.example.org
username: auditor
password: secret
remote_file_path: ''
";
        match ConfigLoader::from_yaml(yaml) {
            Err(AuditError::InvalidConfig { field, .. }) => assert_eq!(field, "remote_file_path"),
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_name_is_invalid() {
        let yaml = r"
base_url: https://cloud.example.org
username: auditor
password: secret
remote_file_path: staff.xlsx
checks:
  staff_sheet: ' '
";
        match ConfigLoader::from_yaml(yaml) {
            Err(AuditError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "checks.staff_sheet")
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_confluence_section_required_for_publishing() {
        let yaml = r"
base_url: https://cloud.example.org
username: auditor
password: secret
remote_file_path: staff.xlsx
";
        let loader = ConfigLoader::from_yaml(yaml).unwrap();
        assert!(matches!(
            loader.confluence(),
            Err(AuditError::InvalidConfig { .. })
        ));
    }
}
