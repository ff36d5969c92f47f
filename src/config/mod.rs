//! Configuration loading for the staff audit.
//!
//! This module loads the YAML configuration holding file-store credentials,
//! check settings and the wiki page to publish to.
//!
//! # Example
//!
//! ```no_run
//! use staff_audit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/staff-audit.yaml").unwrap();
//! println!("Staff sheet: {}", config.checks().staff_sheet);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, CheckSettings, ConfluenceConfig, DEFAULT_SOURCE_NAME, NextcloudConfig};
