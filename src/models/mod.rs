//! Core data models for the staff audit.
//!
//! This module contains the typed staff record, the closed set of compliance
//! checks, the waiver registry and the violation report.

mod check;
mod exception;
mod report;
mod staff;

pub use check::ComplianceCheck;
pub use exception::ExceptionRegistry;
pub use report::ViolationReport;
pub use staff::{ACTIVE_MARKER, StaffColumns, StaffRow, load_staff_rows};
