//! Staff records decoded from the Staff sheet.
//!
//! Columns are resolved once from the header row into a [`StaffColumns`]
//! value; every data row is then decoded into a typed [`StaffRow`]. A sheet
//! missing any required column is rejected before a single row is read.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};
use crate::workbook::{Cell, HeaderIndex, Sheet};

use super::ComplianceCheck;

/// The cell value that marks an account as still active. Case-sensitive.
pub const ACTIVE_MARKER: &str = "yes";

/// One employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRow {
    /// Unique per-employee key, normally the work email address.
    pub identifier: String,
    /// When employment ended. `None` means currently employed.
    pub employment_end: Option<NaiveDateTime>,
    /// The mail account is still active.
    pub mail_active: bool,
    /// The source-control membership is still active.
    pub source_control_active: bool,
    /// The wiki account is still active.
    pub wiki_active: bool,
}

impl StaffRow {
    /// Creates a currently employed staff member with every account inactive.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            employment_end: None,
            mail_active: false,
            source_control_active: false,
            wiki_active: false,
        }
    }
}

/// Column positions of the fields a [`StaffRow`] is decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffColumns {
    identifier: usize,
    employment_end: usize,
    mail_active: usize,
    source_control_active: usize,
    wiki_active: usize,
}

impl StaffColumns {
    /// Resolves every required column against the header row.
    ///
    /// The account flag columns are named after the checks
    /// (see [`ComplianceCheck::name`]).
    pub fn resolve(
        headers: &HeaderIndex,
        identifier_column: &str,
        employment_end_column: &str,
    ) -> AuditResult<Self> {
        Ok(Self {
            identifier: headers.require(identifier_column)?,
            employment_end: headers.require(employment_end_column)?,
            mail_active: headers.require(ComplianceCheck::MailActive.name())?,
            source_control_active: headers.require(ComplianceCheck::GithubActive.name())?,
            wiki_active: headers.require(ComplianceCheck::ConfluenceActive.name())?,
        })
    }

    /// Decodes one data row. `row_number` is the one-based sheet row used in
    /// error messages.
    pub fn decode(&self, row_number: usize, cells: &[Cell]) -> AuditResult<StaffRow> {
        let cell = |index: usize| cells.get(index).unwrap_or(&Cell::Empty);

        let identifier = cell(self.identifier).to_string().trim().to_string();
        if identifier.is_empty() {
            return Err(AuditError::InvalidStaffRow {
                row: row_number,
                message: "identifier is empty".to_string(),
            });
        }

        let employment_end = match cell(self.employment_end) {
            Cell::Empty => None,
            Cell::Date(value) => Some(*value),
            Cell::Text(value) if value.trim().is_empty() => None,
            Cell::Text(value) => Some(
                crate::workbook::parse_iso_datetime(value).ok_or_else(|| {
                    AuditError::InvalidStaffRow {
                        row: row_number,
                        message: format!("unparsable employment end date '{}'", value),
                    }
                })?,
            ),
            other => {
                return Err(AuditError::InvalidStaffRow {
                    row: row_number,
                    message: format!("employment end is not a date: '{}'", other),
                });
            }
        };

        Ok(StaffRow {
            identifier,
            employment_end,
            mail_active: is_active_marker(cell(self.mail_active)),
            source_control_active: is_active_marker(cell(self.source_control_active)),
            wiki_active: is_active_marker(cell(self.wiki_active)),
        })
    }
}

fn is_active_marker(cell: &Cell) -> bool {
    cell.as_text() == Some(ACTIVE_MARKER)
}

/// Decodes every data row of the Staff sheet.
///
/// Stops at the end-of-table sentinel row. Fails if a required column is
/// missing or a row cannot be decoded.
pub fn load_staff_rows(
    sheet: &Sheet,
    identifier_column: &str,
    employment_end_column: &str,
) -> AuditResult<Vec<StaffRow>> {
    let columns = StaffColumns::resolve(
        &sheet.header_index(),
        identifier_column,
        employment_end_column,
    )?;

    sheet
        .data_rows()
        .enumerate()
        // Data starts on the second sheet row.
        .map(|(index, cells)| columns.decode(index + 2, cells))
        .collect()
}
