//! Builds the waiver registry from the Exceptions sheet.
//!
//! Each data row holds an identifier and a comma-separated list of check
//! names that are waived for that identifier.

use tracing::debug;

use crate::models::ExceptionRegistry;
use crate::workbook::Cell;

/// Splits a waiver cell into trimmed, non-empty tokens.
///
/// Only text cells carry waivers. An absent cell, or one holding a number,
/// date or boolean, yields no tokens.
///
/// # Example
///
/// ```
/// use staff_audit::checks::waiver_tokens;
/// use staff_audit::workbook::Cell;
///
/// let cell = Cell::text("mail active,  confluence active ,");
/// assert_eq!(waiver_tokens(Some(&cell)), vec!["mail active", "confluence active"]);
/// assert!(waiver_tokens(Some(&Cell::Number(1.0))).is_empty());
/// assert!(waiver_tokens(None).is_empty());
/// ```
pub fn waiver_tokens(cell: Option<&Cell>) -> Vec<&str> {
    cell.and_then(Cell::as_text)
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Builds the registry from Exceptions sheet data rows.
///
/// The first cell of a row is the identifier, the second the waiver list.
/// Repeated identifiers accumulate into one set. Iteration stops at the
/// first row with an empty identifier.
pub fn build_exception_registry<'a, I>(rows: I) -> ExceptionRegistry
where
    I: IntoIterator<Item = &'a [Cell]>,
{
    let mut registry = ExceptionRegistry::new();

    for row in rows {
        let Some(identifier_cell) = row.first().filter(|cell| !cell.is_empty()) else {
            debug!("Empty identifier in exception row, ending processing");
            break;
        };
        let identifier = identifier_cell.to_string();
        let identifier = identifier.trim();

        let tokens = waiver_tokens(row.get(1));
        if tokens.is_empty() {
            debug!(identifier = %identifier, "Exception row declares no waivers");
        }

        for token in tokens {
            debug!(identifier = %identifier, waiver = %token, "Adding waiver");
            registry.waive(identifier, token);
        }
    }

    registry
}
