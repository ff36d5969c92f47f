//! Sheets, header lookup and the end-of-table sentinel.

use std::collections::HashMap;

use crate::error::{AuditError, AuditResult};

use super::Cell;

/// A named sheet holding fixed-width rows.
///
/// Every row has the same number of cells; short rows are padded with
/// [`Cell::Empty`] on construction so column positions from the header row
/// are valid for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Creates a sheet, padding all rows to the width of the widest one.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of cells in each row.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Builds the header lookup from the first row.
    pub fn header_index(&self) -> HeaderIndex {
        HeaderIndex::from_row(&self.name, self.rows.first().map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Returns physical rows starting at the one-based `start_row`.
    ///
    /// This walks to the physical end of the sheet, blank rows included.
    pub fn rows(&self, start_row: usize) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows
            .iter()
            .skip(start_row.saturating_sub(1))
            .map(Vec::as_slice)
    }

    /// Returns the data rows below the header.
    ///
    /// Iteration stops at the first row whose leading cell is empty. Rows
    /// after that marker are never yielded even if they hold values.
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows(2)
            .take_while(|row| row.first().is_some_and(|cell| !cell.is_empty()))
    }
}

/// Maps lowercased header text to a column position.
///
/// # Example
///
/// ```
/// use staff_audit::workbook::{Cell, HeaderIndex};
///
/// let headers = HeaderIndex::from_row(
///     "Staff",
///     &[Cell::text("Name"), Cell::Empty, Cell::text(" Employment End ")],
/// );
/// assert_eq!(headers.get("employment end"), Some(2));
/// assert_eq!(headers.get("Name"), Some(0));
/// assert!(headers.require("role").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    sheet: String,
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Builds the lookup from a header row. Blank header cells are skipped.
    pub fn from_row(sheet: &str, row: &[Cell]) -> Self {
        let columns = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(index, cell)| (normalize(&cell.to_string()), index))
            .collect();

        Self {
            sheet: sheet.to_string(),
            columns,
        }
    }

    /// Looks up a column by header name, ignoring case and outer whitespace.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(&normalize(name)).copied()
    }

    /// Looks up a column that must exist.
    ///
    /// A missing header is a configuration mismatch and fails with
    /// [`AuditError::MissingColumn`].
    pub fn require(&self, name: &str) -> AuditResult<usize> {
        self.get(name).ok_or_else(|| AuditError::MissingColumn {
            sheet: self.sheet.clone(),
            column: normalize(name),
        })
    }

    /// Returns the number of named columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the header row had no named columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|value| {
                if value.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(*value)
                }
            })
            .collect()
    }

    #[test]
    fn test_short_rows_are_padded() {
        let sheet = Sheet::new("Staff", vec![row(&["a", "b", "c"]), row(&["x"])]);
        assert_eq!(sheet.width(), 3);
        let second: Vec<&[Cell]> = sheet.rows(2).collect();
        assert_eq!(second[0].len(), 3);
        assert_eq!(second[0][2], Cell::Empty);
    }

    #[test]
    fn test_data_rows_skip_header() {
        let sheet = Sheet::new(
            "Staff",
            vec![row(&["mail"]), row(&["a@x.org"]), row(&["b@x.org"])],
        );
        let rows: Vec<&[Cell]> = sheet.data_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::text("a@x.org"));
    }

    #[test]
    fn test_data_rows_stop_at_first_blank_leading_cell() {
        let sheet = Sheet::new(
            "Staff",
            vec![
                row(&["mail", "note"]),
                row(&["a@x.org", ""]),
                row(&["", "stray note"]),
                row(&["b@x.org", ""]),
            ],
        );
        let rows: Vec<&[Cell]> = sheet.data_rows().collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_whitespace_leading_cell_is_a_sentinel() {
        let sheet = Sheet::new(
            "Staff",
            vec![row(&["mail"]), row(&["  "]), row(&["b@x.org"])],
        );
        assert_eq!(sheet.data_rows().count(), 0);
    }

    #[test]
    fn test_trailing_blank_rows_do_not_crash() {
        let sheet = Sheet::new(
            "Staff",
            vec![row(&["mail"]), row(&["a@x.org"]), vec![], vec![]],
        );
        assert_eq!(sheet.data_rows().count(), 1);
        assert_eq!(sheet.rows(1).count(), 4);
    }

    #[test]
    fn test_empty_sheet_has_no_rows() {
        let sheet = Sheet::new("Staff", vec![]);
        assert_eq!(sheet.width(), 0);
        assert!(sheet.header_index().is_empty());
        assert_eq!(sheet.data_rows().count(), 0);
    }

    #[test]
    fn test_header_index_lowercases_names() {
        let headers = HeaderIndex::from_row("Staff", &row(&["NBIS Mail", "Mail active"]));
        assert_eq!(headers.get("nbis mail"), Some(0));
        assert_eq!(headers.get("MAIL ACTIVE"), Some(1));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_require_missing_column_fails_loudly() {
        let headers = HeaderIndex::from_row("Staff", &row(&["nbis mail"]));
        match headers.require("GitHub active") {
            Err(AuditError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, "Staff");
                assert_eq!(column, "github active");
            }
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }
}
