//! Workbook loading.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{AuditError, AuditResult};

use super::{Cell, Sheet};

/// An in-memory workbook.
///
/// Sheets are kept in file order. Lookups by name are exact and
/// case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Loads every sheet of an `.xlsx`, `.xls` or `.ods` file.
    ///
    /// Returns [`AuditError::WorkbookLoad`] if the file cannot be opened or a
    /// sheet cannot be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let load_error = |message: String| AuditError::WorkbookLoad {
            path: path_str.clone(),
            message,
        };

        let mut reader = open_workbook_auto(path).map_err(|e| load_error(e.to_string()))?;

        let mut sheets = Vec::new();
        for name in reader.sheet_names() {
            let range = reader
                .worksheet_range(&name)
                .map_err(|e| load_error(format!("sheet '{}': {}", name, e)))?;

            let rows = physical_rows(&range);
            debug!(sheet = %name, rows = rows.len(), "Loaded sheet");

            sheets.push(Sheet::new(name, rows));
        }

        Ok(Self { sheets })
    }

    /// Builds a workbook from sheets already in memory.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Returns the sheet with the given name.
    pub fn sheet(&self, name: &str) -> AuditResult<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name() == name)
            .ok_or_else(|| AuditError::SheetNotFound {
                sheet: name.to_string(),
            })
    }

    /// Returns the first sheet in file order.
    pub fn first_sheet(&self) -> AuditResult<&Sheet> {
        self.sheets.first().ok_or_else(|| AuditError::SheetNotFound {
            sheet: "(first sheet)".to_string(),
        })
    }

    /// Returns the sheet names in file order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }
}

/// Converts a range into rows anchored at cell A1.
///
/// `calamine` ranges begin at the first used cell, so leading blank rows and
/// columns are restored as [`Cell::Empty`]. Row `i` of the result is then
/// always physical sheet row `i + 1`.
fn physical_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let blank_rows = (0..start_row).map(|_| Vec::<Cell>::new());
    let used_rows = range.rows().map(|row| {
        std::iter::repeat_n(Cell::Empty, start_col as usize)
            .chain(row.iter().map(Cell::from))
            .collect::<Vec<Cell>>()
    });

    blank_rows.chain(used_rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn workbook() -> Workbook {
        Workbook::from_sheets(vec![
            Sheet::new("Staff", vec![vec![Cell::text("nbis mail")]]),
            Sheet::new("Exceptions", vec![vec![Cell::text("nbis mail")]]),
        ])
    }

    #[test]
    fn test_sheet_lookup_by_name() {
        let workbook = workbook();
        assert_eq!(workbook.sheet("Exceptions").unwrap().name(), "Exceptions");
        assert_eq!(workbook.first_sheet().unwrap().name(), "Staff");
        assert_eq!(workbook.sheet_names(), vec!["Staff", "Exceptions"]);
    }

    #[test]
    fn test_sheet_lookup_is_case_sensitive() {
        let workbook = workbook();
        match workbook.sheet("staff") {
            Err(AuditError::SheetNotFound { sheet }) => assert_eq!(sheet, "staff"),
            other => panic!("Expected SheetNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_workbook_has_no_first_sheet() {
        let workbook = Workbook::default();
        assert!(matches!(
            workbook.first_sheet(),
            Err(AuditError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn test_physical_rows_restore_leading_blanks() {
        // Used area B2:C3, so row 1 and column A are blank.
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("NBIS mail".into()));
        range.set_value((1, 2), Data::String("Mail active".into()));
        range.set_value((2, 1), Data::String("ann@example.org".into()));
        range.set_value((2, 2), Data::String("yes".into()));

        let sheet = Sheet::new("Staff", physical_rows(&range));

        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.rows(1).next().unwrap(), &[Cell::Empty, Cell::Empty, Cell::Empty]);
        assert_eq!(sheet.rows(2).next().unwrap()[1], Cell::text("NBIS mail"));
        assert_eq!(sheet.rows(3).next().unwrap()[2], Cell::text("yes"));
        // Header lookup reads physical row 1, which is blank here.
        assert!(sheet.header_index().is_empty());
    }

    #[test]
    fn test_physical_rows_of_a1_range_are_unchanged() {
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), Data::String("Name".into()));
        range.set_value((1, 0), Data::Float(2.0));

        assert_eq!(
            physical_rows(&range),
            vec![vec![Cell::text("Name")], vec![Cell::Number(2.0)]]
        );
    }

    #[test]
    fn test_physical_rows_of_empty_range() {
        assert!(physical_rows(&Range::<Data>::empty()).is_empty());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = Workbook::open("/nonexistent/staff_list.xlsx");
        match result {
            Err(AuditError::WorkbookLoad { path, .. }) => {
                assert!(path.contains("staff_list.xlsx"));
            }
            other => panic!("Expected WorkbookLoad error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_garbage_file_fails() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a spreadsheet").unwrap();

        let result = Workbook::open(file.path());
        assert!(matches!(result, Err(AuditError::WorkbookLoad { .. })));
    }
}
