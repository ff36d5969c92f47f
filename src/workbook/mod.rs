//! Spreadsheet access for the staff audit.
//!
//! This module loads a workbook from disk with `calamine` and exposes its
//! sheets as fixed-width rows of [`Cell`]s, plus the header lookup and the
//! end-of-table sentinel that the checks rely on.
//!
//! # Example
//!
//! ```
//! use staff_audit::workbook::{Cell, Sheet, Workbook};
//!
//! let workbook = Workbook::from_sheets(vec![Sheet::new(
//!     "Staff",
//!     vec![
//!         vec![Cell::text("NBIS mail"), Cell::text("Mail active")],
//!         vec![Cell::text("ann@example.org"), Cell::text("yes")],
//!         vec![Cell::Empty, Cell::Empty],
//!         vec![Cell::text("ignored@example.org"), Cell::text("yes")],
//!     ],
//! )]);
//!
//! let staff = workbook.sheet("Staff").unwrap();
//! assert_eq!(staff.header_index().get("mail active"), Some(1));
//! assert_eq!(staff.data_rows().count(), 1);
//! ```

mod cell;
mod reader;
mod sheet;

pub use cell::Cell;
pub(crate) use cell::parse_iso_datetime;
pub use reader::Workbook;
pub use sheet::{HeaderIndex, Sheet};
