//! Rendering of the staff list published to the wiki.

mod staff_table;

pub use staff_table::{STAFF_LIST_COLUMNS, escape_html, render_staff_table};
