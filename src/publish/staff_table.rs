//! Staff list rendering.
//!
//! Turns the roster sheet into an HTML table in wiki storage format. Unlike
//! the compliance checks, blank rows are skipped rather than treated as the
//! end of the table.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::AuditResult;
use crate::workbook::{Cell, Sheet};

/// Published columns: lowercased header name and table heading.
pub const STAFF_LIST_COLUMNS: [(&str, &str); 4] = [
    ("name", "Name"),
    ("unit", "Unit"),
    ("organization", "Organization"),
    ("role", "Role"),
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders the staff table followed by a footer with both timestamps.
///
/// # Arguments
///
/// * `sheet` - The roster sheet
/// * `source` - Where the roster is kept, named in the footer
/// * `document_updated` - When the roster file was last modified
/// * `rendered_at` - When this rendering happens
///
/// Fails with `MissingColumn` if one of [`STAFF_LIST_COLUMNS`] is absent.
///
/// # Example
///
/// ```
/// use staff_audit::publish::render_staff_table;
/// use staff_audit::workbook::{Cell, Sheet};
/// use chrono::NaiveDate;
///
/// let sheet = Sheet::new(
///     "Staff",
///     vec![
///         vec![Cell::text("Name"), Cell::text("Unit"), Cell::text("Organization"), Cell::text("Role")],
///         vec![Cell::text("Ann"), Cell::text("Data"), Cell::text("Uni"), Cell::text("Engineer")],
///     ],
/// );
/// let at = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(6, 0, 0).unwrap();
///
/// let html = render_staff_table(&sheet, "the team drive", at, at).unwrap();
/// assert!(html.contains("<td>Ann</td>"));
/// assert!(html.contains("2026-10-16 06:00"));
/// ```
pub fn render_staff_table(
    sheet: &Sheet,
    source: &str,
    document_updated: NaiveDateTime,
    rendered_at: NaiveDateTime,
) -> AuditResult<String> {
    let headers = sheet.header_index();
    let columns = STAFF_LIST_COLUMNS
        .iter()
        .map(|(name, _)| headers.require(name))
        .collect::<AuditResult<Vec<usize>>>()?;

    let mut html = String::from("<table>\n  <tr>\n");
    for (_, heading) in STAFF_LIST_COLUMNS {
        html.push_str(&format!("    <th><strong>{}</strong></th>\n", heading));
    }
    html.push_str("  </tr>\n");

    let mut rendered = 0usize;
    for row in sheet.rows(2) {
        if row.iter().all(Cell::is_empty) {
            continue;
        }

        html.push_str("  <tr>\n");
        for &column in &columns {
            let value = row.get(column).map(Cell::to_string).unwrap_or_default();
            html.push_str(&format!("    <td>{}</td>\n", escape_html(value.trim())));
        }
        html.push_str("  </tr>\n");
        rendered += 1;
    }
    html.push_str("</table>\n");
    debug!(rows = rendered, "Rendered staff table");

    html.push_str(&format!(
        "<p>This list is generated daily from the central master staff list in {}.</p>\n",
        escape_html(source.trim())
    ));
    html.push_str(&format!(
        "<p>Staff list document updated:&nbsp;&nbsp;&nbsp;{}</p>\n",
        document_updated.format(TIMESTAMP_FORMAT)
    ));
    html.push_str(&format!(
        "<p>This page rendered on:&nbsp;&nbsp;&nbsp;{}</p>\n",
        rendered_at.format(TIMESTAMP_FORMAT)
    ));

    Ok(html)
}

/// Escapes text for use inside an HTML element.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
