//! The compliance rule engine.
//!
//! For every staff row past the grace period, each [`ComplianceCheck`] whose
//! account is still active is either waived through the
//! [`ExceptionRegistry`] or recorded as a violation.
//!
//! ```text
//! Start -> WithinGrace                        (skip, no checks)
//!       -> PastGrace -> check x3 -> Inactive  (no-op)
//!                               -> Waived     (no-op)
//!                               -> Violation  (recorded)
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::CheckSettings;
use crate::error::AuditResult;
use crate::models::{
    ComplianceCheck, ExceptionRegistry, StaffRow, ViolationReport, load_staff_rows,
};
use crate::workbook::{Cell, Workbook};

use super::{GracePeriod, build_exception_registry, is_within_grace};

/// The result of evaluating one check on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The account is deactivated.
    Inactive,
    /// The account is active but the check is waived for this user.
    Waived,
    /// The account is active and not waived.
    Violation,
}

/// The result of evaluating one staff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The employee is still employed or inside the grace window.
    WithinGrace,
    /// Past grace; holds the violated checks, possibly none.
    Evaluated(BTreeSet<ComplianceCheck>),
}

/// Evaluates a single check for a row that is past the grace period.
pub fn evaluate_check(
    row: &StaffRow,
    check: ComplianceCheck,
    registry: &ExceptionRegistry,
) -> CheckOutcome {
    if !check.is_active(row) {
        return CheckOutcome::Inactive;
    }

    debug!(identifier = %row.identifier, check = %check, "Account is still active");
    if registry.is_waived(&row.identifier, check) {
        debug!(identifier = %row.identifier, check = %check, "Check waived by exception");
        return CheckOutcome::Waived;
    }

    CheckOutcome::Violation
}

/// Evaluates every check for one row.
pub fn evaluate_row(
    row: &StaffRow,
    registry: &ExceptionRegistry,
    grace: GracePeriod,
    now: NaiveDateTime,
) -> RowOutcome {
    if is_within_grace(row, grace, now) {
        return RowOutcome::WithinGrace;
    }

    let violations = ComplianceCheck::ALL
        .into_iter()
        .filter(|check| evaluate_check(row, *check, registry) == CheckOutcome::Violation)
        .collect();

    RowOutcome::Evaluated(violations)
}

/// Evaluates all staff rows against an existing registry.
pub fn evaluate_with_registry(
    staff_rows: &[StaffRow],
    registry: &ExceptionRegistry,
    grace: GracePeriod,
    now: NaiveDateTime,
) -> ViolationReport {
    let mut report = ViolationReport::default();

    for row in staff_rows {
        if let RowOutcome::Evaluated(violations) = evaluate_row(row, registry, grace, now) {
            if !violations.is_empty() {
                debug!(
                    identifier = %row.identifier,
                    violations = violations.len(),
                    "Recording violations"
                );
            }
            report.record(&row.identifier, violations);
        }
    }

    report
}

/// Evaluates staff rows against the raw Exceptions sheet rows.
///
/// Pure apart from reading its inputs: the same rows, grace period and
/// `now` always produce the same report.
///
/// # Example
///
/// ```
/// use staff_audit::checks::{GracePeriod, evaluate};
/// use staff_audit::models::{ComplianceCheck, StaffRow};
/// use staff_audit::workbook::Cell;
/// use chrono::{Duration, NaiveDate};
///
/// let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let row = StaffRow {
///     employment_end: Some(now - Duration::days(45)),
///     mail_active: true,
///     wiki_active: true,
///     ..StaffRow::new("ann@example.org")
/// };
/// let exceptions = vec![vec![Cell::text("ann@example.org"), Cell::text("mail active")]];
///
/// let report = evaluate(
///     &[row],
///     exceptions.iter().map(Vec::as_slice),
///     GracePeriod::days(30),
///     now,
/// );
///
/// let violations = report.get("ann@example.org").unwrap();
/// assert!(violations.contains(&ComplianceCheck::ConfluenceActive));
/// assert!(!violations.contains(&ComplianceCheck::MailActive));
/// ```
pub fn evaluate<'a, I>(
    staff_rows: &[StaffRow],
    exception_rows: I,
    grace: GracePeriod,
    now: NaiveDateTime,
) -> ViolationReport
where
    I: IntoIterator<Item = &'a [Cell]>,
{
    let registry = build_exception_registry(exception_rows);
    evaluate_with_registry(staff_rows, &registry, grace, now)
}

/// Runs the checks over a loaded workbook.
///
/// Both the staff and the exceptions sheet must exist and the staff sheet
/// must carry every required column; otherwise no report is produced.
pub fn run_checks(
    workbook: &Workbook,
    settings: &CheckSettings,
    grace: GracePeriod,
    now: NaiveDateTime,
) -> AuditResult<ViolationReport> {
    info!("Loading staff sheet");
    let staff_sheet = workbook.sheet(&settings.staff_sheet)?;

    info!("Loading exception sheet");
    let exception_sheet = workbook.sheet(&settings.exceptions_sheet)?;

    let staff_rows = load_staff_rows(
        staff_sheet,
        &settings.identifier_column,
        &settings.employment_end_column,
    )?;
    let registry = build_exception_registry(exception_sheet.data_rows());
    debug!(
        staff = staff_rows.len(),
        users_with_exceptions = registry.len(),
        "Loaded sheets"
    );

    info!(grace_days = grace.as_days(), "Running checks on the spreadsheet");
    Ok(evaluate_with_registry(&staff_rows, &registry, grace, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn departed(identifier: &str, days_ago: i64, flags: [bool; 3]) -> StaffRow {
        StaffRow {
            identifier: identifier.to_string(),
            employment_end: Some(now() - Duration::days(days_ago)),
            mail_active: flags[0],
            source_control_active: flags[1],
            wiki_active: flags[2],
        }
    }

    fn registry(entries: &[(&str, &str)]) -> ExceptionRegistry {
        let rows: Vec<Vec<Cell>> = entries
            .iter()
            .map(|(id, waivers)| vec![Cell::text(*id), Cell::text(*waivers)])
            .collect();
        build_exception_registry(rows.iter().map(Vec::as_slice))
    }

    fn grace() -> GracePeriod {
        GracePeriod::days(30)
    }

    #[test]
    fn test_inactive_account_is_not_a_violation() {
        let row = departed("ann@example.org", 45, [false, false, false]);
        let outcome = evaluate_check(&row, ComplianceCheck::MailActive, &registry(&[]));
        assert_eq!(outcome, CheckOutcome::Inactive);
    }

    #[test]
    fn test_waived_check_outcome() {
        let row = departed("ann@example.org", 45, [true, false, false]);
        let outcome = evaluate_check(
            &row,
            ComplianceCheck::MailActive,
            &registry(&[("ann@example.org", "mail active")]),
        );
        assert_eq!(outcome, CheckOutcome::Waived);
    }

    #[test]
    fn test_within_grace_skips_all_checks() {
        let row = departed("ann@example.org", 10, [true, true, true]);
        assert_eq!(
            evaluate_row(&row, &registry(&[]), grace(), now()),
            RowOutcome::WithinGrace
        );
    }

    #[test]
    fn test_past_grace_collects_active_accounts() {
        let row = departed("ann@example.org", 45, [true, false, true]);
        let outcome = evaluate_row(&row, &registry(&[]), grace(), now());
        let expected: BTreeSet<ComplianceCheck> =
            [ComplianceCheck::MailActive, ComplianceCheck::ConfluenceActive]
                .into_iter()
                .collect();
        assert_eq!(outcome, RowOutcome::Evaluated(expected));
    }

    #[test]
    fn test_compliant_row_is_absent_from_report() {
        let rows = vec![departed("ann@example.org", 45, [false, false, false])];
        let report = evaluate_with_registry(&rows, &registry(&[]), grace(), now());
        assert!(report.is_empty());
    }

    #[test]
    fn test_fully_waived_row_is_absent_from_report() {
        let rows = vec![departed("ann@example.org", 45, [true, false, true])];
        let report = evaluate_with_registry(
            &rows,
            &registry(&[("ann@example.org", "mail active, confluence active")]),
            grace(),
            now(),
        );
        assert!(report.get("ann@example.org").is_none());
    }

    #[test]
    fn test_waiver_for_other_user_does_not_apply() {
        let rows = vec![departed("ann@example.org", 45, [true, false, false])];
        let report = evaluate_with_registry(
            &rows,
            &registry(&[("bob@example.org", "mail active")]),
            grace(),
            now(),
        );
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_differently_cased_waiver_does_not_suppress() {
        let rows = vec![departed("ann@example.org", 45, [false, true, false])];
        let report = evaluate_with_registry(
            &rows,
            &registry(&[("ann@example.org", "GitHub Active")]),
            grace(),
            now(),
        );
        assert!(report
            .get("ann@example.org")
            .unwrap()
            .contains(&ComplianceCheck::GithubActive));
    }

    #[test]
    fn test_currently_employed_never_reported() {
        let rows = vec![StaffRow {
            mail_active: true,
            source_control_active: true,
            wiki_active: true,
            ..StaffRow::new("ann@example.org")
        }];
        let report = evaluate_with_registry(&rows, &registry(&[]), GracePeriod::days(0), now());
        assert!(report.is_empty());
    }
}
