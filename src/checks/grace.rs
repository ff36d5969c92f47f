//! Employment status relative to the grace period.
//!
//! Accounts of a departed employee may stay active for a grace period after
//! the employment end date. Only rows past that window are checked.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::StaffRow;

/// Default grace period length in days.
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 30;

/// Number of days after an employment end date during which accounts may
/// remain active.
///
/// # Example
///
/// ```
/// use staff_audit::checks::GracePeriod;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let cutoff = GracePeriod::days(30).cutoff(now);
/// assert_eq!(cutoff, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GracePeriod {
    days: u32,
}

impl GracePeriod {
    /// Creates a grace period of `days` days.
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    /// Returns the length in days.
    pub fn as_days(self) -> u32 {
        self.days
    }

    /// The earliest end date still inside the window at `now`.
    pub fn cutoff(self, now: NaiveDateTime) -> NaiveDateTime {
        now.checked_sub_signed(Duration::days(i64::from(self.days)))
            .unwrap_or(NaiveDateTime::MIN)
    }
}

/// Decides whether a staff member is still inside the grace window.
///
/// - No end date: currently employed, returns `true`.
/// - End date on or after `now - grace`: returns `true`. The boundary itself
///   counts as inside the window.
/// - Otherwise returns `false` and the account checks must run.
///
/// # Example
///
/// ```
/// use staff_audit::checks::{GracePeriod, is_within_grace};
/// use staff_audit::models::StaffRow;
/// use chrono::{Duration, NaiveDate};
///
/// let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let mut row = StaffRow::new("ann@example.org");
/// assert!(is_within_grace(&row, GracePeriod::days(30), now));
///
/// row.employment_end = Some(now - Duration::days(45));
/// assert!(!is_within_grace(&row, GracePeriod::days(30), now));
/// ```
pub fn is_within_grace(row: &StaffRow, grace: GracePeriod, now: NaiveDateTime) -> bool {
    let Some(employment_end) = row.employment_end else {
        return true;
    };

    if employment_end < grace.cutoff(now) {
        debug!(
            identifier = %row.identifier,
            employment_end = %employment_end,
            grace_days = grace.as_days(),
            "Employee terminated past grace period"
        );
        return false;
    }

    true
}
