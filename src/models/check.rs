//! The closed set of account compliance checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StaffRow;

/// A downstream account that must be deactivated once an employee is past
/// the grace period.
///
/// The check name doubles as the staff sheet column header and as the waiver
/// token operators write into the Exceptions sheet. Waiver tokens are matched
/// against [`ComplianceCheck::name`] verbatim and case-sensitively.
///
/// # Example
///
/// ```
/// use staff_audit::models::ComplianceCheck;
///
/// assert_eq!(ComplianceCheck::GithubActive.name(), "github active");
/// assert_eq!(ComplianceCheck::ALL.len(), 3);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ComplianceCheck {
    /// The mail account is still active.
    #[serde(rename = "mail active")]
    MailActive,
    /// The source-control (GitHub organization) membership is still active.
    #[serde(rename = "github active")]
    GithubActive,
    /// The wiki (Confluence) account is still active.
    #[serde(rename = "confluence active")]
    ConfluenceActive,
}

impl ComplianceCheck {
    /// Every check, in evaluation order.
    pub const ALL: [ComplianceCheck; 3] = [
        ComplianceCheck::MailActive,
        ComplianceCheck::GithubActive,
        ComplianceCheck::ConfluenceActive,
    ];

    /// The check name used for column lookup, waivers and reporting.
    pub fn name(self) -> &'static str {
        match self {
            ComplianceCheck::MailActive => "mail active",
            ComplianceCheck::GithubActive => "github active",
            ComplianceCheck::ConfluenceActive => "confluence active",
        }
    }

    /// Returns the row's "still active" flag for this account.
    pub fn is_active(self, row: &StaffRow) -> bool {
        match self {
            ComplianceCheck::MailActive => row.mail_active,
            ComplianceCheck::GithubActive => row.source_control_active,
            ComplianceCheck::ConfluenceActive => row.wiki_active,
        }
    }
}

impl fmt::Display for ComplianceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
