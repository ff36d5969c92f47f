//! The per-run violation report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ComplianceCheck;

/// Failed, unwaived checks keyed by identifier.
///
/// Only identifiers with at least one violation appear. Entries only grow:
/// recording the same identifier twice unions the sets.
///
/// Serializes as a JSON object of identifier to check names.
///
/// # Example
///
/// ```
/// use staff_audit::models::ViolationReport;
///
/// let report = ViolationReport::default();
/// assert!(report.is_empty());
/// assert!(report.get("ann@example.org").is_none());
/// assert_eq!(report.lines(), Vec::<String>::new());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationReport {
    violations: BTreeMap<String, BTreeSet<ComplianceCheck>>,
}

impl ViolationReport {
    /// Records violations for an identifier. Empty sets are ignored.
    pub(crate) fn record(&mut self, identifier: &str, checks: BTreeSet<ComplianceCheck>) {
        if checks.is_empty() {
            return;
        }
        self.violations
            .entry(identifier.to_string())
            .or_default()
            .extend(checks);
    }

    /// Returns the violations recorded for an identifier.
    pub fn get(&self, identifier: &str) -> Option<&BTreeSet<ComplianceCheck>> {
        self.violations.get(identifier)
    }

    /// Iterates over identifiers and their violations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<ComplianceCheck>)> {
        self.violations
            .iter()
            .map(|(identifier, checks)| (identifier.as_str(), checks))
    }

    /// Returns the number of offending identifiers.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nobody has a violation.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// One human-readable line per offending identifier.
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(identifier, checks)| {
                let names: Vec<&str> = checks.iter().map(|check| check.name()).collect();
                format!("User {} has warnings: {}", identifier, names.join(", "))
            })
            .collect()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checks(items: &[ComplianceCheck]) -> BTreeSet<ComplianceCheck> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_empty_set_is_not_recorded() {
        let mut report = ViolationReport::default();
        report.record("ann@example.org", BTreeSet::new());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_recording_twice_unions() {
        let mut report = ViolationReport::default();
        report.record("ann@example.org", checks(&[ComplianceCheck::MailActive]));
        report.record("ann@example.org", checks(&[ComplianceCheck::ConfluenceActive]));

        assert_eq!(report.len(), 1);
        assert_eq!(
            report.get("ann@example.org"),
            Some(&checks(&[
                ComplianceCheck::MailActive,
                ComplianceCheck::ConfluenceActive
            ]))
        );
    }

    #[test]
    fn test_lines_list_check_names() {
        let mut report = ViolationReport::default();
        report.record(
            "ann@example.org",
            checks(&[ComplianceCheck::ConfluenceActive, ComplianceCheck::MailActive]),
        );
        assert_eq!(
            report.lines(),
            vec!["User ann@example.org has warnings: mail active, confluence active"]
        );
    }

    #[test]
    fn test_serializes_as_object_of_names() {
        let mut report = ViolationReport::default();
        report.record("bob@example.org", checks(&[ComplianceCheck::GithubActive]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"bob@example.org": ["github active"]}));
    }
}
