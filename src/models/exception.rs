//! Per-user waivers read from the Exceptions sheet.

use std::collections::{HashMap, HashSet};

use super::ComplianceCheck;

/// Maps an identifier to the set of check names waived for it.
///
/// Waiver tokens are free text. A token only suppresses a violation when it
/// equals a check name exactly (see [`ComplianceCheck::name`]); misspelled
/// tokens are kept but never match anything.
///
/// Users without an entry have an empty waiver set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionRegistry {
    waivers: HashMap<String, HashSet<String>>,
}

impl ExceptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one waiver token for an identifier. Repeated identifiers
    /// accumulate into the same set.
    pub(crate) fn waive(&mut self, identifier: &str, token: &str) {
        self.waivers
            .entry(identifier.to_string())
            .or_default()
            .insert(token.to_string());
    }

    /// Returns the waiver tokens for an identifier, if any were declared.
    pub fn waivers_for(&self, identifier: &str) -> Option<&HashSet<String>> {
        self.waivers.get(identifier)
    }

    /// Returns true if `check` is waived for `identifier`.
    pub fn is_waived(&self, identifier: &str, check: ComplianceCheck) -> bool {
        self.waivers_for(identifier)
            .is_some_and(|waivers| waivers.contains(check.name()))
    }

    /// Returns the number of identifiers with at least one waiver.
    pub fn len(&self) -> usize {
        self.waivers.len()
    }

    /// Returns true if no waivers were declared.
    pub fn is_empty(&self) -> bool {
        self.waivers.is_empty()
    }
}
