use std::fmt;

use super::error::VerifyError;

/// The outcome of verifying one rule application: error lists for the
/// conclusion, for the rule as a whole, and for each premise in order.
///
/// Errors are deliberately collected rather than short-circuited so that a
/// failing premise never hides problems in the other premises or in the
/// conclusion. An empty report means the application is a correct use of
/// the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct VerifyReport {
    pub(crate) conclusion_errors: Vec<VerifyError>,
    pub(crate) rule_errors: Vec<VerifyError>,
    pub(crate) premise_errors: Vec<Vec<VerifyError>>,
}

impl VerifyReport {
    pub(crate) fn new(premise_count: usize) -> Self {
        Self {
            conclusion_errors: Vec::new(),
            rule_errors: Vec::new(),
            premise_errors: vec![Vec::new(); premise_count],
        }
    }

    /// `true` when no errors were recorded anywhere.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.conclusion_errors.is_empty()
            && self.rule_errors.is_empty()
            && self.premise_errors.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn conclusion_errors(&self) -> &[VerifyError] {
        &self.conclusion_errors
    }

    #[must_use]
    pub fn rule_errors(&self) -> &[VerifyError] {
        &self.rule_errors
    }

    /// One error list per premise, in premise order.
    #[must_use]
    pub fn premise_errors(&self) -> &[Vec<VerifyError>] {
        &self.premise_errors
    }

    /// Every recorded error, conclusion first, then rule, then premises.
    pub fn all_errors(&self) -> impl Iterator<Item = &VerifyError> {
        self.conclusion_errors
            .iter()
            .chain(self.rule_errors.iter())
            .chain(self.premise_errors.iter().flatten())
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(
            f,
            "invalid ({} errors)",
            self.all_errors().count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = VerifyReport::new(2);
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "valid");
    }

    #[test]
    fn report_with_errors_is_invalid() {
        let mut report = VerifyReport::new(1);
        report.rule_errors.push(VerifyError::UnableToUnify);
        report.premise_errors[0].push(VerifyError::StructureMismatch);
        assert!(!report.is_valid());
        assert_eq!(report.all_errors().count(), 2);
        assert_eq!(report.to_string(), "invalid (2 errors)");
    }
}
