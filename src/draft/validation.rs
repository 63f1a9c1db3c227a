//! Draft validation report

use std::fmt;

/// A reason a draft cannot be submitted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftIssue {
    /// Amount does not parse to a value above zero
    AmountInvalid,
    CategoryUnset,
    PaymentMethodUnset,
}

impl DraftIssue {
    /// Key of the user-facing message in the `validation` namespace
    pub fn message_key(self) -> &'static str {
        match self {
            Self::AmountInvalid => "amount_invalid",
            Self::CategoryUnset => "category_unset",
            Self::PaymentMethodUnset => "payment_method_unset",
        }
    }
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountInvalid => write!(f, "amount must be greater than zero"),
            Self::CategoryUnset => write!(f, "category not selected"),
            Self::PaymentMethodUnset => write!(f, "payment method not selected"),
        }
    }
}

/// Outcome of validating a draft; drives whether submit is enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    issues: Vec<DraftIssue>,
}

impl Validation {
    pub(crate) fn from_issues(issues: Vec<DraftIssue>) -> Self {
        Self { issues }
    }

    pub fn is_submittable(&self) -> bool {
        self.issues.is_empty()
    }

    /// Missing fields in form order
    pub fn issues(&self) -> &[DraftIssue] {
        &self.issues
    }

    pub fn has(&self, issue: DraftIssue) -> bool {
        self.issues.contains(&issue)
    }

    pub fn into_issues(self) -> Vec<DraftIssue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_submittable() {
        assert!(Validation::default().is_submittable());
    }

    #[test]
    fn test_report_lists_issues() {
        let report = Validation::from_issues(vec![DraftIssue::CategoryUnset]);
        assert!(!report.is_submittable());
        assert!(report.has(DraftIssue::CategoryUnset));
        assert!(!report.has(DraftIssue::AmountInvalid));
        assert_eq!(DraftIssue::CategoryUnset.message_key(), "category_unset");
    }
}
