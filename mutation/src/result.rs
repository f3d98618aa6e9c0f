//! Mutation result types.

use std::fmt;

/// Outcome of applying one operation to a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The tree was changed.
    Applied,
    /// The tree was left untouched.
    Skipped(SkipReason),
}

/// Why an operation left the tree untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The element to add is already present.
    Duplicate,
    /// The element to change or remove does not exist.
    NotFound,
}

impl MutationOutcome {
    pub fn duplicate() -> Self {
        MutationOutcome::Skipped(SkipReason::Duplicate)
    }

    pub fn not_found() -> Self {
        MutationOutcome::Skipped(SkipReason::NotFound)
    }

    /// Returns true if the tree was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    /// Get the skip reason if the tree was left untouched.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            MutationOutcome::Skipped(reason) => Some(*reason),
            MutationOutcome::Applied => None,
        }
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOutcome::Applied => write!(f, "applied"),
            MutationOutcome::Skipped(SkipReason::Duplicate) => write!(f, "skipped (duplicate)"),
            MutationOutcome::Skipped(SkipReason::NotFound) => write!(f, "skipped (not found)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        // GIVEN
        let applied = MutationOutcome::Applied;
        let skipped = MutationOutcome::not_found();

        // THEN
        assert!(applied.is_applied());
        assert_eq!(applied.skip_reason(), None);
        assert!(!skipped.is_applied());
        assert_eq!(skipped.skip_reason(), Some(SkipReason::NotFound));
        assert_eq!(MutationOutcome::duplicate().to_string(), "skipped (duplicate)");
    }
}
