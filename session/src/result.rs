//! Session result types.

use std::fmt;

use sculptor_mutation::MutationOutcome;

/// What one drained descriptor did to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    /// Kind name of the descriptor.
    pub kind: String,
    pub outcome: MutationOutcome,
}

impl OperationReport {
    pub fn new(kind: impl Into<String>, outcome: MutationOutcome) -> Self {
        Self {
            kind: kind.into(),
            outcome,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.outcome)
    }
}
