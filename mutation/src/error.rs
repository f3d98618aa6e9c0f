//! Mutation error types.

use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors raised while turning a queued descriptor into an operation.
///
/// Applying an operation never fails: a missing target or an existing
/// duplicate is reported through [`crate::MutationOutcome`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("Unknown operation: {kind}")]
    UnknownOperation { kind: String },

    #[error("Invalid parameter '{param}' for {kind}: expected {expected}")]
    InvalidParameter {
        kind: String,
        param: String,
        expected: String,
    },
}

impl MutationError {
    pub fn unknown_operation(kind: impl Into<String>) -> Self {
        Self::UnknownOperation { kind: kind.into() }
    }

    pub fn invalid_parameter(
        kind: impl Into<String>,
        param: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            kind: kind.into(),
            param: param.into(),
            expected: expected.into(),
        }
    }

    /// Returns the operation kind the error refers to.
    pub fn kind(&self) -> &str {
        match self {
            Self::UnknownOperation { kind } | Self::InvalidParameter { kind, .. } => kind,
        }
    }
}
