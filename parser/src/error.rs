//! Parser error types.

use crate::Span;
use std::fmt;

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token other than the expected one.
    UnexpectedToken,
    /// Input ended in the middle of a construct.
    UnexpectedEof,
    /// String, comment or heredoc without its terminator.
    Unterminated,
    /// Mismatched or missing bracket.
    Unbalanced,
    /// File without a `<?php` opening tag.
    MissingOpenTag,
}

/// A parse error with location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            found: None,
        }
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn unexpected_eof(span: Span, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            format!("unexpected end of input, expected {}", expected),
            span,
        )
        .with_found("end of input")
    }

    pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            format!("expected {}, found {}", expected, found),
            span,
        )
        .with_found(found)
    }

    pub fn unterminated(span: Span, what: &str) -> Self {
        Self::new(
            ParseErrorKind::Unterminated,
            format!("unterminated {}", what),
            span,
        )
    }

    pub fn unbalanced(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::Unbalanced,
            format!("unbalanced brackets, expected {}, found {}", expected, found),
            span,
        )
        .with_found(found)
    }

    pub fn missing_open_tag() -> Self {
        Self::new(
            ParseErrorKind::MissingOpenTag,
            "no '<?php' opening tag found",
            Span::new(0, 0, 1, 1),
        )
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
