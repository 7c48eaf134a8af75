//! Parse error types.

use source_text::{LineCol, Span};
use thiserror::Error;

/// An error that stopped parsing. There is no partial tree behind it.
#[derive(Debug, Clone, Error)]
#[error("{kind} at {}:{}", .position.line + 1, .position.col + 1)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the cleaned source where the error occurred.
    pub span: Span,
    /// Line/column of `span.start` (0-indexed).
    pub position: LineCol,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, position: LineCol) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Error)]
pub enum ParseErrorKind {
    /// swc rejected the input outright.
    #[error("syntax error: {message}")]
    Syntax {
        /// swc's description of the problem.
        message: String,
    },

    /// swc recovered from the error, but a recovered tree is not trusted.
    #[error("syntax error (recovered by parser, rejected): {message}")]
    Recovered {
        /// swc's description of the problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::Syntax {
                message: "Expected '}', got '<eof>'".to_string(),
            },
            Span::from_offsets(10, 11),
            LineCol::new(2, 4),
        );
        assert_eq!(
            error.to_string(),
            "syntax error: Expected '}', got '<eof>' at 3:5"
        );
    }
}
