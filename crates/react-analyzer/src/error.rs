//! Fatal analysis errors.

use source_text::Span;
use thiserror::Error;

/// An error that stops analysis. No model is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The file declares more than one top-level class.
    #[error("multiple components: `{second}` is declared after `{first}`, only one class component per file is supported")]
    MultipleComponents {
        /// Name of the class already extracted.
        first: String,
        /// Name of the offending class.
        second: String,
        /// Span of the offending class.
        span: Span,
    },
}

impl AnalyzeError {
    /// The source location of the error.
    pub fn span(&self) -> Span {
        match self {
            AnalyzeError::MultipleComponents { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AnalyzeError::MultipleComponents {
            first: "A".to_string(),
            second: "B".to_string(),
            span: Span::from_offsets(20, 40),
        };
        assert_eq!(
            err.to_string(),
            "multiple components: `B` is declared after `A`, only one class component per file is supported"
        );
        assert_eq!(err.span(), Span::from_offsets(20, 40));
    }
}
