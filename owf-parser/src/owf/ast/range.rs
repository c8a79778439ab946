//! Source positions for diagnostics
//!
//! Positions are 1-based line and column numbers into the original document text,
//! including any frontmatter lines. They are attached to workouts and steps purely
//! for error reporting and tooling.
//!
//! [SourceSpan] deliberately takes no part in structural equality: any two spans
//! compare equal. Nodes derive `PartialEq` and still compare by content only.

use std::fmt;

/// A 1-based line:column position with an optional end position
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceSpan {
    pub line: usize,
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

impl SourceSpan {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    /// Extend the span to end at the given position
    pub fn with_end(self, end_line: usize, end_column: usize) -> Self {
        Self {
            end_line: Some(end_line),
            end_column: Some(end_column),
            ..self
        }
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_never_affect_equality() {
        assert_eq!(SourceSpan::new(1, 1), SourceSpan::new(40, 7).with_end(42, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceSpan::new(4, 3).to_string(), "line 4, col 3");
    }
}
