//! Error types for parsing and resolution
//!
//!     Every stage either returns a complete tree or fails with a single error; there is
//!     no partial output. Errors carry an optional [SourceSpan] pointing at the line that
//!     triggered them.

use crate::owf::ast::range::SourceSpan;
use std::fmt;

/// Errors raised while turning OWF text into a document
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: Option<SourceSpan>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Attach a source position to this error
    pub fn at(self, position: SourceSpan) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {}", position, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while evaluating expressions against variables
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveError {
    pub message: String,
    pub position: Option<SourceSpan>,
}

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Attach a source position unless one is already set
    pub fn at(self, position: SourceSpan) -> Self {
        Self {
            position: self.position.or(Some(position)),
            ..self
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {}", position, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Value-level failures of the expression grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Nothing to parse
    Empty,
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::Empty => write!(f, "Empty expression"),
        }
    }
}

impl std::error::Error for ExpressionError {}

/// A token that does not spell a duration, distance or pace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitError {
    pub kind: &'static str,
    pub input: String,
}

impl UnitError {
    pub fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: '{}'", self.kind, self.input)
    }
}

impl std::error::Error for UnitError {}

/// Format source context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// `line` is 1-based, matching [SourceSpan].
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_index = line.saturating_sub(1);

    let start = error_index.saturating_sub(2);
    let end = (error_index + 3).min(lines.len());

    let mut context = String::new();
    for (index, text) in lines.iter().enumerate().take(end).skip(start) {
        let marker = if index == error_index { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, index + 1, text));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = ParseError::new("Empty step").at(SourceSpan::new(3, 1));
        assert_eq!(err.to_string(), "line 3, col 1: Empty step");
    }

    #[test]
    fn test_display_without_position() {
        let err = ResolveError::new("Undefined variable: 'FTP'");
        assert_eq!(err.to_string(), "Undefined variable: 'FTP'");
    }

    #[test]
    fn resolve_error_keeps_innermost_position() {
        let err = ResolveError::new("boom")
            .at(SourceSpan::new(2, 3))
            .at(SourceSpan::new(9, 1));
        assert_eq!(err.position.map(|p| p.line), Some(2));
    }

    #[test]
    fn test_value_error_messages() {
        assert_eq!(
            UnitError::new("duration", "5parsecs").to_string(),
            "Invalid duration: '5parsecs'"
        );
        assert_eq!(ExpressionError::Empty.to_string(), "Empty expression");
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let context = format_source_context(source, 4);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 1"));
        assert!(!context.contains("line 7"));
    }
}
