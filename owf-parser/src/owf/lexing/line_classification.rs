//! Line Classification
//!
//!     Every source line is classified on its own, with no state carried between lines.
//!     Trailing whitespace is stripped first, then the first matching rule wins:
//!
//!         blank                  (empty after stripping)
//!         frontmatter fence      `---`
//!         session heading        `## ` at column 1
//!         heading                `# ` at column 1
//!         note                   `>` or `> ...`, leading spaces allowed
//!         step                   `-` or `- ...` after any number of leading spaces
//!
//!     Anything else carries no meaning in OWF and is degraded to a blank line. Its text
//!     is kept in `content` for diagnostics.
//!
//!     Only leading spaces count towards a step's indent. Other leading whitespace, such
//!     as a tab, is skipped when looking for the marker but adds no depth.

use crate::owf::ast::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Blank,
    FrontmatterFence,
    Heading,
    SessionHeading,
    Step,
    Note,
}

/// A classified source line
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalLine {
    pub line_type: LineType,
    /// Number of leading spaces
    pub indent: usize,
    /// The line with its marker (`# `, `- `, `> `...) removed
    pub content: String,
    pub span: SourceSpan,
}

impl LogicalLine {
    pub fn is(&self, line_type: LineType) -> bool {
        self.line_type == line_type
    }
}

fn strip_marker<'a>(text: &'a str, marker: char) -> Option<&'a str> {
    let rest = text.strip_prefix(marker)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

/// Classify a single line; `line_number` is its 1-based position in the source
pub fn classify_line(raw: &str, line_number: usize) -> LogicalLine {
    let text = raw.trim_end();
    let indent = text.len() - text.trim_start_matches(' ').len();
    let inner = text.trim_start();

    let (line_type, content) = if text.is_empty() {
        (LineType::Blank, "")
    } else if text == "---" {
        (LineType::FrontmatterFence, "")
    } else if let Some(rest) = text.strip_prefix("## ") {
        (LineType::SessionHeading, rest.trim())
    } else if let Some(rest) = text.strip_prefix("# ") {
        (LineType::Heading, rest.trim())
    } else if let Some(rest) = strip_marker(inner, '>') {
        (LineType::Note, rest.trim())
    } else if let Some(rest) = strip_marker(inner, '-') {
        (LineType::Step, rest.trim())
    } else {
        (LineType::Blank, text)
    };

    let column = match line_type {
        LineType::Step | LineType::Note => indent + 1,
        _ => 1,
    };

    LogicalLine {
        line_type,
        indent: if line_type == LineType::Step { indent } else { 0 },
        content: content.to_string(),
        span: SourceSpan::new(line_number, column).with_end(line_number, text.len() + 1),
    }
}

/// Classify every line of `text`, numbering from `first_line`
pub fn scan_lines(text: &str, first_line: usize) -> Vec<LogicalLine> {
    text.split('\n')
        .enumerate()
        .map(|(index, raw)| classify_line(raw, first_line + index))
        .collect()
}
