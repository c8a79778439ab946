//! Frontmatter extraction
//!
//!     A document may open with a block of variables fenced by `---` lines:
//!
//!         ---
//!         FTP: 250W
//!         1RM bench press: 100kg
//!         ---
//!
//!     Keys run up to the first colon, so they may contain spaces. Blank lines inside
//!     the block are ignored. A repeated key keeps its first position but takes the
//!     last value.

use crate::owf::ast::{ParseError, SourceSpan, Variables};
use once_cell::sync::Lazy;
use regex::Regex;

static KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?):\s*(.+)$").unwrap());

const FENCE: &str = "---";

/// The result of splitting frontmatter from a document
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub variables: Variables,
    /// Everything after the closing fence (or the whole text when there is no frontmatter)
    pub body: String,
    /// 1-based source line number of the first line of `body`
    pub body_start_line: usize,
}

pub fn extract_frontmatter(text: &str) -> Result<Frontmatter, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let opening = match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(index) if lines[index].trim() == FENCE => index,
        _ => {
            return Ok(Frontmatter {
                variables: Variables::new(),
                body: text.to_string(),
                body_start_line: 1,
            })
        }
    };

    let closing = lines
        .iter()
        .enumerate()
        .skip(opening + 1)
        .find(|(_, line)| line.trim() == FENCE)
        .map(|(index, _)| index)
        .ok_or_else(|| {
            ParseError::new("Unclosed frontmatter: missing closing '---'")
                .at(SourceSpan::new(opening + 1, 1))
        })?;

    let mut variables = Variables::new();
    for (index, line) in lines.iter().enumerate().take(closing).skip(opening + 1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let caps = KEY_VALUE.captures(line).ok_or_else(|| {
            ParseError::new(format!("Invalid frontmatter line: '{}'", line))
                .at(SourceSpan::new(index + 1, 1))
        })?;
        variables.insert(caps[1].trim(), caps[2].trim());
    }

    Ok(Frontmatter {
        variables,
        body: lines[closing + 1..].join("\n"),
        body_start_line: closing + 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let result = extract_frontmatter("# Workout\n- run 5km\n").unwrap();
        assert!(result.variables.is_empty());
        assert_eq!(result.body, "# Workout\n- run 5km\n");
        assert_eq!(result.body_start_line, 1);
    }

    #[test]
    fn test_variables_and_body() {
        let text = "---\nFTP: 250W\n1RM bench press: 100kg\n---\n# Workout\n";
        let result = extract_frontmatter(text).unwrap();
        assert_eq!(result.variables.get("FTP"), Some("250W"));
        assert_eq!(result.variables.get("1RM bench press"), Some("100kg"));
        assert_eq!(result.body, "# Workout\n");
        assert_eq!(result.body_start_line, 5);
    }

    #[test]
    fn test_leading_blank_lines_and_inner_blanks() {
        let text = "\n\n---\nFTP: 250W\n\nLTHR: 170bpm\n---\n";
        let result = extract_frontmatter(text).unwrap();
        assert_eq!(result.variables.len(), 2);
        assert_eq!(result.body_start_line, 8);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let text = "---\nFTP: 250W\nFTP: 265W\n---\n";
        let result = extract_frontmatter(text).unwrap();
        assert_eq!(result.variables.len(), 1);
        assert_eq!(result.variables.get("FTP"), Some("265W"));
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let err = extract_frontmatter("\n---\nFTP: 250W\n").unwrap_err();
        assert_eq!(err.message, "Unclosed frontmatter: missing closing '---'");
        assert_eq!(err.position.map(|p| p.line), Some(2));
    }

    #[test]
    fn test_invalid_line() {
        let err = extract_frontmatter("---\nFTP 250W\n---\n").unwrap_err();
        assert!(err.message.starts_with("Invalid frontmatter line"));
        assert_eq!(err.position.map(|p| p.line), Some(2));
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let result = extract_frontmatter("---\nstart: 07:30\n---\n").unwrap();
        assert_eq!(result.variables.get("start"), Some("07:30"));
    }
}
