//! Lexer
//!
//!     OWF is line oriented: every construct of the language is recognised from a single
//!     line and its indentation. Lexing is therefore a two step affair:
//!
//!         1. Frontmatter extraction. See [frontmatter](frontmatter).
//!            A leading `---` fenced block of `key: value` lines is split off and
//!            turned into the document's variables.
//!
//!         2. Line classification. See [line_classification](line_classification).
//!            Each remaining line is tagged with a [LineType], its indentation and
//!            its 1-based source position.
//!
//!     At this point lexing is complete. The block builder turns the flat line sequence
//!     into a tree using the recorded indentation.
//!
//! Positions
//!
//!     Line numbers always refer to the original text, frontmatter included. The
//!     extractor reports where the body starts and the classifier numbers from there.

pub mod frontmatter;
pub mod line_classification;

pub use frontmatter::{extract_frontmatter, Frontmatter};
pub use line_classification::{classify_line, scan_lines, LineType, LogicalLine};
