//! Parsing
//!
//!     The parsing stage gives meaning to the raw block tree:
//!
//!         1. [document] splits the lines at headings into workouts and sessions
//!         2. [heading] decodes `# Name [type] (date) @RPE n @RIR n`
//!         3. [step] descends the block tree, recognising block headers and leaf steps
//!         4. [parameter] classifies the `@` modifiers of a leaf step
//!         5. [expression] parses computed values such as `80% of FTP`
//!
//!     All patterns live in [grammar], compiled once and shared.
//!
//!     Token classification is ambiguous by nature (`5min` vs `5mi`, `3x8` vs a name), and
//!     every ambiguity is settled by a fixed order of attempts. There is no backtracking
//!     across lines.

pub mod document;
pub mod expression;
mod grammar;
pub mod heading;
pub mod parameter;
pub mod step;

pub use document::parse_document;
pub use expression::parse_expression;
pub use parameter::{classify_expression, parse_params, ParsedParams};
pub use step::{parse_step, parse_steps};
