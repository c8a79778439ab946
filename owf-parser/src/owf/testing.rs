//! Testing utilities for OWF documents
//!
//!     Two rules keep the parser tests honest:
//!
//!         1. Use the verified sample files under `specs/v1` (via [samples])
//!         2. Check parsed documents with the fluent assertions (via [assert_doc])
//!
//! Rule 1: Use Samples for Test Content
//!
//!     OWF lines are short and look deceptively simple, so ad-hoc strings in tests drift
//!     from what the format actually allows: `- Easy bike spin` is a strength exercise,
//!     not a ride. The sample files are the curated corpus; when the format changes they
//!     are the one place to update.
//!
//!     ```rust,ignore
//!     use crate::owf::testing::samples::Samples;
//!
//!     let doc = Samples::strength(1).parse();
//!     let doc = Samples::includes(2).load();     // with includes resolved
//!     let source = Samples::full_week(1).source();
//!     ```
//!
//!     Inline strings are still fine for unit tests of a single grammar rule.
//!
//! Rule 2: Use assert_doc for Document Verification
//!
//!     Matching through nested enums by hand buries the intent of a test:
//!
//!     ```rust,ignore
//!     match &doc.workouts[0].steps[1] {
//!         Step::Block(block) => match &block.steps[0] {
//!             Step::Endurance(step) => assert_eq!(step.action, "bike"),
//!             _ => panic!("expected endurance step"),
//!         },
//!         _ => panic!("expected block"),
//!     }
//!     ```
//!
//!     The fluent API states the same thing and reports the path on failure
//!     (`workouts[0]:steps[1]:steps[0]`):
//!
//!     ```rust,ignore
//!     assert_doc(&doc).workout(0, |w| {
//!         w.step(1, |s| {
//!             s.assert_block().step(0, |s| {
//!                 s.assert_endurance().action("bike");
//!             });
//!         });
//!     });
//!     ```

mod ast_assertions;
pub mod samples;

pub use ast_assertions::{
    assert_doc, BlockAssertion, DocumentAssertion, EnduranceAssertion, IncludeAssertion,
    RestAssertion, StepAssertion, StrengthAssertion, WorkoutAssertion,
};

/// Get a path relative to the workspace root for testing purposes.
///
/// `CARGO_MANIFEST_DIR` points to the crate directory (owf-parser/), one level below the
/// workspace root where specs/ lives.
pub fn workspace_path(relative_path: &str) -> std::path::PathBuf {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .join(relative_path)
}
