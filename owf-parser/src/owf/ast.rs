//! The OWF document data model
//!
//!     Every node is an immutable value. Stages of the pipeline never mutate a tree in
//!     place: rewrites (resolution, include splicing) build a new tree through the
//!     `with_*` helpers on each node.
//!
//!     Structural equality ignores source positions: [SourceSpan] compares equal to any
//!     other span, so `#[derive(PartialEq)]` on nodes compares shape and content only.
//!     This is what makes `parse(serialize(doc)) == doc` a meaningful check.
//!
//! Layout
//!
//!     - [range]: source positions
//!     - [error]: parse, resolve and value-level errors
//!     - [elements]: document, workout, step, block, parameter and expression nodes
//!     - [traits]: shared node behaviour ([AstNode], [Container])

pub mod elements;
pub mod error;
pub mod range;
pub mod traits;

pub use elements::{
    Block, BlockKind, Distance, Document, Duration, EnduranceStep, Expression, HeartRateTarget,
    IncludeStep, Intensity, Operator, Pace, Param, Reps, RestStep, Step, StrengthStep, Variables,
    Workout, WorkoutDate,
};
pub use error::{format_source_context, ExpressionError, ParseError, ResolveError, UnitError};
pub use range::SourceSpan;
pub use traits::{walk_document, walk_steps, walk_workout, AstNode, Container, Visitor};
