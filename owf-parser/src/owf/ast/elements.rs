//! AST node definitions

pub mod block;
pub mod document;
pub mod expression;
pub mod parameter;
pub mod step;
pub mod units;
pub mod workout;

pub use block::{Block, BlockKind};
pub use document::{Document, Variables};
pub use expression::{Expression, Operator};
pub use parameter::{HeartRateTarget, Intensity, Param};
pub use step::{EnduranceStep, IncludeStep, Reps, RestStep, Step, StrengthStep};
pub use units::{Distance, Duration, Pace};
pub use workout::{Workout, WorkoutDate, COMBINATION_TYPE};
