//! Steps: the `- ` lines of a workout
//!
//!     A step is one of the leaf steps (endurance, strength, rest, include), a block
//!     that repeats or times its children, or a nested workout (only inside a session).
//!
//!     Endurance and strength steps share the line grammar `<name> <metrics> <params>`
//!     and are told apart by the first word of the name: movement verbs such as `run`,
//!     `bike` or `row` make an endurance step, anything else is a strength exercise.

use super::block::Block;
use super::parameter::Param;
use super::units::{Distance, Duration};
use super::workout::Workout;
use crate::owf::ast::range::SourceSpan;
use serde::{Serialize, Serializer};
use std::fmt;

/// Repetitions of a strength set: a count or "as many as possible"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reps {
    Count(u32),
    Max,
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(count) => write!(f, "{}", count),
            Reps::Max => write!(f, "max"),
        }
    }
}

impl Serialize for Reps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reps::Count(count) => serializer.serialize_u32(*count),
            Reps::Max => serializer.serialize_str("max"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnduranceStep {
    pub action: String,
    pub duration: Option<Duration>,
    pub distance: Option<Distance>,
    pub params: Vec<Param>,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthStep {
    pub exercise: String,
    pub sets: Option<u32>,
    pub reps: Option<Reps>,
    /// Timed set length, e.g. a 60s plank
    pub duration: Option<Duration>,
    pub params: Vec<Param>,
    pub rest: Option<Duration>,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestStep {
    pub duration: Duration,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

/// A placeholder for another workout, spliced in by the loader
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeStep {
    pub workout_name: String,
    pub resolved: Option<Box<Workout>>,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl IncludeStep {
    pub fn with_resolved(&self, workout: Workout) -> Self {
        Self {
            resolved: Some(Box::new(workout)),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Endurance(EnduranceStep),
    Strength(StrengthStep),
    Rest(RestStep),
    Include(IncludeStep),
    Block(Block),
    Workout(Workout),
}

impl Step {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Step::Endurance(step) => &step.span,
            Step::Strength(step) => &step.span,
            Step::Rest(step) => &step.span,
            Step::Include(step) => &step.span,
            Step::Block(block) => &block.span,
            Step::Workout(workout) => &workout.span,
        }
    }

    pub fn notes(&self) -> &[String] {
        match self {
            Step::Endurance(step) => &step.notes,
            Step::Strength(step) => &step.notes,
            Step::Rest(step) => &step.notes,
            Step::Include(step) => &step.notes,
            Step::Block(block) => &block.notes,
            Step::Workout(workout) => &workout.notes,
        }
    }

    /// Child steps of blocks and nested workouts; empty for leaf steps
    pub fn children(&self) -> &[Step] {
        match self {
            Step::Block(block) => &block.steps,
            Step::Workout(workout) => &workout.steps,
            _ => &[],
        }
    }

    pub fn params(&self) -> &[Param] {
        match self {
            Step::Endurance(step) => &step.params,
            Step::Strength(step) => &step.params,
            _ => &[],
        }
    }

    pub fn is_workout(&self) -> bool {
        matches!(self, Step::Workout(_))
    }

    pub fn as_workout(&self) -> Option<&Workout> {
        match self {
            Step::Workout(workout) => Some(workout),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::ast::elements::block::BlockKind;

    fn run(duration: f64) -> Step {
        Step::Endurance(EnduranceStep {
            action: "run".into(),
            duration: Some(Duration::from_seconds(duration)),
            distance: None,
            params: vec![],
            notes: vec!["steady".into()],
            span: SourceSpan::new(3, 1),
        })
    }

    #[test]
    fn test_accessors() {
        let step = run(600.0);
        assert_eq!(step.notes(), ["steady".to_string()]);
        assert!(step.children().is_empty());
        assert_eq!(step.span().line, 3);

        let block = Step::Block(Block::new(BlockKind::Repeat { count: 3 }, vec![run(60.0)]));
        assert_eq!(block.children().len(), 1);
        assert!(!block.is_workout());
    }

    #[test]
    fn test_reps_display() {
        assert_eq!(Reps::Count(8).to_string(), "8");
        assert_eq!(Reps::Max.to_string(), "max");
    }
}
