//! Workouts: the `#` sections of a document
//!
//!     A workout has a heading (`# Name [type] (date) @RPE n @RIR n`), an ordered list of
//!     steps and the notes that trail it. A `##` session is a workout whose steps include
//!     nested workouts.

use super::step::Step;
use crate::owf::ast::range::SourceSpan;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The type recorded for sessions whose children mix several workout types
pub const COMBINATION_TYPE: &str = "combination";

/// The `(YYYY-MM-DD[ HH:MM[-HH:MM]])` heading annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutDate {
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl WorkoutDate {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            start_time: None,
            end_time: None,
        }
    }
}

impl fmt::Display for WorkoutDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(start) = &self.start_time {
            write!(f, " {}", start)?;
            if let Some(end) = &self.end_time {
                write!(f, "-{}", end)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub name: String,
    pub workout_type: Option<String>,
    pub date: Option<WorkoutDate>,
    pub rpe: Option<f64>,
    pub rir: Option<u32>,
    pub steps: Vec<Step>,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl Workout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workout_type: None,
            date: None,
            rpe: None,
            rir: None,
            steps: Vec::new(),
            notes: Vec::new(),
            span: SourceSpan::default(),
        }
    }

    pub fn with_steps(&self, steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..self.clone()
        }
    }

    pub fn with_notes(&self, notes: Vec<String>) -> Self {
        Self {
            notes,
            ..self.clone()
        }
    }

    pub fn with_type(&self, workout_type: Option<String>) -> Self {
        Self {
            workout_type,
            ..self.clone()
        }
    }

    /// A workout with nothing in it: no name, no steps, no notes
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.steps.is_empty() && self.notes.is_empty()
    }

    /// A session is a workout that nests other workouts
    pub fn is_session(&self) -> bool {
        self.steps.iter().any(Step::is_workout)
    }

    pub fn nested_workouts(&self) -> impl Iterator<Item = &Workout> {
        self.steps.iter().filter_map(Step::as_workout)
    }

    /// Whether a session without an explicit type would be typed `combination`
    pub fn mixes_workout_types(&self) -> bool {
        let types: BTreeSet<&str> = self
            .nested_workouts()
            .filter_map(|child| child.workout_type.as_deref())
            .collect();
        types.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_display() {
        let mut date = WorkoutDate::new("2025-01-15");
        assert_eq!(date.to_string(), "2025-01-15");
        date.start_time = Some("07:00".into());
        assert_eq!(date.to_string(), "2025-01-15 07:00");
        date.end_time = Some("08:30".into());
        assert_eq!(date.to_string(), "2025-01-15 07:00-08:30");
    }

    #[test]
    fn test_mixes_workout_types() {
        let ride = Workout::new("Ride").with_type(Some("bike".into()));
        let run = Workout::new("Run").with_type(Some("run".into()));
        let untyped = Workout::new("Stretch");

        let mixed = Workout::new("Brick").with_steps(vec![
            Step::Workout(ride.clone()),
            Step::Workout(run),
        ]);
        assert!(mixed.is_session());
        assert!(mixed.mixes_workout_types());

        let single = Workout::new("Day").with_steps(vec![
            Step::Workout(ride.clone()),
            Step::Workout(ride),
            Step::Workout(untyped),
        ]);
        assert!(!single.mixes_workout_types());
    }

    #[test]
    fn test_is_empty() {
        assert!(Workout::new("").is_empty());
        assert!(!Workout::new("Named").is_empty());
        assert!(!Workout::new("").with_notes(vec!["hi".into()]).is_empty());
    }
}
