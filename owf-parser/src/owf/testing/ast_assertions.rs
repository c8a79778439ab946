//! Fluent assertion API for workout documents

mod steps;

pub use steps::{
    BlockAssertion, EnduranceAssertion, IncludeAssertion, RestAssertion, StrengthAssertion,
};

use crate::owf::ast::{AstNode, Document, Step, Workout};

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub(crate) fn summarize_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| step.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn check_notes(context: &str, notes: &[String], expected: &[&str]) {
    assert_eq!(
        notes, expected,
        "{}: Expected notes {:?}, found {:?}",
        context, expected, notes
    );
}

pub(crate) fn check_step<'a, F>(context: &str, steps: &'a [Step], index: usize, assertion: F)
where
    F: FnOnce(StepAssertion<'a>),
{
    assert!(
        index < steps.len(),
        "{}: Step index {} out of bounds ({} steps: [{}])",
        context,
        index,
        steps.len(),
        summarize_steps(steps)
    );
    assertion(StepAssertion {
        step: &steps[index],
        context: format!("{}:steps[{}]", context, index),
    });
}

pub(crate) fn check_step_count(context: &str, steps: &[Step], expected: usize) {
    assert_eq!(
        steps.len(),
        expected,
        "{}: Expected {} steps, found {}: [{}]",
        context,
        expected,
        steps.len(),
        summarize_steps(steps)
    );
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn workout_count(self, expected: usize) -> Self {
        let names: Vec<&str> = self.doc.workouts.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            self.doc.workouts.len(),
            expected,
            "Expected {} workouts, found {}: {:?}",
            expected,
            self.doc.workouts.len(),
            names
        );
        self
    }

    pub fn variable(self, key: &str, expected: &str) -> Self {
        assert_eq!(
            self.doc.variables.get(key),
            Some(expected),
            "Expected variable '{}' to be '{}'",
            key,
            expected
        );
        self
    }

    pub fn variable_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.variables.len(),
            expected,
            "Expected {} variables, found {}",
            expected,
            self.doc.variables.len()
        );
        self
    }

    pub fn workout<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(WorkoutAssertion<'a>),
    {
        assert!(
            index < self.doc.workouts.len(),
            "Workout index {} out of bounds (document has {} workouts)",
            index,
            self.doc.workouts.len()
        );
        assertion(WorkoutAssertion {
            workout: &self.doc.workouts[index],
            context: format!("workouts[{}]", index),
        });
        self
    }
}

pub struct WorkoutAssertion<'a> {
    pub(crate) workout: &'a Workout,
    pub(crate) context: String,
}

impl<'a> WorkoutAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.workout.name, expected,
            "{}: Expected workout name '{}', but got '{}'",
            self.context, expected, self.workout.name
        );
        self
    }

    pub fn workout_type(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.workout.workout_type.as_deref(),
            expected,
            "{}: Unexpected workout type",
            self.context
        );
        self
    }

    pub fn session(self, expected: bool) -> Self {
        assert_eq!(
            self.workout.is_session(),
            expected,
            "{}: Expected is_session to be {}",
            self.context,
            expected
        );
        self
    }

    /// Compare against the heading form of the date, e.g. `2025-01-15 07:00-08:00`
    pub fn date(self, expected: &str) -> Self {
        let actual = self.workout.date.as_ref().map(|d| d.to_string());
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "{}: Unexpected workout date",
            self.context
        );
        self
    }

    pub fn rpe(self, expected: f64) -> Self {
        assert_eq!(self.workout.rpe, Some(expected), "{}: Unexpected RPE", self.context);
        self
    }

    pub fn rir(self, expected: u32) -> Self {
        assert_eq!(self.workout.rir, Some(expected), "{}: Unexpected RIR", self.context);
        self
    }

    pub fn step_count(self, expected: usize) -> Self {
        check_step_count(&self.context, &self.workout.steps, expected);
        self
    }

    pub fn notes(self, expected: &[&str]) -> Self {
        check_notes(&self.context, &self.workout.notes, expected);
        self
    }

    pub fn step<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StepAssertion<'a>),
    {
        check_step(&self.context, &self.workout.steps, index, assertion);
        self
    }

    /// The `index`th nested workout, counting only workouts
    pub fn nested_workout<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(WorkoutAssertion<'a>),
    {
        let nested: Vec<&'a Workout> = self.workout.nested_workouts().collect();
        assert!(
            index < nested.len(),
            "{}: Nested workout index {} out of bounds ({} nested workouts)",
            self.context,
            index,
            nested.len()
        );
        assertion(WorkoutAssertion {
            workout: nested[index],
            context: format!("{}:workouts[{}]", self.context, index),
        });
        self
    }
}

pub struct StepAssertion<'a> {
    pub(crate) step: &'a Step,
    pub(crate) context: String,
}

impl<'a> StepAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.step.node_type()
        )
    }

    pub fn assert_endurance(self) -> EnduranceAssertion<'a> {
        match self.step {
            Step::Endurance(step) => EnduranceAssertion {
                step,
                context: self.context,
            },
            _ => self.mismatch("EnduranceStep"),
        }
    }

    pub fn assert_strength(self) -> StrengthAssertion<'a> {
        match self.step {
            Step::Strength(step) => StrengthAssertion {
                step,
                context: self.context,
            },
            _ => self.mismatch("StrengthStep"),
        }
    }

    pub fn assert_rest(self) -> RestAssertion<'a> {
        match self.step {
            Step::Rest(step) => RestAssertion {
                step,
                context: self.context,
            },
            _ => self.mismatch("RestStep"),
        }
    }

    pub fn assert_include(self) -> IncludeAssertion<'a> {
        match self.step {
            Step::Include(step) => IncludeAssertion {
                step,
                context: self.context,
            },
            _ => self.mismatch("IncludeStep"),
        }
    }

    pub fn assert_block(self) -> BlockAssertion<'a> {
        match self.step {
            Step::Block(block) => BlockAssertion {
                block,
                context: self.context,
            },
            _ => self.mismatch("Block"),
        }
    }

    pub fn assert_workout(self) -> WorkoutAssertion<'a> {
        match self.step {
            Step::Workout(workout) => WorkoutAssertion {
                workout,
                context: self.context,
            },
            _ => self.mismatch("Workout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::parsing::parse_document;

    #[test]
    fn test_fluent_chain() {
        let doc = parse_document("# Run [run]\n- run 5km\n- rest 1min\n").unwrap();
        assert_doc(&doc).workout_count(1).workout(0, |w| {
            w.name("Run")
                .workout_type(Some("run"))
                .step_count(2)
                .step(0, |s| {
                    s.assert_endurance().action("run").distance(5.0, "km");
                })
                .step(1, |s| {
                    s.assert_rest().duration_secs(60.0);
                });
        });
    }

    #[test]
    #[should_panic(expected = "workouts[0]:steps[0]: Expected StrengthStep, found EnduranceStep")]
    fn test_mismatch_reports_path() {
        let doc = parse_document("# Run\n- run 5km\n").unwrap();
        assert_doc(&doc).workout(0, |w| {
            w.step(0, |s| {
                s.assert_strength();
            });
        });
    }

    #[test]
    #[should_panic(expected = "Step index 3 out of bounds")]
    fn test_step_out_of_bounds() {
        let doc = parse_document("# Run\n- run 5km\n").unwrap();
        assert_doc(&doc).workout(0, |w| {
            w.step(3, |_| {});
        });
    }
}
