//! Per-step assertions

use super::{check_notes, check_step, check_step_count, StepAssertion};
use crate::owf::ast::{
    Block, BlockKind, EnduranceStep, IncludeStep, Param, Reps, RestStep, StrengthStep,
};

fn check_params(context: &str, params: &[Param], expected: &[&str]) {
    let kinds: Vec<&str> = params.iter().map(Param::kind).collect();
    assert_eq!(
        kinds, expected,
        "{}: Expected parameter kinds {:?}, found {:?}",
        context, expected, kinds
    );
}

fn check_param(context: &str, params: &[Param], index: usize, expected: &str) {
    let actual = params.get(index).map(|p| p.to_string());
    assert_eq!(
        actual.as_deref(),
        Some(expected),
        "{}: Unexpected parameter #{}",
        context,
        index
    );
}

pub struct EnduranceAssertion<'a> {
    pub(crate) step: &'a EnduranceStep,
    pub(crate) context: String,
}

impl EnduranceAssertion<'_> {
    pub fn action(self, expected: &str) -> Self {
        assert_eq!(
            self.step.action, expected,
            "{}: Expected action '{}', but got '{}'",
            self.context, expected, self.step.action
        );
        self
    }

    pub fn duration_secs(self, expected: f64) -> Self {
        assert_eq!(
            self.step.duration.map(|d| d.seconds),
            Some(expected),
            "{}: Unexpected duration",
            self.context
        );
        self
    }

    pub fn no_duration(self) -> Self {
        assert!(self.step.duration.is_none(), "{}: Unexpected duration", self.context);
        self
    }

    pub fn distance(self, value: f64, unit: &str) -> Self {
        let actual = self.step.distance.as_ref().map(|d| (d.value, d.unit.as_str()));
        assert_eq!(actual, Some((value, unit)), "{}: Unexpected distance", self.context);
        self
    }

    /// Parameter kinds in order, as named by [Param::kind]
    pub fn params(self, expected: &[&str]) -> Self {
        check_params(&self.context, &self.step.params, expected);
        self
    }

    /// A parameter in its written form, e.g. `@80% of FTP`
    pub fn param(self, index: usize, expected: &str) -> Self {
        check_param(&self.context, &self.step.params, index, expected);
        self
    }

    pub fn notes(self, expected: &[&str]) -> Self {
        check_notes(&self.context, &self.step.notes, expected);
        self
    }
}

pub struct StrengthAssertion<'a> {
    pub(crate) step: &'a StrengthStep,
    pub(crate) context: String,
}

impl StrengthAssertion<'_> {
    pub fn exercise(self, expected: &str) -> Self {
        assert_eq!(
            self.step.exercise, expected,
            "{}: Expected exercise '{}', but got '{}'",
            self.context, expected, self.step.exercise
        );
        self
    }

    pub fn sets(self, expected: Option<u32>) -> Self {
        assert_eq!(self.step.sets, expected, "{}: Unexpected sets", self.context);
        self
    }

    pub fn reps(self, expected: Option<Reps>) -> Self {
        assert_eq!(self.step.reps, expected, "{}: Unexpected reps", self.context);
        self
    }

    pub fn duration_secs(self, expected: f64) -> Self {
        assert_eq!(
            self.step.duration.map(|d| d.seconds),
            Some(expected),
            "{}: Unexpected duration",
            self.context
        );
        self
    }

    pub fn rest_secs(self, expected: f64) -> Self {
        assert_eq!(
            self.step.rest.map(|d| d.seconds),
            Some(expected),
            "{}: Unexpected rest",
            self.context
        );
        self
    }

    pub fn params(self, expected: &[&str]) -> Self {
        check_params(&self.context, &self.step.params, expected);
        self
    }

    pub fn param(self, index: usize, expected: &str) -> Self {
        check_param(&self.context, &self.step.params, index, expected);
        self
    }

    pub fn notes(self, expected: &[&str]) -> Self {
        check_notes(&self.context, &self.step.notes, expected);
        self
    }
}

pub struct RestAssertion<'a> {
    pub(crate) step: &'a RestStep,
    pub(crate) context: String,
}

impl RestAssertion<'_> {
    pub fn duration_secs(self, expected: f64) -> Self {
        assert_eq!(
            self.step.duration.seconds, expected,
            "{}: Unexpected rest duration",
            self.context
        );
        self
    }
}

pub struct IncludeAssertion<'a> {
    pub(crate) step: &'a IncludeStep,
    pub(crate) context: String,
}

impl IncludeAssertion<'_> {
    pub fn workout_name(self, expected: &str) -> Self {
        assert_eq!(
            self.step.workout_name, expected,
            "{}: Unexpected include target",
            self.context
        );
        self
    }

    pub fn unresolved(self) -> Self {
        assert!(
            self.step.resolved.is_none(),
            "{}: Expected include to be unresolved",
            self.context
        );
        self
    }

    /// Resolved to a workout with this name and number of steps
    pub fn resolved_to(self, name: &str, step_count: usize) -> Self {
        let Some(workout) = &self.step.resolved else {
            panic!("{}: Include '{}' is unresolved", self.context, self.step.workout_name);
        };
        assert_eq!(workout.name, name, "{}: Resolved to the wrong workout", self.context);
        check_step_count(&self.context, &workout.steps, step_count);
        self
    }
}

pub struct BlockAssertion<'a> {
    pub(crate) block: &'a Block,
    pub(crate) context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn kind(self, expected: BlockKind) -> Self {
        assert_eq!(self.block.kind, expected, "{}: Unexpected block kind", self.context);
        self
    }

    /// The header as written, e.g. `emom 1min:`
    pub fn header(self, expected: &str) -> Self {
        assert_eq!(
            self.block.kind.to_string(),
            expected,
            "{}: Unexpected block header",
            self.context
        );
        self
    }

    pub fn step_count(self, expected: usize) -> Self {
        check_step_count(&self.context, &self.block.steps, expected);
        self
    }

    pub fn step<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StepAssertion<'a>),
    {
        check_step(&self.context, &self.block.steps, index, assertion);
        self
    }

    pub fn notes(self, expected: &[&str]) -> Self {
        check_notes(&self.context, &self.block.notes, expected);
        self
    }
}
