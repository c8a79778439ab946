//! AST traits - Common interfaces for uniform node access

use super::elements::{Block, Document, Step, Workout};
use super::range::SourceSpan;

/// Common interface for addressable nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn span(&self) -> &SourceSpan;
}

/// Nodes that hold an ordered list of steps and trailing notes
pub trait Container {
    fn label(&self) -> String;
    fn children(&self) -> &[Step];
    fn notes(&self) -> &[String];
}

impl AstNode for Workout {
    fn node_type(&self) -> &'static str {
        if self.is_session() {
            "Session"
        } else {
            "Workout"
        }
    }

    fn span(&self) -> &SourceSpan {
        &self.span
    }
}

impl AstNode for Step {
    fn node_type(&self) -> &'static str {
        match self {
            Step::Endurance(_) => "EnduranceStep",
            Step::Strength(_) => "StrengthStep",
            Step::Rest(_) => "RestStep",
            Step::Include(_) => "IncludeStep",
            Step::Block(_) => "Block",
            Step::Workout(workout) => workout.node_type(),
        }
    }

    fn span(&self) -> &SourceSpan {
        Step::span(self)
    }
}

impl Container for Workout {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn children(&self) -> &[Step] {
        &self.steps
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl Container for Block {
    fn label(&self) -> String {
        self.kind.to_string()
    }

    fn children(&self) -> &[Step] {
        &self.steps
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Visitor trait for traversing the AST
///
/// Default implementations are empty, so you only need to override the methods you
/// care about. Nested workouts are visited through `visit_workout` as well as
/// `visit_step`; included workouts are visited once resolved.
///
/// ```ignore
/// struct StepCounter(usize);
///
/// impl Visitor for StepCounter {
///     fn visit_step(&mut self, _step: &Step) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = StepCounter(0);
/// walk_document(&mut counter, &doc);
/// ```
pub trait Visitor {
    fn visit_workout(&mut self, _workout: &Workout) {}
    fn leave_workout(&mut self, _workout: &Workout) {}

    fn visit_step(&mut self, _step: &Step) {}
    fn leave_step(&mut self, _step: &Step) {}
}

pub fn walk_document(visitor: &mut dyn Visitor, doc: &Document) {
    for workout in &doc.workouts {
        walk_workout(visitor, workout);
    }
}

pub fn walk_workout(visitor: &mut dyn Visitor, workout: &Workout) {
    visitor.visit_workout(workout);
    walk_steps(visitor, &workout.steps);
    visitor.leave_workout(workout);
}

pub fn walk_steps(visitor: &mut dyn Visitor, steps: &[Step]) {
    for step in steps {
        visitor.visit_step(step);
        match step {
            Step::Block(block) => walk_steps(visitor, &block.steps),
            Step::Workout(workout) => walk_workout(visitor, workout),
            Step::Include(include) => {
                if let Some(resolved) = &include.resolved {
                    walk_workout(visitor, resolved);
                }
            }
            _ => {}
        }
        visitor.leave_step(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::ast::elements::{BlockKind, Duration, RestStep};

    fn rest() -> Step {
        Step::Rest(RestStep {
            duration: Duration::from_seconds(60.0),
            notes: vec![],
            span: SourceSpan::default(),
        })
    }

    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        fn visit_workout(&mut self, workout: &Workout) {
            self.0.push(format!("workout:{}", workout.name));
        }

        fn visit_step(&mut self, step: &Step) {
            self.0.push(step.node_type().to_string());
        }
    }

    #[test]
    fn walks_in_source_order() {
        let inner = Workout::new("Inner").with_steps(vec![rest()]);
        let outer = Workout::new("Outer").with_steps(vec![
            Step::Block(Block::new(BlockKind::Repeat { count: 2 }, vec![rest()])),
            Step::Workout(inner),
        ]);
        let doc = Document::new(Default::default(), vec![outer]);

        let mut recorder = Recorder(vec![]);
        walk_document(&mut recorder, &doc);
        assert_eq!(
            recorder.0,
            vec![
                "workout:Outer",
                "Block",
                "RestStep",
                "Workout",
                "workout:Inner",
                "RestStep"
            ]
        );
    }

    #[test]
    fn test_container_labels() {
        let block = Block::new(BlockKind::Amrap { duration: Duration::from_seconds(600.0) }, vec![]);
        assert_eq!(block.label(), "amrap 10min:");
        assert_eq!(Workout::new("Easy Run").label(), "Easy Run");
    }
}
