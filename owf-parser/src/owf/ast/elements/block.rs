//! Blocks: steps that repeat or time their children

use super::step::Step;
use super::units::Duration;
use crate::owf::ast::range::SourceSpan;
use serde::Serialize;
use std::fmt;

/// What a block does with its children, decoded from its header line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// `Nx:`
    Repeat { count: u32 },
    /// `Nx superset:`
    Superset { count: u32 },
    /// `Nx circuit:`
    Circuit { count: u32 },
    /// `emom <interval>:`
    Emom { interval: Duration },
    /// `emom <interval> alternating:`
    AlternatingEmom { interval: Duration },
    /// `every <interval> for <duration>:`
    CustomInterval { interval: Duration, duration: Duration },
    /// `amrap <duration>:`
    Amrap { duration: Duration },
    /// `for-time[ <cap>]:`
    ForTime { time_cap: Option<Duration> },
}

/// Renders the header line content, colon included
impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Repeat { count } => write!(f, "{}x:", count),
            BlockKind::Superset { count } => write!(f, "{}x superset:", count),
            BlockKind::Circuit { count } => write!(f, "{}x circuit:", count),
            BlockKind::Emom { interval } => write!(f, "emom {}:", interval),
            BlockKind::AlternatingEmom { interval } => write!(f, "emom {} alternating:", interval),
            BlockKind::CustomInterval { interval, duration } => {
                write!(f, "every {} for {}:", interval, duration)
            }
            BlockKind::Amrap { duration } => write!(f, "amrap {}:", duration),
            BlockKind::ForTime { time_cap: None } => write!(f, "for-time:"),
            BlockKind::ForTime {
                time_cap: Some(cap),
            } => write!(f, "for-time {}:", cap),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub steps: Vec<Step>,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl Block {
    pub fn new(kind: BlockKind, steps: Vec<Step>) -> Self {
        Self {
            kind,
            steps,
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
}
