//! Block Builder
//!
//! Indentation
//!
//!     Step lines are nested by their leading-space count. Each line at the current level
//!     opens a block, and every following line indented deeper than it belongs to that
//!     block's subtree, which is built the same way. A line indented deeper than the level
//!     but with no preceding line to hang from is promoted to the current level.
//!
//!         - 5x:                 block
//!           - bike 5min         child
//!           - recover 3min      child
//!         - cooldown 10min      block
//!
//! Notes
//!
//!     A note trails the nearest preceding step line, at that step's own depth. The
//!     exception is the tail of the section: after the last step, a run of two or more
//!     notes that starts after a blank line belongs to the workout itself.
//!
//!         - run 5km
//!                               (blank)
//!         > Great run!          attached to "run 5km": a single trailing note
//!
//!         - bike 30min @easy
//!                               (blank)
//!         > Note 1.             workout-level
//!         > Note 2.             workout-level
//!
//!     Notes before the first step have no step to trail and are workout-level too, as
//!     are all notes of a section without steps.

use crate::owf::lexing::{LineType, LogicalLine};
use std::collections::HashMap;

/// A step line with its nested lines and trailing notes
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub line: LogicalLine,
    pub children: Vec<RawBlock>,
    pub notes: Vec<String>,
}

impl RawBlock {
    pub fn content(&self) -> &str {
        &self.line.content
    }
}

/// The blocks of one workout section plus its workout-level notes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockTree {
    pub blocks: Vec<RawBlock>,
    pub notes: Vec<String>,
}

pub fn build_blocks(lines: &[LogicalLine]) -> BlockTree {
    let step_lines: Vec<&LogicalLine> = lines.iter().filter(|l| l.is(LineType::Step)).collect();

    let (first_step, last_step) = match (
        lines.iter().position(|l| l.is(LineType::Step)),
        lines.iter().rposition(|l| l.is(LineType::Step)),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return BlockTree {
                blocks: Vec::new(),
                notes: note_contents(lines),
            }
        }
    };

    let mut blocks = build_tree(&step_lines);

    let tail_start = workout_tail_start(&lines[last_step + 1..])
        .map(|offset| last_step + 1 + offset)
        .unwrap_or(lines.len());

    let mut notes = note_contents(&lines[..first_step]);
    notes.extend(note_contents(&lines[tail_start..]));

    let mut attached: HashMap<usize, Vec<String>> = HashMap::new();
    let mut owner: Option<usize> = None;
    for line in &lines[first_step..tail_start] {
        match line.line_type {
            LineType::Step => owner = Some(line.span.line),
            LineType::Note => {
                if let Some(step_line) = owner {
                    attached
                        .entry(step_line)
                        .or_default()
                        .push(line.content.clone());
                }
            }
            _ => {}
        }
    }
    attach_notes(&mut blocks, &mut attached);

    BlockTree { blocks, notes }
}

fn note_contents(lines: &[LogicalLine]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| l.is(LineType::Note))
        .map(|l| l.content.clone())
        .collect()
}

/// Index within `trailing` where workout-level notes begin, if any
fn workout_tail_start(trailing: &[LogicalLine]) -> Option<usize> {
    let mut saw_blank = false;
    for (index, line) in trailing.iter().enumerate() {
        match line.line_type {
            LineType::Note if saw_blank => {
                let run = trailing[index..]
                    .iter()
                    .filter(|l| l.is(LineType::Note))
                    .count();
                return (run >= 2).then_some(index);
            }
            LineType::Note => {}
            _ => saw_blank = true,
        }
    }
    None
}

fn build_tree(lines: &[&LogicalLine]) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let head = lines[index];
        let end = lines[index + 1..]
            .iter()
            .position(|line| line.indent <= head.indent)
            .map(|offset| index + 1 + offset)
            .unwrap_or(lines.len());
        blocks.push(RawBlock {
            line: head.clone(),
            children: build_tree(&lines[index + 1..end]),
            notes: Vec::new(),
        });
        index = end;
    }
    blocks
}

fn attach_notes(blocks: &mut [RawBlock], attached: &mut HashMap<usize, Vec<String>>) {
    for block in blocks {
        if let Some(notes) = attached.remove(&block.line.span.line) {
            block.notes = notes;
        }
        attach_notes(&mut block.children, attached);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::lexing::scan_lines;

    fn build(text: &str) -> BlockTree {
        build_blocks(&scan_lines(text, 1))
    }

    #[test]
    fn test_flat_steps() {
        let tree = build("- warmup 10min\n- run 5km\n- cooldown 5min");
        assert_eq!(tree.blocks.len(), 3);
        assert!(tree.blocks.iter().all(|b| b.children.is_empty()));
        assert_eq!(tree.blocks[1].content(), "run 5km");
    }

    #[test]
    fn test_nested_block() {
        let tree = build("- 5x:\n  - bike 5min\n  - recover 3min");
        assert_eq!(tree.blocks.len(), 1);
        let block = &tree.blocks[0];
        assert_eq!(block.content(), "5x:");
        assert_eq!(block.children.len(), 2);
        assert!(block.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_deep_nesting() {
        let tree = build("- 3x:\n  - 2x:\n    - run 1min\n  - rest 1min\n- cooldown 5min");
        assert_eq!(tree.blocks.len(), 2);
        let outer = &tree.blocks[0];
        assert_eq!(outer.children.len(), 2);
        assert_eq!(outer.children[0].children.len(), 1);
        assert_eq!(outer.children[0].children[0].content(), "run 1min");
    }

    #[test]
    fn orphan_deeper_line_is_promoted() {
        let tree = build("    - run 1min\n- bike 5min");
        assert_eq!(tree.blocks.len(), 2);
        assert_eq!(tree.blocks[0].content(), "run 1min");
    }

    #[test]
    fn test_note_attaches_to_step() {
        let tree = build("- run 5km\n> felt good\n- bike 10min");
        assert_eq!(tree.blocks[0].notes, vec!["felt good"]);
        assert!(tree.blocks[1].notes.is_empty());
        assert!(tree.notes.is_empty());
    }

    #[test]
    fn single_trailing_note_after_blank_stays_with_step() {
        let tree = build("- run 5km\n\n> Great run!");
        assert_eq!(tree.blocks[0].notes, vec!["Great run!"]);
        assert!(tree.notes.is_empty());
    }

    #[test]
    fn trailing_note_run_is_workout_level() {
        let tree = build("- bike 30min @easy\n\n> Note 1.\n> Note 2.");
        assert!(tree.blocks[0].notes.is_empty());
        assert_eq!(tree.notes, vec!["Note 1.", "Note 2."]);
    }

    #[test]
    fn step_note_and_workout_notes_together() {
        let tree = build("- run 5km\n> split\n\n> Note 1.\n> Note 2.");
        assert_eq!(tree.blocks[0].notes, vec!["split"]);
        assert_eq!(tree.notes, vec!["Note 1.", "Note 2."]);
    }

    #[test]
    fn nested_note_lands_at_its_depth() {
        let tree = build("- 5x:\n  - bike 5min\n  > hold cadence\n  - recover 3min");
        let block = &tree.blocks[0];
        assert!(block.notes.is_empty());
        assert_eq!(block.children[0].notes, vec!["hold cadence"]);
    }

    #[test]
    fn block_header_note() {
        let tree = build("- 5x:\n  > all out\n  - bike 5min");
        assert_eq!(tree.blocks[0].notes, vec!["all out"]);
    }

    #[test]
    fn test_notes_without_steps() {
        let tree = build("> just a note\n\n> and another");
        assert!(tree.blocks.is_empty());
        assert_eq!(tree.notes, vec!["just a note", "and another"]);
    }

    #[test]
    fn leading_notes_are_workout_level() {
        let tree = build("> intro\n- run 5km");
        assert_eq!(tree.notes, vec!["intro"]);
        assert!(tree.blocks[0].notes.is_empty());
    }
}
