//! Canonical OWF serializer
//!
//!     Renders a document back to OWF text. The output is canonical: parsing it yields a
//!     document structurally equal to the input, and serializing that again yields the
//!     same text.
//!
//! Layout
//!
//!     The frontmatter fence comes first when there are variables, then each workout.
//!     Workouts are separated by exactly one blank line and the output ends with exactly
//!     one newline.
//!
//!         # Heading [type] (date) @RPE n @RIR n
//!
//!         - step
//!           - nested step
//!           > note on the nested step
//!
//!         > workout note
//!         > workout note
//!
//!     Nesting is two spaces per level. A block's notes follow its header line, before its
//!     children, so that they attach to the block again when parsed.
//!
//!     Workout notes normally follow the steps after a blank line. A single workout note
//!     is written before the steps instead, since a lone trailing note would be read back
//!     as a note on the last step.
//!
//! Sessions
//!
//!     A workout that nests workouts is written with `##` and its nested workouts with
//!     `#`. Once a session has been written, later top-level workouts also use `##`;
//!     a `#` heading there would be read back as a child of the session. A `combination`
//!     type that parsing would infer again is left out.

use crate::owf::ast::elements::COMBINATION_TYPE;
use crate::owf::ast::{Document, EnduranceStep, Step, StrengthStep, Workout};

const INDENT: &str = "  ";

/// Render a document as canonical OWF text
pub fn serialize(doc: &Document) -> String {
    let mut chunks: Vec<Vec<String>> = Vec::new();

    if !doc.variables.is_empty() {
        let mut fence = vec!["---".to_string()];
        fence.extend(
            doc.variables
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value)),
        );
        fence.push("---".to_string());
        chunks.push(fence);
    }

    let mut sessions_started = false;
    for workout in &doc.workouts {
        sessions_started = sessions_started || workout.is_session();
        let marker = if sessions_started { "##" } else { "#" };
        chunks.push(render_workout(workout, marker));
    }

    let text = join_chunks(chunks).join("\n");
    format!("{}\n", text.trim_end())
}

/// Join non-empty chunks of lines with one blank line between them
fn join_chunks(chunks: Vec<Vec<String>>) -> Vec<String> {
    let mut lines = Vec::new();
    for chunk in chunks.into_iter().filter(|chunk| !chunk.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(chunk);
    }
    lines
}

fn render_workout(workout: &Workout, marker: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    if let Some(heading) = render_heading(workout, marker) {
        chunks.push(vec![heading]);
    }

    let own_steps: Vec<&Step> = workout.steps.iter().filter(|s| !s.is_workout()).collect();
    let notes: Vec<String> = workout.notes.iter().map(|n| note_line(n, 0)).collect();
    let notes_first = notes.len() == 1 && !own_steps.is_empty();
    let (mut leading_notes, mut trailing_notes) = if notes_first {
        (notes, Vec::new())
    } else {
        (Vec::new(), notes)
    };

    chunks.push(std::mem::take(&mut leading_notes));
    let mut run = Vec::new();
    for step in &workout.steps {
        match step {
            Step::Workout(child) => {
                chunks.push(std::mem::take(&mut run));
                chunks.push(std::mem::take(&mut trailing_notes));
                chunks.push(render_workout(child, "#"));
            }
            _ => render_step(step, 0, &mut run),
        }
    }
    chunks.push(run);
    chunks.push(trailing_notes);

    join_chunks(chunks)
}

fn render_heading(workout: &Workout, marker: &str) -> Option<String> {
    let mut parts = Vec::new();
    if !workout.name.is_empty() {
        parts.push(workout.name.clone());
    }
    if let Some(workout_type) = &workout.workout_type {
        let inferred = workout_type == COMBINATION_TYPE && workout.mixes_workout_types();
        if !inferred {
            parts.push(format!("[{}]", workout_type));
        }
    }
    if let Some(date) = &workout.date {
        parts.push(format!("({})", date));
    }
    if let Some(rpe) = workout.rpe {
        parts.push(format!("@RPE {}", crate::owf::ast::elements::units::format_number(rpe)));
    }
    if let Some(rir) = workout.rir {
        parts.push(format!("@RIR {}", rir));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("{} {}", marker, parts.join(" ")))
    }
}

fn note_line(note: &str, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    if note.is_empty() {
        format!("{}>", indent)
    } else {
        format!("{}> {}", indent, note)
    }
}

fn push_notes(notes: &[String], depth: usize, lines: &mut Vec<String>) {
    lines.extend(notes.iter().map(|note| note_line(note, depth)));
}

fn render_step(step: &Step, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match step {
        Step::Block(block) => {
            lines.push(format!("{}- {}", indent, block.kind));
            push_notes(&block.notes, depth, lines);
            for child in &block.steps {
                render_step(child, depth + 1, lines);
            }
        }
        Step::Workout(workout) => {
            // Only sessions place workouts at the top level; inside a block the
            // nested workout's steps are written in its place.
            for child in &workout.steps {
                render_step(child, depth, lines);
            }
        }
        _ => {
            lines.push(format!("{}- {}", indent, leaf_content(step)));
            push_notes(step.notes(), depth, lines);
        }
    }
}

/// The text of a leaf step line, without the `- ` marker
pub fn leaf_content(step: &Step) -> String {
    match step {
        Step::Endurance(endurance) => endurance_content(endurance),
        Step::Strength(strength) => strength_content(strength),
        Step::Rest(rest) => format!("rest {}", rest.duration),
        Step::Include(include) => format!("include: {}", include.workout_name),
        Step::Block(block) => block.kind.to_string(),
        Step::Workout(workout) => workout.name.clone(),
    }
}

fn endurance_content(step: &EnduranceStep) -> String {
    let mut parts = Vec::new();
    if !step.action.is_empty() {
        parts.push(step.action.clone());
    }
    if let Some(duration) = &step.duration {
        parts.push(duration.to_string());
    }
    if let Some(distance) = &step.distance {
        parts.push(distance.to_string());
    }
    parts.extend(step.params.iter().map(|param| param.to_string()));
    parts.join(" ")
}

fn strength_content(step: &StrengthStep) -> String {
    let mut parts = Vec::new();
    if !step.exercise.is_empty() {
        parts.push(step.exercise.clone());
    }
    match (step.sets, step.reps) {
        (Some(sets), Some(reps)) => parts.push(format!("{}x{}rep", sets, reps)),
        (None, Some(reps)) => parts.push(format!("{}rep", reps)),
        _ => {}
    }
    if let Some(duration) = &step.duration {
        parts.push(duration.to_string());
    }
    parts.extend(step.params.iter().map(|param| param.to_string()));
    if let Some(rest) = &step.rest {
        parts.push(format!("rest:{}", rest));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::parsing::parse_document;

    fn canonical(text: &str) -> String {
        serialize(&parse_document(text).unwrap())
    }

    #[test]
    fn test_simple_workout() {
        insta::assert_snapshot!(canonical("# Easy Run [run]\n- run 5km 30min @easy\n").trim_end(), @r"
# Easy Run [run]

- run 30min 5km @easy
");
    }

    #[test]
    fn test_frontmatter_and_strength() {
        let text = "---\nFTP: 250W\n1RM bench press: 100kg\n---\n# Upper\n- bench press 3x8 @75% of 1RM bench press rest:90sec\n- pull-ups 3xmax\n- plank 60s\n";
        insta::assert_snapshot!(canonical(text).trim_end(), @r"
---
FTP: 250W
1RM bench press: 100kg
---

# Upper

- bench press 3x8rep @75% of 1RM bench press rest:1min30s
- pull-ups 3xmaxrep
- plank 1min
");
    }

    #[test]
    fn test_blocks_and_notes() {
        let text = "# Intervals\n- warmup 10min\n- 5x:\n  > all out\n  - bike 3min @hard\n  > hold 95rpm\n  - rest 1min\n- cooldown 5min\n\n> Note 1.\n> Note 2.\n";
        insta::assert_snapshot!(canonical(text).trim_end(), @r"
# Intervals

- warmup 10min
- 5x:
> all out
  - bike 3min @hard
  > hold 95rpm
  - rest 1min
- cooldown 5min

> Note 1.
> Note 2.
");
    }

    #[test]
    fn single_workout_note_is_written_first() {
        let text = "# Run\n> stay relaxed\n- run 5km\n";
        let output = canonical(text);
        assert_eq!(output, "# Run\n\n> stay relaxed\n\n- run 5km\n");
        assert_eq!(parse_document(&output).unwrap(), parse_document(text).unwrap());
    }

    #[test]
    fn test_heading_fields() {
        let output = canonical("# Heavy Day [strength] (2025-01-15 07:00-08:00) @RPE 8 @RIR 2\n- squat 5x5\n");
        assert!(output.starts_with(
            "# Heavy Day [strength] (2025-01-15 07:00-08:00) @RPE 8 @RIR 2\n"
        ));
    }

    #[test]
    fn test_sessions() {
        let text = "## Brick\n\n- warmup 10min\n\n# Ride [bike]\n- bike 60min\n# Run [run]\n- run 20min\n";
        insta::assert_snapshot!(canonical(text).trim_end(), @r"
## Brick

- warmup 10min

# Ride [bike]

- bike 1h

# Run [run]

- run 20min
");
    }

    #[test]
    fn explicit_combination_without_mixed_children_is_kept() {
        let output = canonical("## Day [combination]\n# Ride [bike]\n- bike 1h\n");
        assert!(output.starts_with("## Day [combination]\n"));
    }

    #[test]
    fn workouts_after_a_session_use_session_headings() {
        let text = "## Day\n# Ride\n- bike 1h\n## Later\n- run 5km\n";
        let output = canonical(text);
        assert!(output.contains("\n## Later\n"));
        assert_eq!(parse_document(&output).unwrap(), parse_document(text).unwrap());
    }

    #[test]
    fn test_block_headers() {
        let text = "# WOD\n- emom 1min30s alternating:\n  - burpees 10rep\n- every 2min for 20min:\n  - row 250m\n- amrap 12:\n  - pull-ups 5rep\n- for-time 20min:\n  - thrusters 21rep @43kg\n- 3x superset:\n  - curl 10rep\n- 2x circuit:\n  - dips 10rep\n";
        let output = canonical(text);
        for header in [
            "- emom 1min30s alternating:",
            "- every 2min for 20min:",
            "- amrap 12min:",
            "- for-time 20min:",
            "- 3x superset:",
            "- 2x circuit:",
        ] {
            assert!(output.contains(header), "missing {}", header);
        }
    }

    #[test]
    fn test_include_and_empty_document() {
        assert_eq!(canonical("# Day\n- include: Warmup\n"), "# Day\n\n- include: Warmup\n");
        assert_eq!(canonical(""), "\n");
    }

    #[test]
    fn output_is_idempotent() {
        let text = "---\nFTP: 250W\n---\n# Ride [bike]\n- bike 90sec @80% of FTP\n- 3x:\n  - bike 1:30 @FTP + 10W\n";
        let once = canonical(text);
        assert_eq!(canonical(&once), once);
    }
}
