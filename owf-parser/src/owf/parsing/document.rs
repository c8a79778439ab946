//! Document assembler
//!
//!     Splits the classified lines at headings and turns each section into a workout.
//!
//! Flat documents
//!
//!     Without `##` headings every `#` section is a top-level workout. Lines before the
//!     first heading form a nameless workout.
//!
//! Sessions
//!
//!     As soon as one `##` heading appears the document is read in two levels. `#`
//!     sections before the first `##` stay top-level workouts. Each `##` section becomes
//!     a session whose steps are its own steps followed by every `#` section up to the
//!     next `##`, as nested workouts in source order.
//!
//!         ## Brick Day                 session
//!         - warmup 10min @easy         session step
//!         # Ride [bike]                nested workout
//!         - bike 60min @Z2
//!         # Run [run]                  nested workout
//!         - run 20min @tempo
//!
//!     A session without an explicit type whose nested workouts have two or more distinct
//!     types is typed `combination`. The type is recomputed on every parse and never
//!     written out, so it survives a round trip without being stored.
//!
//!     Workouts with no name, no steps and no notes are dropped.

use super::heading::parse_heading;
use super::step::parse_steps;
use crate::owf::ast::elements::COMBINATION_TYPE;
use crate::owf::ast::{Document, ParseError, SourceSpan, Step, Workout};
use crate::owf::building::build_blocks;
use crate::owf::lexing::{extract_frontmatter, scan_lines, LineType, LogicalLine};

/// Parse OWF text into a document
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    let frontmatter = extract_frontmatter(text)?;
    let lines: Vec<LogicalLine> = scan_lines(&frontmatter.body, frontmatter.body_start_line)
        .into_iter()
        .filter(|line| !line.is(LineType::FrontmatterFence))
        .collect();

    let sections = split_sections(&lines);
    let two_level = sections
        .iter()
        .any(|section| matches!(section.heading, Some(h) if h.is(LineType::SessionHeading)));

    let workouts = if two_level {
        assemble_sessions(&sections)?
    } else {
        sections
            .iter()
            .map(build_workout)
            .filter(|result| !matches!(result, Ok(workout) if workout.is_empty()))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Document::new(frontmatter.variables, workouts))
}

/// A heading (or the start of the document) and the lines under it
struct Section<'a> {
    heading: Option<&'a LogicalLine>,
    body: &'a [LogicalLine],
}

fn split_sections(lines: &[LogicalLine]) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut heading = None;
    let mut start = 0;

    for (index, line) in lines.iter().enumerate() {
        if line.is(LineType::Heading) || line.is(LineType::SessionHeading) {
            if heading.is_some() || index > start {
                sections.push(Section {
                    heading,
                    body: &lines[start..index],
                });
            }
            heading = Some(line);
            start = index + 1;
        }
    }
    sections.push(Section {
        heading,
        body: &lines[start..],
    });
    sections
}

fn build_workout(section: &Section<'_>) -> Result<Workout, ParseError> {
    let content_lines: Vec<&LogicalLine> = section
        .body
        .iter()
        .filter(|line| !line.is(LineType::Blank))
        .collect();

    let start = section
        .heading
        .map(|h| h.span)
        .or_else(|| content_lines.first().map(|line| line.span))
        .unwrap_or_default();
    let span = match content_lines.last() {
        Some(last) => SourceSpan::new(start.line, start.column)
            .with_end(last.span.line, last.span.end_column.unwrap_or(1)),
        None => start,
    };

    let heading = match section.heading {
        Some(line) => parse_heading(&line.content, span),
        None => Workout::new(""),
    };

    let tree = build_blocks(section.body);
    Ok(Workout {
        steps: parse_steps(&tree.blocks)?,
        notes: tree.notes,
        span,
        ..heading
    })
}

fn assemble_sessions(sections: &[Section<'_>]) -> Result<Vec<Workout>, ParseError> {
    let mut workouts = Vec::new();
    let mut session: Option<(Workout, Vec<Workout>)> = None;

    for section in sections {
        let workout = build_workout(section)?;
        match section.heading {
            Some(line) if line.is(LineType::SessionHeading) => {
                if let Some((open, children)) = session.take() {
                    workouts.push(finish_session(open, children));
                }
                session = Some((workout, Vec::new()));
            }
            _ if workout.is_empty() => {}
            _ => match session.as_mut() {
                Some((_, children)) => children.push(workout),
                None => workouts.push(workout),
            },
        }
    }
    if let Some((open, children)) = session {
        workouts.push(finish_session(open, children));
    }

    Ok(workouts
        .into_iter()
        .filter(|workout| !workout.is_empty())
        .collect())
}

fn finish_session(session: Workout, children: Vec<Workout>) -> Workout {
    let mut steps = session.steps.clone();
    steps.extend(children.into_iter().map(Step::Workout));
    let session = session.with_steps(steps);

    if session.workout_type.is_none() && session.mixes_workout_types() {
        session.with_type(Some(COMBINATION_TYPE.to_string()))
    } else {
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::ast::Param;

    #[test]
    fn test_single_workout() {
        let doc = parse_document("# Easy Run [run]\n\n- run 5km @easy\n").unwrap();
        assert_eq!(doc.workouts.len(), 1);
        let workout = &doc.workouts[0];
        assert_eq!(workout.name, "Easy Run");
        assert_eq!(workout.workout_type.as_deref(), Some("run"));
        assert_eq!(workout.steps.len(), 1);
        assert_eq!(workout.span.line, 1);
        assert_eq!(workout.span.end_line, Some(3));
    }

    #[test]
    fn test_frontmatter_positions() {
        let doc = parse_document("---\nFTP: 250W\n---\n# Ride\n- bike 30min @80% of FTP\n").unwrap();
        assert_eq!(doc.variables.get("FTP"), Some("250W"));
        assert_eq!(doc.workouts[0].span.line, 4);
        assert_eq!(doc.workouts[0].steps[0].span().line, 5);
        assert!(matches!(doc.workouts[0].steps[0].params()[0], Param::Power(_)));
    }

    #[test]
    fn test_multiple_workouts() {
        let doc = parse_document("# A\n- run 5km\n\n# B\n- bike 10km\n").unwrap();
        assert_eq!(doc.workouts.len(), 2);
        assert_eq!(doc.workouts[1].name, "B");
    }

    #[test]
    fn steps_before_any_heading_form_a_nameless_workout() {
        let doc = parse_document("- run 5km\n\n# Named\n- bike 10km\n").unwrap();
        assert_eq!(doc.workouts.len(), 2);
        assert_eq!(doc.workouts[0].name, "");
        assert_eq!(doc.workouts[0].steps.len(), 1);
    }

    #[test]
    fn empty_documents_have_no_workouts() {
        assert!(parse_document("").unwrap().workouts.is_empty());
        assert!(parse_document("\n\nsome stray text\n").unwrap().workouts.is_empty());
    }

    #[test]
    fn stray_fences_are_skipped() {
        let doc = parse_document("# A\n- run 5km\n---\n- bike 10km\n").unwrap();
        assert_eq!(doc.workouts[0].steps.len(), 2);
    }

    #[test]
    fn test_session_grouping() {
        let text = "# Standalone\n- run 5km\n\n## Brick\n\n- warmup 10min\n\n# Ride [bike]\n- bike 60min\n\n# Run [run]\n- run 20min\n\n## Recovery\n\n# Swim [swim]\n- swim 1km\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.workouts.len(), 3);
        assert_eq!(doc.workouts[0].name, "Standalone");
        assert!(!doc.workouts[0].is_session());

        let brick = &doc.workouts[1];
        assert_eq!(brick.steps.len(), 3);
        assert!(matches!(brick.steps[0], Step::Endurance(_)));
        assert_eq!(brick.steps[1].as_workout().map(|w| w.name.as_str()), Some("Ride"));
        assert_eq!(brick.workout_type.as_deref(), Some(COMBINATION_TYPE));

        let recovery = &doc.workouts[2];
        assert_eq!(recovery.nested_workouts().count(), 1);
        assert_eq!(recovery.workout_type, None);
    }

    #[test]
    fn explicit_session_type_is_kept() {
        let text = "## Day [triathlon]\n# Ride [bike]\n- bike 1h\n# Run [run]\n- run 30min\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.workouts[0].workout_type.as_deref(), Some("triathlon"));
    }

    #[test]
    fn tab_indented_steps_are_kept() {
        let doc = parse_document("# A\n- 2x:\n\t- run 5km\n").unwrap();
        let steps = &doc.workouts[0].steps;
        assert_eq!(steps.len(), 2);
        assert!(matches!(&steps[0], Step::Block(block) if block.steps.is_empty()));
        assert!(matches!(&steps[1], Step::Endurance(run) if run.action == "run"));
    }

    #[test]
    fn errors_point_at_the_source_line() {
        let err = parse_document("---\nFTP: 250W\n---\n# A\n- run 5km\n-\n").unwrap_err();
        assert_eq!(err.message, "Empty step");
        assert_eq!(err.position.map(|p| p.line), Some(6));
    }
}
