//! Workout heading parser
//!
//!     # Tempo Run [run] (2025-01-15 07:00-08:00) @RPE 7 @RIR 2
//!
//!     `@RPE`/`@RIR` annotations may appear anywhere and are removed first. Then a
//!     trailing `(date[ start[-end]])` and a trailing `[type]` are peeled off; what is
//!     left is the name.

use super::expression::parse_number;
use super::grammar::{HEADING_DATE, HEADING_RIR, HEADING_RPE, HEADING_TYPE};
use crate::owf::ast::{SourceSpan, Workout, WorkoutDate};

/// Build an empty workout from a heading line's content
pub fn parse_heading(content: &str, span: SourceSpan) -> Workout {
    let mut text = content.to_string();

    let rpe = HEADING_RPE
        .captures_iter(&text)
        .last()
        .map(|caps| parse_number(&caps[1]));
    text = HEADING_RPE.replace_all(&text, "").into_owned();

    let rir = HEADING_RIR
        .captures_iter(&text)
        .last()
        .and_then(|caps| caps[1].parse::<u32>().ok());
    text = HEADING_RIR.replace_all(&text, "").into_owned();

    let mut text = text.trim_end().to_string();

    let date = HEADING_DATE.captures(&text).map(|caps| {
        let date = WorkoutDate {
            date: caps[1].to_string(),
            start_time: caps.get(2).map(|m| m.as_str().to_string()),
            end_time: caps.get(3).map(|m| m.as_str().to_string()),
        };
        (date, caps.get(0).map(|m| m.start()).unwrap_or(0))
    });
    if let Some((_, start)) = &date {
        text.truncate(*start);
        text = text.trim_end().to_string();
    }

    let workout_type = HEADING_TYPE.captures(&text).map(|caps| {
        (
            caps[1].to_string(),
            caps.get(0).map(|m| m.start()).unwrap_or(0),
        )
    });
    if let Some((_, start)) = &workout_type {
        text.truncate(*start);
    }

    Workout {
        name: text.trim().to_string(),
        workout_type: workout_type.map(|(t, _)| t),
        date: date.map(|(d, _)| d),
        rpe,
        rir,
        steps: Vec::new(),
        notes: Vec::new(),
        span,
    }
}
