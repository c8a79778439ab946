//! Step parser
//!
//!     Recursive descent over the raw block tree. Each raw block is matched against the
//!     block headers in the order listed in [grammar](super::grammar); a matching header
//!     becomes a [Block] whose children are parsed recursively. Anything else is a leaf
//!     step, and a leaf step may not have children.
//!
//! Leaf steps
//!
//!     A leaf line reads `<name> <metrics> <params>`. The name ends at the first token
//!     that looks like a metric: a parameter (`@...`, `rest:...`), a duration, a distance
//!     or a sets/reps count (`3x8rep`, `5x5`, `3xmax`, `12reps`).
//!
//!     The first word of the name decides the kind of step. Movement verbs (run, bike,
//!     swim, row, ski, walk, hike, warmup, cooldown, recover) make an endurance step with
//!     a duration and a distance; anything else is a strength exercise with sets, reps,
//!     an optional timed-set duration and a rest. Each metric is taken once: a second
//!     duration, or anything after the first parameter, belongs to the parameter tail.

use super::grammar::{
    AMRAP, BARE_NUMBER, CUSTOM_INTERVAL, EMOM, FOR_TIME, INCLUDE, REPEAT, REST, SETS_REPS,
};
use super::parameter::parse_params;
use crate::owf::ast::{
    Block, BlockKind, Distance, Duration, EnduranceStep, IncludeStep, ParseError, Reps, RestStep,
    SourceSpan, Step, StrengthStep,
};
use crate::owf::building::RawBlock;

/// First words that make a leaf step an endurance step
pub const ENDURANCE_ACTIONS: &[&str] = &[
    "run", "bike", "swim", "row", "ski", "walk", "hike", "warmup", "cooldown", "recover",
];

pub fn parse_steps(blocks: &[RawBlock]) -> Result<Vec<Step>, ParseError> {
    blocks.iter().map(parse_step).collect()
}

pub fn parse_step(block: &RawBlock) -> Result<Step, ParseError> {
    let content = block.content();
    let span = block.line.span;
    let notes = block.notes.clone();

    if let Some(kind) = parse_block_header(content).map_err(|e| e.at(span))? {
        return Ok(Step::Block(Block {
            kind,
            steps: parse_steps(&block.children)?,
            notes,
            span,
        }));
    }

    if !block.children.is_empty() {
        return Err(
            ParseError::new(format!("Unexpected nested steps under '{}'", content)).at(span),
        );
    }

    if let Some(caps) = INCLUDE.captures(content) {
        return Ok(Step::Include(IncludeStep {
            workout_name: caps[1].trim().to_string(),
            resolved: None,
            notes,
            span,
        }));
    }

    if let Some(duration) = REST.captures(content).and_then(|caps| Duration::parse(&caps[1])) {
        return Ok(Step::Rest(RestStep {
            duration,
            notes,
            span,
        }));
    }

    parse_leaf(content, notes, span)
}

/// Decode a block header, or `None` if the content is not one
pub fn parse_block_header(content: &str) -> Result<Option<BlockKind>, ParseError> {
    if let Some(caps) = REPEAT.captures(content) {
        let count = caps[1]
            .parse::<u32>()
            .map_err(|_| ParseError::new(format!("Invalid repeat count: '{}'", &caps[1])))?;
        let kind = match caps.get(2).map(|m| m.as_str()) {
            Some("superset") => BlockKind::Superset { count },
            Some("circuit") => BlockKind::Circuit { count },
            _ => BlockKind::Repeat { count },
        };
        return Ok(Some(kind));
    }

    if let Some(caps) = EMOM.captures(content) {
        let interval = header_duration(&caps[1])?;
        return Ok(Some(if caps.get(2).is_some() {
            BlockKind::AlternatingEmom { interval }
        } else {
            BlockKind::Emom { interval }
        }));
    }

    if let Some(caps) = CUSTOM_INTERVAL.captures(content) {
        return Ok(Some(BlockKind::CustomInterval {
            interval: header_duration(&caps[1])?,
            duration: header_duration(&caps[2])?,
        }));
    }

    if let Some(caps) = AMRAP.captures(content) {
        return Ok(Some(BlockKind::Amrap {
            duration: header_duration(&caps[1])?,
        }));
    }

    if let Some(caps) = FOR_TIME.captures(content) {
        let time_cap = caps
            .get(1)
            .map(|m| header_duration(m.as_str()))
            .transpose()?;
        return Ok(Some(BlockKind::ForTime { time_cap }));
    }

    Ok(None)
}

/// Header durations default to minutes when no unit is given
fn header_duration(token: &str) -> Result<Duration, ParseError> {
    if BARE_NUMBER.is_match(token) {
        let minutes = token.parse::<f64>().unwrap_or(0.0);
        return Ok(Duration::from_minutes(minutes));
    }
    token
        .parse::<Duration>()
        .map_err(|_| ParseError::new(format!("Invalid duration in block header: '{}'", token)))
}

fn is_parameter_token(token: &str) -> bool {
    token.starts_with('@') || token.starts_with("rest:")
}

fn is_metric_token(token: &str) -> bool {
    is_parameter_token(token)
        || Duration::parse(token).is_some()
        || Distance::parse(token).is_some()
        || SETS_REPS.is_match(token)
}

fn parse_leaf(content: &str, notes: Vec<String>, span: SourceSpan) -> Result<Step, ParseError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseError::new("Empty step").at(span));
    }

    let boundary = tokens
        .iter()
        .position(|token| is_metric_token(token))
        .unwrap_or(tokens.len());
    let name = tokens[..boundary].join(" ");
    let metrics = &tokens[boundary..];

    let is_endurance = tokens[..boundary]
        .first()
        .map(|word| ENDURANCE_ACTIONS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false);

    if is_endurance {
        return parse_endurance(name, metrics, notes, span);
    }

    let mut step = parse_strength(name, metrics, notes, span)?;
    // A line with no recognisable part is kept verbatim as the exercise name
    if let Step::Strength(strength) = &mut step {
        let recognised = !strength.exercise.is_empty()
            || strength.sets.is_some()
            || strength.reps.is_some()
            || strength.duration.is_some()
            || strength.rest.is_some()
            || !strength.params.is_empty();
        if !recognised {
            strength.exercise = tokens.join(" ");
        }
    }
    Ok(step)
}

fn parse_endurance(
    action: String,
    metrics: &[&str],
    notes: Vec<String>,
    span: SourceSpan,
) -> Result<Step, ParseError> {
    let mut duration = None;
    let mut distance = None;
    let mut param_tokens = Vec::new();

    for &token in metrics {
        if !param_tokens.is_empty() || is_parameter_token(token) {
            param_tokens.push(token);
            continue;
        }
        if duration.is_none() {
            if let Some(value) = Duration::parse(token) {
                duration = Some(value);
                continue;
            }
        }
        if distance.is_none() {
            if let Some(value) = Distance::parse(token) {
                distance = Some(value);
                continue;
            }
        }
        param_tokens.push(token);
    }

    let parsed = parse_params(&param_tokens).map_err(|e| e.at(span))?;
    Ok(Step::Endurance(EnduranceStep {
        action,
        duration,
        distance,
        params: parsed.params,
        notes,
        span,
    }))
}

fn parse_strength(
    exercise: String,
    metrics: &[&str],
    notes: Vec<String>,
    span: SourceSpan,
) -> Result<Step, ParseError> {
    let mut sets = None;
    let mut reps = None;
    let mut counted = false;
    let mut duration = None;
    let mut param_tokens = Vec::new();

    for &token in metrics {
        if !param_tokens.is_empty() || is_parameter_token(token) {
            param_tokens.push(token);
            continue;
        }
        if !counted {
            if let Some(caps) = SETS_REPS.captures(token) {
                let invalid = || ParseError::new(format!("Invalid set count: '{}'", token)).at(span);
                sets = caps
                    .get(1)
                    .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                    .transpose()?;
                let count = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                reps = Some(parse_reps(count).ok_or_else(invalid)?);
                counted = true;
                continue;
            }
        }
        if duration.is_none() {
            if let Some(value) = Duration::parse(token) {
                duration = Some(value);
                continue;
            }
        }
        param_tokens.push(token);
    }

    let parsed = parse_params(&param_tokens).map_err(|e| e.at(span))?;
    Ok(Step::Strength(StrengthStep {
        exercise,
        sets,
        reps,
        duration,
        params: parsed.params,
        rest: parsed.rest,
        notes,
        span,
    }))
}

fn parse_reps(count: &str) -> Option<Reps> {
    if count.eq_ignore_ascii_case("max") {
        Some(Reps::Max)
    } else {
        count.parse().ok().map(Reps::Count)
    }
}
