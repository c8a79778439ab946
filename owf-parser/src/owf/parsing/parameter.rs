//! Parameter parser
//!
//!     Classifies the tail of a step line: `@`-prefixed modifiers and the `rest:` suffix.
//!
//!         @4:30/km  @pace:5:00/mi       pace
//!         @RPE7  @RPE 7                 rate of perceived exertion
//!         @RIR2  @RIR 2                 reps in reserve
//!         @Z2                           heart-rate zone
//!         @150bpm                       heart-rate value
//!         @easy @tempo ...              named intensity
//!         @<expression>                 power, weight or heart rate, by units
//!         rest:90s                      rest after the set
//!
//!     An expression extends over the following tokens up to the next `@` or `rest:`
//!     token, so `@80% of 1RM bench press` is a single parameter.
//!
//!     Which kind an expression parameter is follows from its shape: units `W` mean
//!     power, `kg`/`lb`/`lbs`/`in` weight and `bpm` heart rate. A percentage of a
//!     variable whose name mentions `hr` or `heart` is a heart rate, one that mentions
//!     `rm` is a weight. Everything else defaults to power.

use super::expression::{parse_expression, parse_number};
use super::grammar::{BARE_NUMBER, BPM, HEART_RATE_ZONE, INTEGER, RIR, RPE};
use crate::owf::ast::{Duration, Expression, HeartRateTarget, Intensity, Pace, Param, ParseError};
use tracing::debug;

/// The parameters and rest found in a step line tail
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedParams {
    pub params: Vec<Param>,
    pub rest: Option<Duration>,
}

/// `rest:<duration>`
pub fn parse_rest_token(token: &str) -> Option<Duration> {
    token.strip_prefix("rest:").and_then(Duration::parse)
}

fn starts_parameter(token: &str) -> bool {
    token.starts_with('@') || parse_rest_token(token).is_some()
}

pub fn parse_params(tokens: &[&str]) -> Result<ParsedParams, ParseError> {
    let mut parsed = ParsedParams::default();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index];

        if let Some(rest) = parse_rest_token(token) {
            parsed.rest = Some(rest);
            index += 1;
            continue;
        }

        let Some(value) = token.strip_prefix('@') else {
            debug!(token, "ignoring token outside a parameter");
            index += 1;
            continue;
        };

        let next_token = tokens.get(index + 1).copied();
        let (param, consumed) = match classify_value(value, next_token) {
            Some(Classified::Param(param, consumed)) => (Some(param), consumed),
            Some(Classified::Skip) => (None, 1),
            None => {
                let end = tokens[index + 1..]
                    .iter()
                    .position(|t| starts_parameter(t))
                    .map(|offset| index + 1 + offset)
                    .unwrap_or(tokens.len());
                let mut parts = vec![value];
                parts.extend_from_slice(&tokens[index + 1..end]);
                let expr = parse_expression(&parts.join(" "))
                    .map_err(|_| ParseError::new("Empty parameter"))?;
                (Some(classify_expression(expr)), end - index)
            }
        };

        if let Some(param) = param {
            parsed.params.push(param);
        }
        index += consumed;
    }

    Ok(parsed)
}

enum Classified {
    /// A parameter and the number of tokens it consumed
    Param(Param, usize),
    /// A keyword with no value, such as a bare `@RPE`
    Skip,
}

fn classify_value(value: &str, next_token: Option<&str>) -> Option<Classified> {
    let pace = value
        .strip_prefix("pace:")
        .and_then(Pace::parse)
        .or_else(|| Pace::parse(value));
    if let Some(pace) = pace {
        return Some(Classified::Param(Param::Pace(pace), 1));
    }

    if let Some(caps) = RPE.captures(value) {
        return Some(match caps.get(1) {
            Some(number) => Classified::Param(Param::Rpe(parse_number(number.as_str())), 1),
            None => match next_token.filter(|t| BARE_NUMBER.is_match(t)) {
                Some(number) => Classified::Param(Param::Rpe(parse_number(number)), 2),
                None => Classified::Skip,
            },
        });
    }

    if let Some(caps) = RIR.captures(value) {
        let inline = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
        return Some(match inline {
            Some(rir) => Classified::Param(Param::Rir(rir), 1),
            None => match next_token
                .filter(|t| INTEGER.is_match(t))
                .and_then(|t| t.parse::<u32>().ok())
            {
                Some(rir) => Classified::Param(Param::Rir(rir), 2),
                None => Classified::Skip,
            },
        });
    }

    if HEART_RATE_ZONE.is_match(value) {
        let zone = HeartRateTarget::Zone(value.to_string());
        return Some(Classified::Param(Param::HeartRate(zone), 1));
    }

    if let Some(caps) = BPM.captures(value) {
        let bpm = Expression::literal(parse_number(&caps[1]), Some("bpm"));
        return Some(Classified::Param(
            Param::HeartRate(HeartRateTarget::Value(bpm)),
            1,
        ));
    }

    if let Ok(intensity) = value.parse::<Intensity>() {
        return Some(Classified::Param(Param::Intensity(intensity), 1));
    }

    None
}

fn classify_by_unit(expr: Expression, unit: Option<&str>) -> Param {
    match unit {
        Some("kg" | "lb" | "lbs" | "in") => Param::Weight(expr),
        Some("bpm") => Param::HeartRate(HeartRateTarget::Value(expr)),
        _ => Param::Power(expr),
    }
}

/// Decide whether an expression is a power, weight or heart-rate target
pub fn classify_expression(expr: Expression) -> Param {
    match &expr {
        Expression::Literal { unit, .. } => {
            let unit = unit.clone();
            classify_by_unit(expr, unit.as_deref())
        }
        Expression::Percentage { of, .. } => match of.as_ref() {
            Expression::VarRef { name } => {
                let name = name.to_lowercase();
                if name.contains("hr") || name.contains("heart") {
                    Param::HeartRate(HeartRateTarget::Value(expr))
                } else if name.contains("rm") {
                    Param::Weight(expr)
                } else {
                    Param::Power(expr)
                }
            }
            _ => Param::Power(expr),
        },
        Expression::VarRef { .. } => Param::Power(expr),
        Expression::BinOp { .. } => {
            let unit = expr.first_literal_unit().map(str::to_string);
            classify_by_unit(expr, unit.as_deref())
        }
    }
}
