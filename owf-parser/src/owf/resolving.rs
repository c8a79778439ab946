//! Resolver
//!
//!     Evaluates every computed parameter of a document against a variable environment
//!     and returns a new document in which power, weight and heart-rate parameters are
//!     concrete literals wherever their inputs are known.
//!
//!         ---
//!         FTP: 250W
//!         ---
//!         - bike 20min @80% of FTP        =>  - bike 20min @200W
//!
//!     The environment is the document's frontmatter with the caller's extra variables
//!     layered on top. Variable values are reparsed as `<number>[unit]`, with the unit one
//!     of W, kg, lb, lbs, bpm, in, m, km.
//!
//!     Evaluation rules:
//!
//!         VarRef      the variable's value, or an "Undefined variable" error
//!         Percentage  percent / 100 * value, keeping the unit of the value
//!         BinOp       left op right, taking the left unit, else the right one
//!         Literal     unchanged
//!
//!     A percentage or operation whose operands do not reduce to literals keeps its
//!     shape with the resolved operands substituted. Heart-rate zones are untouched, and
//!     a heart-rate value that comes out without a unit is given `bpm`.
//!     The resolved document keeps the original frontmatter.

use crate::owf::ast::{
    Document, EnduranceStep, Expression, Param, ResolveError, Step, StrengthStep, Variables,
    Workout,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static VARIABLE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(W|kg|lb|lbs|bpm|in|m|km)$").unwrap());

/// Resolve all expressions of `doc`, with `extra` variables overriding the frontmatter
pub fn resolve(doc: &Document, extra: &Variables) -> Result<Document, ResolveError> {
    let variables = doc.variables.merged(extra);
    debug!(
        variables = variables.len(),
        workouts = doc.workouts.len(),
        "resolving document"
    );
    let workouts = doc
        .workouts
        .iter()
        .map(|workout| resolve_workout(workout, &variables))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(doc.with_workouts(workouts))
}

fn resolve_workout(workout: &Workout, variables: &Variables) -> Result<Workout, ResolveError> {
    Ok(workout.with_steps(resolve_steps(&workout.steps, variables)?))
}

fn resolve_steps(steps: &[Step], variables: &Variables) -> Result<Vec<Step>, ResolveError> {
    steps
        .iter()
        .map(|step| resolve_step(step, variables))
        .collect()
}

fn resolve_step(step: &Step, variables: &Variables) -> Result<Step, ResolveError> {
    Ok(match step {
        Step::Endurance(endurance) => Step::Endurance(EnduranceStep {
            params: resolve_params(&endurance.params, variables)
                .map_err(|e| e.at(endurance.span))?,
            ..endurance.clone()
        }),
        Step::Strength(strength) => Step::Strength(StrengthStep {
            params: resolve_params(&strength.params, variables)
                .map_err(|e| e.at(strength.span))?,
            ..strength.clone()
        }),
        Step::Rest(_) => step.clone(),
        Step::Include(include) => match &include.resolved {
            Some(workout) => Step::Include(include.with_resolved(resolve_workout(workout, variables)?)),
            None => step.clone(),
        },
        Step::Block(block) => Step::Block(block.with_steps(resolve_steps(&block.steps, variables)?)),
        Step::Workout(workout) => Step::Workout(resolve_workout(workout, variables)?),
    })
}

fn resolve_params(params: &[Param], variables: &Variables) -> Result<Vec<Param>, ResolveError> {
    params
        .iter()
        .map(|param| match param.expression() {
            Some(expr) => {
                let resolved = resolve_expression(expr, variables)?;
                Ok(param.with_expression(with_implied_unit(param, resolved)))
            }
            None => Ok(param.clone()),
        })
        .collect()
}

/// A unitless heart-rate literal is in bpm
///
/// Without the unit the written value would read back as power. Weights have no single
/// implied unit and stay unitless.
fn with_implied_unit(param: &Param, expr: Expression) -> Expression {
    match (param, expr) {
        (Param::HeartRate(_), Expression::Literal { value, unit: None }) => {
            Expression::literal(value, Some("bpm"))
        }
        (_, expr) => expr,
    }
}

/// Evaluate a single expression
pub fn resolve_expression(
    expr: &Expression,
    variables: &Variables,
) -> Result<Expression, ResolveError> {
    match expr {
        Expression::Literal { .. } => Ok(expr.clone()),
        Expression::VarRef { name } => {
            let value = variables
                .get(name)
                .ok_or_else(|| ResolveError::new(format!("Undefined variable: '{}'", name)))?;
            let resolved = parse_variable_value(value).ok_or_else(|| {
                ResolveError::new(format!(
                    "Cannot parse variable value for '{}': '{}'",
                    name, value
                ))
            })?;
            debug!(variable = %name, value, "resolved variable");
            Ok(resolved)
        }
        Expression::Percentage { percent, of } => {
            let inner = resolve_expression(of, variables)?;
            Ok(match inner {
                Expression::Literal { value, unit } => Expression::Literal {
                    value: value * percent / 100.0,
                    unit,
                },
                other => Expression::percentage(*percent, other),
            })
        }
        Expression::BinOp { op, left, right } => {
            let left = resolve_expression(left, variables)?;
            let right = resolve_expression(right, variables)?;
            Ok(match (left, right) {
                (
                    Expression::Literal {
                        value: left_value,
                        unit: left_unit,
                    },
                    Expression::Literal {
                        value: right_value,
                        unit: right_unit,
                    },
                ) => Expression::Literal {
                    value: op.apply(left_value, right_value),
                    unit: left_unit.or(right_unit),
                },
                (left, right) => Expression::bin_op(*op, left, right),
            })
        }
    }
}

/// Reparse a raw variable value (`250W`, `80kg`, `42`) into a literal
pub fn parse_variable_value(value: &str) -> Option<Expression> {
    let value = value.trim();
    if let Some(caps) = VARIABLE_VALUE.captures(value) {
        let number = caps[1].parse::<f64>().ok()?;
        return Some(Expression::literal(number, Some(&caps[2])));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| Expression::literal(number, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::ast::{HeartRateTarget, Operator};
    use crate::owf::parsing::parse_document;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_percentage_of_variable() {
        let resolved = resolve_expression(
            &Expression::percentage(80.0, Expression::var_ref("FTP")),
            &vars(&[("FTP", "250W")]),
        )
        .unwrap();
        assert_eq!(resolved, Expression::literal(200.0, Some("W")));
    }

    #[test]
    fn unitless_heart_rate_values_resolve_to_bpm() {
        let doc = parse_document("---\nmax HR: 190\n---\n# Run\n- run 20min @80% of max HR\n")
            .unwrap();
        let resolved = resolve(&doc, &Variables::new()).unwrap();
        assert_eq!(
            resolved.workouts[0].steps[0].params()[0],
            Param::HeartRate(HeartRateTarget::Value(Expression::literal(152.0, Some("bpm"))))
        );
    }

    #[test]
    fn test_binary_operation() {
        let expr = Expression::bin_op(
            Operator::Add,
            Expression::var_ref("bodyweight"),
            Expression::literal(20.0, Some("kg")),
        );
        let resolved = resolve_expression(&expr, &vars(&[("bodyweight", "80kg")])).unwrap();
        assert_eq!(resolved, Expression::literal(100.0, Some("kg")));

        let expr = Expression::bin_op(
            Operator::Subtract,
            Expression::literal(250.0, None),
            Expression::literal(20.0, Some("W")),
        );
        let resolved = resolve_expression(&expr, &Variables::new()).unwrap();
        assert_eq!(resolved, Expression::literal(230.0, Some("W")));
    }

    #[test]
    fn test_undefined_variable() {
        let err = resolve_expression(&Expression::var_ref("FTP"), &Variables::new()).unwrap_err();
        assert_eq!(err.message, "Undefined variable: 'FTP'");
    }

    #[test]
    fn test_unparsable_variable_value() {
        let err = resolve_expression(&Expression::var_ref("FTP"), &vars(&[("FTP", "strong")]))
            .unwrap_err();
        assert!(err.message.starts_with("Cannot parse variable value"));
    }

    #[test]
    fn test_variable_values() {
        assert_eq!(
            parse_variable_value("250W"),
            Some(Expression::literal(250.0, Some("W")))
        );
        assert_eq!(
            parse_variable_value("72.5 kg"),
            Some(Expression::literal(72.5, Some("kg")))
        );
        assert_eq!(
            parse_variable_value("42"),
            Some(Expression::literal(42.0, None))
        );
        assert_eq!(parse_variable_value("4:30/km"), None);
        assert_eq!(parse_variable_value("NaN"), None);
    }

    #[test]
    fn resolves_whole_document() {
        let doc = parse_document(
            "---\nFTP: 250W\n---\n# Ride\n- 3x:\n  - bike 5min @90% of FTP\n  - recover 2min @Z1\n",
        )
        .unwrap();
        let resolved = resolve(&doc, &Variables::new()).unwrap();

        let block = &resolved.workouts[0].steps[0];
        let params = block.children()[0].params();
        assert_eq!(params, [Param::Power(Expression::literal(225.0, Some("W")))]);
        assert_eq!(
            block.children()[1].params(),
            [Param::HeartRate(HeartRateTarget::Zone("Z1".into()))]
        );
        assert_eq!(resolved.variables, doc.variables);
    }

    #[test]
    fn extra_variables_override_frontmatter() {
        let doc = parse_document("---\nFTP: 250W\n---\n# Ride\n- bike 20min @FTP\n").unwrap();
        let resolved = resolve(&doc, &vars(&[("FTP", "300W")])).unwrap();
        assert_eq!(
            resolved.workouts[0].steps[0].params(),
            [Param::Power(Expression::literal(300.0, Some("W")))]
        );
    }

    #[test]
    fn errors_carry_the_step_position() {
        let doc = parse_document("# Ride\n\n- bike 20min @80% of FTP\n").unwrap();
        let err = resolve(&doc, &Variables::new()).unwrap_err();
        assert_eq!(err.message, "Undefined variable: 'FTP'");
        assert_eq!(err.position.map(|p| p.line), Some(3));
    }

    #[test]
    fn resolves_inside_sessions() {
        let doc = parse_document("---\nbodyweight: 80kg\n---\n## Day\n# Gym\n- dips 3x10 @bodyweight + 20kg\n").unwrap();
        let resolved = resolve(&doc, &Variables::new()).unwrap();
        let gym = resolved.workouts[0].nested_workouts().next().unwrap();
        assert_eq!(
            gym.steps[0].params(),
            [Param::Weight(Expression::literal(100.0, Some("kg")))]
        );
    }
}
