//! Expression parser
//!
//!     Parses the computed-value sub-language used by power, weight and heart-rate
//!     parameters. The whole input must match one rule; rules are tried from the
//!     loosest binding to the tightest:
//!
//!         80% of FTP              Percentage(80, VarRef FTP)
//!         bodyweight + 20kg       BinOp(+, VarRef bodyweight, Literal 20 kg)
//!         250W                    Literal 250 W
//!         85                      Literal 85
//!         80%                     Literal 80 %
//!         1RM bench press         VarRef "1RM bench press"
//!
//!     A binary operation is only recognised when both sides parse, and since anything
//!     non-empty parses as a variable, a hyphenated name such as `bent-over` reads as a
//!     subtraction of two variables.

use super::grammar::{BARE_NUMBER, BARE_PERCENT, BINARY_OP, LITERAL_WITH_UNIT, PERCENTAGE};
use crate::owf::ast::{Expression, ExpressionError, Operator};

pub fn parse_expression(text: &str) -> Result<Expression, ExpressionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExpressionError::Empty);
    }

    if let Some(caps) = PERCENTAGE.captures(text) {
        let percent = parse_number(&caps[1]);
        let of = parse_expression(&caps[2])?;
        return Ok(Expression::percentage(percent, of));
    }

    if let Some(caps) = BINARY_OP.captures(text) {
        if let (Ok(left), Some(op), Ok(right)) = (
            parse_expression(&caps[1]),
            Operator::from_symbol(&caps[2]),
            parse_expression(&caps[3]),
        ) {
            return Ok(Expression::bin_op(op, left, right));
        }
    }

    if let Some(caps) = LITERAL_WITH_UNIT.captures(text) {
        return Ok(Expression::literal(parse_number(&caps[1]), Some(&caps[2])));
    }

    if BARE_NUMBER.is_match(text) {
        return Ok(Expression::literal(parse_number(text), None));
    }

    if let Some(caps) = BARE_PERCENT.captures(text) {
        return Ok(Expression::literal(parse_number(&caps[1]), Some("%")));
    }

    Ok(Expression::var_ref(text))
}

/// Numbers here are already validated by a `\d+(\.\d+)?` pattern
pub(super) fn parse_number(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}
