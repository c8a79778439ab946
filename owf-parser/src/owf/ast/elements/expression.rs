//! Computed values used inside parameters
//!
//!     An expression is a literal (`250W`, `20kg`, `85`), a reference to a frontmatter
//!     variable (`FTP`, `1RM bench press`), a percentage of another expression
//!     (`80% of FTP`) or a binary offset (`bodyweight + 20kg`).
//!
//!     Rendering is the canonical inverse of the expression grammar: literals print
//!     their number and unit with no space, percentages print `N% of <expr>` and binary
//!     operations print `<left> <op> <right>`.

use super::units::format_number;
use serde::Serialize;
use std::fmt;

/// The binary operators of the expression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            _ => None,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Literal {
        value: f64,
        unit: Option<String>,
    },
    VarRef {
        name: String,
    },
    Percentage {
        percent: f64,
        of: Box<Expression>,
    },
    BinOp {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn literal(value: f64, unit: Option<&str>) -> Self {
        Expression::Literal {
            value,
            unit: unit.map(str::to_string),
        }
    }

    pub fn var_ref(name: impl Into<String>) -> Self {
        Expression::VarRef { name: name.into() }
    }

    pub fn percentage(percent: f64, of: Expression) -> Self {
        Expression::Percentage {
            percent,
            of: Box::new(of),
        }
    }

    pub fn bin_op(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The unit of the first literal found, searching left before right
    pub fn first_literal_unit(&self) -> Option<&str> {
        match self {
            Expression::Literal { unit, .. } => unit.as_deref(),
            Expression::VarRef { .. } => None,
            Expression::Percentage { of, .. } => of.first_literal_unit(),
            Expression::BinOp { left, right, .. } => left
                .first_literal_unit()
                .or_else(|| right.first_literal_unit()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal { value, unit } => {
                write!(f, "{}{}", format_number(*value), unit.as_deref().unwrap_or(""))
            }
            Expression::VarRef { name } => write!(f, "{}", name),
            Expression::Percentage { percent, of } => {
                write!(f, "{}% of {}", format_number(*percent), of)
            }
            Expression::BinOp { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
        }
    }
}
