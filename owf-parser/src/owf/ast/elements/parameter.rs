//! Step parameters: the `@`-prefixed modifiers of a step line

use super::expression::Expression;
use super::units::{format_number, Pace};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Named effort levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Easy,
    Moderate,
    Hard,
    Max,
    Threshold,
    Tempo,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Easy => "easy",
            Intensity::Moderate => "moderate",
            Intensity::Hard => "hard",
            Intensity::Max => "max",
            Intensity::Threshold => "threshold",
            Intensity::Tempo => "tempo",
        }
    }
}

impl FromStr for Intensity {
    type Err = ();

    /// Case-insensitive lookup in the closed vocabulary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Intensity::Easy),
            "moderate" => Ok(Intensity::Moderate),
            "hard" => Ok(Intensity::Hard),
            "max" => Ok(Intensity::Max),
            "threshold" => Ok(Intensity::Threshold),
            "tempo" => Ok(Intensity::Tempo),
            _ => Err(()),
        }
    }
}

/// A heart-rate target: either a training zone (`Z2`) or a computed value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateTarget {
    Zone(String),
    Value(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Param {
    Pace(Pace),
    Power(Expression),
    Weight(Expression),
    HeartRate(HeartRateTarget),
    Rpe(f64),
    Rir(u32),
    Intensity(Intensity),
}

impl Param {
    /// The expression carried by a power, weight or heart-rate value parameter
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Param::Power(expr) | Param::Weight(expr) => Some(expr),
            Param::HeartRate(HeartRateTarget::Value(expr)) => Some(expr),
            _ => None,
        }
    }

    /// Rebuild this parameter around a replacement expression
    ///
    /// Parameters without an expression are returned unchanged.
    pub fn with_expression(&self, expr: Expression) -> Param {
        match self {
            Param::Power(_) => Param::Power(expr),
            Param::Weight(_) => Param::Weight(expr),
            Param::HeartRate(HeartRateTarget::Value(_)) => {
                Param::HeartRate(HeartRateTarget::Value(expr))
            }
            other => other.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Param::Pace(_) => "pace",
            Param::Power(_) => "power",
            Param::Weight(_) => "weight",
            Param::HeartRate(_) => "heart_rate",
            Param::Rpe(_) => "rpe",
            Param::Rir(_) => "rir",
            Param::Intensity(_) => "intensity",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Pace(pace) => write!(f, "@{}", pace),
            Param::Power(expr) | Param::Weight(expr) => write!(f, "@{}", expr),
            Param::HeartRate(HeartRateTarget::Zone(zone)) => write!(f, "@{}", zone),
            Param::HeartRate(HeartRateTarget::Value(expr)) => write!(f, "@{}", expr),
            Param::Rpe(value) => write!(f, "@RPE {}", format_number(*value)),
            Param::Rir(value) => write!(f, "@RIR {}", value),
            Param::Intensity(intensity) => write!(f, "@{}", intensity.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_lookup() {
        assert_eq!("Easy".parse::<Intensity>(), Ok(Intensity::Easy));
        assert_eq!("TEMPO".parse::<Intensity>(), Ok(Intensity::Tempo));
        assert!("sluggish".parse::<Intensity>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Param::Pace(Pace::new(4, 30, "km")).to_string(), "@4:30/km");
        assert_eq!(Param::Rpe(7.0).to_string(), "@RPE 7");
        assert_eq!(Param::Rpe(7.5).to_string(), "@RPE 7.5");
        assert_eq!(Param::Rir(2).to_string(), "@RIR 2");
        assert_eq!(
            Param::HeartRate(HeartRateTarget::Zone("Z2".into())).to_string(),
            "@Z2"
        );
        assert_eq!(
            Param::Power(Expression::percentage(80.0, Expression::var_ref("FTP"))).to_string(),
            "@80% of FTP"
        );
        assert_eq!(Param::Intensity(Intensity::Hard).to_string(), "@hard");
    }

    #[test]
    fn with_expression_keeps_parameter_kind() {
        let weight = Param::Weight(Expression::var_ref("1RM"));
        let rebuilt = weight.with_expression(Expression::literal(80.0, Some("kg")));
        assert_eq!(rebuilt, Param::Weight(Expression::literal(80.0, Some("kg"))));

        let zone = Param::HeartRate(HeartRateTarget::Zone("Z3".into()));
        assert_eq!(zone.with_expression(Expression::literal(1.0, None)), zone);
    }
}
