//! Measured values: durations, distances and paces
//!
//!     Each value type owns its textual syntax. `FromStr` accepts every spelling the
//!     language allows; `Display` renders the single canonical spelling, which always
//!     parses back to the same value.
//!
//!     Durations accept `30s`, `90sec`, `5min`, `2h`, `1.5hr`, `1:30` (m:ss),
//!     `1:30:00` (h:mm:ss) and compound forms such as `5min30s` or `1h28min2s`.

use crate::owf::ast::error::UnitError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

static CLOCK_HMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").unwrap());
static CLOCK_MS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{2})$").unwrap());
static SINGLE_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(s|sec|min|h|hr|hour)$").unwrap());
static COMPOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d+)h)?(?:(\d+)min)?(?:(\d+)s)?$").unwrap());
static DISTANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(m|km|mi|mile|miles|yd|ft|in)$").unwrap());
static PACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{2})/(km|mi|mile)$").unwrap());

/// Render a number without a trailing `.0` when it is integral
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

fn capture_f64(caps: &regex::Captures<'_>, index: usize) -> f64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A span of time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Duration {
    pub seconds: f64,
}

impl Duration {
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn from_minutes(minutes: f64) -> Self {
        Self {
            seconds: minutes * 60.0,
        }
    }

    /// Parse any duration spelling, returning `None` if the text is not a duration
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for Duration {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        if let Some(caps) = CLOCK_HMS.captures(text) {
            let seconds =
                capture_f64(&caps, 1) * 3600.0 + capture_f64(&caps, 2) * 60.0 + capture_f64(&caps, 3);
            return Ok(Self::from_seconds(seconds));
        }
        if let Some(caps) = CLOCK_MS.captures(text) {
            return Ok(Self::from_seconds(
                capture_f64(&caps, 1) * 60.0 + capture_f64(&caps, 2),
            ));
        }
        if let Some(caps) = SINGLE_UNIT.captures(text) {
            let value = capture_f64(&caps, 1);
            let seconds = match &caps[2] {
                "s" | "sec" => value,
                "min" => value * 60.0,
                _ => value * 3600.0,
            };
            return Ok(Self::from_seconds(seconds));
        }
        if let Some(caps) = COMPOUND.captures(text) {
            if caps.get(1).is_some() || caps.get(2).is_some() || caps.get(3).is_some() {
                let seconds = capture_f64(&caps, 1) * 3600.0
                    + capture_f64(&caps, 2) * 60.0
                    + capture_f64(&caps, 3);
                return Ok(Self::from_seconds(seconds));
            }
        }
        Err(UnitError::new("duration", s))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.seconds;
        let integral = total.fract() == 0.0;

        if total < 60.0 {
            return write!(f, "{}s", format_number(total));
        }
        if total < 3600.0 {
            if total % 60.0 == 0.0 {
                return write!(f, "{}min", format_number(total / 60.0));
            }
            if integral {
                let whole = total as u64;
                return write!(f, "{}min{}s", whole / 60, whole % 60);
            }
            return write!(f, "{}s", format_number(total));
        }
        if total % 3600.0 == 0.0 {
            return write!(f, "{}h", format_number(total / 3600.0));
        }
        if !integral {
            return write!(f, "{}s", format_number(total));
        }

        let whole = total as u64;
        let (hours, minutes, seconds) = (whole / 3600, (whole % 3600) / 60, whole % 60);
        write!(f, "{}h", hours)?;
        if minutes > 0 {
            write!(f, "{}min", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}

/// A distance with its unit tag (`miles` is normalized to `mile`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distance {
    pub value: f64,
    pub unit: String,
}

impl Distance {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for Distance {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DISTANCE
            .captures(s.trim())
            .ok_or_else(|| UnitError::new("distance", s))?;
        let unit = match &caps[2] {
            "miles" => "mile",
            other => other,
        };
        Ok(Self::new(capture_f64(&caps, 1), unit))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// A running pace such as `4:30/km`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pace {
    pub minutes: u32,
    pub seconds: u32,
    pub unit: String,
}

impl Pace {
    pub fn new(minutes: u32, seconds: u32, unit: impl Into<String>) -> Self {
        Self {
            minutes,
            seconds,
            unit: unit.into(),
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for Pace {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = PACE.captures(s).ok_or_else(|| UnitError::new("pace", s))?;
        let minutes = caps[1]
            .parse()
            .map_err(|_| UnitError::new("pace", s))?;
        let seconds = caps[2]
            .parse()
            .map_err(|_| UnitError::new("pace", s))?;
        Ok(Self::new(minutes, seconds, &caps[3]))
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}/{}", self.minutes, self.seconds, self.unit)
    }
}
