//! Grammar Pattern Definitions
//!
//! This module defines the regex rules of the line grammar. Each parser tries its
//! patterns in a fixed order for deterministic disambiguation.
//!
//! # Step line parse order
//!
//! 1. include          `include: <name>`
//! 2. rest             `rest <duration>` (childless only)
//! 3. repeat           `Nx:`, `Nx superset:`, `Nx circuit:`
//! 4. emom             `emom <interval>[ alternating]:`
//! 5. custom interval  `every <interval> for <duration>:`
//! 6. amrap            `amrap <duration>:`
//! 7. for-time         `for-time[ <cap>]:`
//! 8. leaf step        endurance or strength
//!
//! # Expression parse order
//!
//! 1. percentage       `N% of <expr>`
//! 2. binary operation `<expr> + <expr>`, `<expr> - <expr>`
//! 3. literal          `N<unit>`, `N`, `N%`
//! 4. variable         anything else

use once_cell::sync::Lazy;
use regex::Regex;

// Expressions

pub(super) static PERCENTAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)%\s+of\s+(.+)$").unwrap());

/// Splits at the first `+` or `-`; the caller only accepts the split if both sides parse
pub(super) static BINARY_OP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*([+-])\s*(.+)$").unwrap());

pub(super) static LITERAL_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(W|kg|lb|lbs|bpm|in|m|km|mi|cal|kcal)$").unwrap()
});

pub(super) static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").unwrap());

pub(super) static BARE_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)%$").unwrap());

pub(super) static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

// Parameters (token text after the `@`)

pub(super) static RPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^rpe(\d+(?:\.\d+)?)?$").unwrap());

pub(super) static RIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rir(\d+)?$").unwrap());

pub(super) static HEART_RATE_ZONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Z\d$").unwrap());

pub(super) static BPM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)bpm$").unwrap());

// Steps

pub(super) static SETS_REPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(\d+)x(\d+|max)(?:reps?)?|(\d+|max)reps?)$").unwrap()
});

pub(super) static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^include:\s*(.+)$").unwrap());

pub(super) static REST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rest\s+(.+)$").unwrap());

pub(super) static REPEAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x\s*(?:(superset|circuit)\s*)?:$").unwrap());

pub(super) static EMOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^emom\s+(\S+)(\s+alternating)?\s*:$").unwrap());

pub(super) static CUSTOM_INTERVAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^every\s+(\S+)\s+for\s+(\S+)\s*:$").unwrap());

pub(super) static AMRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^amrap\s+(\S+)\s*:$").unwrap());

pub(super) static FOR_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^for-time(?:\s+(\S+))?\s*:$").unwrap());

// Headings

pub(super) static HEADING_RPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@RPE\s*(\d+(?:\.\d+)?)").unwrap());

pub(super) static HEADING_RIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)@RIR\s*(\d+)").unwrap());

pub(super) static HEADING_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{4}-\d{2}-\d{2})(?:\s+(\d{2}:\d{2})(?:-(\d{2}:\d{2}))?)?\)\s*$").unwrap()
});

pub(super) static HEADING_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([\w-]+)\]\s*$").unwrap());
