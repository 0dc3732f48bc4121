// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification of raw sensor values.
//!
//! A raw value is classified by an ordered list of rules. The first rule
//! that matches decides the outcome; a value matching none is passed
//! through as [`Classification::Raw`].
//!
//! | Order | Rule | Matches |
//! |-------|------|---------|
//! | 1 | [`Rule::Numeric`] | JSON numbers, text that parses as a finite number |
//! | 2 | [`Rule::Blank`] | null, empty or whitespace text, the not-set marker |
//! | 3 | [`Rule::Stationary`] | text naming a stationary pseudo-zone |

use crate::error::ResolveError;
use crate::types::{NOT_SET, STATIONARY_FNAME, SensorValue};

/// Outcome of classifying one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The value is numeric. Carries the value to display.
    Numeric(SensorValue),
    /// The value is missing or unset.
    Blank,
    /// The value names a stationary pseudo-zone.
    Stationary,
    /// Anything else, passed through unchanged.
    Raw(String),
}

impl Classification {
    /// Converts the classification into the value to display.
    #[must_use]
    pub fn into_value(self) -> SensorValue {
        match self {
            Self::Numeric(value) => value,
            Self::Blank => SensorValue::blank(),
            Self::Stationary => SensorValue::from(STATIONARY_FNAME),
            Self::Raw(text) => SensorValue::Text(text),
        }
    }
}

/// One step of the classification ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Number or numeric text.
    Numeric,
    /// Null, whitespace or not-set text.
    Blank,
    /// Stationary pseudo-zone name.
    Stationary,
}

/// The ladder, in evaluation order.
pub const RULES: [Rule; 3] = [Rule::Numeric, Rule::Blank, Rule::Stationary];

/// Inputs shared by every rule for one classification.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The text being classified, already reduced to its leading token when
    /// a number was requested.
    pub text: &'a str,
    /// Whether the caller asked for a number.
    pub numeric: bool,
    /// Prefix shared by all stationary pseudo-zone names.
    pub stationary_prefix: &'a str,
}

impl Rule {
    /// Applies this rule, returning a classification if it matches.
    #[must_use]
    pub fn apply(self, input: &RuleInput<'_>) -> Option<Classification> {
        match self {
            Self::Numeric => {
                let number = parse_number(input.text)?;
                Some(Classification::Numeric(if input.numeric {
                    SensorValue::Number(number)
                } else {
                    SensorValue::Text(input.text.to_string())
                }))
            }
            Self::Blank => {
                let trimmed = input.text.trim();
                (trimmed.is_empty() || trimmed == NOT_SET).then_some(Classification::Blank)
            }
            Self::Stationary => (!input.stationary_prefix.is_empty()
                && input.text.trim().starts_with(input.stationary_prefix))
            .then_some(Classification::Stationary),
        }
    }
}

/// Parses `text` as a finite number, ignoring surrounding whitespace.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Returns the leading whitespace-separated token of a compound value such
/// as `"37.5 mph"`.
#[must_use]
pub fn leading_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

/// Classifies a raw value read from a live record.
///
/// `raw` is `None` when the key is absent from the record.
///
/// # Errors
///
/// Returns [`ResolveError::UnexpectedType`] for booleans, arrays and objects.
pub fn classify(
    key: &str,
    raw: Option<&serde_json::Value>,
    numeric: bool,
    stationary_prefix: &str,
) -> Result<Classification, ResolveError> {
    use serde_json::Value;

    let text = match raw {
        None | Some(Value::Null) => return Ok(Classification::Blank),
        Some(Value::Number(n)) => {
            return n
                .as_f64()
                .map(|n| Classification::Numeric(SensorValue::Number(n)))
                .ok_or_else(|| unexpected(key, "number"));
        }
        Some(Value::String(s)) => s.as_str(),
        Some(Value::Bool(_)) => return Err(unexpected(key, "bool")),
        Some(Value::Array(_)) => return Err(unexpected(key, "array")),
        Some(Value::Object(_)) => return Err(unexpected(key, "object")),
    };

    let text = if numeric && text.trim().contains(' ') {
        leading_token(text)
    } else {
        text
    };

    let input = RuleInput {
        text,
        numeric,
        stationary_prefix,
    };
    Ok(RULES
        .iter()
        .find_map(|rule| rule.apply(&input))
        .unwrap_or_else(|| Classification::Raw(text.to_string())))
}

fn unexpected(key: &str, kind: &'static str) -> ResolveError {
    ResolveError::UnexpectedType {
        key: key.to_string(),
        kind,
    }
}
