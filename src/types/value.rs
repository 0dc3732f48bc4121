// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Displayable sensor values and the sentinels used in place of missing data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown when a text value is missing or unset.
///
/// Distinct from an empty string so a user can tell "no data yet" apart from
/// a sensor that legitimately reports nothing.
pub const BLANK_SENSOR_FIELD: &str = "––";

/// Internal marker a device writes into a sensor it has not filled in yet.
pub const NOT_SET: &str = "not_set";

/// Display form of [`NOT_SET`].
pub const NOT_SET_FNAME: &str = "NotSet";

/// Label shown for any stationary pseudo-zone.
pub const STATIONARY_FNAME: &str = "Stationary";

/// A resolved, displayable sensor value.
///
/// Values are either numbers or text. Serialization is untagged, so a
/// `SensorValue` reads and writes the same way a raw JSON scalar does.
///
/// # Examples
///
/// ```
/// use trackstate_lib::types::SensorValue;
///
/// assert_eq!(SensorValue::zero().as_number(), Some(0.0));
/// assert!(SensorValue::blank().is_blank());
/// assert_eq!(SensorValue::from("home").to_string(), "home");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// A numeric reading.
    Number(f64),
    /// A text reading.
    Text(String),
}

impl SensorValue {
    /// The numeric default, used when a number is requested and none exists.
    #[must_use]
    pub const fn zero() -> Self {
        Self::Number(0.0)
    }

    /// The blank sentinel, used when text is requested and none exists.
    #[must_use]
    pub fn blank() -> Self {
        Self::Text(BLANK_SENSOR_FIELD.to_string())
    }

    /// Returns the default for the requested kind of value.
    #[must_use]
    pub fn default_for(numeric: bool) -> Self {
        if numeric { Self::zero() } else { Self::blank() }
    }

    /// Returns `true` if this is exactly the blank sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text == BLANK_SENSOR_FIELD)
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Converts a raw JSON scalar into a value.
    ///
    /// Returns `None` for null, booleans, arrays and objects.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SensorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
