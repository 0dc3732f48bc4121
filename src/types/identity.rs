// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier types: internal device identities and external registry ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Stable internal key naming a tracked device (e.g. `gary_iphone`).
///
/// Identities are created when configuration is loaded and never change
/// during a run. They must be non-empty and contain no whitespace.
///
/// # Examples
///
/// ```
/// use trackstate_lib::types::DeviceIdentity;
///
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
/// assert_eq!(id.as_str(), "gary_iphone");
///
/// assert!(DeviceIdentity::new("").is_err());
/// assert!(DeviceIdentity::new("gary iphone").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    /// Creates a device identity, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidIdentity`] if the name is empty or
    /// contains whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ParseError::InvalidIdentity(name));
        }
        Ok(Self(name))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceIdentity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceIdentity {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceIdentity> for String {
    fn from(id: DeviceIdentity) -> Self {
        id.0
    }
}

impl AsRef<str> for DeviceIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque id assigned to a device record by the host registry.
///
/// The id is kept exactly as the registry wrote it, minus surrounding
/// whitespace. Only an empty id is rejected.
///
/// # Examples
///
/// ```
/// use trackstate_lib::types::ExternalId;
///
/// let id = ExternalId::parse("9045bf3f-0363-c289-5735-3cf2c47163d0").unwrap();
/// assert_eq!(id.to_string(), "9045bf3f-0363-c289-5735-3cf2c47163d0");
///
/// assert!(ExternalId::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    /// Parses a registry id.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidExternalId`] if `raw` is empty or only
    /// whitespace.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidExternalId {
                raw: raw.to_string(),
                message: "id is empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExternalId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExternalId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExternalId> for String {
    fn from(id: ExternalId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rejects_blank_and_spaced_names() {
        assert!(DeviceIdentity::new("").is_err());
        assert!(DeviceIdentity::new("  ").is_err());
        assert!(DeviceIdentity::new("a b").is_err());
        assert!(DeviceIdentity::new("gary_iphone").is_ok());
    }

    #[test]
    fn identity_deserializes_with_validation() {
        let id: DeviceIdentity = serde_json::from_str("\"lillian_watch\"").unwrap();
        assert_eq!(id.as_str(), "lillian_watch");

        let bad: Result<DeviceIdentity, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn identities_are_ordered_by_name() {
        let a = DeviceIdentity::new("alpha").unwrap();
        let b = DeviceIdentity::new("beta").unwrap();
        assert!(a < b);
    }

    #[test]
    fn external_id_keeps_registry_form() {
        let hyphenated = ExternalId::parse("9045bf3f-0363-c289-5735-3cf2c47163d0").unwrap();
        assert_eq!(hyphenated.to_string(), "9045bf3f-0363-c289-5735-3cf2c47163d0");

        let short = ExternalId::parse(" dev-42 ").unwrap();
        assert_eq!(short.as_str(), "dev-42");
        assert_ne!(short, ExternalId::parse("DEV-42").unwrap());
    }

    #[test]
    fn external_id_rejects_blank() {
        let err = ExternalId::parse("").unwrap_err();
        assert!(matches!(err, ParseError::InvalidExternalId { .. }));
        assert!(ExternalId::parse(" \t ").is_err());
    }

    #[test]
    fn external_id_serde_uses_plain_string() {
        let id: ExternalId = serde_json::from_str("\"dev-42\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dev-42\"");
        assert!(serde_json::from_str::<ExternalId>("\"\"").is_err());
    }
}
