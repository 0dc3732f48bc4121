// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live device record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Zone a device is tracked from when nothing else is configured.
pub const DEFAULT_HOME_ZONE: &str = "home";

/// Live data of a tracked device, as maintained by the device-management
/// subsystem.
///
/// Sensor and attribute values are kept as raw JSON scalars because the
/// owning subsystem writes whatever it has: numbers, text, compound text
/// such as `"37.5 mph"`, `null`, or occasionally something malformed.
/// Classification into displayable values happens in
/// [`ValueResolver`](crate::resolve::ValueResolver).
///
/// # Examples
///
/// ```
/// use trackstate_lib::device_source::DeviceRecord;
///
/// let record = DeviceRecord::new()
///     .with_sensor("zone", "home")
///     .with_sensor("battery", 87)
///     .tracked(true);
///
/// assert!(record.is_tracked);
/// assert_eq!(record.track_from_zones, vec!["home".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Sensor key → raw value.
    #[serde(default)]
    pub sensors: HashMap<String, serde_json::Value>,
    /// Attribute key → raw value.
    #[serde(default)]
    pub attrs: HashMap<String, serde_json::Value>,
    /// Whether the device is actively tracked (as opposed to monitored).
    #[serde(default)]
    pub is_tracked: bool,
    /// Zones the device's distances and update intervals are computed from.
    #[serde(default = "default_track_from_zones")]
    pub track_from_zones: Vec<String>,
    /// Primary zone the device is tracked from.
    #[serde(default = "default_base_zone")]
    pub track_from_base_zone: String,
}

fn default_track_from_zones() -> Vec<String> {
    vec![DEFAULT_HOME_ZONE.to_string()]
}

fn default_base_zone() -> String {
    DEFAULT_HOME_ZONE.to_string()
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self {
            sensors: HashMap::new(),
            attrs: HashMap::new(),
            is_tracked: false,
            track_from_zones: default_track_from_zones(),
            track_from_base_zone: default_base_zone(),
        }
    }
}

impl DeviceRecord {
    /// Creates an empty, untracked record tracked from the home zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a sensor value.
    #[must_use]
    pub fn with_sensor(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.sensors.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute value.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Sets the tracked flag.
    #[must_use]
    pub fn tracked(mut self, is_tracked: bool) -> Self {
        self.is_tracked = is_tracked;
        self
    }

    /// Sets the zones the device is tracked from.
    #[must_use]
    pub fn with_track_from_zones<I, S>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.track_from_zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the primary zone the device is tracked from.
    #[must_use]
    pub fn with_base_zone(mut self, zone: impl Into<String>) -> Self {
        self.track_from_base_zone = zone.into();
        self
    }

    /// Returns `true` if the device is tracked from anything other than
    /// `home_zone` alone.
    #[must_use]
    pub fn has_custom_track_from_zones(&self, home_zone: &str) -> bool {
        !matches!(self.track_from_zones.as_slice(), [only] if only == home_zone)
    }

    /// Returns `true` if the primary zone is not `home_zone`.
    #[must_use]
    pub fn has_custom_base_zone(&self, home_zone: &str) -> bool {
        self.track_from_base_zone != home_zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_home_tracked() {
        let record = DeviceRecord::new();
        assert!(!record.is_tracked);
        assert!(!record.has_custom_track_from_zones(DEFAULT_HOME_ZONE));
        assert!(!record.has_custom_base_zone(DEFAULT_HOME_ZONE));
    }

    #[test]
    fn custom_zone_sets_are_detected() {
        let record = DeviceRecord::new().with_track_from_zones(["home", "work"]);
        assert!(record.has_custom_track_from_zones("home"));

        let empty = DeviceRecord::new().with_track_from_zones(Vec::<String>::new());
        assert!(empty.has_custom_track_from_zones("home"));

        let office = DeviceRecord::new().with_base_zone("office");
        assert!(office.has_custom_base_zone("home"));
        assert!(!office.has_custom_base_zone("office"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let record: DeviceRecord =
            serde_json::from_str(r#"{"sensors":{"zone":"home"},"is_tracked":true}"#).unwrap();
        assert!(record.is_tracked);
        assert_eq!(record.track_from_base_zone, "home");
        assert_eq!(record.sensors["zone"], serde_json::json!("home"));
    }
}
