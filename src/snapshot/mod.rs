// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known sensor values restored from durable storage.
//!
//! The snapshot is loaded once at startup and is read-only afterwards. It is
//! only consulted while a device has no live record, so a freshly started
//! process can show the values it had before it stopped.
//!
//! # Format
//!
//! ```json
//! {
//!   "gary_iphone": { "sensors": { "zone": "home", "battery": 87 } }
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{DeviceIdentity, SensorValue, keys};

/// Persisted entry for one device.
#[derive(Debug, Deserialize)]
struct PersistedDevice {
    #[serde(default)]
    sensors: HashMap<String, serde_json::Value>,
}

/// Read-only view of the snapshot, keyed by device identity.
///
/// # Examples
///
/// ```
/// use trackstate_lib::snapshot::SnapshotStore;
/// use trackstate_lib::types::{DeviceIdentity, SensorValue};
///
/// let store = SnapshotStore::from_json(
///     r#"{"gary_iphone": {"sensors": {"zone": "home", "battery": 87}}}"#,
/// ).unwrap();
///
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
/// assert_eq!(store.get(&id, "battery"), Some(&SensorValue::Number(87.0)));
/// assert_eq!(store.get(&id, "speed"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    devices: HashMap<DeviceIdentity, HashMap<String, SensorValue>>,
}

impl SnapshotStore {
    /// Creates an empty store. Every lookup reports a miss.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from its JSON form.
    ///
    /// Devices with an invalid name and sensor values that are not numbers
    /// or text are skipped with a warning; the rest of the snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the document is not a JSON object of
    /// device entries.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let raw: HashMap<String, PersistedDevice> = serde_json::from_str(json)?;
        let mut store = Self::new();

        for (name, device) in raw {
            let identity = match DeviceIdentity::new(name) {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping snapshot entry with invalid device name");
                    continue;
                }
            };

            let mut sensors = HashMap::with_capacity(device.sensors.len());
            for (key, value) in device.sensors {
                match SensorValue::from_json(&value) {
                    Some(value) => {
                        sensors.insert(key, value);
                    }
                    None => tracing::warn!(
                        device = %identity,
                        sensor = %key,
                        "Skipping snapshot value that is not a number or text"
                    ),
                }
            }
            store.devices.insert(identity, sensors);
        }

        tracing::debug!(devices = store.devices.len(), "Loaded sensor snapshot");
        Ok(store)
    }

    /// Adds or replaces one value. Used while populating the store.
    pub fn insert(&mut self, identity: DeviceIdentity, key: impl Into<String>, value: SensorValue) {
        self.devices
            .entry(identity)
            .or_default()
            .insert(key.into(), value);
    }

    /// Looks up the last-known value of `key` for `identity`.
    ///
    /// A miss is a normal outcome meaning "use the generic default".
    #[must_use]
    pub fn get(&self, identity: &DeviceIdentity, key: &str) -> Option<&SensorValue> {
        self.devices.get(identity)?.get(key)
    }

    /// Returns the last-known zone of a device, or the blank sentinel.
    ///
    /// This is the value shown as the location name until the device has
    /// produced a real state.
    #[must_use]
    pub fn default_zone(&self, identity: &DeviceIdentity) -> SensorValue {
        self.get(identity, keys::ZONE)
            .cloned()
            .unwrap_or_else(SensorValue::blank)
    }

    /// Returns `true` if the snapshot has an entry for `identity`.
    #[must_use]
    pub fn contains(&self, identity: &DeviceIdentity) -> bool {
        self.devices.contains_key(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> DeviceIdentity {
        DeviceIdentity::new(name).unwrap()
    }

    #[test]
    fn missing_device_and_key_are_misses() {
        let store = SnapshotStore::from_json(r#"{"a": {"sensors": {"zone": "work"}}}"#).unwrap();
        assert!(store.get(&id("b"), "zone").is_none());
        assert!(store.get(&id("a"), "battery").is_none());
        assert_eq!(store.get(&id("a"), "zone"), Some(&SensorValue::from("work")));
    }

    #[test]
    fn malformed_values_are_skipped_individually() {
        let store = SnapshotStore::from_json(
            r#"{"a": {"sensors": {"zone": "home", "bad": [1, 2], "empty": null}}}"#,
        )
        .unwrap();
        assert!(store.get(&id("a"), "bad").is_none());
        assert!(store.get(&id("a"), "empty").is_none());
        assert!(store.get(&id("a"), "zone").is_some());
    }

    #[test]
    fn invalid_device_names_are_skipped() {
        let store =
            SnapshotStore::from_json(r#"{"": {"sensors": {}}, "ok": {"sensors": {}}}"#).unwrap();
        assert!(store.contains(&id("ok")));
    }

    #[test]
    fn device_without_sensors_block_loads() {
        let store = SnapshotStore::from_json(r#"{"a": {}}"#).unwrap();
        assert!(store.contains(&id("a")));
    }

    #[test]
    fn non_object_document_is_an_error() {
        assert!(matches!(
            SnapshotStore::from_json("[1, 2, 3]"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn default_zone_falls_back_to_blank() {
        let mut store = SnapshotStore::new();
        assert!(store.default_zone(&id("a")).is_blank());

        store.insert(id("a"), keys::ZONE, SensorValue::from("work"));
        assert_eq!(store.default_zone(&id("a")), SensorValue::from("work"));
    }
}
