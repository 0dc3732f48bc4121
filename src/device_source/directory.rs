// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to live device records.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::types::DeviceIdentity;

use super::DeviceRecord;

/// Read access to the device-management subsystem.
///
/// A record may be absent for any identity at any time, including after it
/// was present. Callers fetch on every use and never hold on to a returned
/// record across calls.
pub trait DeviceSource: Send + Sync {
    /// Returns the current record for `identity`, if one exists.
    fn try_get(&self, identity: &DeviceIdentity) -> Option<DeviceRecord>;

    /// Returns every identity that currently has a live record.
    fn tracked_identities(&self) -> Vec<DeviceIdentity>;
}

/// In-memory [`DeviceSource`] written by the owner of the devices.
///
/// The directory uses `parking_lot::RwLock` for interior mutability so the
/// writer can swap or update records through a shared reference while
/// readers keep calling [`try_get`](DeviceSource::try_get).
///
/// # Examples
///
/// ```
/// use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord, DeviceSource};
/// use trackstate_lib::types::DeviceIdentity;
///
/// let directory = DeviceDirectory::new();
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
/// assert!(directory.try_get(&id).is_none());
///
/// directory.insert(id.clone(), DeviceRecord::new().with_sensor("zone", "home"));
/// assert!(directory.try_get(&id).is_some());
/// ```
#[derive(Debug, Default)]
pub struct DeviceDirectory {
    records: RwLock<BTreeMap<DeviceIdentity, DeviceRecord>>,
}

impl DeviceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for a device.
    ///
    /// Returns the previous record, if any.
    pub fn insert(&self, identity: DeviceIdentity, record: DeviceRecord) -> Option<DeviceRecord> {
        self.records.write().insert(identity, record)
    }

    /// Removes the record for a device.
    pub fn remove(&self, identity: &DeviceIdentity) -> Option<DeviceRecord> {
        self.records.write().remove(identity)
    }

    /// Sets one sensor value on an existing record.
    ///
    /// Returns `false` if the device has no record.
    pub fn set_sensor(
        &self,
        identity: &DeviceIdentity,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> bool {
        match self.records.write().get_mut(identity) {
            Some(record) => {
                record.sensors.insert(key.into(), value.into());
                true
            }
            None => false,
        }
    }

    /// Returns the number of devices with a live record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no device has a live record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl DeviceSource for DeviceDirectory {
    fn try_get(&self, identity: &DeviceIdentity) -> Option<DeviceRecord> {
        self.records.read().get(identity).cloned()
    }

    fn tracked_identities(&self) -> Vec<DeviceIdentity> {
        self.records.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> DeviceIdentity {
        DeviceIdentity::new(name).unwrap()
    }

    #[test]
    fn record_can_appear_and_disappear() {
        let directory = DeviceDirectory::new();
        assert!(directory.try_get(&id("a")).is_none());

        directory.insert(id("a"), DeviceRecord::new());
        assert!(directory.try_get(&id("a")).is_some());

        directory.remove(&id("a"));
        assert!(directory.try_get(&id("a")).is_none());
        assert!(directory.is_empty());
    }

    #[test]
    fn set_sensor_updates_existing_record_only() {
        let directory = DeviceDirectory::new();
        assert!(!directory.set_sensor(&id("a"), "zone", "home"));

        directory.insert(id("a"), DeviceRecord::new());
        assert!(directory.set_sensor(&id("a"), "zone", "work"));

        let record = directory.try_get(&id("a")).unwrap();
        assert_eq!(record.sensors["zone"], serde_json::json!("work"));
    }

    #[test]
    fn returned_record_is_detached_from_later_writes() {
        let directory = DeviceDirectory::new();
        directory.insert(id("a"), DeviceRecord::new().with_sensor("zone", "home"));

        let before = directory.try_get(&id("a")).unwrap();
        directory.set_sensor(&id("a"), "zone", "work");

        assert_eq!(before.sensors["zone"], serde_json::json!("home"));
    }

    #[test]
    fn tracked_identities_are_sorted() {
        let directory = DeviceDirectory::new();
        directory.insert(id("zed"), DeviceRecord::new());
        directory.insert(id("amy"), DeviceRecord::new());
        assert_eq!(directory.tracked_identities(), vec![id("amy"), id("zed")]);
        assert_eq!(directory.len(), 2);
    }
}
