// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value resolution with snapshot fallback.

use std::sync::Arc;

use crate::device_source::DeviceSource;
use crate::error::ResolveError;
use crate::snapshot::SnapshotStore;
use crate::types::{BLANK_SENSOR_FIELD, DeviceIdentity, NOT_SET, NOT_SET_FNAME, SensorValue, keys};

use super::classify::classify;

/// Resolves sensor keys of a device into displayable values.
///
/// Resolution follows a fixed fallback ladder:
///
/// 1. If the device has no live record, the snapshot value for the key is
///    returned, or the default (`0` for numbers, the blank sentinel for
///    text) when the snapshot has none.
/// 2. Otherwise the live value is classified (see
///    [`classify`](super::classify)) into a number, the blank sentinel,
///    the stationary label, or the raw text.
///
/// The live record is fetched again on every call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord};
/// use trackstate_lib::resolve::ValueResolver;
/// use trackstate_lib::snapshot::SnapshotStore;
/// use trackstate_lib::types::{DeviceIdentity, SensorValue};
///
/// let devices = Arc::new(DeviceDirectory::new());
/// let resolver = ValueResolver::new(devices.clone(), Arc::new(SnapshotStore::new()));
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
///
/// // No record, no snapshot: defaults
/// assert_eq!(resolver.resolve(&id, "speed", true), SensorValue::zero());
/// assert!(resolver.resolve(&id, "zone", false).is_blank());
///
/// devices.insert(id.clone(), DeviceRecord::new().with_sensor("speed", "37.5 mph"));
/// assert_eq!(resolver.resolve(&id, "speed", true), SensorValue::Number(37.5));
/// ```
#[derive(Clone)]
pub struct ValueResolver {
    devices: Arc<dyn DeviceSource>,
    snapshot: Arc<SnapshotStore>,
    stationary_prefix: String,
}

impl std::fmt::Debug for ValueResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueResolver")
            .field("stationary_prefix", &self.stationary_prefix)
            .finish_non_exhaustive()
    }
}

impl ValueResolver {
    /// Creates a resolver over a device source and a snapshot, using the
    /// default stationary-zone prefix.
    #[must_use]
    pub fn new(devices: Arc<dyn DeviceSource>, snapshot: Arc<SnapshotStore>) -> Self {
        Self {
            devices,
            snapshot,
            stationary_prefix: crate::config::DEFAULT_STATIONARY_PREFIX.to_string(),
        }
    }

    /// Sets the prefix that identifies stationary pseudo-zones.
    #[must_use]
    pub fn with_stationary_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.stationary_prefix = prefix.into();
        self
    }

    /// Returns the device source this resolver reads from.
    #[must_use]
    pub fn devices(&self) -> &Arc<dyn DeviceSource> {
        &self.devices
    }

    /// Returns the snapshot this resolver falls back to.
    #[must_use]
    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }

    /// Resolves `key` for `identity`.
    ///
    /// Never fails: a value that cannot be classified is logged and replaced
    /// by the default for the requested kind.
    #[must_use]
    pub fn resolve(&self, identity: &DeviceIdentity, key: &str, numeric: bool) -> SensorValue {
        match self.try_resolve(identity, key, numeric) {
            Ok(value) => {
                tracing::trace!(device = %identity, sensor = key, value = %value, "Resolved sensor");
                value
            }
            Err(e) => {
                tracing::error!(device = %identity, error = %e, "Sensor value could not be resolved");
                SensorValue::default_for(numeric)
            }
        }
    }

    /// Resolves `key` for `identity`, reporting malformed values.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnexpectedType`] if the live value is a
    /// boolean, array or object.
    pub fn try_resolve(
        &self,
        identity: &DeviceIdentity,
        key: &str,
        numeric: bool,
    ) -> Result<SensorValue, ResolveError> {
        let Some(record) = self.devices.try_get(identity) else {
            return Ok(self
                .snapshot
                .get(identity, key)
                .cloned()
                .unwrap_or_else(|| SensorValue::default_for(numeric)));
        };

        classify(key, record.sensors.get(key), numeric, &self.stationary_prefix)
            .map(super::Classification::into_value)
    }

    /// Reads a value from the device's attribute mapping.
    ///
    /// Only non-blank text is returned. Absent records and missing, null,
    /// blank, not-set or non-text values all read as `0`.
    #[must_use]
    pub fn attribute(&self, identity: &DeviceIdentity, key: &str) -> SensorValue {
        let Some(record) = self.devices.try_get(identity) else {
            return SensorValue::zero();
        };

        match record.attrs.get(key) {
            Some(serde_json::Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == NOT_SET {
                    SensorValue::zero()
                } else {
                    SensorValue::Text(s.clone())
                }
            }
            _ => SensorValue::zero(),
        }
    }

    /// Returns `true` if the device has no usable tracker state yet.
    ///
    /// That is the case when the device has no live record, or when its
    /// state value is blank-prefixed, whitespace, the not-set marker or its
    /// display form.
    #[must_use]
    pub fn state_value_not_set(&self, identity: &DeviceIdentity) -> bool {
        if self.devices.try_get(identity).is_none() {
            return true;
        }
        is_not_set(&self.resolve(identity, keys::DEVICE_TRACKER_STATE_VALUE, false))
    }
}

/// Returns `true` if `value` counts as "not set" for state purposes.
#[must_use]
pub fn is_not_set(value: &SensorValue) -> bool {
    match value {
        SensorValue::Number(_) => false,
        SensorValue::Text(text) => {
            text.starts_with(BLANK_SENSOR_FIELD)
                || text.trim().is_empty()
                || text == NOT_SET
                || text == NOT_SET_FNAME
        }
    }
}

/// Formats a resolved coordinate for the presentation layer.
///
/// Numbers are rendered with `Display`; text is passed through unchanged.
#[must_use]
pub fn coordinate_text(value: &SensorValue) -> String {
    value.to_string()
}
