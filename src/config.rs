// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration types.
//!
//! [`TrackerSettings`] holds the integration-wide settings and
//! [`TrackedDeviceConfig`] describes one configured device. Both deserialize
//! with serde; reading them from a file is left to the host.

use serde::{Deserialize, Serialize};

use crate::types::DeviceIdentity;

/// Default prefix of stationary pseudo-zone names.
pub const DEFAULT_STATIONARY_PREFIX: &str = "ic3_stationary_";

/// Integration-wide settings.
///
/// # Examples
///
/// ```
/// use trackstate_lib::config::TrackerSettings;
///
/// let settings = TrackerSettings::default()
///     .with_domain("icloud3")
///     .with_namespace("iCloud3");
/// assert_eq!(settings.entity_prefix, "device_tracker");
/// assert_eq!(settings.not_tracked_zone, "not_home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Domain of the integration, used in unique ids and device info.
    pub domain: String,
    /// Tag marking registry identifier tuples that belong to this integration.
    pub namespace: String,
    /// Prefix of entity ids (`<prefix>.<devicename>`).
    pub entity_prefix: String,
    /// Label appended to the data source attribute.
    pub source_label: String,
    /// Name of the home zone.
    pub home_zone: String,
    /// Zone value meaning "outside every zone".
    pub not_tracked_zone: String,
    /// Prefix shared by stationary pseudo-zone names.
    pub stationary_prefix: String,
    /// Capacity of the event bus.
    pub event_capacity: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            domain: "icloud3".to_string(),
            namespace: "iCloud3".to_string(),
            entity_prefix: "device_tracker".to_string(),
            source_label: "iCloud3".to_string(),
            home_zone: "home".to_string(),
            not_tracked_zone: "not_home".to_string(),
            stationary_prefix: DEFAULT_STATIONARY_PREFIX.to_string(),
            event_capacity: 256,
        }
    }
}

impl TrackerSettings {
    /// Sets the integration domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the registry namespace tag.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the data source label.
    #[must_use]
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }

    /// Sets the stationary pseudo-zone prefix.
    #[must_use]
    pub fn with_stationary_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.stationary_prefix = prefix.into();
        self
    }

    /// Sets the event bus capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

/// How a configured device is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Located and tracked actively.
    #[default]
    Track,
    /// Location reported when available, never requested.
    Monitor,
    /// Configured but ignored; no tracker is created.
    Inactive,
}

/// Configuration of one tracked device.
///
/// # Examples
///
/// ```
/// use trackstate_lib::config::{TrackedDeviceConfig, TrackingMode};
///
/// let config: TrackedDeviceConfig = serde_json::from_str(r#"{
///     "devicename": "gary_iphone",
///     "fname": "Gary",
///     "device_type": "iPhone",
///     "raw_model": "iPhone15,2"
/// }"#).unwrap();
///
/// assert_eq!(config.tracking_mode, TrackingMode::Track);
/// assert_eq!(config.manufacturer, "Apple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDeviceConfig {
    /// Internal device name.
    pub devicename: DeviceIdentity,
    /// Friendly name.
    pub fname: String,
    /// Device type (`iPhone`, `iPad`, `Watch`, ...).
    #[serde(default)]
    pub device_type: String,
    /// How the device is followed.
    #[serde(default)]
    pub tracking_mode: TrackingMode,
    /// Hardware model identifier (`iPhone15,2`).
    #[serde(default)]
    pub raw_model: String,
    /// Model family (`iPhone`).
    #[serde(default)]
    pub model: String,
    /// Marketing model name (`iPhone 14 Pro`).
    #[serde(default)]
    pub model_display_name: String,
    /// Device manufacturer.
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,
}

fn default_manufacturer() -> String {
    "Apple".to_string()
}

impl TrackedDeviceConfig {
    /// Creates a tracked device configuration with empty model details.
    #[must_use]
    pub fn new(devicename: DeviceIdentity, fname: impl Into<String>) -> Self {
        Self {
            devicename,
            fname: fname.into(),
            device_type: String::new(),
            tracking_mode: TrackingMode::Track,
            raw_model: String::new(),
            model: String::new(),
            model_display_name: String::new(),
            manufacturer: default_manufacturer(),
        }
    }

    /// Sets the device type.
    #[must_use]
    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    /// Sets the tracking mode.
    #[must_use]
    pub fn with_tracking_mode(mut self, mode: TrackingMode) -> Self {
        self.tracking_mode = mode;
        self
    }

    /// Sets the hardware model identifier.
    #[must_use]
    pub fn with_raw_model(mut self, raw_model: impl Into<String>) -> Self {
        self.raw_model = raw_model.into();
        self
    }
}
