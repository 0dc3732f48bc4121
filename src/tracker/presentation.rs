// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values handed to the host's presentation layer.

use serde::Serialize;

use crate::attributes::AttributeBundle;
use crate::types::{ExternalId, SensorValue};

/// Everything the host needs to publish one tracker state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedState {
    /// Entity id (`device_tracker.gary_iphone`).
    pub entity_id: String,
    /// Unique id (`icloud3_gary_iphone`).
    pub unique_id: String,
    /// Friendly name.
    pub name: String,
    /// Name of the zone or place the device is in.
    pub location_name: SensorValue,
    /// GPS accuracy in meters.
    pub location_accuracy: SensorValue,
    /// Latitude, as text.
    pub latitude: String,
    /// Longitude, as text.
    pub longitude: String,
    /// Battery level in percent.
    pub battery_level: SensorValue,
    /// Kind of location source (`gps`).
    pub source_type: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Extra state attributes.
    pub attributes: AttributeBundle,
}

/// Device registry details of a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, devicename)` identifier pairs.
    pub identifiers: Vec<(String, String)>,
    /// Device manufacturer.
    pub manufacturer: String,
    /// Hardware model identifier.
    pub model: String,
    /// Display name, `"<fname> (<devicename>)"`.
    pub name: String,
}

/// Change to apply to the host's registries after a device is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryUpdate {
    /// Registry id of the device.
    pub external_id: ExternalId,
    /// Entity whose original name changes.
    pub entity_id: String,
    /// New original name of the entity.
    pub original_name: String,
    /// New device name, `"<fname> (<devicename>)"`.
    pub name: String,
    /// User-assigned device name, cleared.
    pub name_by_user: String,
}

/// Returns the icon shown for a device type.
#[must_use]
pub fn device_type_icon(device_type: &str) -> &'static str {
    match device_type.to_ascii_lowercase().as_str() {
        "ipad" => "mdi:tablet",
        "ipod" => "mdi:ipod",
        "watch" | "iwatch" => "mdi:watch-variant",
        "airpods" => "mdi:earbuds-outline",
        "mac" | "macbook" => "mdi:laptop",
        _ => "mdi:cellphone",
    }
}
