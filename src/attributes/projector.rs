// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembly of the attribute bundle exposed for a device.

use std::sync::Arc;

use crate::context::TrackerContext;
use crate::resolve::ValueResolver;
use crate::types::{DeviceIdentity, SensorValue, keys};

use super::AttributeBundle;

/// Attributes present for every device: `(attribute key, sensor key)`.
const BASE_ATTRIBUTES: [(&str, &str); 10] = [
    (keys::DEVICE_STATUS, keys::DEVICE_STATUS),
    (keys::NAME, keys::NAME),
    (keys::PICTURE, keys::PICTURE),
    (keys::ZONE, keys::ZONE),
    (keys::LAST_ZONE, keys::LAST_ZONE),
    (keys::ZONE_DATETIME, keys::ZONE_DATETIME),
    (keys::LAST_LOCATED, keys::LAST_LOCATED_DATETIME),
    (keys::LAST_UPDATE, keys::LAST_UPDATE_DATETIME),
    (keys::HOME_DISTANCE, keys::HOME_DISTANCE),
    (keys::DISTANCE_TO_DEVICES, keys::DISTANCE_TO_DEVICES),
];

/// Attributes present only while the device is actively tracked.
const TRACKED_ATTRIBUTES: [(&str, &str); 5] = [
    (keys::NEXT_UPDATE, keys::NEXT_UPDATE_DATETIME),
    (keys::TRIGGER, keys::TRIGGER),
    (keys::FROM_ZONE, keys::FROM_ZONE),
    (keys::WAZE_DISTANCE, keys::WAZE_DISTANCE),
    (keys::CALC_DISTANCE, keys::CALC_DISTANCE),
];

/// Builds the attribute bundle of a device.
///
/// The bundle always starts with the data source followed by the base
/// attributes. Devices with a live record that are actively tracked get the
/// tracking attributes; devices tracked from zones other than the home zone
/// get the zone lists. Process-wide metadata comes last.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trackstate_lib::attributes::AttributeProjector;
/// use trackstate_lib::config::TrackerSettings;
/// use trackstate_lib::context::TrackerContext;
/// use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord};
/// use trackstate_lib::resolve::ValueResolver;
/// use trackstate_lib::snapshot::SnapshotStore;
/// use trackstate_lib::types::DeviceIdentity;
///
/// let devices = Arc::new(DeviceDirectory::new());
/// let resolver = ValueResolver::new(devices.clone(), Arc::new(SnapshotStore::new()));
/// let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
/// let projector = AttributeProjector::new(resolver, context);
///
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
/// devices.insert(id.clone(), DeviceRecord::new().with_sensor("trigger", "Zone Exit").tracked(true));
///
/// let bundle = projector.project(&id);
/// assert!(bundle.contains_key("next_update"));
/// assert_eq!(bundle.get("tracking").unwrap().to_string(), "gary_iphone");
/// ```
#[derive(Debug, Clone)]
pub struct AttributeProjector {
    resolver: ValueResolver,
    context: Arc<TrackerContext>,
}

impl AttributeProjector {
    /// Creates a projector.
    #[must_use]
    pub fn new(resolver: ValueResolver, context: Arc<TrackerContext>) -> Self {
        Self { resolver, context }
    }

    /// Builds the attribute bundle for `identity`.
    ///
    /// Every value goes through [`ValueResolver::resolve`], so malformed
    /// device data shows up as defaults in the bundle rather than as an
    /// error.
    #[must_use]
    pub fn project(&self, identity: &DeviceIdentity) -> AttributeBundle {
        let settings = self.context.settings();
        let mut bundle = AttributeBundle::new();

        let source = self.resolver.resolve(identity, keys::LOCATION_SOURCE, false);
        bundle.insert(
            keys::DATA_SOURCE,
            SensorValue::Text(format!("{source} ({})", settings.source_label)),
        );

        self.insert_resolved(&mut bundle, identity, &BASE_ATTRIBUTES);

        if let Some(record) = self.resolver.devices().try_get(identity) {
            if record.is_tracked {
                self.insert_resolved(&mut bundle, identity, &TRACKED_ATTRIBUTES);
            }
            if record.has_custom_track_from_zones(&settings.home_zone) {
                bundle.insert(
                    keys::TRACK_FROM_ZONES,
                    SensorValue::Text(record.track_from_zones.join(", ")),
                );
            }
            if record.has_custom_base_zone(&settings.home_zone) {
                bundle.insert(
                    keys::PRIMARY_HOME_ZONE,
                    SensorValue::Text(self.context.zone_display_name(&record.track_from_base_zone)),
                );
            }
        }

        self.insert_metadata(&mut bundle);
        bundle
    }

    fn insert_resolved(
        &self,
        bundle: &mut AttributeBundle,
        identity: &DeviceIdentity,
        attributes: &[(&str, &str)],
    ) {
        for (attribute, sensor) in attributes {
            bundle.insert(*attribute, self.resolver.resolve(identity, sensor, false));
        }
    }

    fn insert_metadata(&self, bundle: &mut AttributeBundle) {
        let runtime = self.context.runtime();
        let tracking = self
            .resolver
            .devices()
            .tracked_identities()
            .iter()
            .map(DeviceIdentity::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        bundle.insert(keys::VERSION, SensorValue::Text(runtime.version));
        bundle.insert(keys::EVENT_LOG_VERSION, SensorValue::Text(runtime.event_log_version));
        bundle.insert(keys::TRACKING, SensorValue::Text(tracking));
        bundle.insert(keys::INSTALL_DIRECTORY, SensorValue::Text(runtime.install_directory));
    }
}
