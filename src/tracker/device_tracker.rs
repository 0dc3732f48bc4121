// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device tracker entity.

use std::sync::Arc;

use chrono::Utc;

use crate::attributes::{AttributeBundle, AttributeProjector};
use crate::config::TrackedDeviceConfig;
use crate::context::TrackerContext;
use crate::event::{EventBus, TrackerEvent, ZoneTransitionIntent};
use crate::resolve::{ValueResolver, coordinate_text};
use crate::types::{DeviceIdentity, ExternalId, SensorValue, keys};
use crate::zone::{ZoneTransitionDetector, ZoneTransitionState};

use super::{DeviceInfo, PresentedState, RegistryUpdate, device_type_icon};

/// The host-facing tracker of one configured device.
///
/// A tracker exists from configuration load onwards, whether or not the
/// device's live record has been created yet. Until it has, every value
/// comes from the snapshot or falls back to its default.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trackstate_lib::config::{TrackedDeviceConfig, TrackerSettings};
/// use trackstate_lib::context::TrackerContext;
/// use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord};
/// use trackstate_lib::event::EventBus;
/// use trackstate_lib::resolve::ValueResolver;
/// use trackstate_lib::snapshot::SnapshotStore;
/// use trackstate_lib::tracker::DeviceTracker;
/// use trackstate_lib::types::DeviceIdentity;
///
/// let devices = Arc::new(DeviceDirectory::new());
/// let resolver = ValueResolver::new(devices.clone(), Arc::new(SnapshotStore::new()));
/// let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
///
/// let id = DeviceIdentity::new("gary_iphone").unwrap();
/// let config = TrackedDeviceConfig::new(id.clone(), "Gary").with_device_type("iPhone");
/// let tracker = DeviceTracker::new(config, resolver, context, EventBus::new());
///
/// assert_eq!(tracker.unique_id(), "icloud3_gary_iphone");
/// assert_eq!(tracker.entity_id(), "device_tracker.gary_iphone");
/// assert!(tracker.location_name().is_blank());
///
/// devices.insert(id, DeviceRecord::new().with_sensor("dev_trk_state_value", "Home"));
/// assert_eq!(tracker.location_name().to_string(), "Home");
/// ```
#[derive(Debug)]
pub struct DeviceTracker {
    config: TrackedDeviceConfig,
    entity_id: String,
    resolver: ValueResolver,
    projector: AttributeProjector,
    context: Arc<TrackerContext>,
    events: EventBus,
    zones: ZoneTransitionDetector,
    default_value: SensorValue,
}

impl DeviceTracker {
    /// Creates the tracker of a configured device.
    #[must_use]
    pub fn new(
        config: TrackedDeviceConfig,
        resolver: ValueResolver,
        context: Arc<TrackerContext>,
        events: EventBus,
    ) -> Self {
        let settings = context.settings();
        let entity_id = format!("{}.{}", settings.entity_prefix, config.devicename);
        let zones = ZoneTransitionDetector::new(settings.not_tracked_zone.clone());
        let default_value = resolver.snapshot().default_zone(&config.devicename);
        let projector = AttributeProjector::new(resolver.clone(), Arc::clone(&context));

        let created = context.note_tracker_created();
        tracing::debug!(entity = %entity_id, count = created, "Device tracker created");

        Self {
            config,
            entity_id,
            resolver,
            projector,
            context,
            events,
            zones,
            default_value,
        }
    }

    /// Returns the device this tracker follows.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.config.devicename
    }

    /// Returns the unique id, `"<domain>_<devicename>"`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.context.settings().domain, self.config.devicename)
    }

    /// Returns the entity id, `"<prefix>.<devicename>"`.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the friendly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.fname
    }

    /// Returns the device configuration.
    #[must_use]
    pub fn config(&self) -> &TrackedDeviceConfig {
        &self.config
    }

    /// Returns the zone or place name to show as the tracker state.
    ///
    /// Until the device reports a usable state value this is the zone from
    /// the snapshot, or the blank sentinel.
    #[must_use]
    pub fn location_name(&self) -> SensorValue {
        if self.resolver.state_value_not_set(self.identity()) {
            return self.default_value.clone();
        }
        self.resolver
            .resolve(self.identity(), keys::DEVICE_TRACKER_STATE_VALUE, false)
    }

    /// Returns the GPS accuracy.
    #[must_use]
    pub fn location_accuracy(&self) -> SensorValue {
        self.resolver.resolve(self.identity(), keys::GPS_ACCURACY, true)
    }

    /// Returns the latitude, as text.
    #[must_use]
    pub fn latitude(&self) -> String {
        coordinate_text(&self.resolver.resolve(self.identity(), keys::LATITUDE, true))
    }

    /// Returns the longitude, as text.
    #[must_use]
    pub fn longitude(&self) -> String {
        coordinate_text(&self.resolver.resolve(self.identity(), keys::LONGITUDE, true))
    }

    /// Returns the battery level.
    #[must_use]
    pub fn battery_level(&self) -> SensorValue {
        self.resolver.resolve(self.identity(), keys::BATTERY, true)
    }

    /// Returns the kind of location source.
    #[must_use]
    pub fn source_type(&self) -> &'static str {
        "gps"
    }

    /// Returns the icon for the device type.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        device_type_icon(&self.config.device_type)
    }

    /// Returns the device registry details.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: vec![(
                self.context.settings().domain.clone(),
                self.config.devicename.to_string(),
            )],
            manufacturer: self.config.manufacturer.clone(),
            model: self.config.raw_model.clone(),
            name: self.display_name(),
        }
    }

    /// Returns the extra state attributes.
    #[must_use]
    pub fn extra_state_attributes(&self) -> AttributeBundle {
        self.projector.project(self.identity())
    }

    /// Returns the `(from, to)` zone values of the last write cycle.
    #[must_use]
    pub fn zone_values(&self) -> &ZoneTransitionState {
        self.zones.values()
    }

    /// Assembles the full presentation state.
    #[must_use]
    pub fn state(&self) -> PresentedState {
        PresentedState {
            entity_id: self.entity_id.clone(),
            unique_id: self.unique_id(),
            name: self.config.fname.clone(),
            location_name: self.location_name(),
            location_accuracy: self.location_accuracy(),
            latitude: self.latitude(),
            longitude: self.longitude(),
            battery_level: self.battery_level(),
            source_type: self.source_type(),
            icon: self.icon(),
            attributes: self.extra_state_attributes(),
        }
    }

    /// Publishes the current state, then checks for a zone change.
    ///
    /// The zone detector is advanced only after the state has been
    /// published. Each detected transition is published as a
    /// [`TrackerEvent::ZoneTransition`] and also returned.
    pub fn write_state(&mut self) -> Vec<ZoneTransitionIntent> {
        let state = self.state();
        self.events.publish(TrackerEvent::StatePublished {
            identity: self.identity().clone(),
            state: Box::new(state),
        });

        let zone = self
            .resolver
            .resolve(self.identity(), keys::DEVICE_TRACKER_STATE_ZONE, false)
            .to_string();
        let transitions = self.zones.observe(&zone);
        let observed_at = Utc::now();

        transitions
            .into_iter()
            .map(|transition| {
                let description = format!(
                    "{}, {}, {}",
                    self.entity_id,
                    transition.direction.verb(),
                    self.context.zone_display_name(&transition.zone)
                );
                tracing::debug!(
                    device = %self.config.devicename,
                    event = %transition.direction,
                    from = %self.zones.values().from_zone,
                    to = %self.zones.values().to_zone,
                    "Zone trigger"
                );

                let intent = ZoneTransitionIntent {
                    identity: self.config.devicename.clone(),
                    entity_id: self.entity_id.clone(),
                    direction: transition.direction,
                    zone: transition.zone,
                    from_state: self.zones.values().from_zone.clone(),
                    to_state: self.zones.values().to_zone.clone(),
                    description,
                    observed_at,
                };
                self.events.publish(TrackerEvent::ZoneTransition(intent.clone()));
                intent
            })
            .collect()
    }

    /// Renames the device.
    ///
    /// Devices that are not bound to a registry record are left unchanged
    /// and `None` is returned. Otherwise the friendly name is updated and the
    /// registry change to apply is returned.
    pub fn rename(
        &mut self,
        new_fname: impl Into<String>,
        binding: Option<ExternalId>,
    ) -> Option<RegistryUpdate> {
        let external_id = binding?;
        self.config.fname = new_fname.into();

        Some(RegistryUpdate {
            external_id,
            entity_id: self.entity_id.clone(),
            original_name: self.config.fname.clone(),
            name: self.display_name(),
            name_by_user: String::new(),
        })
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.config.fname, self.config.devicename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerSettings;
    use crate::device_source::{DeviceDirectory, DeviceRecord};
    use crate::snapshot::SnapshotStore;
    use crate::zone::TransitionDirection;

    fn id() -> DeviceIdentity {
        DeviceIdentity::new("gary_iphone").unwrap()
    }

    fn setup(snapshot: SnapshotStore) -> (Arc<DeviceDirectory>, EventBus, DeviceTracker) {
        let devices = Arc::new(DeviceDirectory::new());
        let resolver = ValueResolver::new(devices.clone(), Arc::new(snapshot));
        let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
        let bus = EventBus::new();
        let config = TrackedDeviceConfig::new(id(), "Gary")
            .with_device_type("iPhone")
            .with_raw_model("iPhone15,2");
        let tracker = DeviceTracker::new(config, resolver, context, bus.clone());
        (devices, bus, tracker)
    }

    fn located(zone: &str) -> DeviceRecord {
        DeviceRecord::new()
            .with_sensor(keys::DEVICE_TRACKER_STATE_VALUE, zone)
            .with_sensor(keys::DEVICE_TRACKER_STATE_ZONE, zone)
            .with_sensor(keys::LATITUDE, 41.8781)
            .with_sensor(keys::LONGITUDE, "-87.6298")
            .with_sensor(keys::GPS_ACCURACY, "65 m")
            .with_sensor(keys::BATTERY, "87%")
    }

    #[test]
    fn location_name_uses_snapshot_zone_until_state_is_set() {
        let mut snapshot = SnapshotStore::new();
        snapshot.insert(id(), keys::ZONE, SensorValue::from("work"));
        let (devices, _, tracker) = setup(snapshot);

        assert_eq!(tracker.location_name(), SensorValue::from("work"));

        devices.insert(id(), DeviceRecord::new().with_sensor(keys::DEVICE_TRACKER_STATE_VALUE, "NotSet"));
        assert_eq!(tracker.location_name(), SensorValue::from("work"));

        devices.insert(id(), located("home"));
        assert_eq!(tracker.location_name(), SensorValue::from("home"));
    }

    #[test]
    fn scalar_values() {
        let (devices, _, tracker) = setup(SnapshotStore::new());
        assert_eq!(tracker.latitude(), "0");
        assert_eq!(tracker.battery_level(), SensorValue::zero());

        devices.insert(id(), located("home"));
        assert_eq!(tracker.latitude(), "41.8781");
        assert_eq!(tracker.longitude(), "-87.6298");
        assert_eq!(tracker.location_accuracy(), SensorValue::Number(65.0));
        // "87%" is not numeric and has no separator, so it passes through
        assert_eq!(tracker.battery_level(), SensorValue::from("87%"));
    }

    #[test]
    fn identity_details() {
        let (_, _, tracker) = setup(SnapshotStore::new());
        assert_eq!(tracker.name(), "Gary");
        assert_eq!(tracker.icon(), "mdi:cellphone");
        assert_eq!(tracker.source_type(), "gps");

        let info = tracker.device_info();
        assert_eq!(info.identifiers, vec![("icloud3".to_string(), "gary_iphone".to_string())]);
        assert_eq!(info.model, "iPhone15,2");
        assert_eq!(info.manufacturer, "Apple");
        assert_eq!(info.name, "Gary (gary_iphone)");
    }

    #[test]
    fn write_state_publishes_state_then_transitions() {
        let (devices, bus, mut tracker) = setup(SnapshotStore::new());
        let mut rx = bus.subscribe();

        devices.insert(id(), located("home"));
        assert!(tracker.write_state().is_empty());
        assert!(matches!(rx.try_recv().unwrap(), TrackerEvent::StatePublished { .. }));

        devices.insert(id(), located("not_home"));
        let intents = tracker.write_state();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].direction, TransitionDirection::Leave);
        assert_eq!(intents[0].zone, "home");
        assert_eq!(intents[0].from_state, "home");
        assert_eq!(intents[0].to_state, "not_home");
        assert_eq!(
            intents[0].description,
            "device_tracker.gary_iphone, leaving, Home"
        );

        assert!(matches!(rx.try_recv().unwrap(), TrackerEvent::StatePublished { .. }));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.as_zone_transition(), Some(&intents[0]));
    }

    #[test]
    fn published_state_reflects_pre_transition_cycle() {
        let (devices, bus, mut tracker) = setup(SnapshotStore::new());
        let mut rx = bus.subscribe();
        devices.insert(id(), located("home"));
        tracker.write_state();

        let TrackerEvent::StatePublished { state, .. } = rx.try_recv().unwrap() else {
            panic!("Expected StatePublished event");
        };
        assert_eq!(state.location_name, SensorValue::from("home"));
        assert_eq!(tracker.zone_values().to_zone, "home");
    }

    #[test]
    fn rename_requires_binding() {
        let (_, _, mut tracker) = setup(SnapshotStore::new());
        assert!(tracker.rename("Gary B", None).is_none());
        assert_eq!(tracker.name(), "Gary");

        let ext = ExternalId::parse("306278916dc4a3b7bcc73b66dcd565b3").unwrap();
        let update = tracker.rename("Gary B", Some(ext.clone())).unwrap();
        assert_eq!(tracker.name(), "Gary B");
        assert_eq!(update.external_id, ext);
        assert_eq!(update.original_name, "Gary B");
        assert_eq!(update.name, "Gary B (gary_iphone)");
        assert!(update.name_by_user.is_empty());
    }
}
