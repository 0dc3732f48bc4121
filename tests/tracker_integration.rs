// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests driving trackers through the public API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use trackstate_lib::config::{TrackedDeviceConfig, TrackerSettings, TrackingMode};
use trackstate_lib::context::{RuntimeInfo, TrackerContext};
use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord};
use trackstate_lib::event::TrackerEvent;
use trackstate_lib::identity::{ExternalIdentityRecord, IdentityReconciler, RegistryScan};
use trackstate_lib::manager::TrackerManager;
use trackstate_lib::resolve::ValueResolver;
use trackstate_lib::snapshot::SnapshotStore;
use trackstate_lib::types::{DeviceIdentity, ExternalId, SensorValue, keys};
use trackstate_lib::zone::TransitionDirection;

const SNAPSHOT: &str = r#"{
    "gary_iphone": {"sensors": {"zone": "home", "battery": 64, "dev_trk_state_value": "Home"}},
    "lillian_watch": {"sensors": {"zone": "work", "latitude": "41.878100"}}
}"#;

const DELETED_ID: &str = "9045bf3f0363c28957353cf2c47163d0";
const ACTIVE_ID: &str = "306278916dc4a3b7bcc73b66dcd565b3";

fn id(name: &str) -> DeviceIdentity {
    DeviceIdentity::new(name).unwrap()
}

fn context() -> Arc<TrackerContext> {
    let context = TrackerContext::new(TrackerSettings::default()).with_runtime(RuntimeInfo {
        version: "3.0.5".to_string(),
        event_log_version: "3.0.5".to_string(),
        install_directory: "/config/custom_components/icloud3".to_string(),
    });
    context.set_zone_display_name("work", "Office");
    Arc::new(context)
}

fn configs() -> Vec<TrackedDeviceConfig> {
    vec![
        TrackedDeviceConfig::new(id("gary_iphone"), "Gary")
            .with_device_type("iPhone")
            .with_raw_model("iPhone15,2"),
        TrackedDeviceConfig::new(id("lillian_watch"), "Lillian")
            .with_device_type("Watch")
            .with_tracking_mode(TrackingMode::Monitor),
        TrackedDeviceConfig::new(id("spare_ipad"), "Spare")
            .with_device_type("iPad")
            .with_tracking_mode(TrackingMode::Inactive),
    ]
}

fn registry() -> RegistryScan {
    RegistryScan::new(
        vec![ExternalIdentityRecord::new(DELETED_ID).with_identifier(["iCloud3", "gary_iphone", "iPhone 14 Pro"])],
        vec![
            ExternalIdentityRecord::new(ACTIVE_ID).with_identifier(["iCloud3", "gary_iphone", "iPhone 14 Pro"]),
            ExternalIdentityRecord::new("0123456789abcdef0123456789abcdef").with_identifier(["hue", "bridge"]),
        ],
    )
}

fn start() -> (Arc<DeviceDirectory>, TrackerManager) {
    let devices = Arc::new(DeviceDirectory::new());
    let snapshot = SnapshotStore::from_json(SNAPSHOT).unwrap();
    let mut manager = TrackerManager::new(context(), devices.clone(), snapshot);
    manager.setup(configs(), &registry());
    (devices, manager)
}

fn located(zone: &str) -> DeviceRecord {
    DeviceRecord::new()
        .with_sensor(keys::DEVICE_TRACKER_STATE_VALUE, zone)
        .with_sensor(keys::DEVICE_TRACKER_STATE_ZONE, zone)
        .with_sensor(keys::ZONE, zone)
        .with_sensor(keys::BATTERY, 91)
        .with_sensor(keys::LATITUDE, 41.8781)
        .with_sensor(keys::LONGITUDE, -87.6298)
        .with_sensor(keys::HOME_DISTANCE, "1.4 km")
        .with_sensor(keys::TRIGGER, "Zone Enter")
        .tracked(true)
}

// ============================================================================
// Startup
// ============================================================================

mod startup {
    use super::*;

    #[test]
    fn trackers_are_created_for_active_devices_only() {
        let (_, manager) = start();
        let names: Vec<_> = manager.trackers().map(|t| t.identity().to_string()).collect();
        assert_eq!(names, vec!["gary_iphone", "lillian_watch"]);
        assert_eq!(manager.context().configured().len(), 3);
    }

    #[test]
    fn snapshot_values_are_shown_before_devices_exist() {
        let (_, manager) = start();
        let gary = manager.tracker(&id("gary_iphone")).unwrap();

        assert_eq!(gary.location_name(), SensorValue::from("home"));
        assert_eq!(gary.battery_level(), SensorValue::Number(64.0));
        assert_eq!(gary.location_accuracy(), SensorValue::zero());

        let attrs = gary.extra_state_attributes();
        assert_eq!(attrs.get("zone"), Some(&SensorValue::from("home")));
        assert!(attrs.get("last_zone").unwrap().is_blank());
        assert!(!attrs.contains_key("next_update"));
    }

    #[test]
    fn snapshot_coordinates_are_published_as_stored() {
        let (_, manager) = start();
        let lillian = manager.tracker(&id("lillian_watch")).unwrap();
        assert_eq!(lillian.latitude(), "41.878100");
        assert_eq!(lillian.longitude(), "0");
    }

    #[test]
    fn device_without_snapshot_shows_defaults() {
        let devices = Arc::new(DeviceDirectory::new());
        let mut manager = TrackerManager::new(context(), devices, SnapshotStore::new());
        manager.setup(configs(), &RegistryScan::default());

        let gary = manager.tracker(&id("gary_iphone")).unwrap();
        assert!(gary.location_name().is_blank());
        assert_eq!(gary.battery_level(), SensorValue::zero());
        assert_eq!(gary.latitude(), "0");
    }

    #[test]
    fn active_registry_record_wins() {
        let (_, manager) = start();
        assert_eq!(
            manager.binding(&id("gary_iphone")),
            Some(ExternalId::parse(ACTIVE_ID).unwrap())
        );
        assert!(manager.binding(&id("lillian_watch")).is_none());
    }
}

// ============================================================================
// Live Devices
// ============================================================================

mod live_devices {
    use super::*;

    #[test]
    fn live_record_replaces_snapshot() {
        let (devices, manager) = start();
        devices.insert(id("gary_iphone"), located("work"));

        let state = manager.tracker(&id("gary_iphone")).unwrap().state();
        assert_eq!(state.location_name, SensorValue::from("work"));
        assert_eq!(state.battery_level, SensorValue::Number(91.0));
        assert_eq!(state.latitude, "41.8781");
        assert_eq!(state.longitude, "-87.6298");
        assert_eq!(state.icon, "mdi:cellphone");
        assert_eq!(state.unique_id, "icloud3_gary_iphone");

        assert_eq!(
            state.attributes.get("home_distance"),
            Some(&SensorValue::from("1.4 km"))
        );
        assert_eq!(
            state.attributes.get("trigger"),
            Some(&SensorValue::from("Zone Enter"))
        );
        assert_eq!(
            state.attributes.get("tracking"),
            Some(&SensorValue::from("gary_iphone"))
        );
    }

    #[test]
    fn monitored_device_omits_tracking_attributes() {
        let (devices, manager) = start();
        devices.insert(id("lillian_watch"), located("home").tracked(false));

        let attrs = manager
            .tracker(&id("lillian_watch"))
            .unwrap()
            .extra_state_attributes();
        assert!(!attrs.contains_key("trigger"));
        assert!(!attrs.contains_key("next_update"));
        assert!(attrs.contains_key("home_distance"));
    }

    #[test]
    fn malformed_record_never_breaks_presentation() {
        let (devices, manager) = start();
        devices.insert(
            id("gary_iphone"),
            DeviceRecord::new()
                .with_sensor(keys::DEVICE_TRACKER_STATE_VALUE, json!({"nested": true}))
                .with_sensor(keys::BATTERY, json!([1, 2, 3]))
                .with_sensor(keys::LATITUDE, json!(false))
                .with_sensor(keys::ZONE, json!(null))
                .with_attr("odd", json!({"x": 1}))
                .tracked(true),
        );

        let state = manager.tracker(&id("gary_iphone")).unwrap().state();
        // Malformed state value reads as blank, so the snapshot zone is shown
        assert_eq!(state.location_name, SensorValue::from("home"));
        assert_eq!(state.battery_level, SensorValue::zero());
        assert_eq!(state.latitude, "0");
        assert!(state.attributes.get("zone").unwrap().is_blank());
    }

    #[test]
    fn attribute_lookup_defaults_to_zero() {
        let devices = Arc::new(DeviceDirectory::new());
        let resolver = ValueResolver::new(devices.clone(), Arc::new(SnapshotStore::new()));
        devices.insert(
            id("gary_iphone"),
            DeviceRecord::new().with_attr("odd", json!({"x": 1})),
        );
        assert_eq!(resolver.attribute(&id("gary_iphone"), "odd"), SensorValue::zero());
    }
}

// ============================================================================
// Zone Transitions
// ============================================================================

mod zone_transitions {
    use super::*;

    #[test]
    fn hopping_between_zones_emits_leave_then_enter() {
        let (devices, mut manager) = start();
        let gary = id("gary_iphone");

        devices.insert(gary.clone(), located("home"));
        assert!(manager.write_state(&gary).unwrap().is_empty());

        devices.insert(gary.clone(), located("work"));
        let intents = manager.write_state(&gary).unwrap();

        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].direction, TransitionDirection::Leave);
        assert_eq!(intents[0].description, "device_tracker.gary_iphone, leaving, Home");
        assert_eq!(intents[1].direction, TransitionDirection::Enter);
        assert_eq!(intents[1].description, "device_tracker.gary_iphone, entering, Office");
        assert_eq!(intents[1].from_state, "home");
        assert_eq!(intents[1].to_state, "work");
    }

    #[test]
    fn arriving_and_departing() {
        let (devices, mut manager) = start();
        let gary = id("gary_iphone");

        devices.insert(gary.clone(), located("not_home"));
        assert!(manager.write_state(&gary).unwrap().is_empty());

        devices.set_sensor(&gary, keys::DEVICE_TRACKER_STATE_ZONE, "home");
        let intents = manager.write_state(&gary).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].direction, TransitionDirection::Enter);

        devices.set_sensor(&gary, keys::DEVICE_TRACKER_STATE_ZONE, "not_home");
        let intents = manager.write_state(&gary).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].direction, TransitionDirection::Leave);
        assert_eq!(intents[0].zone, "home");
    }

    #[test]
    fn missing_record_between_zones_does_not_hide_the_move() {
        let (devices, mut manager) = start();
        let gary = id("gary_iphone");

        devices.insert(gary.clone(), located("home"));
        assert!(manager.write_state(&gary).unwrap().is_empty());

        devices.remove(&gary);
        assert!(manager.write_state(&gary).unwrap().is_empty());

        devices.insert(gary.clone(), located("work"));
        let intents = manager.write_state(&gary).unwrap();
        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].direction, TransitionDirection::Leave);
        assert_eq!(intents[0].zone, "home");
        assert_eq!(intents[1].direction, TransitionDirection::Enter);
        assert_eq!(intents[1].zone, "work");
        assert_eq!(intents[1].from_state, "––");
    }

    #[test]
    fn devices_without_records_never_transition() {
        let (_, mut manager) = start();
        assert!(manager.write_all_states().is_empty());
        assert!(manager.write_all_states().is_empty());
    }

    #[tokio::test]
    async fn intents_reach_subscribers() {
        let (devices, mut manager) = start();
        let mut rx = manager.subscribe();
        let gary = id("gary_iphone");

        devices.insert(gary.clone(), located("home"));
        manager.write_state(&gary).unwrap();
        devices.set_sensor(&gary, keys::DEVICE_TRACKER_STATE_ZONE, "not_home");
        manager.write_state(&gary).unwrap();

        let mut transitions = Vec::new();
        while transitions.is_empty() {
            let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("timed out waiting for events")
                .unwrap();
            if let TrackerEvent::ZoneTransition(intent) = event {
                transitions.push(intent);
            }
        }

        assert_eq!(transitions[0].identity, gary);
        assert_eq!(transitions[0].direction, TransitionDirection::Leave);
    }
}

// ============================================================================
// Registry
// ============================================================================

mod registry_reconciliation {
    use super::*;

    #[test]
    fn malformed_record_does_not_stop_the_scan() {
        let reconciler = IdentityReconciler::new("iCloud3", [id("gary_iphone"), id("lillian_watch")]);
        let scan = RegistryScan::new(
            vec![],
            vec![
                ExternalIdentityRecord::new("  ").with_identifier(["iCloud3", "gary_iphone"]),
                ExternalIdentityRecord::new(ACTIVE_ID).with_identifier(["iCloud3", "lillian_watch"]),
            ],
        );
        let bindings = reconciler.reconcile(&scan);
        assert_eq!(bindings.len(), 1);
        assert!(bindings.get(&id("lillian_watch")).is_some());
    }

    #[test]
    fn host_ids_are_kept_verbatim() {
        let scan = RegistryScan::new(
            vec![],
            vec![ExternalIdentityRecord::new("9045bf3f-0363-c289-5735-3cf2c47163d0")
                .with_identifier(["iCloud3", "gary_iphone"])],
        );
        let (_, mut manager) = start();
        manager.refresh_bindings(&scan);

        let update = manager.rename(&id("gary_iphone"), "Gary").unwrap().unwrap();
        assert_eq!(update.external_id.as_str(), "9045bf3f-0363-c289-5735-3cf2c47163d0");
    }

    #[test]
    fn registry_loaded_from_json() {
        let scan: RegistryScan = serde_json::from_value(json!({
            "deleted": [{"id": DELETED_ID, "identifiers": [["iCloud3", "lillian_watch"]]}],
            "active": []
        }))
        .unwrap();
        let (_, mut manager) = start();
        manager.refresh_bindings(&scan);
        assert_eq!(
            manager.binding(&id("lillian_watch")),
            Some(ExternalId::parse(DELETED_ID).unwrap())
        );
        assert!(manager.binding(&id("gary_iphone")).is_none());
    }

    #[test]
    fn rename_produces_registry_update() {
        let (_, mut manager) = start();

        let update = manager
            .rename(&id("gary_iphone"), "Gary's iPhone")
            .unwrap()
            .unwrap();
        assert_eq!(update.external_id.to_string(), ACTIVE_ID);
        assert_eq!(update.name, "Gary's iPhone (gary_iphone)");

        // Unbound devices are left alone
        assert!(manager.rename(&id("lillian_watch"), "L").unwrap().is_none());
        assert_eq!(manager.tracker(&id("lillian_watch")).unwrap().name(), "Lillian");
    }
}
