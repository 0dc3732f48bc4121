// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordination of all trackers of one integration.
//!
//! [`TrackerManager`] creates trackers from the device configuration, keeps
//! their registry bindings current, and runs their write cycles.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use trackstate_lib::config::{TrackedDeviceConfig, TrackerSettings};
//! use trackstate_lib::context::TrackerContext;
//! use trackstate_lib::device_source::{DeviceDirectory, DeviceRecord};
//! use trackstate_lib::identity::RegistryScan;
//! use trackstate_lib::manager::TrackerManager;
//! use trackstate_lib::snapshot::SnapshotStore;
//! use trackstate_lib::types::DeviceIdentity;
//!
//! let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
//! let devices = Arc::new(DeviceDirectory::new());
//! let mut manager = TrackerManager::new(context, devices.clone(), SnapshotStore::new());
//!
//! let id = DeviceIdentity::new("gary_iphone").unwrap();
//! manager.setup([TrackedDeviceConfig::new(id.clone(), "Gary")], &RegistryScan::default());
//!
//! devices.insert(id.clone(), DeviceRecord::new().with_sensor("dev_trk_state_zone", "not_home"));
//! manager.write_state(&id).unwrap();
//!
//! devices.set_sensor(&id, "dev_trk_state_zone", "home");
//! let intents = manager.write_state(&id).unwrap();
//! assert_eq!(intents[0].description, "device_tracker.gary_iphone, entering, Home");
//! ```

mod tracker_manager;

pub use tracker_manager::TrackerManager;
