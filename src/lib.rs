// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `TrackState` Lib - location state for tracked devices.
//!
//! This library turns the live data of tracked devices into the state a home
//! automation host renders, and keeps that state stable across restarts.
//!
//! # Features
//!
//! - **Value resolution**: Live sensor values are classified into numbers,
//!   text, the blank sentinel or the stationary label, falling back to a
//!   persisted snapshot while a device's live record does not exist yet
//! - **Attribute bundles**: Ordered extra attributes per device, with
//!   tracking-only and custom-zone attributes added when they apply
//! - **Identity reconciliation**: Host registry ids are matched to devices,
//!   with active registry records taking precedence over deleted ones
//! - **Zone transitions**: Enter/leave intents are emitted when a device's
//!   zone changes between write cycles
//!
//! Nothing here performs I/O. The host supplies device records, the
//! snapshot and the registry contents, and consumes the published states
//! and transition intents.
//!
//! # Quick Start
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
//! # fn main() -> trackstate_lib::Result<()> {
//! let snapshot = SnapshotStore::from_json(r#"{"gary_iphone": {"sensors": {"zone": "home"}}}"#)?;
//! let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
//! let devices = Arc::new(DeviceDirectory::new());
//! let mut manager = TrackerManager::new(context, devices.clone(), snapshot);
//!
//! let gary = DeviceIdentity::new("gary_iphone")?;
//! manager.setup([TrackedDeviceConfig::new(gary.clone(), "Gary")], &RegistryScan::default());
//!
//! // Before the device record exists, the snapshot zone is shown
//! let tracker = manager.tracker(&gary).unwrap();
//! assert_eq!(tracker.location_name().to_string(), "home");
//!
//! // Once it exists, live values win
//! devices.insert(gary.clone(), DeviceRecord::new().with_sensor("dev_trk_state_value", "Work"));
//! assert_eq!(manager.tracker(&gary).unwrap().location_name().to_string(), "Work");
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod config;
pub mod context;
pub mod device_source;
pub mod error;
pub mod event;
pub mod identity;
pub mod manager;
pub mod resolve;
pub mod snapshot;
pub mod tracker;
pub mod types;
pub mod zone;

pub use attributes::{AttributeBundle, AttributeProjector};
pub use config::{TrackedDeviceConfig, TrackerSettings, TrackingMode};
pub use context::{RuntimeInfo, TrackerContext};
pub use device_source::{DeviceDirectory, DeviceRecord, DeviceSource};
pub use error::{Error, ParseError, RegistryError, ResolveError, Result};
pub use event::{EventBus, TrackerEvent, ZoneTransitionIntent};
pub use identity::{
    ExternalIdentityRecord, IdentityBindings, IdentityReconciler, RegistryScan, RegistrySource,
};
pub use manager::TrackerManager;
pub use resolve::ValueResolver;
pub use snapshot::SnapshotStore;
pub use tracker::{DeviceInfo, DeviceTracker, PresentedState, RegistryUpdate};
pub use types::{DeviceIdentity, ExternalId, SensorValue};
pub use zone::{TransitionDirection, ZoneState, ZoneTransition, ZoneTransitionDetector};
