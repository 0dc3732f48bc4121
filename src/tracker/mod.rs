// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing device trackers.
//!
//! A [`DeviceTracker`] is what the host platform renders: a location name,
//! coordinates, battery, an attribute bundle, and registry details. Its
//! [`write_state`](DeviceTracker::write_state) cycle also drives zone
//! transition detection.

mod device_tracker;
mod presentation;

pub use device_tracker::DeviceTracker;
pub use presentation::{DeviceInfo, PresentedState, RegistryUpdate, device_type_icon};
