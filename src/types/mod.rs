// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! # Types
//!
//! - [`DeviceIdentity`] - Stable internal key of a tracked device
//! - [`ExternalId`] - Id assigned to a device by the host registry
//! - [`SensorValue`] - A resolved number or text value
//!
//! The [`keys`] module lists every sensor and attribute key the library reads
//! or writes.

mod identity;
pub mod keys;
mod value;

pub use identity::{DeviceIdentity, ExternalId};
pub use value::{BLANK_SENSOR_FIELD, NOT_SET, NOT_SET_FNAME, STATIONARY_FNAME, SensorValue};
