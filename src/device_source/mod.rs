// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live device records and the accessor used to read them.
//!
//! The device-management subsystem owns [`DeviceRecord`]s; this library only
//! reads them through the [`DeviceSource`] trait. [`DeviceDirectory`] is a
//! ready-made, thread-safe implementation.

mod directory;
mod record;

pub use directory::{DeviceDirectory, DeviceSource};
pub use record::{DEFAULT_HOME_ZONE, DeviceRecord};
