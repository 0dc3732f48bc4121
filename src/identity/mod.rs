// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation of device identities with the host's device registry.
//!
//! The host registry assigns its own ids to devices and keeps soft-deleted
//! records around after a device is removed. [`IdentityReconciler`] walks a
//! [`RegistryScan`] and works out which registry id currently belongs to
//! each known device.

mod reconciler;
mod registry;

pub use reconciler::{IdentityBindings, IdentityReconciler};
pub use registry::{ExternalIdentityRecord, RegistryScan, RegistrySource};
