// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extra state attributes exposed alongside a device's location.

mod bundle;
mod projector;

pub use bundle::AttributeBundle;
pub use projector::AttributeProjector;
