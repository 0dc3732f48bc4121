// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events emitted towards the host.
//!
//! Trackers publish [`TrackerEvent`]s on an [`EventBus`]: lifecycle
//! notifications, every published presentation state, and the
//! [`ZoneTransitionIntent`]s a trigger dispatcher turns into automations.
//!
//! # Examples
//!
//! ```
//! use trackstate_lib::event::{EventBus, TrackerEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! // In a task:
//! // while let Ok(event) = rx.recv().await {
//! //     if let Some(intent) = event.as_zone_transition() {
//! //         println!("{}", intent.description);
//! //     }
//! // }
//! ```

mod event_bus;
mod tracker_event;

pub use event_bus::EventBus;
pub use tracker_event::{TrackerEvent, ZoneTransitionIntent};
