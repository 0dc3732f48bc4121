// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tracker event types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tracker::PresentedState;
use crate::types::DeviceIdentity;
use crate::zone::TransitionDirection;

/// A zone enter or leave, ready for a trigger dispatcher.
///
/// The library only emits intents; delivering them to automations is the
/// host's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneTransitionIntent {
    /// The device that moved.
    pub identity: DeviceIdentity,
    /// Entity id of the device's tracker.
    pub entity_id: String,
    /// Enter or leave.
    pub direction: TransitionDirection,
    /// The zone entered or left.
    pub zone: String,
    /// Zone value on the previous cycle.
    pub from_state: String,
    /// Zone value on this cycle.
    pub to_state: String,
    /// Human-readable summary, e.g. `device_tracker.gary_iphone, leaving, Home`.
    pub description: String,
    /// When the transition was detected.
    pub observed_at: DateTime<Utc>,
}

/// Events emitted by trackers.
///
/// # Examples
///
/// ```
/// use trackstate_lib::event::TrackerEvent;
/// use trackstate_lib::types::DeviceIdentity;
///
/// let identity = DeviceIdentity::new("gary_iphone").unwrap();
/// let added = TrackerEvent::TrackerAdded { identity: identity.clone() };
///
/// assert_eq!(added.identity(), &identity);
/// assert!(added.is_lifecycle());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// A tracker was created.
    TrackerAdded {
        /// The tracked device.
        identity: DeviceIdentity,
    },

    /// A tracker was removed.
    TrackerRemoved {
        /// The tracked device.
        identity: DeviceIdentity,
    },

    /// A tracker published a new presentation state.
    StatePublished {
        /// The tracked device.
        identity: DeviceIdentity,
        /// The published state.
        state: Box<PresentedState>,
    },

    /// A tracker detected a zone transition.
    ZoneTransition(ZoneTransitionIntent),
}

impl TrackerEvent {
    /// Returns the device the event is about.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        match self {
            Self::TrackerAdded { identity }
            | Self::TrackerRemoved { identity }
            | Self::StatePublished { identity, .. } => identity,
            Self::ZoneTransition(intent) => &intent.identity,
        }
    }

    /// Returns `true` for tracker added/removed events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::TrackerAdded { .. } | Self::TrackerRemoved { .. })
    }

    /// Returns the transition intent, if this is one.
    #[must_use]
    pub fn as_zone_transition(&self) -> Option<&ZoneTransitionIntent> {
        match self {
            Self::ZoneTransition(intent) => Some(intent),
            _ => None,
        }
    }
}
