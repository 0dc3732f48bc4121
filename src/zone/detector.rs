// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device zone transition detector.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ZoneState, ZoneTransitionState};

/// Whether a device entered or left a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDirection {
    /// The device entered the zone.
    Enter,
    /// The device left the zone.
    Leave,
}

impl TransitionDirection {
    /// Returns the event name (`enter` / `leave`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
        }
    }

    /// Returns the verb used in descriptions (`entering` / `leaving`).
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Enter => "entering",
            Self::Leave => "leaving",
        }
    }
}

impl fmt::Display for TransitionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single enter or leave of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransition {
    /// Enter or leave.
    pub direction: TransitionDirection,
    /// The zone entered or left.
    pub zone: String,
}

impl ZoneTransition {
    fn enter(zone: &str) -> Self {
        Self {
            direction: TransitionDirection::Enter,
            zone: zone.to_string(),
        }
    }

    fn leave(zone: &str) -> Self {
        Self {
            direction: TransitionDirection::Leave,
            zone: zone.to_string(),
        }
    }
}

/// Tracks the last observed zone of one device.
#[derive(Debug, Clone)]
pub struct ZoneTransitionDetector {
    not_tracked: String,
    values: ZoneTransitionState,
    current: ZoneState,
}

impl ZoneTransitionDetector {
    /// Creates a detector in the [`ZoneState::Unknown`] state.
    ///
    /// `not_tracked` is the zone value meaning "outside every zone".
    #[must_use]
    pub fn new(not_tracked: impl Into<String>) -> Self {
        Self {
            not_tracked: not_tracked.into(),
            values: ZoneTransitionState::default(),
            current: ZoneState::Unknown,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &ZoneState {
        &self.current
    }

    /// Returns the raw `(from, to)` values of the last cycle.
    #[must_use]
    pub fn values(&self) -> &ZoneTransitionState {
        &self.values
    }

    /// Records a freshly published zone value and returns the transitions it
    /// causes, leave before enter.
    ///
    /// An unset value still shifts the raw `(from, to)` pair but leaves the
    /// last known zone in place, so the next real zone is compared with it.
    pub fn observe(&mut self, zone: &str) -> Vec<ZoneTransition> {
        self.values.advance(zone);

        let next = ZoneState::from_value(zone, &self.not_tracked);
        if next.is_unknown() {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.current, next);
        classify(&previous, &self.current)
    }
}

fn classify(from: &ZoneState, to: &ZoneState) -> Vec<ZoneTransition> {
    use ZoneState::{InZone, NotTracked, Unknown};

    match (from, to) {
        (Unknown, _) | (_, Unknown) | (NotTracked, NotTracked) => Vec::new(),
        (InZone(a), InZone(b)) if a == b => Vec::new(),
        (InZone(a), InZone(b)) => vec![ZoneTransition::leave(a), ZoneTransition::enter(b)],
        (InZone(a), NotTracked) => vec![ZoneTransition::leave(a)],
        (NotTracked, InZone(b)) => vec![ZoneTransition::enter(b)],
    }
}
