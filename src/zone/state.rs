// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone states.

use serde::{Deserialize, Serialize};

use crate::types::{BLANK_SENSOR_FIELD, NOT_SET, NOT_SET_FNAME};

/// Where a device is, as far as zone triggers are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZoneState {
    /// No zone observed yet. Also the classification of an unset value.
    #[default]
    Unknown,
    /// Inside a named zone.
    InZone(String),
    /// Outside every zone.
    NotTracked,
}

impl ZoneState {
    /// Classifies a resolved zone value.
    ///
    /// `not_tracked` is the zone name meaning "outside every zone"
    /// (usually `not_home`). Empty, blank and not-set values are
    /// [`ZoneState::Unknown`].
    #[must_use]
    pub fn from_value(value: &str, not_tracked: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.starts_with(BLANK_SENSOR_FIELD)
            || trimmed == NOT_SET
            || trimmed == NOT_SET_FNAME
        {
            Self::Unknown
        } else if trimmed == not_tracked {
            Self::NotTracked
        } else {
            Self::InZone(trimmed.to_string())
        }
    }

    /// Returns the zone name if inside a zone.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::InZone(zone) => Some(zone),
            Self::Unknown | Self::NotTracked => None,
        }
    }

    /// Returns `true` if no zone has been observed.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// The `(from, to)` pair kept for one device.
///
/// Both sides start as the empty string. On each cycle the previous `to`
/// moves to `from` and the fresh value becomes `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransitionState {
    /// Zone value seen on the previous cycle.
    pub from_zone: String,
    /// Zone value seen on the latest cycle.
    pub to_zone: String,
}

impl ZoneTransitionState {
    /// Shifts `to` into `from` and records `zone` as the new `to`.
    pub fn advance(&mut self, zone: impl Into<String>) {
        self.from_zone = std::mem::replace(&mut self.to_zone, zone.into());
    }
}
