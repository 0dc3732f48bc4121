// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide bookkeeping shared by trackers.
//!
//! Everything that would otherwise be global (the configured device names,
//! version strings, install directory, zone display names, tracker counts)
//! lives in a [`TrackerContext`] that is created once and handed to every
//! component that needs it. Tests create as many isolated contexts as they
//! like.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::config::TrackerSettings;
use crate::types::DeviceIdentity;

/// Version and location details reported in every attribute bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// Integration version.
    pub version: String,
    /// Event log component version.
    pub event_log_version: String,
    /// Directory the integration is installed in.
    pub install_directory: String,
}

/// Shared state of one running integration.
///
/// # Examples
///
/// ```
/// use trackstate_lib::config::TrackerSettings;
/// use trackstate_lib::context::TrackerContext;
///
/// let context = TrackerContext::new(TrackerSettings::default());
/// context.set_zone_display_name("work", "Office");
///
/// assert_eq!(context.zone_display_name("work"), "Office");
/// assert_eq!(context.zone_display_name("gym_downtown"), "Gym Downtown");
/// ```
#[derive(Debug)]
pub struct TrackerContext {
    settings: TrackerSettings,
    runtime: RwLock<RuntimeInfo>,
    configured: RwLock<Vec<DeviceIdentity>>,
    zone_names: RwLock<HashMap<String, String>>,
    trackers_created: AtomicUsize,
    trackers_expected: AtomicUsize,
}

impl TrackerContext {
    /// Creates a context with empty runtime details.
    #[must_use]
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            runtime: RwLock::new(RuntimeInfo::default()),
            configured: RwLock::new(Vec::new()),
            zone_names: RwLock::new(HashMap::new()),
            trackers_created: AtomicUsize::new(0),
            trackers_expected: AtomicUsize::new(0),
        }
    }

    /// Sets the runtime details.
    #[must_use]
    pub fn with_runtime(self, runtime: RuntimeInfo) -> Self {
        *self.runtime.write() = runtime;
        self
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Returns a copy of the runtime details.
    #[must_use]
    pub fn runtime(&self) -> RuntimeInfo {
        self.runtime.read().clone()
    }

    /// Records a configured device name. Duplicates are ignored.
    pub fn register_configured(&self, identity: &DeviceIdentity) {
        let mut configured = self.configured.write();
        if !configured.contains(identity) {
            configured.push(identity.clone());
        }
    }

    /// Returns every configured device name, in configuration order.
    #[must_use]
    pub fn configured(&self) -> Vec<DeviceIdentity> {
        self.configured.read().clone()
    }

    /// Sets the display name of a zone.
    pub fn set_zone_display_name(&self, zone: impl Into<String>, display: impl Into<String>) {
        self.zone_names.write().insert(zone.into(), display.into());
    }

    /// Returns the display name of a zone.
    ///
    /// Zones without a registered name are shown title-cased with
    /// underscores as spaces.
    #[must_use]
    pub fn zone_display_name(&self, zone: &str) -> String {
        self.zone_names
            .read()
            .get(zone)
            .cloned()
            .unwrap_or_else(|| title_case(zone))
    }

    /// Counts one created tracker and returns the new total.
    pub fn note_tracker_created(&self) -> usize {
        self.trackers_created.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns how many trackers were created over the context's lifetime.
    #[must_use]
    pub fn trackers_created(&self) -> usize {
        self.trackers_created.load(Ordering::Relaxed)
    }

    /// Records the number of trackers created by the first setup.
    ///
    /// Only the first non-zero count sticks. Returns `true` if it was stored.
    pub fn set_trackers_expected(&self, count: usize) -> bool {
        count > 0
            && self
                .trackers_expected
                .compare_exchange(0, count, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
    }

    /// Returns the number of trackers created by the first setup.
    #[must_use]
    pub fn trackers_expected(&self) -> usize {
        self.trackers_expected.load(Ordering::Relaxed)
    }
}

fn title_case(zone: &str) -> String {
    zone.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
