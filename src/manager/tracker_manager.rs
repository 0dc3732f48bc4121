// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manager owning every tracker of one integration.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::{TrackedDeviceConfig, TrackingMode};
use crate::context::TrackerContext;
use crate::device_source::DeviceSource;
use crate::error::{Error, Result};
use crate::event::{EventBus, TrackerEvent, ZoneTransitionIntent};
use crate::identity::{IdentityBindings, IdentityReconciler, RegistrySource};
use crate::resolve::ValueResolver;
use crate::snapshot::SnapshotStore;
use crate::tracker::{DeviceTracker, RegistryUpdate};
use crate::types::{DeviceIdentity, ExternalId};

/// Owns the trackers of all configured devices and their registry bindings.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trackstate_lib::config::{TrackedDeviceConfig, TrackerSettings};
/// use trackstate_lib::context::TrackerContext;
/// use trackstate_lib::device_source::DeviceDirectory;
/// use trackstate_lib::identity::{ExternalIdentityRecord, RegistryScan};
/// use trackstate_lib::manager::TrackerManager;
/// use trackstate_lib::snapshot::SnapshotStore;
/// use trackstate_lib::types::DeviceIdentity;
///
/// let context = Arc::new(TrackerContext::new(TrackerSettings::default()));
/// let devices = Arc::new(DeviceDirectory::new());
/// let mut manager = TrackerManager::new(context, devices, SnapshotStore::new());
///
/// let gary = DeviceIdentity::new("gary_iphone").unwrap();
/// let registry = RegistryScan::new(vec![], vec![
///     ExternalIdentityRecord::new("306278916dc4a3b7bcc73b66dcd565b3")
///         .with_identifier(["iCloud3", "gary_iphone"]),
/// ]);
///
/// let created = manager.setup([TrackedDeviceConfig::new(gary.clone(), "Gary")], &registry);
/// assert_eq!(created, vec![gary.clone()]);
/// assert!(manager.binding(&gary).is_some());
/// ```
#[derive(Debug)]
pub struct TrackerManager {
    context: Arc<TrackerContext>,
    resolver: ValueResolver,
    events: EventBus,
    trackers: BTreeMap<DeviceIdentity, DeviceTracker>,
    bindings: IdentityBindings,
}

impl TrackerManager {
    /// Creates a manager with no trackers.
    ///
    /// The snapshot becomes read-only from here on.
    #[must_use]
    pub fn new(
        context: Arc<TrackerContext>,
        devices: Arc<dyn DeviceSource>,
        snapshot: SnapshotStore,
    ) -> Self {
        let settings = context.settings();
        let resolver = ValueResolver::new(devices, Arc::new(snapshot))
            .with_stationary_prefix(settings.stationary_prefix.clone());
        let events = EventBus::with_capacity(settings.event_capacity);

        Self {
            context,
            resolver,
            events,
            trackers: BTreeMap::new(),
            bindings: IdentityBindings::new(),
        }
    }

    /// Subscribes to tracker events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    /// Returns the event bus trackers publish on.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<TrackerContext> {
        &self.context
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Creates trackers for configured devices, then refreshes the registry
    /// bindings.
    ///
    /// Every device name is recorded in the context, including inactive
    /// ones. Devices that already have a tracker and inactive devices are
    /// skipped. Returns the identities of the trackers created.
    pub fn setup<I>(&mut self, configs: I, registry: &dyn RegistrySource) -> Vec<DeviceIdentity>
    where
        I: IntoIterator<Item = TrackedDeviceConfig>,
    {
        let mut created = Vec::new();

        for config in configs {
            let identity = config.devicename.clone();
            self.context.register_configured(&identity);

            if self.trackers.contains_key(&identity) || config.tracking_mode == TrackingMode::Inactive {
                continue;
            }

            let tracker = DeviceTracker::new(
                config,
                self.resolver.clone(),
                Arc::clone(&self.context),
                self.events.clone(),
            );
            self.trackers.insert(identity.clone(), tracker);
            self.events.publish(TrackerEvent::TrackerAdded {
                identity: identity.clone(),
            });
            created.push(identity);
        }

        if self.context.set_trackers_expected(created.len()) {
            tracing::info!(count = created.len(), "Device tracker entities created");
        }

        self.refresh_bindings(registry);
        created
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Rebuilds the registry bindings from `registry`.
    ///
    /// A registry that cannot be read leaves no bindings.
    pub fn refresh_bindings(&mut self, registry: &dyn RegistrySource) -> &IdentityBindings {
        self.bindings = match registry.scan() {
            Ok(scan) => {
                let reconciler =
                    IdentityReconciler::new(&self.context.settings().namespace, self.context.configured());
                reconciler.reconcile(&scan)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Device registry scan failed");
                IdentityBindings::new()
            }
        };

        tracing::debug!(bound = self.bindings.len(), "Registry bindings refreshed");
        &self.bindings
    }

    /// Returns all registry bindings.
    #[must_use]
    pub fn bindings(&self) -> &IdentityBindings {
        &self.bindings
    }

    /// Returns the registry id bound to `identity`.
    #[must_use]
    pub fn binding(&self, identity: &DeviceIdentity) -> Option<ExternalId> {
        self.bindings.get(identity)
    }

    // =========================================================================
    // Trackers
    // =========================================================================

    /// Returns the tracker of `identity`.
    #[must_use]
    pub fn tracker(&self, identity: &DeviceIdentity) -> Option<&DeviceTracker> {
        self.trackers.get(identity)
    }

    /// Iterates over all trackers, ordered by identity.
    pub fn trackers(&self) -> impl Iterator<Item = &DeviceTracker> {
        self.trackers.values()
    }

    /// Returns the number of trackers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Returns `true` if there are no trackers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Runs one write cycle for the tracker of `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrackerNotFound`] if there is no such tracker.
    pub fn write_state(&mut self, identity: &DeviceIdentity) -> Result<Vec<ZoneTransitionIntent>> {
        self.trackers
            .get_mut(identity)
            .map(DeviceTracker::write_state)
            .ok_or_else(|| Error::TrackerNotFound(identity.to_string()))
    }

    /// Runs one write cycle for every tracker and returns all transitions.
    pub fn write_all_states(&mut self) -> Vec<ZoneTransitionIntent> {
        self.trackers
            .values_mut()
            .flat_map(DeviceTracker::write_state)
            .collect()
    }

    /// Renames a device.
    ///
    /// Returns the registry change to apply, or `None` if the device has no
    /// registry binding (in which case nothing changes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrackerNotFound`] if there is no such tracker.
    pub fn rename(
        &mut self,
        identity: &DeviceIdentity,
        new_fname: impl Into<String>,
    ) -> Result<Option<RegistryUpdate>> {
        let binding = self.bindings.get(identity);
        let tracker = self
            .trackers
            .get_mut(identity)
            .ok_or_else(|| Error::TrackerNotFound(identity.to_string()))?;
        Ok(tracker.rename(new_fname, binding))
    }

    /// Removes the tracker of `identity` together with its binding.
    ///
    /// Returns `true` if a tracker was removed.
    pub fn remove(&mut self, identity: &DeviceIdentity) -> bool {
        let Some(tracker) = self.trackers.remove(identity) else {
            return false;
        };

        self.bindings.unbind(identity);
        tracing::info!(entity = %tracker.entity_id(), "Device tracker removed");
        self.events.publish(TrackerEvent::TrackerRemoved {
            identity: identity.clone(),
        });
        true
    }
}
