// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Matching of registry records to known device identities.

use std::collections::{BTreeSet, HashMap};

use crate::types::{DeviceIdentity, ExternalId};

use super::{ExternalIdentityRecord, RegistryScan};

/// Mapping from device identity to the registry id currently bound to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityBindings(HashMap<DeviceIdentity, ExternalId>);

impl IdentityBindings {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry id bound to `identity`.
    #[must_use]
    pub fn get(&self, identity: &DeviceIdentity) -> Option<ExternalId> {
        self.0.get(identity).cloned()
    }

    /// Binds `identity` to `id`, returning the id it replaces.
    pub fn bind(&mut self, identity: DeviceIdentity, id: ExternalId) -> Option<ExternalId> {
        self.0.insert(identity, id)
    }

    /// Removes the binding of `identity`.
    pub fn unbind(&mut self, identity: &DeviceIdentity) -> Option<ExternalId> {
        self.0.remove(identity)
    }

    /// Returns the number of bound identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&DeviceIdentity, &ExternalId)> {
        self.0.iter()
    }
}

/// Rebuilds [`IdentityBindings`] from the host registry.
///
/// Records are scanned deleted-first, then active, and a later match for an
/// identity replaces an earlier one, so a device that was removed and added
/// again ends up bound to its active record.
///
/// Within one record, the first identifier tuple member naming a known
/// device wins and the rest of the record is ignored. Records with no
/// namespace tag, no known device, or a blank id contribute nothing.
///
/// # Examples
///
/// ```
/// use trackstate_lib::identity::{ExternalIdentityRecord, IdentityReconciler, RegistryScan};
/// use trackstate_lib::types::DeviceIdentity;
///
/// let gary = DeviceIdentity::new("gary_iphone").unwrap();
/// let reconciler = IdentityReconciler::new("iCloud3", [gary.clone()]);
///
/// let scan = RegistryScan::new(
///     vec![ExternalIdentityRecord::new("9045bf3f0363c28957353cf2c47163d0")
///         .with_identifier(["iCloud3", "gary_iphone"])],
///     vec![ExternalIdentityRecord::new("306278916dc4a3b7bcc73b66dcd565b3")
///         .with_identifier(["iCloud3", "gary_iphone"])],
/// );
///
/// let bindings = reconciler.reconcile(&scan);
/// assert_eq!(
///     bindings.get(&gary).unwrap().to_string(),
///     "306278916dc4a3b7bcc73b66dcd565b3"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct IdentityReconciler {
    namespace: String,
    known: BTreeSet<DeviceIdentity>,
}

impl IdentityReconciler {
    /// Creates a reconciler for the given namespace tag and known devices.
    #[must_use]
    pub fn new<I>(namespace: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = DeviceIdentity>,
    {
        Self {
            namespace: namespace.into(),
            known: known.into_iter().collect(),
        }
    }

    /// Returns the namespace tag that marks records as ours.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Scans the registry and returns the resulting bindings.
    #[must_use]
    pub fn reconcile(&self, scan: &RegistryScan) -> IdentityBindings {
        let mut bindings = IdentityBindings::new();

        for record in scan.in_scan_order() {
            let Some(identity) = self.match_record(record) else {
                continue;
            };

            let id = match ExternalId::parse(&record.id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(device = %identity, error = %e, "Skipping registry record with blank id");
                    continue;
                }
            };

            if let Some(previous) = bindings.bind(identity.clone(), id.clone()) {
                tracing::debug!(device = %identity, %previous, current = %id, "Registry binding replaced");
            } else {
                tracing::debug!(device = %identity, external_id = %id, "Registry binding found");
            }
        }

        bindings
    }

    /// Returns the known identity named by `record`, if any.
    fn match_record(&self, record: &ExternalIdentityRecord) -> Option<DeviceIdentity> {
        record
            .tuples_in(&self.namespace)
            .flat_map(|tuple| tuple.iter())
            .find_map(|item| self.known.iter().find(|known| known.as_str() == item))
            .cloned()
    }
}
