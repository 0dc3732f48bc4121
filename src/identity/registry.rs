// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External identity registry records.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One entry of the host's device registry.
///
/// `id` is kept as the raw string found in the registry; it is parsed when
/// the record is reconciled so that one malformed entry cannot break the
/// loading of the others.
///
/// # Examples
///
/// ```
/// use trackstate_lib::identity::ExternalIdentityRecord;
///
/// let record = ExternalIdentityRecord::new("306278916dc4a3b7bcc73b66dcd565b3")
///     .with_identifier(["iCloud3", "gary_iphone", "iPhone 14 Pro"]);
/// assert!(record.belongs_to("iCloud3"));
/// assert!(!record.belongs_to("mqtt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentityRecord {
    /// Registry id of the record.
    pub id: String,
    /// Free-form identifier tuples attached to the record.
    #[serde(default)]
    pub identifiers: Vec<Vec<String>>,
}

impl ExternalIdentityRecord {
    /// Creates a record with no identifiers.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            identifiers: Vec::new(),
        }
    }

    /// Adds an identifier tuple.
    #[must_use]
    pub fn with_identifier<I, S>(mut self, tuple: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers
            .push(tuple.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the identifier tuples that carry the `namespace` tag.
    pub fn tuples_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a [String]> + 'a {
        self.identifiers
            .iter()
            .filter(move |tuple| tuple.iter().any(|item| item == namespace))
            .map(Vec::as_slice)
    }

    /// Returns `true` if any identifier tuple carries the `namespace` tag.
    #[must_use]
    pub fn belongs_to(&self, namespace: &str) -> bool {
        self.tuples_in(namespace).next().is_some()
    }
}

/// The registry contents handed over for one reconciliation pass.
///
/// Soft-deleted records are listed separately from active ones because the
/// two are scanned in a fixed order: deleted first, then active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryScan {
    /// Soft-deleted records.
    #[serde(default)]
    pub deleted: Vec<ExternalIdentityRecord>,
    /// Active records.
    #[serde(default)]
    pub active: Vec<ExternalIdentityRecord>,
}

impl RegistryScan {
    /// Creates a scan from its two collections.
    #[must_use]
    pub fn new(deleted: Vec<ExternalIdentityRecord>, active: Vec<ExternalIdentityRecord>) -> Self {
        Self { deleted, active }
    }

    /// Returns every record in scan order: deleted first, then active.
    pub fn in_scan_order(&self) -> impl Iterator<Item = &ExternalIdentityRecord> {
        self.deleted.iter().chain(self.active.iter())
    }

    /// Returns the total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deleted.len() + self.active.len()
    }

    /// Returns `true` if the scan holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.active.is_empty()
    }
}

/// Supplier of registry contents.
pub trait RegistrySource {
    /// Reads the current registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry cannot be read.
    fn scan(&self) -> Result<RegistryScan, RegistryError>;
}

impl RegistrySource for RegistryScan {
    fn scan(&self) -> Result<RegistryScan, RegistryError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_are_filtered_by_namespace() {
        let record = ExternalIdentityRecord::new("x")
            .with_identifier(["mqtt", "plug"])
            .with_identifier(["iCloud3", "gary_iphone"]);

        let tuples: Vec<_> = record.tuples_in("iCloud3").collect();
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0][1], "gary_iphone");
    }

    #[test]
    fn scan_order_puts_deleted_first() {
        let scan = RegistryScan::new(
            vec![ExternalIdentityRecord::new("deleted")],
            vec![ExternalIdentityRecord::new("active")],
        );
        let ids: Vec<_> = scan.in_scan_order().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["deleted", "active"]);
        assert_eq!(scan.len(), 2);
    }

    #[test]
    fn scan_deserializes_from_json() {
        let scan: RegistryScan = serde_json::from_str(
            r#"{"active": [{"id": "abc", "identifiers": [["iCloud3", "gary_iphone"]]}]}"#,
        )
        .unwrap();
        assert!(scan.deleted.is_empty());
        assert!(scan.active[0].belongs_to("iCloud3"));
    }
}
