// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered attribute bundle.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::SensorValue;

/// Attribute key → value pairs in insertion order.
///
/// Serializes as a JSON object with keys in the order they were inserted.
///
/// # Examples
///
/// ```
/// use trackstate_lib::attributes::AttributeBundle;
/// use trackstate_lib::types::SensorValue;
///
/// let mut bundle = AttributeBundle::new();
/// bundle.insert("zone", SensorValue::from("home"));
/// bundle.insert("battery", SensorValue::Number(80.0));
/// bundle.insert("zone", SensorValue::from("work"));
///
/// assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["zone", "battery"]);
/// assert_eq!(bundle.get("zone"), Some(&SensorValue::from("work")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBundle {
    entries: Vec<(String, SensorValue)>,
}

impl AttributeBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value. An existing key keeps its position and gets the new
    /// value.
    pub fn insert(&mut self, key: impl Into<String>, value: SensorValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SensorValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SensorValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bundle is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AttributeBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
