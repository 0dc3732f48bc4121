// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `TrackState` library.
//!
//! The core entry points (value resolution, attribute projection, identity
//! reconciliation, zone transition detection) never return these errors to
//! their callers: they degrade to a defined default and log instead. The
//! errors below surface from the fallible building blocks underneath them,
//! such as snapshot loading, external id parsing and registry scans.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while parsing input data.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A value could not be resolved into a displayable form.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// The external identity registry could not be read.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// No tracker exists for the requested device.
    #[error("no tracker for device {0}")]
    TrackerNotFound(String),
}

/// Errors related to parsing identifiers and persisted data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external registry id is empty.
    #[error("invalid external id {raw:?}: {message}")]
    InvalidExternalId {
        /// The id as it appeared in the registry.
        raw: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// A device identity is empty or contains whitespace.
    #[error("invalid device identity: {0:?}")]
    InvalidIdentity(String),
}

/// Errors raised while classifying a raw sensor value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The raw value has a type that cannot be displayed (list, object, bool).
    #[error("sensor {key} holds a value of unexpected type {kind}")]
    UnexpectedType {
        /// The sensor key being resolved.
        key: String,
        /// JSON type name of the offending value.
        kind: &'static str,
    },
}

/// Errors related to the external identity registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry could not be read.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
