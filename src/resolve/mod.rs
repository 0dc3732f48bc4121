// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolution of raw device data into displayable values.
//!
//! [`ValueResolver`] picks the data source (live record or snapshot) and
//! [`classify`] turns a raw live value into a [`SensorValue`](crate::types::SensorValue)
//! by walking the ordered [`RULES`].

mod classify;
mod resolver;

pub use classify::{Classification, RULES, Rule, RuleInput, classify, leading_token, parse_number};
pub use resolver::{ValueResolver, coordinate_text, is_not_set};
