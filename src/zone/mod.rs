// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone enter/leave detection.
//!
//! Each time a device's state is published, the freshly resolved zone is
//! fed to its [`ZoneTransitionDetector`]. The detector compares it with the
//! zone seen on the previous cycle and reports what happened:
//!
//! | From | To | Transitions |
//! |------|----|-------------|
//! | `InZone(a)` | `InZone(a)` | none |
//! | `InZone(a)` | `InZone(b)` | leave `a`, then enter `b` |
//! | `InZone(a)` | `NotTracked` | leave `a` |
//! | `NotTracked` | `InZone(b)` | enter `b` |
//! | `Unknown` | anything | none |
//! | anything | `Unknown` | none, the last known zone is kept |
//!
//! `Unknown` is only ever the state before the first real zone. An unset
//! value seen later does not replace the last known zone.
//!
//! # Examples
//!
//! ```
//! use trackstate_lib::zone::{TransitionDirection, ZoneTransitionDetector};
//!
//! let mut detector = ZoneTransitionDetector::new("not_home");
//! assert!(detector.observe("home").is_empty());
//!
//! let transitions = detector.observe("work");
//! assert_eq!(transitions.len(), 2);
//! assert_eq!(transitions[0].direction, TransitionDirection::Leave);
//! assert_eq!(transitions[0].zone, "home");
//! assert_eq!(transitions[1].direction, TransitionDirection::Enter);
//! assert_eq!(transitions[1].zone, "work");
//! ```

mod detector;
mod state;

pub use detector::{TransitionDirection, ZoneTransition, ZoneTransitionDetector};
pub use state::{ZoneState, ZoneTransitionState};
