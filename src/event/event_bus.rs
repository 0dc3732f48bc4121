// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast bus for tracker events.

use tokio::sync::broadcast;

use super::TrackerEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fans tracker events out to any number of subscribers.
///
/// Publishing never blocks and never fails. Events published while nobody
/// is subscribed are dropped, and a subscriber that falls more than the
/// channel capacity behind loses the oldest events (`RecvError::Lagged`).
///
/// # Examples
///
/// ```
/// use trackstate_lib::event::{EventBus, TrackerEvent};
/// use trackstate_lib::types::DeviceIdentity;
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let identity = DeviceIdentity::new("gary_iphone").unwrap();
/// bus.publish(TrackerEvent::TrackerAdded { identity });
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TrackerEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per subscriber.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many subscribers received it.
    pub fn publish(&self, event: TrackerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
