// SPDX-License-Identifier: MPL-2.0
//! Pin registry.
//!
//! Process-wide map from the host's pin identifier to the pinned entity.
//! An entry lives from pin creation until the unpin exit animation has fully
//! completed: removal happens at eviction, not when the unpin command
//! arrives, so a pin id stays resolvable while its toast is animating out.

use super::notification::NotificationId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PinRegistry {
    entries: HashMap<String, NotificationId>,
}

impl PinRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pinned entity, replacing any previous holder of the id.
    pub fn insert(&mut self, pin_id: String, id: NotificationId) {
        self.entries.insert(pin_id, id);
    }

    #[must_use]
    pub fn get(&self, pin_id: &str) -> Option<NotificationId> {
        self.entries.get(pin_id).copied()
    }

    pub fn remove(&mut self, pin_id: &str) -> Option<NotificationId> {
        self.entries.remove(pin_id)
    }

    /// Every registered pin identifier. Used by "unpin all".
    #[must_use]
    pub fn pin_ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pin_id: &str) -> bool {
        self.entries.contains_key(pin_id)
    }
}
