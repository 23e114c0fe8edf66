// SPDX-License-Identifier: MPL-2.0
//! Per-position notification container.
//!
//! A container is created lazily, at most one per position, and persists
//! even when empty. It tracks members newest-first (the newest sits at the
//! anchor edge), the count of queue-consuming members, a latched admission
//! flag, and the lock that prevents overlapping batch-shift animations.
//!
//! Admission latch: the flag closes when an admission brings the count up to
//! the quota and reopens only when the count drains back to zero, not as
//! soon as a slot frees up. That asymmetry is inherited behavior the host
//! scripts rely on.

use super::notification::NotificationId;
use crate::surface::Position;
use std::collections::VecDeque;

#[derive(Debug)]
pub struct Container {
    position: Position,
    /// Member ids, newest first.
    members: VecDeque<NotificationId>,
    spacing_px: u32,
    base_offset_px: i32,
    /// Count of non-pinned members. Pinned members never consume capacity.
    queue_count: u32,
    can_admit: bool,
    animation_in_flight: bool,
}

impl Container {
    #[must_use]
    pub fn new(position: Position, spacing_px: u32, base_offset_px: i32) -> Self {
        Self {
            position,
            members: VecDeque::new(),
            spacing_px,
            base_offset_px,
            queue_count: 0,
            can_admit: true,
            animation_in_flight: false,
        }
    }

    /// Appends a member at the anchor end.
    ///
    /// Counts it against the quota unless pinned; closes admission when the
    /// count reaches the quota.
    pub fn admit(&mut self, id: NotificationId, counted: bool, max_queue: u32) {
        self.members.push_front(id);

        if counted {
            self.queue_count += 1;
        }

        if self.queue_count >= max_queue {
            self.can_admit = false;
        }
    }

    /// Removes a member.
    ///
    /// Decrements the count only for members that were counted on admission;
    /// reopens admission once the count drains to zero.
    pub fn evict(&mut self, id: NotificationId, counted: bool) {
        if let Some(index) = self.member_index(id) {
            self.members.remove(index);
        }

        if counted {
            self.queue_count = self.queue_count.saturating_sub(1);
        }

        if self.queue_count == 0 {
            self.can_admit = true;
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn members(&self) -> &VecDeque<NotificationId> {
        &self.members
    }

    /// Index of a member in newest-first order.
    #[must_use]
    pub fn member_index(&self, id: NotificationId) -> Option<usize> {
        self.members.iter().position(|member| *member == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.member_index(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn queue_count(&self) -> u32 {
        self.queue_count
    }

    #[must_use]
    pub fn can_admit(&self) -> bool {
        self.can_admit
    }

    #[must_use]
    pub fn animation_in_flight(&self) -> bool {
        self.animation_in_flight
    }

    pub fn set_animation_in_flight(&mut self, in_flight: bool) {
        self.animation_in_flight = in_flight;
    }

    #[must_use]
    pub fn spacing_px(&self) -> u32 {
        self.spacing_px
    }

    #[must_use]
    pub fn base_offset_px(&self) -> i32 {
        self.base_offset_px
    }
}
