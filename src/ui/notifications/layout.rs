// SPDX-License-Identifier: MPL-2.0
//! Layout/animation coordination.
//!
//! Three geometry-affecting operations, all parameterized by the anchor edge:
//!
//! - **Shift-out-of-the-way**: on insertion, every existing member moves away
//!   from the anchor by the new entity's rendered height plus spacing.
//! - **Collapse-the-gap**: on removal, every member after the departing one
//!   (newest-first order) moves back toward the anchor by the same amount.
//! - **Full re-layout**: after an in-place content update, absolute offsets
//!   are recomputed from a zero origin because the update may have changed a
//!   member's rendered height.
//!
//! Stored offsets are always the distance from the anchor edge; the sign of
//! the transient transform handed to the surface flips for bottom-anchored
//! containers, where "away from the anchor" means up.

use super::container::Container;
use super::notification::{Notification, NotificationId};
use crate::surface::Surface;
use std::collections::HashMap;

pub(crate) type EntityMap = HashMap<NotificationId, Notification>;

/// Moves every member except `new_id` away from the insertion point.
///
/// Returns `true` if any sibling moved (the caller then holds the
/// animation-in-flight lock for the transition).
pub(crate) fn shift_for_insert<S: Surface>(
    entities: &mut EntityMap,
    container: &Container,
    surface: &mut S,
    new_id: NotificationId,
) -> bool {
    let Some(new_entity) = entities.get(&new_id) else {
        return false;
    };
    let delta = (new_entity.rendered_height() + container.spacing_px()) as i32;
    let translate = if container.position().is_bottom() {
        -delta
    } else {
        delta
    };

    let mut moved = false;
    for &member in container.members() {
        if member == new_id {
            continue;
        }
        if let Some(sibling) = entities.get_mut(&member) {
            sibling.shift_by(delta);
            surface.begin_shift(member, translate);
            moved = true;
        }
    }

    if moved {
        tracing::debug!(
            position = %container.position(),
            delta_px = delta,
            "shifted siblings for insertion"
        );
    }
    moved
}

/// Moves every member after `departing_id` (newest-first order) back toward
/// the vacated slot.
///
/// Returns `true` if any sibling moved.
pub(crate) fn collapse_after_removal<S: Surface>(
    entities: &mut EntityMap,
    container: &Container,
    surface: &mut S,
    departing_id: NotificationId,
) -> bool {
    let Some(index) = container.member_index(departing_id) else {
        return false;
    };
    let Some(departing) = entities.get(&departing_id) else {
        return false;
    };
    let delta = (departing.rendered_height() + container.spacing_px()) as i32;
    let translate = if container.position().is_bottom() {
        delta
    } else {
        -delta
    };

    let mut moved = false;
    for &member in container.members().iter().skip(index + 1) {
        if let Some(sibling) = entities.get_mut(&member) {
            sibling.shift_by(-delta);
            surface.begin_shift(member, translate);
            moved = true;
        }
    }
    moved
}

/// Recomputes every member's absolute offset from a zero origin.
///
/// The only operation that fully recomputes positions instead of applying an
/// incremental delta: an in-place content update can change an entity's
/// rendered height, so each member is re-measured and its stored offset
/// corrected by the accumulated difference.
pub(crate) fn relayout<S: Surface>(entities: &mut EntityMap, container: &Container, surface: &mut S) {
    let edge = container.position().anchor_edge();
    let base = container.base_offset_px();
    let spacing = container.spacing_px();

    let mut cursor: i32 = 0;
    for &member in container.members() {
        let height = surface.measured_height(member);
        if let Some(entity) = entities.get_mut(&member) {
            entity.set_rendered_height(height);
            entity.set_vertical_offset(cursor);
        }
        surface.place(member, edge, base + cursor);
        cursor += (height + spacing) as i32;
    }
}

/// Resolves a finished shift transition: clears the transient transform on
/// every member and writes its resting absolute offset.
pub(crate) fn resolve_shift<S: Surface>(
    entities: &EntityMap,
    container: &Container,
    surface: &mut S,
) {
    let edge = container.position().anchor_edge();
    let base = container.base_offset_px();

    for &member in container.members() {
        if let Some(entity) = entities.get(&member) {
            surface.end_shift(member, edge, base + entity.vertical_offset());
        }
    }
}
