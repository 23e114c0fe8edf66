// SPDX-License-Identifier: MPL-2.0
//! The embedded browser surface boundary.
//!
//! Everything the engine knows about the page it lives in goes through the
//! [`Surface`] trait: attaching and detaching toast elements, measuring their
//! rendered height, writing absolute offsets, and toggling the CSS classes
//! that drive enter/exit/flash animations. The engine treats every call as
//! fire-and-forget, mirroring DOM mutation: a surface implementation must
//! not fail, only render best-effort.
//!
//! The cosmetic shift ([`Surface::begin_shift`] / [`Surface::end_shift`])
//! deserves a note: sibling movement is animated with a transient transform
//! that always resolves, after the fixed transition time, to the same
//! absolute `top`/`bottom` offset the non-animated path would write.

use crate::ui::notifications::NotificationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named screen anchor a container is bound to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    /// Whether this anchor binds to the bottom edge of the screen.
    /// Bottom-anchored containers invert the vertical movement sign.
    #[must_use]
    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight
        )
    }

    /// The CSS edge property absolute offsets are written against.
    #[must_use]
    pub fn anchor_edge(self) -> AnchorEdge {
        if self.is_bottom() {
            AnchorEdge::Bottom
        } else {
            AnchorEdge::Top
        }
    }

    /// The wire/CSS name of this position (e.g. `top-right`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen edge an absolute offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorEdge {
    Top,
    Bottom,
}

impl AnchorEdge {
    /// The CSS property name (`top` or `bottom`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorEdge::Top => "top",
            AnchorEdge::Bottom => "bottom",
        }
    }
}

/// Which part of an advanced toast an in-place content update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentPart {
    Message,
    Title,
    Subject,
    Icon,
}

/// The DOM boundary for toast rendering.
///
/// Implementations translate these calls into element mutations on the
/// embedded page. The engine never inspects the page; the only value flowing
/// back is [`Surface::measured_height`].
pub trait Surface {
    /// Makes sure the per-position container element exists and is attached.
    fn ensure_container(&mut self, position: Position);

    /// Attaches a freshly rendered toast element to its container.
    fn attach(&mut self, position: Position, id: NotificationId, html: &str);

    /// Detaches a toast element from its container.
    fn detach(&mut self, position: Position, id: NotificationId);

    /// Rendered height of an attached toast, in pixels.
    fn measured_height(&self, id: NotificationId) -> u32;

    /// Writes the absolute offset from the anchored edge, in pixels.
    fn place(&mut self, id: NotificationId, edge: AnchorEdge, offset_px: i32);

    /// Starts the transient transform-based shift animation.
    fn begin_shift(&mut self, id: NotificationId, delta_px: i32);

    /// Clears the transient transform and writes the resting absolute offset.
    fn end_shift(&mut self, id: NotificationId, edge: AnchorEdge, offset_px: i32);

    /// Toggles the `active` visual state.
    fn set_active(&mut self, id: NotificationId, active: bool);

    /// Marks the toast as hiding and applies its named exit animation.
    fn set_hiding(&mut self, id: NotificationId, exit_animation: &str);

    /// (Re)starts the progress bar animation with the given duration.
    fn restart_progress(&mut self, id: NotificationId, interval_ms: u64);

    /// Shows or refreshes the stacked-count badge.
    fn set_stack_count(&mut self, id: NotificationId, count: u32);

    /// Replaces the inner HTML of one content part.
    fn update_content(&mut self, id: NotificationId, part: ContentPart, html: &str);

    /// Swaps the theme class on the toast element.
    fn set_theme(&mut self, id: NotificationId, theme: &str);

    /// Toggles the attention-flash class.
    fn set_flash(&mut self, id: NotificationId, flash: bool);

    /// Installs the one-shot stylesheet built from the first message's config.
    fn install_stylesheet(&mut self, css: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_positions_report_bottom_edge() {
        assert!(Position::BottomLeft.is_bottom());
        assert!(Position::BottomCenter.is_bottom());
        assert!(Position::BottomRight.is_bottom());
        assert_eq!(Position::BottomRight.anchor_edge(), AnchorEdge::Bottom);
    }

    #[test]
    fn top_positions_report_top_edge() {
        assert!(!Position::TopLeft.is_bottom());
        assert_eq!(Position::TopCenter.anchor_edge(), AnchorEdge::Top);
    }

    #[test]
    fn positions_deserialize_from_kebab_case() {
        let position: Position = serde_json::from_str("\"bottom-left\"").expect("valid position");
        assert_eq!(position, Position::BottomLeft);
    }

    #[test]
    fn position_display_matches_wire_name() {
        assert_eq!(Position::TopRight.to_string(), "top-right");
        assert_eq!(Position::BottomCenter.to_string(), "bottom-center");
    }
}
