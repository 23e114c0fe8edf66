// SPDX-License-Identifier: MPL-2.0
//! Core notification entity.
//!
//! One struct covers both toast kinds: `Advanced` carries an extra
//! title/subject/icon payload, everything else is shared. An entity is
//! transient until its container admits it; from admission to removal the
//! container owns it exclusively.

use crate::config::Settings;
use crate::host::{DedupId, NotificationConfig, ToastRequest};
use crate::surface::Position;

/// Process-unique identifier for a notification entity.
///
/// Distinct from the wire [`DedupId`], which the host reuses to signal
/// duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Toast kind. `Advanced` adds a header with icon, title and subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Standard,
    Advanced,
}

/// Lifecycle states. Timed entities walk
/// `Pending → Active → (Stacking ⇄ Active) → Hiding → Removed`; pinned
/// entities skip the timer and leave through `Unpinning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed and rendered, not yet admitted anywhere.
    Pending,
    /// Admitted into a container; non-pinned entities have a dismissal timer.
    Active,
    /// Momentarily merging a duplicate arrival.
    Stacking,
    /// Exit transition running after the dismissal timer fired.
    Hiding,
    /// Exit transition running after an explicit unpin command.
    Unpinning,
    /// Evicted; the entity is dropped right after entering this state.
    Removed,
}

/// Advanced-only display payload.
#[derive(Debug, Clone)]
pub struct AdvancedContent {
    pub title: String,
    pub subject: String,
    pub icon: String,
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    dedup: DedupId,
    kind: Kind,
    position: Position,
    message: String,
    advanced: Option<AdvancedContent>,
    interval_ms: u64,
    progress: bool,
    theme: String,
    exit_animation: String,
    flash: bool,
    pin_id: Option<String>,
    stack_count: u32,
    vertical_offset: i32,
    rendered_height: u32,
    state: Lifecycle,
    config: NotificationConfig,
    retry_attempts: u32,
}

impl Notification {
    /// Builds an entity from a decoded toast request.
    ///
    /// Absent theme/exit-animation fields fall back to the ambient settings.
    #[must_use]
    pub fn from_request(kind: Kind, request: ToastRequest, settings: &Settings) -> Self {
        let advanced = match kind {
            Kind::Standard => None,
            Kind::Advanced => Some(AdvancedContent {
                title: request.title,
                subject: request.subject,
                icon: request.icon,
            }),
        };

        Self {
            id: NotificationId::new(),
            dedup: request.id,
            kind,
            position: request.position,
            message: request.message,
            advanced,
            interval_ms: request.timeout,
            progress: request.progress,
            theme: request.theme.unwrap_or_else(|| settings.default_theme.clone()),
            exit_animation: request
                .exit_anim
                .unwrap_or_else(|| settings.default_exit_animation.clone()),
            flash: request.flash,
            pin_id: request.pin_id,
            stack_count: 1,
            vertical_offset: 0,
            rendered_height: 0,
            state: Lifecycle::Pending,
            config: request.config,
            retry_attempts: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn dedup(&self) -> &DedupId {
        &self.dedup
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn advanced(&self) -> Option<&AdvancedContent> {
        self.advanced.as_ref()
    }

    /// Milliseconds before auto-dismiss. Ignored while pinned.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[must_use]
    pub fn progress_enabled(&self) -> bool {
        self.progress
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    #[must_use]
    pub fn exit_animation(&self) -> &str {
        &self.exit_animation
    }

    #[must_use]
    pub fn flash(&self) -> bool {
        self.flash
    }

    /// A pinned entity never auto-dismisses and never consumes queue
    /// capacity; it leaves only through an explicit unpin.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin_id.is_some()
    }

    #[must_use]
    pub fn pin_id(&self) -> Option<&str> {
        self.pin_id.as_deref()
    }

    /// How many duplicate arrivals have merged into this entity (≥ 1).
    #[must_use]
    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    /// Cumulative displacement applied by siblings entering/leaving, in
    /// pixels away from the anchor edge.
    #[must_use]
    pub fn vertical_offset(&self) -> i32 {
        self.vertical_offset
    }

    #[must_use]
    pub fn rendered_height(&self) -> u32 {
        self.rendered_height
    }

    #[must_use]
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[must_use]
    pub fn is_bottom(&self) -> bool {
        self.position.is_bottom()
    }

    /// Whether the entity already started its exit sequence.
    #[must_use]
    pub fn is_departing(&self) -> bool {
        matches!(
            self.state,
            Lifecycle::Hiding | Lifecycle::Unpinning | Lifecycle::Removed
        )
    }

    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub(crate) fn set_state(&mut self, state: Lifecycle) {
        self.state = state;
    }

    /// Merges one duplicate arrival; returns the new stack count.
    pub(crate) fn bump_stack(&mut self) -> u32 {
        self.stack_count += 1;
        self.stack_count
    }

    pub(crate) fn shift_by(&mut self, delta_px: i32) {
        self.vertical_offset += delta_px;
    }

    pub(crate) fn set_vertical_offset(&mut self, offset_px: i32) {
        self.vertical_offset = offset_px;
    }

    pub(crate) fn set_rendered_height(&mut self, height_px: u32) {
        self.rendered_height = height_px;
    }

    /// Records one deferred admission attempt; returns the count before it.
    pub(crate) fn note_retry(&mut self) -> u32 {
        let before = self.retry_attempts;
        self.retry_attempts += 1;
        before
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }

    pub(crate) fn set_theme(&mut self, theme: String) {
        self.theme = theme;
    }

    pub(crate) fn set_flash(&mut self, flash: bool) {
        self.flash = flash;
    }

    pub(crate) fn advanced_mut(&mut self) -> Option<&mut AdvancedContent> {
        self.advanced.as_mut()
    }
}
