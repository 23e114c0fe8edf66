// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! `Manager` is the single top-level coordinator: it owns the per-position
//! containers, every live entity, the pin registry, the timer scheduler, the
//! process-wide queue quota and the stylesheet once-flag, plus the three
//! collaborators (surface, host transport, audio sink). All state lives here
//! by construction; nothing is ambient.
//!
//! Everything runs single-threaded and event-driven: inbound host messages
//! and expiring timers are the only stimuli, and each is processed to
//! completion before the next. The exit sequence (hide → collapse → settle →
//! evict) is not a callback chain but a walk through named timers, so every
//! step is independently observable and the dismissal step is cancellable
//! when a duplicate merges in.

use super::container::Container;
use super::layout;
use super::notification::{Kind, Lifecycle, Notification, NotificationId};
use super::pins::PinRegistry;
use super::scheduler::{Scheduler, TimerKey};
use crate::audio::AudioSink;
use crate::config::Settings;
use crate::host::{
    self, DedupId, HostMessage, HostTransport, PinSelector, ToastRequest, UpdateRequest,
};
use crate::markup::parse_message;
use crate::surface::{ContentPart, Position, Surface};
use crate::ui::toast;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Backoff between admission attempts while a container is closed or mid-shift.
const ADMISSION_RETRY: Duration = Duration::from_millis(250);
/// Duration of the sibling shift transition.
const SHIFT_TRANSITION: Duration = Duration::from_millis(250);
/// Settle delay between the gap collapse and the eviction.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// The notification engine.
pub struct Manager<S, T, A>
where
    S: Surface,
    T: HostTransport,
    A: AudioSink,
{
    settings: Settings,
    containers: HashMap<Position, Container>,
    entities: HashMap<NotificationId, Notification>,
    pins: PinRegistry,
    scheduler: Scheduler,
    /// Refreshed from `config.Queue` on every inbound toast message.
    max_queue: u32,
    /// The stylesheet is installed once, from the first message's config.
    styled: bool,
    surface: S,
    transport: T,
    audio: A,
}

impl<S, T, A> Manager<S, T, A>
where
    S: Surface,
    T: HostTransport,
    A: AudioSink,
{
    #[must_use]
    pub fn new(settings: Settings, surface: S, transport: T, audio: A) -> Self {
        let max_queue = settings.max_queue;
        Self {
            settings,
            containers: HashMap::new(),
            entities: HashMap::new(),
            pins: PinRegistry::new(),
            scheduler: Scheduler::new(),
            max_queue,
            styled: false,
            surface,
            transport,
            audio,
        }
    }

    /// Decodes and handles one raw inbound message.
    ///
    /// A malformed message is logged and skipped; it never blocks the
    /// messages behind it.
    pub fn handle_raw(&mut self, raw: &str) {
        match host::decode(raw) {
            Ok(message) => self.handle_message(message),
            Err(error) => tracing::warn!(%error, "ignoring malformed host message"),
        }
    }

    /// Handles one decoded host message.
    pub fn handle_message(&mut self, message: HostMessage) {
        match message {
            HostMessage::Standard(request) => self.handle_toast(Kind::Standard, request),
            HostMessage::Advanced(request) => self.handle_toast(Kind::Advanced, request),
            HostMessage::Unpin(request) => self.handle_unpin(request.pin_id),
            HostMessage::UpdatePinned(request) => self.handle_update(request),
        }
    }

    /// Runs the engine: consumes inbound messages and fires timers until the
    /// sender side closes. Returns the engine for post-run inspection.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<HostMessage>) -> Self {
        loop {
            self.fire_due();
            let deadline = self.scheduler.next_deadline();
            tokio::select! {
                message = inbound.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => break,
                },
                () = sleep_until_or_forever(deadline) => {}
            }
        }
        self
    }

    /// Fires every timer due by now, including ones armed by earlier firings.
    pub fn fire_due(&mut self) {
        let now = Instant::now();
        while let Some(key) = self.scheduler.pop_due(now) {
            self.on_timer(key);
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        match key {
            TimerKey::Dismiss(id) => self.begin_exit(id, Lifecycle::Hiding),
            TimerKey::ExitDone(id) => self.close_gap(id),
            TimerKey::Settle(id) => self.evict(id),
            TimerKey::AdmissionRetry(id) => self.try_admit(id),
            TimerKey::ShiftRelease(position) => self.release_shift(position),
        }
    }

    fn handle_toast(&mut self, kind: Kind, request: ToastRequest) {
        if !self.styled {
            self.surface
                .install_stylesheet(&toast::stylesheet(&request.config));
            self.styled = true;
        }

        self.max_queue = request.config.queue;

        if request.duplicate && request.config.stacking {
            self.stack_duplicate(kind, request);
        } else {
            self.spawn(kind, request);
        }
    }

    fn spawn(&mut self, kind: Kind, request: ToastRequest) {
        let entity = Notification::from_request(kind, request, &self.settings);
        let id = entity.id();
        tracing::debug!(
            id = %entity.dedup(),
            position = %entity.position(),
            pinned = entity.is_pinned(),
            "notification created"
        );
        self.entities.insert(id, entity);
        self.try_admit(id);
    }

    /// Merges a duplicate arrival into the live entity with the same dedup
    /// key, or spawns a fresh one when the existing entity is already on its
    /// way out.
    fn stack_duplicate(&mut self, kind: Kind, request: ToastRequest) {
        let Some(id) = self.find_live(&request.id) else {
            tracing::debug!(id = %request.id, "duplicate matched no live notification; dropped");
            return;
        };
        let Some(entity) = self.entities.get(&id) else {
            return;
        };

        if entity.is_departing() {
            // No stacking onto a departing toast.
            self.spawn(kind, request);
        } else if entity.is_pinned() {
            tracing::debug!(id = %request.id, "duplicate of pinned notification dropped");
        } else {
            self.stack(id, request.config.show_stacked_count);
        }
    }

    fn stack(&mut self, id: NotificationId, show_count: bool) {
        self.scheduler.cancel(TimerKey::Dismiss(id));

        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        entity.set_state(Lifecycle::Stacking);
        let count = entity.bump_stack();
        let interval = entity.interval_ms();

        self.surface.restart_progress(id, interval);
        if show_count {
            self.surface.set_stack_count(id, count);
        }

        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_state(Lifecycle::Active);
        }
        self.scheduler
            .arm(TimerKey::Dismiss(id), Duration::from_millis(interval));
        tracing::debug!(stack_count = count, "merged duplicate notification");
    }

    /// Admits `id` if its container is open and not mid-shift; otherwise
    /// schedules a retry. The retry loop is unbounded by design: a zero queue
    /// quota polls forever rather than failing.
    fn try_admit(&mut self, id: NotificationId) {
        let Some(position) = self.entities.get(&id).map(Notification::position) else {
            return;
        };
        let spacing = self.settings.spacing_px;
        let base = self.settings.base_offset_px;
        let container = self
            .containers
            .entry(position)
            .or_insert_with(|| Container::new(position, spacing, base));

        if container.animation_in_flight() || !container.can_admit() {
            let max_queue = self.max_queue;
            if let Some(entity) = self.entities.get_mut(&id) {
                if entity.note_retry() == 0 && max_queue == 0 {
                    tracing::warn!(
                        id = %entity.dedup(),
                        "queue quota is zero; admission will retry indefinitely"
                    );
                }
            }
            tracing::debug!(%position, "admission deferred");
            self.scheduler.arm(TimerKey::AdmissionRetry(id), ADMISSION_RETRY);
            return;
        }

        self.admit(id);
    }

    fn admit(&mut self, id: NotificationId) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        let position = entity.position();
        let pinned = entity.is_pinned();
        let progress = entity.progress_enabled();
        let interval = entity.interval_ms();
        let sound = entity.config().sound_file.clone();
        let volume = entity.config().sound_volume;
        let pin = entity.pin_id().map(str::to_owned);
        let html = toast::render(entity, &self.settings.image_dir);

        if let Some(file) = sound {
            if !self.audio.is_busy() {
                let path = format!("{}/{}", self.settings.audio_dir, file);
                self.audio.play(&path, volume);
            }
        }

        self.surface.ensure_container(position);

        let spacing = self.settings.spacing_px;
        let base = self.settings.base_offset_px;
        let container = self
            .containers
            .entry(position)
            .or_insert_with(|| Container::new(position, spacing, base));
        container.admit(id, !pinned, self.max_queue);

        self.surface.attach(position, id, &html);
        self.surface.set_active(id, true);
        self.surface.place(id, position.anchor_edge(), container.base_offset_px());
        if progress {
            self.surface.restart_progress(id, interval);
        }

        let height = self.surface.measured_height(id);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_rendered_height(height);
            entity.set_state(Lifecycle::Active);
        }

        let moved = layout::shift_for_insert(&mut self.entities, container, &mut self.surface, id);
        if moved {
            container.set_animation_in_flight(true);
            self.scheduler
                .arm(TimerKey::ShiftRelease(position), SHIFT_TRANSITION);
        }

        if let Some(pin) = pin {
            self.pins.insert(pin, id);
        } else {
            self.scheduler
                .arm(TimerKey::Dismiss(id), Duration::from_millis(interval));
        }
        tracing::debug!(%position, pinned, "notification admitted");
    }

    /// Starts the exit sequence. `Hiding` comes from the dismissal timer,
    /// `Unpinning` from an explicit unpin command; the mechanics are shared.
    fn begin_exit(&mut self, id: NotificationId, exit_state: Lifecycle) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if entity.is_departing() {
            return;
        }
        entity.set_state(exit_state);
        let exit_animation = entity.exit_animation().to_owned();
        let animation_time = entity.config().animation_time;

        self.surface.set_active(id, false);
        self.surface.set_hiding(id, &exit_animation);
        self.scheduler
            .arm(TimerKey::ExitDone(id), Duration::from_millis(animation_time));
    }

    /// Exit transition finished: close the gap, then settle before evicting.
    fn close_gap(&mut self, id: NotificationId) {
        if let Some(position) = self.entities.get(&id).map(Notification::position) {
            if let Some(container) = self.containers.get(&position) {
                let moved =
                    layout::collapse_after_removal(&mut self.entities, container, &mut self.surface, id);
                if moved {
                    self.scheduler
                        .arm(TimerKey::ShiftRelease(position), SHIFT_TRANSITION);
                }
            }
        }
        self.scheduler.arm(TimerKey::Settle(id), SETTLE_DELAY);
    }

    fn evict(&mut self, id: NotificationId) {
        let Some(mut entity) = self.entities.remove(&id) else {
            return;
        };
        let position = entity.position();
        let counted = !entity.is_pinned();

        if let Some(container) = self.containers.get_mut(&position) {
            container.evict(id, counted);
        }
        self.surface.detach(position, id);

        if entity.state() == Lifecycle::Unpinning {
            if let Some(pin) = entity.pin_id() {
                self.pins.remove(pin);
            }
        }
        entity.set_state(Lifecycle::Removed);

        if let Err(error) = self.transport.post_removed(entity.dedup()) {
            tracing::warn!(id = %entity.dedup(), %error, "failed to report removal to host");
        }
        tracing::debug!(id = %entity.dedup(), %position, "notification removed");
    }

    fn release_shift(&mut self, position: Position) {
        if let Some(container) = self.containers.get_mut(&position) {
            container.set_animation_in_flight(false);
            layout::resolve_shift(&self.entities, container, &mut self.surface);
        }
    }

    fn handle_unpin(&mut self, selector: Option<PinSelector>) {
        let targets = match selector {
            Some(selector) => selector.into_ids(),
            None => self.pins.pin_ids(),
        };

        for pin_id in targets {
            match self.pins.get(&pin_id) {
                Some(id) => self.begin_exit(id, Lifecycle::Unpinning),
                None => tracing::debug!(pin_id = %pin_id, "unpin for unknown pin id ignored"),
            }
        }
    }

    /// In-place mutation of a pinned notification, followed by a full
    /// re-layout of its container (the update may have changed its height).
    fn handle_update(&mut self, request: UpdateRequest) {
        let Some(id) = self.pins.get(&request.pin_id) else {
            tracing::debug!(pin_id = %request.pin_id, "update for unknown pin id ignored");
            return;
        };
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if entity.is_departing() {
            return;
        }

        let options = request.options;
        let image_dir = self.settings.image_dir.clone();

        if let Some(message) = options.message {
            entity.set_message(message);
            let html = parse_message(entity.message());
            self.surface.update_content(id, ContentPart::Message, &html);
        }
        if let Some(title) = options.title {
            if let Some(advanced) = entity.advanced_mut() {
                advanced.title = title;
                let html = parse_message(&advanced.title);
                self.surface.update_content(id, ContentPart::Title, &html);
            }
        }
        if let Some(subject) = options.subject {
            if let Some(advanced) = entity.advanced_mut() {
                advanced.subject = subject;
                let html = parse_message(&advanced.subject);
                self.surface.update_content(id, ContentPart::Subject, &html);
            }
        }
        if let Some(icon) = options.icon {
            if let Some(advanced) = entity.advanced_mut() {
                advanced.icon = icon;
                let html = toast::icon_markup(&advanced.icon, &image_dir);
                self.surface.update_content(id, ContentPart::Icon, &html);
            }
        }
        if let Some(theme) = options.theme {
            entity.set_theme(theme);
            let theme = entity.theme().to_owned();
            self.surface.set_theme(id, &theme);
        }
        if let Some(flash) = options.flash {
            entity.set_flash(flash);
            self.surface.set_flash(id, flash);
        }

        let position = entity.position();
        if let Some(container) = self.containers.get(&position) {
            layout::relayout(&mut self.entities, container, &mut self.surface);
        }
    }

    /// First live entity carrying this dedup key, searching containers in
    /// newest-first member order.
    fn find_live(&self, dedup: &DedupId) -> Option<NotificationId> {
        self.containers.values().find_map(|container| {
            container
                .members()
                .iter()
                .copied()
                .find(|member| self.entities.get(member).is_some_and(|n| n.dedup() == dedup))
        })
    }

    /// Live entity for a dedup key, if any.
    #[must_use]
    pub fn find(&self, dedup: &DedupId) -> Option<&Notification> {
        self.find_live(dedup).and_then(|id| self.entities.get(&id))
    }

    #[must_use]
    pub fn queue_count(&self, position: Position) -> u32 {
        self.containers
            .get(&position)
            .map_or(0, Container::queue_count)
    }

    #[must_use]
    pub fn admission_open(&self, position: Position) -> bool {
        self.containers
            .get(&position)
            .is_none_or(Container::can_admit)
    }

    #[must_use]
    pub fn member_count(&self, position: Position) -> usize {
        self.containers.get(&position).map_or(0, Container::len)
    }

    #[must_use]
    pub fn animation_in_flight(&self, position: Position) -> bool {
        self.containers
            .get(&position)
            .is_some_and(Container::animation_in_flight)
    }

    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.pins.len()
    }

    #[must_use]
    pub fn has_pin(&self, pin_id: &str) -> bool {
        self.pins.contains(pin_id)
    }

    #[must_use]
    pub fn max_queue(&self) -> u32 {
        self.max_queue
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }
}

async fn sleep_until_or_forever(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
