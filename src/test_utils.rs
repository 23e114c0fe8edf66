// SPDX-License-Identifier: MPL-2.0
//! Shared test doubles.
//!
//! Recording implementations of the three collaborator traits. Every call is
//! appended to an operation log so tests can assert on the exact surface
//! traffic instead of poking at engine internals.

use crate::audio::AudioSink;
use crate::error::{Error, Result};
use crate::host::HostTransport;
use crate::surface::{AnchorEdge, ContentPart, Position, Surface};
use crate::ui::notifications::NotificationId;
use std::collections::HashMap;

/// Height reported for elements with no explicit override.
pub const DEFAULT_HEIGHT_PX: u32 = 60;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    EnsureContainer(Position),
    Attach {
        position: Position,
        id: NotificationId,
        html: String,
    },
    Detach {
        position: Position,
        id: NotificationId,
    },
    Place {
        id: NotificationId,
        edge: AnchorEdge,
        offset_px: i32,
    },
    BeginShift {
        id: NotificationId,
        delta_px: i32,
    },
    EndShift {
        id: NotificationId,
        edge: AnchorEdge,
        offset_px: i32,
    },
    SetActive {
        id: NotificationId,
        active: bool,
    },
    SetHiding {
        id: NotificationId,
        exit_animation: String,
    },
    RestartProgress {
        id: NotificationId,
        interval_ms: u64,
    },
    SetStackCount {
        id: NotificationId,
        count: u32,
    },
    UpdateContent {
        id: NotificationId,
        part: ContentPart,
        html: String,
    },
    SetTheme {
        id: NotificationId,
        theme: String,
    },
    SetFlash {
        id: NotificationId,
        flash: bool,
    },
    InstallStylesheet(String),
}

/// Surface double that records every call and serves configurable heights.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    heights: HashMap<NotificationId, u32>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the height reported for one element.
    pub fn set_height(&mut self, id: NotificationId, height_px: u32) {
        self.heights.insert(id, height_px);
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Ids currently attached (attach without a later detach).
    #[must_use]
    pub fn attached(&self) -> Vec<NotificationId> {
        let mut attached = Vec::new();
        for op in &self.ops {
            match op {
                SurfaceOp::Attach { id, .. } => attached.push(*id),
                SurfaceOp::Detach { id, .. } => attached.retain(|a| a != id),
                _ => {}
            }
        }
        attached
    }
}

impl Surface for RecordingSurface {
    fn ensure_container(&mut self, position: Position) {
        self.ops.push(SurfaceOp::EnsureContainer(position));
    }

    fn attach(&mut self, position: Position, id: NotificationId, html: &str) {
        self.ops.push(SurfaceOp::Attach {
            position,
            id,
            html: html.to_string(),
        });
    }

    fn detach(&mut self, position: Position, id: NotificationId) {
        self.ops.push(SurfaceOp::Detach { position, id });
    }

    fn measured_height(&self, id: NotificationId) -> u32 {
        self.heights.get(&id).copied().unwrap_or(DEFAULT_HEIGHT_PX)
    }

    fn place(&mut self, id: NotificationId, edge: AnchorEdge, offset_px: i32) {
        self.ops.push(SurfaceOp::Place { id, edge, offset_px });
    }

    fn begin_shift(&mut self, id: NotificationId, delta_px: i32) {
        self.ops.push(SurfaceOp::BeginShift { id, delta_px });
    }

    fn end_shift(&mut self, id: NotificationId, edge: AnchorEdge, offset_px: i32) {
        self.ops.push(SurfaceOp::EndShift { id, edge, offset_px });
    }

    fn set_active(&mut self, id: NotificationId, active: bool) {
        self.ops.push(SurfaceOp::SetActive { id, active });
    }

    fn set_hiding(&mut self, id: NotificationId, exit_animation: &str) {
        self.ops.push(SurfaceOp::SetHiding {
            id,
            exit_animation: exit_animation.to_string(),
        });
    }

    fn restart_progress(&mut self, id: NotificationId, interval_ms: u64) {
        self.ops.push(SurfaceOp::RestartProgress { id, interval_ms });
    }

    fn set_stack_count(&mut self, id: NotificationId, count: u32) {
        self.ops.push(SurfaceOp::SetStackCount { id, count });
    }

    fn update_content(&mut self, id: NotificationId, part: ContentPart, html: &str) {
        self.ops.push(SurfaceOp::UpdateContent {
            id,
            part,
            html: html.to_string(),
        });
    }

    fn set_theme(&mut self, id: NotificationId, theme: &str) {
        self.ops.push(SurfaceOp::SetTheme {
            id,
            theme: theme.to_string(),
        });
    }

    fn set_flash(&mut self, id: NotificationId, flash: bool) {
        self.ops.push(SurfaceOp::SetFlash { id, flash });
    }

    fn install_stylesheet(&mut self, css: &str) {
        self.ops.push(SurfaceOp::InstallStylesheet(css.to_string()));
    }
}

/// Transport double that captures outbound posts, optionally failing them.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    posts: Vec<(String, serde_json::Value)>,
    fail: bool,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every post fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            posts: Vec::new(),
            fail: true,
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[(String, serde_json::Value)] {
        &self.posts
    }

    /// Dedup ids reported through the `removed` endpoint, in order.
    #[must_use]
    pub fn removed_ids(&self) -> Vec<String> {
        self.posts
            .iter()
            .filter(|(endpoint, _)| endpoint == "removed")
            .filter_map(|(_, payload)| payload["id"].as_str().map(str::to_owned))
            .collect()
    }
}

impl HostTransport for RecordingTransport {
    fn post(&mut self, endpoint: &str, payload: serde_json::Value) -> Result<()> {
        if self.fail {
            return Err(Error::Transport("transport unavailable".to_string()));
        }
        self.posts.push((endpoint.to_string(), payload));
        Ok(())
    }
}

/// Audio double that records played cues and can report itself busy.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    played: Vec<(String, f32)>,
    busy: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that is permanently mid-playback.
    #[must_use]
    pub fn busy() -> Self {
        Self {
            played: Vec::new(),
            busy: true,
        }
    }

    #[must_use]
    pub fn played(&self) -> &[(String, f32)] {
        &self.played
    }
}

impl AudioSink for RecordingAudio {
    fn is_busy(&self) -> bool {
        self.busy
    }

    fn play(&mut self, path: &str, volume: f32) {
        self.played.push((path.to_string(), volume));
    }
}
