// SPDX-License-Identifier: MPL-2.0
//! Audio cue collaborator.
//!
//! There is exactly one shared player for the whole view. It is guarded only
//! by a "currently playing" check: a cue that arrives while another is still
//! playing is skipped, never queued. Cues fire only when a notification is
//! actually admitted, not while it waits in the admission retry poll.
//!
//! Asset decoding and playback live in the host layer; this trait is the
//! whole contract.

/// The shared cue player.
pub trait AudioSink {
    /// Whether a cue is currently playing.
    fn is_busy(&self) -> bool;

    /// Starts a cue from the given asset path at the given volume (0.0–1.0).
    fn play(&mut self, path: &str, volume: f32);
}

/// Sink that drops every cue. Useful for headless hosts and tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn is_busy(&self) -> bool {
        false
    }

    fn play(&mut self, _path: &str, _volume: f32) {}
}
