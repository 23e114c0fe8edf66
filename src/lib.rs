// SPDX-License-Identifier: MPL-2.0
//! `bulletin` is the lifecycle and layout engine behind a transient toast
//! notification surface embedded in a game client.
//!
//! The host sends JSON messages (show, unpin, update-pinned); the engine owns
//! every notification from admission to eviction: per-position queues with a
//! latched quota, duplicate stacking, pinning, sibling shift/collapse
//! geometry, and the inline text markup dialect. All page, host, and audio
//! I/O goes through the [`surface::Surface`], [`host::HostTransport`] and
//! [`audio::AudioSink`] traits, so the engine itself is deterministic and
//! fully testable.

#![doc(html_root_url = "https://docs.rs/bulletin/0.2.0")]

pub mod audio;
pub mod config;
pub mod error;
pub mod host;
pub mod markup;
pub mod surface;
pub mod test_utils;
pub mod ui;

pub use error::{Error, Result};
