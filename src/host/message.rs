// SPDX-License-Identifier: MPL-2.0
//! Inbound wire messages.
//!
//! The message shape is the sole contract with the host: a tagged object
//! whose `type` selects the action. Missing optional fields fall back to
//! defaults rather than failing: one malformed notification must never block
//! the ones behind it, so only a missing `id` or an unreadable envelope is a
//! decode error.

use crate::error::{Error, Result};
use crate::surface::Position;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-message presentation options, sent by the host with every toast.
///
/// Field names arrive in the host's PascalCase convention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NotificationConfig {
    /// Duration of the enter/exit transition, in milliseconds.
    pub animation_time: u64,
    /// Named exit transition applied by the hiding stylesheet rule.
    pub animation_out: String,
    /// Named attention-flash animation.
    pub flash_type: String,
    /// How many times the attention flash repeats.
    pub flash_count: u32,
    /// Maximum concurrent non-pinned notifications per position.
    pub queue: u32,
    /// Whether duplicate arrivals merge into the existing notification.
    pub stacking: bool,
    /// Whether merged duplicates show a visible counter badge.
    pub show_stacked_count: bool,
    /// Optional audio cue file name.
    pub sound_file: Option<String>,
    /// Audio cue volume, 0.0 to 1.0.
    pub sound_volume: f32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            animation_time: 500,
            animation_out: "fadeOut".to_string(),
            flash_type: "flash".to_string(),
            flash_count: 5,
            queue: 5,
            stacking: false,
            show_stacked_count: false,
            sound_file: None,
            sound_volume: 1.0,
        }
    }
}

/// Deduplication key for a notification.
///
/// Not globally unique: the host reuses ids to signal duplicates. The host
/// script sends either a JSON string or a bare number; both normalize to the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupId(String);

impl DedupId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DedupId {
    fn from(value: &str) -> Self {
        DedupId(value.to_string())
    }
}

impl Serialize for DedupId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DedupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        let raw = Raw::deserialize(deserializer)
            .map_err(|_| de::Error::custom("id must be a string or number"))?;
        Ok(match raw {
            Raw::Text(text) => DedupId(text),
            Raw::Integer(number) => DedupId(number.to_string()),
            Raw::Float(number) => DedupId(number.to_string()),
        })
    }
}

/// Payload shared by `standard` and `advanced` toast messages.
#[derive(Debug, Clone, Deserialize)]
pub struct ToastRequest {
    #[serde(default)]
    pub config: NotificationConfig,
    pub id: DedupId,
    #[serde(default)]
    pub message: String,
    /// Advanced only.
    #[serde(default)]
    pub title: String,
    /// Advanced only.
    #[serde(default)]
    pub subject: String,
    /// Advanced only.
    #[serde(default)]
    pub icon: String,
    /// Milliseconds before auto-dismiss; ignored while pinned.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub progress: bool,
    /// Falls back to the ambient default theme when absent.
    #[serde(default)]
    pub theme: Option<String>,
    /// Falls back to the ambient default exit animation when absent.
    #[serde(default, rename = "exitAnim")]
    pub exit_anim: Option<String>,
    #[serde(default)]
    pub flash: bool,
    /// Presence marks the notification as pinned.
    #[serde(default)]
    pub pin_id: Option<String>,
    /// Set by the host when it has already sent this `id`.
    #[serde(default)]
    pub duplicate: bool,
}

fn default_timeout() -> u64 {
    5000
}

/// `unpin.pin_id`: one identifier, an ordered sequence, or absent (all).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PinSelector {
    One(String),
    Many(Vec<String>),
}

impl PinSelector {
    /// The targeted pin identifiers, in the order the host sent them.
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        match self {
            PinSelector::One(id) => vec![id],
            PinSelector::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnpinRequest {
    /// Absent means "unpin everything".
    #[serde(default)]
    pub pin_id: Option<PinSelector>,
}

/// In-place mutations for a pinned notification. Absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOptions {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub flash: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    pub pin_id: String,
    #[serde(default)]
    pub options: UpdateOptions,
}

/// A decoded host message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Standard(ToastRequest),
    Advanced(ToastRequest),
    Unpin(UnpinRequest),
    UpdatePinned(UpdateRequest),
}

/// Decodes one raw inbound message.
pub fn decode(raw: &str) -> Result<HostMessage> {
    serde_json::from_str(raw).map_err(|err| Error::Decode(err.to_string()))
}
