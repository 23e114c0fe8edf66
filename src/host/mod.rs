// SPDX-License-Identifier: MPL-2.0
//! Host process boundary.
//!
//! Inbound: JSON messages posted into the embedded view, decoded by
//! [`decode`] into [`HostMessage`] values. Outbound: fire-and-forget lifecycle
//! reports through the [`HostTransport`] collaborator. The transport protocol
//! itself lives in the host application; this module only owns the wire
//! shapes.

mod message;
mod transport;

pub use message::{
    decode, DedupId, HostMessage, NotificationConfig, PinSelector, ToastRequest, UnpinRequest,
    UpdateOptions, UpdateRequest,
};
pub use transport::HostTransport;
