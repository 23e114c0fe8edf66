// SPDX-License-Identifier: MPL-2.0
//! Outbound lifecycle reports.
//!
//! The engine reports every eviction back to the host so game logic can
//! retire its bookkeeping for that id. Reports are fire-and-forget: a failed
//! post is logged by the caller and never retried, since there is no
//! user-facing error channel to surface it on.

use crate::error::Result;
use crate::host::DedupId;

/// Transport collaborator owned by the host application.
pub trait HostTransport {
    /// Posts an arbitrary payload to a named endpoint on the host.
    fn post(&mut self, endpoint: &str, payload: serde_json::Value) -> Result<()>;

    /// Posts `{ "id": ... }` to the `removed` endpoint.
    fn post_removed(&mut self, id: &DedupId) -> Result<()> {
        self.post("removed", serde_json::json!({ "id": id }))
    }
}
