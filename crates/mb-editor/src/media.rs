//! Media picker task: a single-slot request/response handshake.
//!
//! Picking a file is asynchronous — the session records which node asked
//! for media, the host shows its picker, and completion arrives later via
//! [`crate::session::EditorSession::complete_media`]. Exactly one request
//! can be in flight; a second request before the first resolves simply
//! overwrites the slot, and a completion with no pending target is ignored.

use mb_core::id::NodeId;
use mb_core::model::NodeKind;

/// A pending "pick media for this node" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaRequest {
    pub node: NodeId,
    pub kind: NodeKind,
}

/// What the picker produced.
///
/// Images arrive as a durable data-URL encoding; audio and video arrive as
/// a transient object-URL handle that must be revoked when the node drops
/// it and that cannot survive a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPayload {
    Encoded(String),
    Handle(String),
}

impl MediaPayload {
    pub fn into_url(self) -> String {
        match self {
            MediaPayload::Encoded(url) | MediaPayload::Handle(url) => url,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, MediaPayload::Handle(_))
    }
}

/// The single in-flight slot.
#[derive(Debug, Default)]
pub struct MediaSlot {
    pending: Option<MediaRequest>,
}

impl MediaSlot {
    /// Record a request, returning the MIME accept filter for the picker.
    /// Overwrites any request still in flight.
    pub fn request(&mut self, node: NodeId, kind: NodeKind) -> &'static str {
        if let Some(replaced) = self.pending.replace(MediaRequest { node, kind }) {
            log::debug!("media request for node {} overwritten", replaced.node);
        }
        kind.accept_filter()
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> Option<MediaRequest> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&MediaRequest> {
        self.pending.as_ref()
    }
}
