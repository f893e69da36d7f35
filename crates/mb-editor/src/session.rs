//! The editor session: the single owner of canvas state.
//!
//! All mutation funnels through [`EditorSession::apply_mutation`], which is
//! where the cross-cutting invariants live: transient state is reset before
//! the model drops the node it referenced, and every displaced `blob:`
//! media handle lands in the revocation queue so the host can release it.

use crate::controller::PointerController;
use crate::input::{Hit, InputEvent};
use crate::media::{MediaPayload, MediaSlot};
use crate::transfer::{self, ExportBundle, ImportSlot};
use mb_core::document::{DocumentError, parse_document};
use mb_core::id::{ConnectionId, NodeId};
use mb_core::model::{CanvasGraph, Node, NodeKind};

/// A single mutation of the canvas graph, produced by the controller or by
/// a toolbar action and applied by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    MoveNode { id: NodeId, x: f32, y: f32 },
    SetText { id: NodeId, text: String },
    SetContent { id: NodeId, content: String },
    RemoveNode { id: NodeId },
    AddConnection { from: NodeId, to: NodeId },
    RemoveConnection { id: ConnectionId },
    Clear,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    pub graph: CanvasGraph,
    pub controller: PointerController,
    media: MediaSlot,
    import: ImportSlot,
    /// Transient object-URL handles displaced since the last drain; the
    /// host revokes these to avoid leaking media resources.
    revocations: Vec<String>,
}

impl EditorSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Input routing ───────────────────────────────────────────────────

    /// Feed one pointer event (plus what the renderer hit-tested under it)
    /// through the controller and apply whatever it produced.
    pub fn handle_input(&mut self, event: &InputEvent, hit: &Hit) {
        let mutations = self.controller.handle(event, hit, &self.graph);
        for mutation in mutations {
            self.apply_mutation(mutation);
        }
    }

    /// Commit the text being edited (textarea lost focus).
    pub fn commit_text_edit(&mut self, text: impl Into<String>) {
        let mutations = self.controller.commit_edit(text);
        for mutation in mutations {
            self.apply_mutation(mutation);
        }
    }

    // ─── Toolbar operations ──────────────────────────────────────────────

    /// Create a node. Text nodes go straight into edit mode.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.graph.add_node(kind);
        if kind == NodeKind::Text {
            self.controller.begin_edit(id);
        }
        id
    }

    pub fn delete_node(&mut self, id: NodeId) {
        self.apply_mutation(CanvasMutation::RemoveNode { id });
    }

    /// Delete the connection selected by a click, if any.
    pub fn delete_selected_connection(&mut self) {
        if let Some(id) = self.controller.selected_connection().cloned() {
            self.apply_mutation(CanvasMutation::RemoveConnection { id });
        }
    }

    /// Empty the canvas. The "are you sure?" prompt belongs to the UI
    /// layer; this is unconditional.
    pub fn clear(&mut self) {
        self.apply_mutation(CanvasMutation::Clear);
    }

    // ─── Mutation application ────────────────────────────────────────────

    pub fn apply_mutation(&mut self, mutation: CanvasMutation) {
        match mutation {
            CanvasMutation::MoveNode { id, x, y } => {
                self.graph.update_node_position(id, x, y);
            }
            CanvasMutation::SetText { id, text } => {
                self.graph.update_node_text(id, text);
            }
            CanvasMutation::SetContent { id, content } => {
                if let Some(previous) = self.graph.set_node_content(id, content) {
                    self.queue_handle(previous);
                }
            }
            CanvasMutation::RemoveNode { id } => {
                // Reset first so no gesture ever references a dead id.
                self.controller.node_removed(id);
                if let Some(node) = self.graph.delete_node(id) {
                    self.release_node(node);
                }
                self.controller.prune_selection(&self.graph);
            }
            CanvasMutation::AddConnection { from, to } => {
                self.graph.add_connection(from, to);
            }
            CanvasMutation::RemoveConnection { id } => {
                self.graph.delete_connection(&id);
                self.controller.connection_removed(&id);
            }
            CanvasMutation::Clear => {
                self.controller.reset();
                for node in self.graph.clear() {
                    self.release_node(node);
                }
            }
        }
    }

    // ─── Media picker ────────────────────────────────────────────────────

    /// A node asked for media; returns the MIME accept filter for the
    /// host's file picker. Overwrites any request still in flight.
    pub fn request_media(&mut self, node: NodeId, kind: NodeKind) -> &'static str {
        self.media.request(node, kind)
    }

    /// The picker resolved. With no pending target (the original editor's
    /// "file chosen but nothing asked for it" case) this is a silent no-op.
    pub fn complete_media(&mut self, payload: MediaPayload) {
        let Some(request) = self.media.take() else {
            log::debug!("media completion with no pending target, ignoring");
            return;
        };
        let transient = payload.is_transient();
        let url = payload.into_url();
        if self.graph.node(request.node).is_none() {
            // Target vanished while the picker was open; a fresh handle
            // would leak, so send it straight to revocation.
            if transient {
                self.queue_handle(url);
            }
            return;
        }
        self.apply_mutation(CanvasMutation::SetContent {
            id: request.node,
            content: url,
        });
    }

    /// Handles waiting to be revoked by the host.
    pub fn take_revocations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.revocations)
    }

    // ─── Export / import ─────────────────────────────────────────────────

    /// Serialize the graph for download. Never mutates state.
    pub fn export(&self) -> Result<ExportBundle, DocumentError> {
        transfer::export(&self.graph)
    }

    /// The user asked to import; the host opens its file dialog.
    pub fn request_import(&mut self) {
        self.import.request();
    }

    /// The import file's text arrived. Validation happens before any state
    /// changes: a bad document leaves the graph, the gesture state, and the
    /// id counter exactly as they were, and the error is surfaced for a
    /// user-visible alert. On success the graph is replaced wholesale.
    pub fn complete_import(&mut self, json: &str) -> Result<(), DocumentError> {
        if !self.import.take() {
            log::debug!("import completion with no pending request, ignoring");
            return Ok(());
        }
        let doc = parse_document(json).inspect_err(|err| {
            log::warn!("import rejected: {err}");
        })?;
        self.controller.reset();
        for node in self.graph.restore(doc) {
            self.release_node(node);
        }
        Ok(())
    }

    // ─── Handle bookkeeping ──────────────────────────────────────────────

    fn release_node(&mut self, node: Node) {
        if node.has_transient_content()
            && let Some(content) = node.content
        {
            self.queue_handle(content);
        }
    }

    fn queue_handle(&mut self, url: String) {
        if url.starts_with("blob:") {
            self.revocations.push(url);
        }
    }
}
