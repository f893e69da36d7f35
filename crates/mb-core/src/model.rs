//! Core canvas data model.
//!
//! The canvas is a flat graph: typed content nodes positioned on a 2D
//! surface plus directed connections between them. Both collections keep
//! insertion order because that order is part of the persisted document.
//! All mutating operations are total — unknown ids are no-ops, and deleting
//! a node cascades to every connection that references it, so a dangling
//! endpoint can never be observed.

use crate::id::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};

/// Default width and height of a freshly created node.
pub const DEFAULT_NODE_SIZE: f32 = 200.0;

/// Placeholder text for a new text node.
pub const TEXT_PLACEHOLDER: &str = "Click to edit";

// ─── Node kinds ──────────────────────────────────────────────────────────

/// The four content kinds a node can hold.
///
/// Kept exhaustive on purpose: rendering and the media picker both match
/// over this enum, so adding a kind is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Text,
    Image,
    Audio,
    Video,
}

impl NodeKind {
    /// Initial `text` value for a new node of this kind.
    pub fn placeholder_text(self) -> Option<&'static str> {
        match self {
            NodeKind::Text => Some(TEXT_PLACEHOLDER),
            NodeKind::Image | NodeKind::Audio | NodeKind::Video => None,
        }
    }

    /// MIME filter for the media picker.
    pub fn accept_filter(self) -> &'static str {
        match self {
            NodeKind::Text => "*/*",
            NodeKind::Image => "image/*",
            NodeKind::Audio => "audio/*",
            NodeKind::Video => "video/*",
        }
    }

    /// Whether nodes of this kind are assigned media content.
    pub fn is_media(self) -> bool {
        !matches!(self, NodeKind::Text)
    }

    /// Whether assigned content is a transient object-URL handle rather
    /// than a durable encoding. Images are stored as data URLs and survive
    /// a reload; audio and video keep a `blob:` handle that does not.
    pub fn content_is_transient(self) -> bool {
        matches!(self, NodeKind::Audio | NodeKind::Video)
    }
}

// ─── Nodes & connections ─────────────────────────────────────────────────

fn default_size() -> f32 {
    DEFAULT_NODE_SIZE
}

/// A positioned, typed content unit on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Media reference: data URL for images, object-URL handle for
    /// audio/video. Absent until the user picks a file.
    pub content: Option<String>,
    /// Text body; only meaningful for text nodes.
    pub text: Option<String>,
    #[serde(default = "default_size")]
    pub width: f32,
    #[serde(default = "default_size")]
    pub height: f32,
}

impl Node {
    /// True when this node holds a transient `blob:` handle that cannot be
    /// re-resolved after a reload.
    pub fn has_transient_content(&self) -> bool {
        self.kind.content_is_transient()
            && self
                .content
                .as_deref()
                .is_some_and(|c| c.starts_with("blob:"))
    }
}

/// A directed edge between two nodes, rendered as an arrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
}

// ─── Canvas graph ────────────────────────────────────────────────────────

/// The authoritative canvas state: nodes and connections in insertion
/// order, plus the next-id counter.
///
/// Serializes directly as the persisted `{ nodes, connections }` document;
/// the counter is session state and is recomputed on import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CanvasGraph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    #[serde(skip)]
    next_id: u64,
}

impl CanvasGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            next_id: 1,
        }
    }

    /// The id the next `add_node` call will allocate.
    pub fn next_id(&self) -> u64 {
        self.next_id.max(1)
    }

    /// Create a node of the given kind and return its id.
    ///
    /// The default position is a deterministic scatter derived from the id
    /// so consecutive nodes don't land exactly on top of each other. Text
    /// nodes start with placeholder text; the caller is expected to put
    /// them straight into edit mode.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id());
        self.next_id = id.0 + 1;
        self.nodes.push(Node {
            id,
            x: 100.0 + (id.0 * 30 % 500) as f32,
            y: 100.0 + (id.0 * 40 % 300) as f32,
            kind,
            content: None,
            text: kind.placeholder_text().map(str::to_owned),
            width: DEFAULT_NODE_SIZE,
            height: DEFAULT_NODE_SIZE,
        });
        id
    }

    /// Move a node. Unknown ids are a no-op.
    pub fn update_node_position(&mut self, id: NodeId, x: f32, y: f32) {
        if let Some(node) = self.node_mut(id) {
            node.x = x;
            node.y = y;
        }
    }

    /// Replace a node's text. Not kind-checked; only text nodes render it.
    pub fn update_node_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.into());
        }
    }

    /// Assign media content, returning whatever it replaced so the caller
    /// can release a transient handle.
    pub fn set_node_content(&mut self, id: NodeId, content: impl Into<String>) -> Option<String> {
        self.node_mut(id)
            .and_then(|node| node.content.replace(content.into()))
    }

    /// Remove a node and every connection touching it. Returns the removed
    /// node so its content can be released.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(pos);
        self.connections.retain(|c| c.from != id && c.to != id);
        Some(node)
    }

    /// Create a directed connection. Self-loops are rejected as a no-op.
    pub fn add_connection(&mut self, from: NodeId, to: NodeId) -> Option<ConnectionId> {
        if from == to {
            return None;
        }
        let id = ConnectionId::generate(from, to);
        self.connections.push(Connection {
            id: id.clone(),
            from,
            to,
        });
        Some(id)
    }

    /// Remove a connection by id. Returns whether anything was removed.
    pub fn delete_connection(&mut self, id: &ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| &c.id != id);
        self.connections.len() != before
    }

    /// Empty the canvas and reset the id counter. Returns the removed
    /// nodes so transient media handles can be released.
    pub fn clear(&mut self) -> Vec<Node> {
        self.connections.clear();
        self.next_id = 1;
        std::mem::take(&mut self.nodes)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    /// Inbound and outbound connection counts for a node, shown as badges
    /// next to it on the canvas.
    pub fn connection_degree(&self, id: NodeId) -> (usize, usize) {
        let inbound = self.connections.iter().filter(|c| c.to == id).count();
        let outbound = self.connections.iter().filter(|c| c.from == id).count();
        (inbound, outbound)
    }

    /// Connections whose endpoints no longer resolve. Cascading delete
    /// keeps this empty; tests assert on it.
    pub fn dangling_connections(&self) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| self.node(c.from).is_none() || self.node(c.to).is_none())
            .collect()
    }

    pub(crate) fn replace(&mut self, nodes: Vec<Node>, connections: Vec<Connection>) -> Vec<Node> {
        self.next_id = nodes.iter().map(|n| n.id.0).max().unwrap_or(0) + 1;
        self.connections = connections;
        std::mem::replace(&mut self.nodes, nodes)
    }
}
