//! Persisted JSON document: export, validation, and import.
//!
//! The document is `{ "nodes": [...], "connections": [...] }`, both in
//! insertion order. Import validates the structure over the raw JSON value
//! before building anything typed, so a bad file can never leave the graph
//! partially replaced — it either loads wholesale or the current state is
//! untouched.

use crate::model::{CanvasGraph, Connection, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::Date;

/// Why a document failed to import. Messages are user-presentable.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an object")]
    NotAnObject,

    #[error("document is missing a `{0}` array")]
    MissingCollection(&'static str),

    #[error("node at index {0} is malformed (needs numeric `id`, `x`, `y` and a string `type`)")]
    MalformedNode(usize),

    #[error("node at index {index} has unknown type `{ty}`")]
    UnknownNodeType { index: usize, ty: String },

    #[error("connection at index {0} is malformed (needs string `id` and numeric `from`, `to`)")]
    MalformedConnection(usize),
}

/// A fully validated, typed document ready to be restored into a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

/// Serialize the full graph as a pretty-printed JSON document.
pub fn export_json(graph: &CanvasGraph) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Suggested (never enforced) name for an exported file.
pub fn export_filename(date: Date) -> String {
    format!(
        "mindboard-{:04}-{:02}-{:02}.json",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse and validate a document. On any failure the whole document is
/// rejected; the caller's state is never touched.
pub fn parse_document(input: &str) -> Result<CanvasDocument, DocumentError> {
    let value: Value = serde_json::from_str(input)?;
    let root = value.as_object().ok_or(DocumentError::NotAnObject)?;

    let nodes = root
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(DocumentError::MissingCollection("nodes"))?;
    let connections = root
        .get("connections")
        .and_then(Value::as_array)
        .ok_or(DocumentError::MissingCollection("connections"))?;

    for (index, node) in nodes.iter().enumerate() {
        let obj = node
            .as_object()
            .ok_or(DocumentError::MalformedNode(index))?;
        let shape_ok = obj.get("id").is_some_and(Value::is_u64)
            && obj.get("x").is_some_and(Value::is_number)
            && obj.get("y").is_some_and(Value::is_number);
        if !shape_ok {
            return Err(DocumentError::MalformedNode(index));
        }
        match obj.get("type").and_then(Value::as_str) {
            Some("text" | "image" | "audio" | "video") => {}
            Some(other) => {
                return Err(DocumentError::UnknownNodeType {
                    index,
                    ty: other.to_owned(),
                });
            }
            None => return Err(DocumentError::MalformedNode(index)),
        }
    }

    for (index, conn) in connections.iter().enumerate() {
        let obj = conn
            .as_object()
            .ok_or(DocumentError::MalformedConnection(index))?;
        let shape_ok = obj.get("id").is_some_and(Value::is_string)
            && obj.get("from").is_some_and(Value::is_u64)
            && obj.get("to").is_some_and(Value::is_u64);
        if !shape_ok {
            return Err(DocumentError::MalformedConnection(index));
        }
    }

    // Shape is verified; remaining field-level mismatches (e.g. a non-string
    // `content`) still surface as a Json error without mutating anything.
    Ok(serde_json::from_value(value)?)
}

impl CanvasGraph {
    /// Replace the whole graph with an imported document.
    ///
    /// The next-id counter becomes `max(id) + 1` (1 for an empty document).
    /// Transient `blob:` audio/video handles in the incoming document are
    /// dropped to `None`: they reference objects from a previous session and
    /// cannot be re-resolved. Returns the displaced nodes so live handles
    /// can be released.
    pub fn restore(&mut self, doc: CanvasDocument) -> Vec<Node> {
        let CanvasDocument {
            mut nodes,
            connections,
        } = doc;
        for node in &mut nodes {
            if node.has_transient_content() {
                log::debug!("dropping transient content for node {}", node.id);
                node.content = None;
            }
        }
        self.replace(nodes, connections)
    }
}
