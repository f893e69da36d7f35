pub mod document;
pub mod geometry;
pub mod id;
pub mod model;

pub use document::{CanvasDocument, DocumentError, export_filename, export_json, parse_document};
pub use geometry::{ARROW_MARGIN, Anchor, Point, arrow_segment, shorten_toward};
pub use id::{ConnectionId, NodeId};
pub use model::{CanvasGraph, Connection, Node, NodeKind};
