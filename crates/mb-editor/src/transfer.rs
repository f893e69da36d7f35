//! File export/import tasks.
//!
//! Export is synchronous: serialize the graph and suggest a date-stamped
//! filename. Import is the same single-slot handshake as the media picker —
//! the host opens its file dialog after `request`, and the file's text
//! arrives later through [`crate::session::EditorSession::complete_import`].

use mb_core::document::{self, DocumentError};
use mb_core::model::CanvasGraph;
use time::OffsetDateTime;

/// A serialized document plus the suggested download name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub filename: String,
    pub json: String,
}

/// Serialize the graph for download. Never mutates state.
pub fn export(graph: &CanvasGraph) -> Result<ExportBundle, DocumentError> {
    Ok(ExportBundle {
        filename: document::export_filename(OffsetDateTime::now_utc().date()),
        json: document::export_json(graph)?,
    })
}

/// The single in-flight import slot.
#[derive(Debug, Default)]
pub struct ImportSlot {
    pending: bool,
}

impl ImportSlot {
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Consume the slot; returns whether an import was actually pending.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> bool {
        self.pending
    }
}
