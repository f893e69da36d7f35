pub mod controller;
pub mod input;
pub mod media;
pub mod session;
pub mod transfer;

pub use controller::{Gesture, PointerController};
pub use input::{Hit, InputEvent};
pub use media::{MediaPayload, MediaRequest};
pub use session::{CanvasMutation, EditorSession};
pub use transfer::ExportBundle;
