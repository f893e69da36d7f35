//! Input events and hit-test results fed to the pointer controller.
//!
//! The rendering layer owns the real event loop; it translates raw events
//! into these values (canvas-relative coordinates) and resolves what sits
//! under the pointer before calling the controller.

use mb_core::geometry::{Anchor, Point};
use mb_core::id::{ConnectionId, NodeId};

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// The pointer left the canvas. Treated as a release so a drag or
    /// connect gesture can never get stuck.
    PointerLeave,
    DoubleClick { x: f32, y: f32 },
}

impl InputEvent {
    pub fn position(&self) -> Option<Point> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::DoubleClick { x, y } => Some(Point::new(x, y)),
            InputEvent::PointerLeave => None,
        }
    }
}

/// What the renderer resolved under the pointer.
///
/// Connection points shadow the node body: a press on one must start a
/// connect gesture and never a drag, so the renderer reports
/// `ConnectionPoint` rather than `Node` for those pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    /// The body of a node.
    Node(NodeId),
    /// One of the four anchor dots on a node's border.
    ConnectionPoint { node: NodeId, anchor: Anchor },
    /// A rendered connection line.
    Connection(ConnectionId),
    /// Empty canvas.
    Canvas,
}
