//! Pointer gesture state machine.
//!
//! The controller owns every piece of transient interaction state — the
//! active gesture, the node in text-edit mode, the selected connection —
//! and none of it is ever serialized. It translates input events into
//! [`CanvasMutation`] values; applying them is the session's job, which
//! keeps the machine deterministic and testable without a rendering layer.

use crate::input::{Hit, InputEvent};
use crate::session::CanvasMutation;
use mb_core::geometry::Point;
use mb_core::id::{ConnectionId, NodeId};
use mb_core::model::{CanvasGraph, NodeKind};

/// The in-progress pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// A node body was grabbed; `grab_offset` is the pointer position
    /// relative to the node's top-left corner.
    Drag { node: NodeId, grab_offset: Point },
    /// A connection is being drawn out of `from`. `cursor` is the free end
    /// of the dashed preview line, absent until the first move.
    Connect { from: NodeId, cursor: Option<Point> },
}

#[derive(Debug, Default)]
pub struct PointerController {
    gesture: Gesture,
    editing: Option<NodeId>,
    selected_connection: Option<ConnectionId>,
}

impl Default for Gesture {
    fn default() -> Self {
        Gesture::Idle
    }
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// The node currently in text-edit mode, if any.
    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    /// The connection selected for potential deletion, if any.
    pub fn selected_connection(&self) -> Option<&ConnectionId> {
        self.selected_connection.as_ref()
    }

    /// Process a pointer event against what the renderer hit-tested under
    /// it, returning the mutations to apply.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: &Hit,
        graph: &CanvasGraph,
    ) -> Vec<CanvasMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y), hit, graph),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(hit),
            InputEvent::PointerLeave => {
                // Fail-safe: leaving the canvas releases the gesture.
                self.gesture = Gesture::Idle;
                Vec::new()
            }
            InputEvent::DoubleClick { .. } => {
                self.double_click(hit, graph);
                Vec::new()
            }
        }
    }

    fn pointer_down(&mut self, pointer: Point, hit: &Hit, graph: &CanvasGraph) -> Vec<CanvasMutation> {
        match hit {
            Hit::ConnectionPoint { node, .. } => {
                self.gesture = Gesture::Connect {
                    from: *node,
                    cursor: None,
                };
            }
            Hit::Node(id) => {
                if let Some(node) = graph.node(*id) {
                    let origin = node.origin();
                    self.gesture = Gesture::Drag {
                        node: *id,
                        grab_offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
                    };
                }
            }
            Hit::Connection(id) => {
                self.selected_connection = Some(id.clone());
            }
            Hit::Canvas => {
                self.selected_connection = None;
            }
        }
        Vec::new()
    }

    fn pointer_move(&mut self, pointer: Point) -> Vec<CanvasMutation> {
        match &mut self.gesture {
            Gesture::Drag { node, grab_offset } => vec![CanvasMutation::MoveNode {
                id: *node,
                x: pointer.x - grab_offset.x,
                y: pointer.y - grab_offset.y,
            }],
            Gesture::Connect { cursor, .. } => {
                *cursor = Some(pointer);
                Vec::new()
            }
            Gesture::Idle => Vec::new(),
        }
    }

    fn pointer_up(&mut self, hit: &Hit) -> Vec<CanvasMutation> {
        let finished = std::mem::take(&mut self.gesture);
        match finished {
            Gesture::Connect { from, .. } => match hit {
                // Only a release on another node's connection point commits.
                Hit::ConnectionPoint { node: to, .. } if *to != from => {
                    vec![CanvasMutation::AddConnection { from, to: *to }]
                }
                _ => Vec::new(),
            },
            Gesture::Drag { .. } | Gesture::Idle => Vec::new(),
        }
    }

    fn double_click(&mut self, hit: &Hit, graph: &CanvasGraph) {
        if let Hit::Node(id) = hit
            && let Some(node) = graph.node(*id)
            && node.kind == NodeKind::Text
        {
            // Entering edit mode on a new node implicitly leaves any other.
            self.editing = Some(*id);
        }
    }

    /// Put a node straight into edit mode (used for freshly created text
    /// nodes).
    pub fn begin_edit(&mut self, id: NodeId) {
        self.editing = Some(id);
    }

    /// Commit the edited text (textarea lost focus) and leave edit mode.
    pub fn commit_edit(&mut self, text: impl Into<String>) -> Vec<CanvasMutation> {
        match self.editing.take() {
            Some(id) => vec![CanvasMutation::SetText {
                id,
                text: text.into(),
            }],
            None => Vec::new(),
        }
    }

    /// The dashed preview line for an in-progress connect gesture: from the
    /// source node's center to the pointer.
    pub fn preview_segment(&self, graph: &CanvasGraph) -> Option<(Point, Point)> {
        if let Gesture::Connect {
            from,
            cursor: Some(cursor),
        } = self.gesture
        {
            let start = graph.node(from)?.center();
            return Some((start, cursor));
        }
        None
    }

    /// A node was removed; drop any transient state that referenced it so
    /// the machine never points at a dead id.
    pub fn node_removed(&mut self, id: NodeId) {
        match self.gesture {
            Gesture::Drag { node, .. } if node == id => self.gesture = Gesture::Idle,
            Gesture::Connect { from, .. } if from == id => self.gesture = Gesture::Idle,
            _ => {}
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// A connection was removed; clear the selection if it pointed there.
    pub fn connection_removed(&mut self, id: &ConnectionId) {
        if self.selected_connection.as_ref() == Some(id) {
            self.selected_connection = None;
        }
    }

    /// Drop a selection whose connection no longer exists (cascade delete).
    pub fn prune_selection(&mut self, graph: &CanvasGraph) {
        let stale = self
            .selected_connection
            .as_ref()
            .is_some_and(|id| graph.connection(id).is_none());
        if stale {
            self.selected_connection = None;
        }
    }

    /// Reset every piece of transient state (clear-all, import).
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.editing = None;
        self.selected_connection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph_with_two_nodes() -> (CanvasGraph, NodeId, NodeId) {
        let mut graph = CanvasGraph::new();
        let a = graph.add_node(NodeKind::Text);
        let b = graph.add_node(NodeKind::Image);
        graph.update_node_position(a, 0.0, 0.0);
        graph.update_node_position(b, 400.0, 0.0);
        (graph, a, b)
    }

    fn anchor_hit(node: NodeId) -> Hit {
        Hit::ConnectionPoint {
            node,
            anchor: mb_core::geometry::Anchor::Right,
        }
    }

    #[test]
    fn drag_tracks_grab_offset() {
        let (graph, a, _) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        let muts = ctrl.handle(
            &InputEvent::PointerDown { x: 30.0, y: 50.0 },
            &Hit::Node(a),
            &graph,
        );
        assert!(muts.is_empty(), "press alone must not mutate");
        assert_eq!(
            ctrl.gesture(),
            Gesture::Drag {
                node: a,
                grab_offset: Point::new(30.0, 50.0)
            }
        );

        let muts = ctrl.handle(
            &InputEvent::PointerMove { x: 130.0, y: 90.0 },
            &Hit::Canvas,
            &graph,
        );
        assert_eq!(
            muts,
            vec![CanvasMutation::MoveNode {
                id: a,
                x: 100.0,
                y: 40.0
            }]
        );

        ctrl.handle(
            &InputEvent::PointerUp { x: 130.0, y: 90.0 },
            &Hit::Canvas,
            &graph,
        );
        assert_eq!(ctrl.gesture(), Gesture::Idle);
    }

    #[test]
    fn connect_commits_on_other_nodes_anchor() {
        let (graph, a, b) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 200.0, y: 100.0 },
            &anchor_hit(a),
            &graph,
        );
        assert!(matches!(ctrl.gesture(), Gesture::Connect { from, .. } if from == a));

        // Moving updates the preview free end.
        ctrl.handle(
            &InputEvent::PointerMove { x: 300.0, y: 80.0 },
            &Hit::Canvas,
            &graph,
        );
        let (start, end) = ctrl.preview_segment(&graph).unwrap();
        assert_eq!(start, Point::new(100.0, 100.0));
        assert_eq!(end, Point::new(300.0, 80.0));

        let muts = ctrl.handle(
            &InputEvent::PointerUp { x: 410.0, y: 100.0 },
            &anchor_hit(b),
            &graph,
        );
        assert_eq!(muts, vec![CanvasMutation::AddConnection { from: a, to: b }]);
        assert_eq!(ctrl.gesture(), Gesture::Idle);
    }

    #[test]
    fn connect_released_over_canvas_discards() {
        let (graph, a, _) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 200.0, y: 100.0 },
            &anchor_hit(a),
            &graph,
        );
        ctrl.handle(
            &InputEvent::PointerMove { x: 500.0, y: 500.0 },
            &Hit::Canvas,
            &graph,
        );
        let muts = ctrl.handle(
            &InputEvent::PointerUp { x: 500.0, y: 500.0 },
            &Hit::Canvas,
            &graph,
        );
        assert!(muts.is_empty());
        assert_eq!(ctrl.gesture(), Gesture::Idle);
        assert_eq!(ctrl.preview_segment(&graph), None);
    }

    #[test]
    fn connect_back_onto_source_discards() {
        let (graph, a, _) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 200.0, y: 100.0 },
            &anchor_hit(a),
            &graph,
        );
        let muts = ctrl.handle(
            &InputEvent::PointerUp { x: 200.0, y: 100.0 },
            &anchor_hit(a),
            &graph,
        );
        assert!(muts.is_empty());
    }

    #[test]
    fn leaving_canvas_resets_gesture() {
        let (graph, a, _) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 10.0, y: 10.0 },
            &Hit::Node(a),
            &graph,
        );
        ctrl.handle(&InputEvent::PointerLeave, &Hit::Canvas, &graph);
        assert_eq!(ctrl.gesture(), Gesture::Idle);
    }

    #[test]
    fn double_click_edits_text_nodes_only() {
        let (graph, a, b) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::DoubleClick { x: 10.0, y: 10.0 },
            &Hit::Node(b),
            &graph,
        );
        assert_eq!(ctrl.editing(), None, "image nodes have no text editor");

        ctrl.handle(
            &InputEvent::DoubleClick { x: 10.0, y: 10.0 },
            &Hit::Node(a),
            &graph,
        );
        assert_eq!(ctrl.editing(), Some(a));

        let muts = ctrl.commit_edit("updated");
        assert_eq!(
            muts,
            vec![CanvasMutation::SetText {
                id: a,
                text: "updated".into()
            }]
        );
        assert_eq!(ctrl.editing(), None);
    }

    #[test]
    fn editing_moves_to_the_latest_node() {
        let mut graph = CanvasGraph::new();
        let a = graph.add_node(NodeKind::Text);
        let b = graph.add_node(NodeKind::Text);
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::DoubleClick { x: 0.0, y: 0.0 },
            &Hit::Node(a),
            &graph,
        );
        ctrl.handle(
            &InputEvent::DoubleClick { x: 0.0, y: 0.0 },
            &Hit::Node(b),
            &graph,
        );
        assert_eq!(ctrl.editing(), Some(b));
    }

    #[test]
    fn selection_follows_clicks() {
        let (mut graph, a, b) = graph_with_two_nodes();
        let conn = graph.add_connection(a, b).unwrap();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 250.0, y: 100.0 },
            &Hit::Connection(conn.clone()),
            &graph,
        );
        assert_eq!(ctrl.selected_connection(), Some(&conn));

        ctrl.handle(
            &InputEvent::PointerUp { x: 250.0, y: 100.0 },
            &Hit::Canvas,
            &graph,
        );
        assert_eq!(ctrl.selected_connection(), Some(&conn), "release keeps it");

        ctrl.handle(
            &InputEvent::PointerDown { x: 600.0, y: 400.0 },
            &Hit::Canvas,
            &graph,
        );
        assert_eq!(ctrl.selected_connection(), None);
    }

    #[test]
    fn removing_the_active_node_resets_state() {
        let (graph, a, _) = graph_with_two_nodes();
        let mut ctrl = PointerController::new();

        ctrl.handle(
            &InputEvent::PointerDown { x: 10.0, y: 10.0 },
            &Hit::Node(a),
            &graph,
        );
        ctrl.begin_edit(a);
        ctrl.node_removed(a);
        assert_eq!(ctrl.gesture(), Gesture::Idle);
        assert_eq!(ctrl.editing(), None);
    }
}
