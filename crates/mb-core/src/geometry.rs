//! 2D helpers for hit-testing and arrow rendering.
//!
//! Connections are drawn from center to center, with the end pulled back by
//! [`ARROW_MARGIN`] so the arrowhead terminates at the target's border
//! instead of disappearing under it.

use crate::model::Node;

/// How far an arrow stops short of the target node's center.
pub const ARROW_MARGIN: f32 = 10.0;

/// A point on the canvas, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One of the four fixed connection points on a node's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Right,
    Bottom,
    Left,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Top, Anchor::Right, Anchor::Bottom, Anchor::Left];

    /// Where this anchor sits on a node: the midpoint of the matching border.
    pub fn position(self, node: &Node) -> Point {
        match self {
            Anchor::Top => Point::new(node.x + node.width / 2.0, node.y),
            Anchor::Right => Point::new(node.x + node.width, node.y + node.height / 2.0),
            Anchor::Bottom => Point::new(node.x + node.width / 2.0, node.y + node.height),
            Anchor::Left => Point::new(node.x, node.y + node.height / 2.0),
        }
    }
}

impl Node {
    /// Center of the node's bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a canvas point falls inside the node's body.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Top-left corner, used to compute drag grab offsets.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Move `end` toward `start` by `margin` along the connecting vector.
///
/// A zero-length vector has no direction; `end` is returned unchanged
/// rather than dividing by zero.
pub fn shorten_toward(start: Point, end: Point, margin: f32) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return end;
    }
    Point::new(end.x - dx / length * margin, end.y - dy / length * margin)
}

/// The segment a renderer draws for a committed connection: from the source
/// center to just short of the target center.
pub fn arrow_segment(from: &Node, to: &Node) -> (Point, Point) {
    let start = from.center();
    let end = shorten_toward(start, to.center(), ARROW_MARGIN);
    (start, end)
}
