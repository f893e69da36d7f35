use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a node on the canvas.
///
/// Allocated monotonically by [`crate::model::CanvasGraph`] — strictly
/// increasing, never reused within a session. Serialized as a bare JSON
/// number to match the persisted document schema.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a connection between two nodes.
///
/// Composed from the endpoint ids plus the creation timestamp in
/// milliseconds (`"{from}-{to}-{millis}"`). Serialized as a bare JSON
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    /// Compose an id from its parts. Exposed so tests can build
    /// deterministic ids.
    pub fn compose(from: NodeId, to: NodeId, millis: i128) -> Self {
        ConnectionId(format!("{from}-{to}-{millis}"))
    }

    /// Generate an id for a connection created right now.
    pub fn generate(from: NodeId, to: NodeId) -> Self {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self::compose(from, to, millis)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
