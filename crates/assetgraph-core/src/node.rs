//! Node types

use crate::id::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the graph
///
/// Nodes are created by [`Graph::insert_node`](crate::Graph::insert_node).
/// Only the body can change afterwards, through
/// [`Graph::update_node`](crate::Graph::update_node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Display name (not required to be unique)
    pub name: String,

    /// Type tag, e.g. "puppy" or "dragon"
    pub label: String,

    /// Opaque payload, interpreted by callers only
    pub body: Vec<u8>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last body update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, label: impl Into<String>, body: Vec<u8>) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::new(),
            name: name.into(),
            label: label.into(),
            body,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn replace_body(&mut self, body: Vec<u8>) {
        self.body = body;
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
