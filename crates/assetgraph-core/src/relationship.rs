//! Relationship (edge) types

use crate::id::{NodeId, RelationshipId};
use crate::node::Node;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed, labeled relationship between two nodes
///
/// The endpoint names and labels are a snapshot taken when the relationship
/// was created. They are kept for rendering and are not updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Source node ID
    pub from: NodeId,

    /// Source node name (for convenience)
    pub from_name: String,

    /// Source node label (for convenience)
    pub from_label: String,

    /// Target node ID
    pub to: NodeId,

    /// Target node name (for convenience)
    pub to_name: String,

    /// Target node label (for convenience)
    pub to_label: String,

    /// Type of relationship (e.g., "friends", "enemies")
    pub label: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub(crate) fn new(from: &Node, to: &Node, label: impl Into<String>) -> Self {
        Self {
            id: RelationshipId::new(),
            from: from.id.clone(),
            from_name: from.name.clone(),
            from_label: from.label.clone(),
            to: to.id.clone(),
            to_name: to.name.clone(),
            to_label: to.label.clone(),
            label: label.into(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})-[{}]->({})", self.from_name, self.label, self.to_name)
    }
}
