//! Concurrent in-memory graph store

use crate::error::{Endpoint, Error, Result};
use crate::filter::Filter;
use crate::graph::{GraphSnapshot, GraphView};
use crate::id::{NodeId, RelationshipId};
use crate::node::Node;
use crate::relationship::Relationship;
use parking_lot::RwLock;

/// Thread-safe property graph
///
/// Nodes and relationships live behind a single reader/writer lock, so a
/// locked operation always sees both collections in the same state. Writes
/// (insert, update, delete, add relationship) take the lock exclusively and
/// reads share it.
///
/// Relationships are never removed. Deleting a node leaves any relationship
/// that points at it in place; connection finding skips those.
#[derive(Debug, Default)]
pub struct Graph {
    inner: RwLock<GraphSnapshot>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node and return a copy of it
    pub fn insert_node(
        &self,
        name: impl Into<String>,
        label: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Node {
        let node = Node::new(name, label, body.into());
        self.inner.write().insert_node(node.clone());
        tracing::debug!("Inserted node {} ({}: {})", node.id, node.label, node.name);
        node
    }

    /// Replace the body of a node
    ///
    /// Name, label and ID are left untouched.
    pub fn update_node(&self, id: &NodeId, body: impl Into<Vec<u8>>) -> Result<Node> {
        let mut inner = self.inner.write();
        let node = inner.node_mut(id)?;
        node.replace_body(body.into());
        tracing::debug!("Updated body of node {}", id);
        Ok(node.clone())
    }

    /// Remove a node
    pub fn delete_node(&self, id: &NodeId) -> Result<()> {
        let removed = self.inner.write().remove_node(id)?;
        tracing::debug!("Deleted node {} ({})", id, removed.name);
        Ok(())
    }

    /// Add a directed relationship between two stored nodes
    ///
    /// Both endpoints are looked up again by ID, so a stale copy of a node
    /// that has since been deleted is rejected. The lookups and the insert
    /// are separate critical sections: a node deleted in between still gets
    /// the relationship.
    pub fn add_relationship(
        &self,
        from: &Node,
        to: &Node,
        label: impl Into<String>,
    ) -> Result<Relationship> {
        let from_node = self
            .get_node(&from.id)
            .map_err(|_| Error::MissingEndpoint {
                endpoint: Endpoint::Source,
                id: from.id.clone(),
            })?;
        let to_node = self.get_node(&to.id).map_err(|_| Error::MissingEndpoint {
            endpoint: Endpoint::Target,
            id: to.id.clone(),
        })?;

        let relationship = Relationship::new(&from_node, &to_node, label);
        self.inner
            .write()
            .insert_relationship(relationship.clone());
        tracing::debug!("Added relationship {}", relationship);
        Ok(relationship)
    }

    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.read().relationship_count()
    }

    /// Copy the whole graph under one read lock
    pub fn snapshot(&self) -> GraphSnapshot {
        self.inner.read().clone()
    }
}

impl GraphView for Graph {
    fn get_node(&self, id: &NodeId) -> Result<Node> {
        self.inner.read().get_node(id)
    }

    fn list_nodes(&self, filters: &[&dyn Filter<Node>]) -> Vec<Node> {
        self.inner.read().list_nodes(filters)
    }

    fn get_relationship(&self, id: &RelationshipId) -> Result<Relationship> {
        self.inner.read().get_relationship(id)
    }

    fn list_relationships(&self, filters: &[&dyn Filter<Relationship>]) -> Vec<Relationship> {
        self.inner.read().list_relationships(filters)
    }
}
