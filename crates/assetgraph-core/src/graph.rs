//! Read-side graph trait and the plain graph state

use crate::connection::{Chain, ConnectionFinder};
use crate::error::{Error, Result};
use crate::filter::{matches_all, Filter};
use crate::id::{NodeId, RelationshipId};
use crate::node::Node;
use crate::relationship::Relationship;
use std::collections::HashMap;

/// Read operations shared by the live store and its snapshots
///
/// Every method returns owned copies; changing a returned value never
/// changes the graph.
pub trait GraphView {
    /// Get a node by ID
    fn get_node(&self, id: &NodeId) -> Result<Node>;

    /// List the nodes matching every filter, in no particular order
    fn list_nodes(&self, filters: &[&dyn Filter<Node>]) -> Vec<Node>;

    /// Get a relationship by ID
    fn get_relationship(&self, id: &RelationshipId) -> Result<Relationship>;

    /// List the relationships matching every filter, in no particular order
    fn list_relationships(&self, filters: &[&dyn Filter<Relationship>]) -> Vec<Relationship>;

    /// Every simple directed path from `from` to `to`
    fn list_connections(&self, from: &Node, to: &Node) -> Vec<Chain> {
        ConnectionFinder::new(self).find(from, to)
    }
}

/// Nodes and relationships of a graph, without any locking
///
/// [`Graph`](crate::Graph) keeps one of these behind its lock, and
/// [`Graph::snapshot`](crate::Graph::snapshot) hands out copies. A snapshot
/// never changes, so traversals over it see one consistent state.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    nodes: HashMap<NodeId, Node>,
    relationships: HashMap<RelationshipId, Relationship>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    pub(crate) fn remove_node(&mut self, id: &NodeId) -> Result<Node> {
        self.nodes
            .remove(id)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    pub(crate) fn insert_relationship(&mut self, relationship: Relationship) {
        self.relationships
            .insert(relationship.id.clone(), relationship);
    }
}

impl GraphView for GraphSnapshot {
    fn get_node(&self, id: &NodeId) -> Result<Node> {
        self.nodes
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    fn list_nodes(&self, filters: &[&dyn Filter<Node>]) -> Vec<Node> {
        self.nodes
            .values()
            .filter(|node| matches_all(filters, *node))
            .cloned()
            .collect()
    }

    fn get_relationship(&self, id: &RelationshipId) -> Result<Relationship> {
        self.relationships
            .get(id)
            .cloned()
            .ok_or_else(|| Error::RelationshipNotFound(id.clone()))
    }

    fn list_relationships(&self, filters: &[&dyn Filter<Relationship>]) -> Vec<Relationship> {
        self.relationships
            .values()
            .filter(|rel| matches_all(filters, *rel))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;

    fn sample() -> (GraphSnapshot, Node, Node) {
        let mut snapshot = GraphSnapshot::default();
        let bobita = Node::new("Bobita", "puppy", Vec::new());
        let smaug = Node::new("Smaug", "dragon", Vec::new());
        snapshot.insert_node(bobita.clone());
        snapshot.insert_node(smaug.clone());
        snapshot.insert_relationship(Relationship::new(&bobita, &smaug, "enemies"));
        (snapshot, bobita, smaug)
    }

    #[test]
    fn test_snapshot_reads() {
        let (snapshot, bobita, smaug) = sample();

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.relationship_count(), 1);
        assert_eq!(snapshot.get_node(&bobita.id).unwrap(), bobita);

        let dragons = snapshot.list_nodes(&[&filter::node_label_in(["dragon"])]);
        assert_eq!(dragons, vec![smaug.clone()]);

        let incoming = snapshot.list_relationships(&[&filter::relationship_to(smaug.id.clone())]);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].from, bobita.id);
    }

    #[test]
    fn test_snapshot_missing_items() {
        let (mut snapshot, bobita, _) = sample();

        let missing = NodeId::new();
        assert_eq!(
            snapshot.get_node(&missing),
            Err(Error::NodeNotFound(missing.clone()))
        );
        assert!(snapshot.node_mut(&missing).is_err());
        assert!(snapshot
            .get_relationship(&RelationshipId::new())
            .unwrap_err()
            .is_not_found());

        snapshot.remove_node(&bobita.id).unwrap();
        assert!(snapshot.remove_node(&bobita.id).unwrap_err().is_not_found());
    }
}
