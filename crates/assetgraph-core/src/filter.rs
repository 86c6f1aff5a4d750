//! Filter combinators for listing nodes and relationships
//!
//! A listing call takes a slice of filters and keeps the items that match
//! all of them. Any `Fn(&T) -> bool` closure is a filter, so callers can
//! inspect node bodies with their own decoding:
//!
//! ```
//! use assetgraph_core::{filter, Graph, GraphView, Node};
//!
//! let graph = Graph::new();
//! graph.insert_node("Bobita", "puppy", b"500".to_vec());
//!
//! let strong = |node: &Node| node.body.as_slice() == b"500";
//! let puppies = filter::node_label_in(["puppy"]);
//! assert_eq!(graph.list_nodes(&[&puppies, &strong]).len(), 1);
//! ```

use crate::id::NodeId;
use crate::node::Node;
use crate::relationship::Relationship;

/// Predicate over a graph item
pub trait Filter<T>: Send + Sync {
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Filter<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// True when every filter matches (an empty set matches everything)
pub fn matches_all<T>(filters: &[&dyn Filter<T>], item: &T) -> bool {
    filters.iter().all(|f| f.matches(item))
}

/// Nodes whose label is any of `labels`
pub fn node_label_in<I, S>(labels: I) -> impl Filter<Node>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
    move |node: &Node| labels.iter().any(|l| *l == node.label)
}

/// Nodes whose name is any of `names`
pub fn node_name_in<I, S>(names: I) -> impl Filter<Node>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    move |node: &Node| names.iter().any(|n| *n == node.name)
}

/// Relationships with exactly this label
pub fn relationship_label(label: impl Into<String>) -> impl Filter<Relationship> {
    let label = label.into();
    move |rel: &Relationship| rel.label == label
}

/// Relationships leaving the given node
pub fn relationship_from(id: NodeId) -> impl Filter<Relationship> {
    move |rel: &Relationship| rel.from == id
}

/// Relationships pointing at the given node
pub fn relationship_to(id: NodeId) -> impl Filter<Relationship> {
    move |rel: &Relationship| rel.to == id
}
