//! Connection finding: every simple path between two nodes
//!
//! The search is a depth-first walk over outgoing relationships, driven by an
//! explicit stack so path length is not bounded by the thread stack. Each
//! branch carries its own copy of the visited node set, so sibling branches
//! never prune each other, and a node is never entered twice on the same path.
//! Parallel relationships between the same pair of nodes produce distinct
//! chains.
//!
//! Over a live [`Graph`](crate::Graph) every step is a separate short read,
//! so concurrent writers can change the graph mid-search. Search a
//! [`GraphSnapshot`](crate::GraphSnapshot) when a stable view is required.

use crate::filter::{self, Filter};
use crate::graph::GraphView;
use crate::id::NodeId;
use crate::node::Node;
use crate::relationship::Relationship;
use serde::Serialize;
use std::collections::HashSet;

/// One hop of a chain: a node and the relationship leaving it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainLink {
    pub node: Node,
    pub relationship: Relationship,
}

/// A complete simple path from a source node to a destination node
///
/// Renders as node names and relationship labels joined by `->`, e.g.
/// `Bobita->friends->Azor->enemies->Smaug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    links: Vec<ChainLink>,
    destination: Node,
}

impl Chain {
    /// Hops in path order
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn source(&self) -> &Node {
        self.links
            .first()
            .map(|link| &link.node)
            .unwrap_or(&self.destination)
    }

    pub fn destination(&self) -> &Node {
        &self.destination
    }

    /// Every node on the path, source and destination included
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.links
            .iter()
            .map(|link| &link.node)
            .chain(std::iter::once(&self.destination))
    }

    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.links.iter().map(|link| &link.relationship)
    }

    /// Number of relationships traversed
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for link in &self.links {
            write!(f, "{}->{}->", link.node, link.relationship.label)?;
        }
        write!(f, "{}", self.destination)
    }
}

/// Configurable path search over any [`GraphView`]
///
/// ```
/// use assetgraph_core::{filter, ConnectionFinder, Graph};
///
/// let graph = Graph::new();
/// let a = graph.insert_node("A", "node", Vec::new());
/// let b = graph.insert_node("B", "node", Vec::new());
/// graph.add_relationship(&a, &b, "knows").unwrap();
///
/// let chains = ConnectionFinder::new(&graph)
///     .max_hops(3)
///     .through(filter::relationship_label("knows"))
///     .find(&a, &b);
/// assert_eq!(chains[0].to_string(), "A->knows->B");
/// ```
pub struct ConnectionFinder<'g, V: GraphView + ?Sized> {
    view: &'g V,
    max_hops: Option<usize>,
    through: Vec<Box<dyn Filter<Relationship> + 'g>>,
}

impl<'g, V: GraphView + ?Sized> ConnectionFinder<'g, V> {
    pub fn new(view: &'g V) -> Self {
        Self {
            view,
            max_hops: None,
            through: Vec::new(),
        }
    }

    /// Do not explore paths longer than `hops` relationships
    pub fn max_hops(mut self, hops: usize) -> Self {
        self.max_hops = Some(hops);
        self
    }

    /// Only follow relationships matching `filter` (repeatable, all must match)
    pub fn through(mut self, filter: impl Filter<Relationship> + 'g) -> Self {
        self.through.push(Box::new(filter));
        self
    }

    /// Every simple path from `from` to `to`, in no particular order
    ///
    /// A node is never connected to itself: `find(x, x)` is empty.
    pub fn find(&self, from: &Node, to: &Node) -> Vec<Chain> {
        let mut visited = HashSet::new();
        visited.insert(from.id.clone());

        let mut chains = Vec::new();
        // Links from `from` to the top frame's node; one fewer than frames.
        let mut path: Vec<ChainLink> = Vec::new();
        let mut stack = vec![self.frame(from.clone(), visited, 0)];

        while let Some(frame) = stack.last_mut() {
            let rel = match frame.outgoing.next() {
                Some(rel) => rel,
                None => {
                    stack.pop();
                    path.pop();
                    continue;
                }
            };

            if frame.visited.contains(&rel.to) || !self.through.iter().all(|f| f.matches(&rel)) {
                continue;
            }

            if rel.to == to.id {
                let mut links = Vec::with_capacity(path.len() + 1);
                links.extend_from_slice(&path);
                links.push(ChainLink {
                    node: frame.node.clone(),
                    relationship: rel,
                });
                chains.push(Chain {
                    links,
                    destination: to.clone(),
                });
                continue;
            }

            let next = match self.view.get_node(&rel.to) {
                Ok(node) => node,
                Err(_) => {
                    tracing::trace!("Skipping relationship to missing node {}", rel.to);
                    continue;
                }
            };

            let mut branch = frame.visited.clone();
            branch.insert(rel.to.clone());
            path.push(ChainLink {
                node: frame.node.clone(),
                relationship: rel,
            });
            let frame = self.frame(next, branch, path.len());
            stack.push(frame);
        }

        tracing::debug!(
            "Found {} connections from {} to {}",
            chains.len(),
            from.id,
            to.id
        );
        chains
    }

    /// A node to expand at `depth` hops; past `max_hops` it has no outgoing
    /// relationships to follow
    fn frame(&self, node: Node, visited: HashSet<NodeId>, depth: usize) -> Frame {
        let outgoing = if self.max_hops.is_some_and(|max| depth >= max) {
            Vec::new()
        } else {
            self.view
                .list_relationships(&[&filter::relationship_from(node.id.clone())])
        };

        Frame {
            node,
            visited,
            outgoing: outgoing.into_iter(),
        }
    }
}

/// One level of the depth-first search
struct Frame {
    node: Node,
    visited: HashSet<NodeId>,
    outgoing: std::vec::IntoIter<Relationship>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphSnapshot;
    use crate::Graph;

    fn rendered(chains: &[Chain]) -> Vec<String> {
        let mut out: Vec<String> = chains.iter().map(|c| c.to_string()).collect();
        out.sort();
        out
    }

    #[test]
    fn test_chain_accessors() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        let ab = graph.add_relationship(&a, &b, "next").unwrap();
        let bc = graph.add_relationship(&b, &c, "next").unwrap();

        let chains = graph.list_connections(&a, &c);
        assert_eq!(chains.len(), 1);

        let chain = &chains[0];
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
        assert_eq!(chain.source(), &a);
        assert_eq!(chain.destination(), &c);
        let names: Vec<&str> = chain.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        let rels: Vec<&Relationship> = chain.relationships().collect();
        assert_eq!(rels, vec![&ab, &bc]);
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        graph.add_relationship(&a, &b, "next").unwrap();
        graph.add_relationship(&b, &c, "next").unwrap();
        graph.add_relationship(&c, &a, "next").unwrap();

        assert_eq!(rendered(&graph.list_connections(&a, &c)), vec!["A->next->B->next->C"]);
        assert_eq!(rendered(&graph.list_connections(&c, &b)), vec!["C->next->A->next->B"]);
    }

    #[test]
    fn test_same_node_has_no_connections() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        graph.add_relationship(&a, &b, "next").unwrap();
        graph.add_relationship(&b, &a, "next").unwrap();
        graph.add_relationship(&a, &a, "self").unwrap();

        assert!(graph.list_connections(&a, &a).is_empty());
    }

    #[test]
    fn test_no_path() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        graph.add_relationship(&b, &a, "next").unwrap();

        assert!(graph.list_connections(&a, &b).is_empty());
    }

    #[test]
    fn test_parallel_relationships_are_distinct_paths() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        graph.add_relationship(&a, &b, "friends").unwrap();
        graph.add_relationship(&a, &b, "friends").unwrap();
        graph.add_relationship(&b, &c, "knows").unwrap();

        let chains = graph.list_connections(&a, &c);
        assert_eq!(chains.len(), 2);
        assert_ne!(
            chains[0].links()[0].relationship.id,
            chains[1].links()[0].relationship.id
        );
    }

    #[test]
    fn test_sibling_branches_do_not_prune_each_other() {
        // A -> B -> D, A -> C -> D, D -> E
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        let d = graph.insert_node("D", "node", Vec::new());
        let e = graph.insert_node("E", "node", Vec::new());
        graph.add_relationship(&a, &b, "x").unwrap();
        graph.add_relationship(&a, &c, "x").unwrap();
        graph.add_relationship(&b, &d, "x").unwrap();
        graph.add_relationship(&c, &d, "x").unwrap();
        graph.add_relationship(&d, &e, "x").unwrap();

        assert_eq!(
            rendered(&graph.list_connections(&a, &e)),
            vec!["A->x->B->x->D->x->E", "A->x->C->x->D->x->E"]
        );
    }

    #[test]
    fn test_dead_ends_leave_no_links_behind() {
        // A -> B -> D (dead end), A -> C -> E
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        let d = graph.insert_node("D", "node", Vec::new());
        let e = graph.insert_node("E", "node", Vec::new());
        graph.add_relationship(&a, &b, "x").unwrap();
        graph.add_relationship(&b, &d, "x").unwrap();
        graph.add_relationship(&a, &c, "y").unwrap();
        graph.add_relationship(&c, &e, "y").unwrap();

        let chains = graph.list_connections(&a, &e);
        assert_eq!(rendered(&chains), vec!["A->y->C->y->E"]);
        assert_eq!(chains[0].len(), 2);
        assert_eq!(chains[0].source(), &a);
    }

    #[test]
    fn test_dangling_relationship_is_skipped() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        graph.add_relationship(&a, &b, "x").unwrap();
        graph.add_relationship(&b, &c, "x").unwrap();
        graph.add_relationship(&a, &c, "y").unwrap();

        graph.delete_node(&b.id).unwrap();

        assert_eq!(rendered(&graph.list_connections(&a, &c)), vec!["A->y->C"]);
    }

    #[test]
    fn test_max_hops() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        graph.add_relationship(&a, &b, "x").unwrap();
        graph.add_relationship(&b, &c, "x").unwrap();
        graph.add_relationship(&a, &c, "x").unwrap();

        let short = ConnectionFinder::new(&graph).max_hops(1).find(&a, &c);
        assert_eq!(rendered(&short), vec!["A->x->C"]);

        let none = ConnectionFinder::new(&graph).max_hops(0).find(&a, &c);
        assert!(none.is_empty());

        let all = ConnectionFinder::new(&graph).max_hops(2).find(&a, &c);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_through_filters_relationships() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        let c = graph.insert_node("C", "node", Vec::new());
        graph.add_relationship(&a, &b, "friends").unwrap();
        graph.add_relationship(&b, &c, "enemies").unwrap();
        graph.add_relationship(&a, &c, "friends").unwrap();

        let chains = ConnectionFinder::new(&graph)
            .through(filter::relationship_label("friends"))
            .find(&a, &c);
        assert_eq!(rendered(&chains), vec!["A->friends->C"]);
    }

    #[test]
    fn test_snapshot_search_ignores_later_writes() {
        let graph = Graph::new();
        let a = graph.insert_node("A", "node", Vec::new());
        let b = graph.insert_node("B", "node", Vec::new());
        graph.add_relationship(&a, &b, "x").unwrap();

        let snapshot: GraphSnapshot = graph.snapshot();
        graph.add_relationship(&a, &b, "y").unwrap();

        assert_eq!(snapshot.list_connections(&a, &b).len(), 1);
        assert_eq!(graph.list_connections(&a, &b).len(), 2);
    }
}
