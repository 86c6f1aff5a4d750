//! Assetgraph Core - In-memory property graph engine
//!
//! This crate provides a thread-safe store of labeled nodes connected by
//! directed, labeled relationships, filter combinators for listing them,
//! and a search that enumerates every simple path between two nodes.

pub mod connection;
pub mod error;
pub mod filter;
pub mod graph;
pub mod id;
pub mod node;
pub mod relationship;
pub mod store;

pub use connection::{Chain, ChainLink, ConnectionFinder};
pub use error::{Endpoint, Error, Result};
pub use filter::Filter;
pub use graph::{GraphSnapshot, GraphView};
pub use id::{NodeId, RelationshipId};
pub use node::Node;
pub use relationship::Relationship;
pub use store::Graph;
