//! Error types for Assetgraph Core

use crate::id::{NodeId, RelationshipId};
use thiserror::Error;

/// Result type alias using Assetgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a relationship an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Assetgraph error types
///
/// Every variant is a flavor of "not found"; see [`Error::is_not_found`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Relationship not found: {0}")]
    RelationshipNotFound(RelationshipId),

    #[error("Relationship {endpoint} not found: node {id}")]
    MissingEndpoint { endpoint: Endpoint, id: NodeId },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound(_) | Self::RelationshipNotFound(_) | Self::MissingEndpoint { .. }
        )
    }
}
