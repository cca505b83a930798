use thiserror::Error;

use crate::graph::VertexId;

/// Errors raised by graph operations.
///
/// Every variant is a caller mistake detected synchronously; nothing here is
/// transient. Duplicate edge insertion and unreachable destinations are not
/// errors (see [`crate::Graph::add_edge`] and [`crate::ShortestPaths`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex is not live in the graph.
    #[error("vertex {0} not in graph")]
    VertexNotFound(VertexId),

    /// The edge (u, v) is not present in the graph.
    #[error("edge ({0}, {1}) not in graph")]
    EdgeNotFound(VertexId, VertexId),

    /// Indexed neighbor access past the end of the adjacency list.
    #[error("index {index} out of range for vertex {vertex} with {len} neighbors")]
    IndexOutOfRange {
        vertex: VertexId,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
