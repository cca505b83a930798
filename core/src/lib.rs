//! graph-search-core: integer-identified graphs and the searches that run
//! over them.
//!
//! Two graph variants share one [`Graph`] contract: [`DirectedGraph`] keeps
//! separate successor and predecessor lists, [`UndirectedGraph`] a single
//! neighbor list per vertex. Vertex ids are positive and recycled smallest
//! first.
//!
//! [`Traversal`] is a fringe-driven walk specialized by a
//! [`TraversalStrategy`]; breadth-first, depth-first (with post-order) and
//! best-first walks are all strategies of the same engine.
//! [`ShortestPaths`] is the best-first instance: A* search with relaxation,
//! which degenerates to Dijkstra under the default zero heuristic.
//!
//! Everything here is single-threaded and synchronous; a graph and the
//! engines borrowing it are plain owned values.

mod analysis;
mod edge_type;
mod error;
mod fringe;
mod graph;
mod shortest_path;
mod traversal;

pub use analysis::{
    degree_centrality, extract_subgraph, neighborhood, DegreeResult, Neighbor, SubgraphResult,
};
pub use edge_type::{Directed, EdgeType, Undirected};
pub use error::{GraphError, Result};
pub use fringe::{FifoFringe, Fringe, LifoFringe, PriorityFringe};
pub use graph::{
    DirectedGraph, EdgeId, Edges, Graph, GraphCore, Neighbors, UndirectedGraph, VertexId, Vertices,
};
pub use shortest_path::{CostModel, EdgeWeights, ShortestPaths};
pub use traversal::{MarkSet, Postorder, Preorder, Traversal, TraversalStrategy, TraversalSummary};
