use std::collections::{HashMap, HashSet};

use crate::fringe::FifoFringe;
use crate::graph::{Graph, VertexId};
use crate::traversal::{MarkSet, Traversal, TraversalStrategy};

/// A vertex found during a hop-limited neighborhood walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub vertex: VertexId,
    pub distance: u32,
    /// One shortest hop path from the start to this vertex, both included.
    pub path: Vec<VertexId>,
}

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult {
    pub vertex: VertexId,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

/// Result of subgraph extraction.
#[derive(Debug, Clone)]
pub struct SubgraphResult {
    pub vertex_count: usize,
    pub edges: Vec<(VertexId, VertexId)>,
}

/// Breadth-first strategy that stops admitting successors past `max_depth`
/// and keeps a parent pointer per reached vertex.
struct HopLimited {
    max_depth: u32,
    // vertex -> (distance, parent); the start is its own parent
    reached: HashMap<VertexId, (u32, VertexId)>,
}

impl TraversalStrategy<FifoFringe> for HopLimited {
    fn process_successor(&mut self, marks: &MarkSet, _fringe: &mut FifoFringe, u: VertexId, v: VertexId) -> bool {
        if marks.is_marked(v) || self.reached.contains_key(&v) {
            return false;
        }
        let depth = self.reached.get(&u).map_or(0, |&(d, _)| d);
        if depth >= self.max_depth {
            return false;
        }
        self.reached.insert(v, (depth + 1, u));
        true
    }
}

impl HopLimited {
    /// Walk parent pointers from `v` back to `start`.
    fn path(&self, start: VertexId, v: VertexId) -> Vec<VertexId> {
        let mut path = vec![v];
        let mut current = v;
        while current != start {
            current = self.reached[&current].1;
            path.push(current);
        }
        path.reverse();
        path
    }
}

/// Every vertex reachable from `start` within `max_depth` hops along
/// successor edges, excluding `start` itself.
///
/// Each vertex is reported once, at its minimum hop distance. Results are
/// ordered by distance, then vertex id. An absent `start` yields nothing.
pub fn neighborhood<G: Graph + ?Sized>(graph: &G, start: VertexId, max_depth: u32) -> Vec<Neighbor> {
    if !graph.contains(start) {
        return Vec::new();
    }

    let mut strategy = HopLimited {
        max_depth,
        reached: HashMap::from([(start, (0, start))]),
    };
    Traversal::breadth_first().traverse_from(graph, &mut strategy, start);

    let mut neighbors: Vec<Neighbor> = strategy
        .reached
        .iter()
        .filter(|(&v, _)| v != start)
        .map(|(&v, &(distance, _))| Neighbor {
            vertex: v,
            distance,
            path: strategy.path(start, v),
        })
        .collect();
    neighbors.sort_by_key(|n| (n.distance, n.vertex));
    neighbors
}

/// The subgraph induced by the vertices within `max_depth` hops of `start`.
///
/// Edges come out in the graph's edge insertion order.
pub fn extract_subgraph<G: Graph + ?Sized>(graph: &G, start: VertexId, max_depth: u32) -> SubgraphResult {
    if !graph.contains(start) {
        return SubgraphResult {
            vertex_count: 0,
            edges: Vec::new(),
        };
    }

    let mut vertex_set: HashSet<VertexId> = neighborhood(graph, start, max_depth)
        .into_iter()
        .map(|n| n.vertex)
        .collect();
    vertex_set.insert(start);

    let edges = graph
        .edges()
        .filter(|(u, v)| vertex_set.contains(u) && vertex_set.contains(v))
        .collect();

    SubgraphResult {
        vertex_count: vertex_set.len(),
        edges,
    }
}

/// Vertices ranked by total degree (descending), ties by ascending id.
///
/// If `top_n` is 0, returns all vertices. For undirected graphs in and out
/// degree are the same neighbor count, so the total counts it once.
pub fn degree_centrality<G: Graph + ?Sized>(graph: &G, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = graph
        .vertices()
        .map(|v| {
            let out_degree = graph.successors(v).len();
            let in_degree = graph.predecessors(v).len();
            DegreeResult {
                vertex: v,
                out_degree,
                in_degree,
                total_degree: if graph.is_directed() {
                    out_degree + in_degree
                } else {
                    out_degree
                },
            }
        })
        .collect();

    results.sort_by(|a, b| b.total_degree.cmp(&a.total_degree).then(a.vertex.cmp(&b.vertex)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
