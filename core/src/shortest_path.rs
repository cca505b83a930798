use std::collections::HashMap;

use tracing::{debug, trace};

use crate::fringe::{Fringe, PriorityFringe};
use crate::graph::{Graph, VertexId};
use crate::traversal::{MarkSet, Traversal, TraversalStrategy, TraversalSummary};

/// Edge weights and the optional A* heuristic for a [`ShortestPaths`] search.
///
/// Weights must be non-negative. The heuristic must never overestimate the
/// remaining cost to the destination or the returned path may not be the
/// shortest; neither condition is checked.
pub trait CostModel {
    /// Weight of edge (u, v), or `f64::INFINITY` if there is no such edge.
    fn edge_cost(&self, u: VertexId, v: VertexId) -> f64;

    /// Lower bound on the cost from `v` to the destination. The default of 0
    /// turns the search into plain Dijkstra.
    fn heuristic(&self, _v: VertexId) -> f64 {
        0.0
    }
}

impl<F> CostModel for F
where
    F: Fn(VertexId, VertexId) -> f64,
{
    fn edge_cost(&self, u: VertexId, v: VertexId) -> f64 {
        self(u, v)
    }
}

/// Table-backed [`CostModel`]: per-edge weights plus optional per-vertex
/// heuristic estimates. Missing weights are infinite, missing estimates 0.
#[derive(Debug, Clone, Default)]
pub struct EdgeWeights {
    weights: HashMap<(VertexId, VertexId), f64>,
    estimates: HashMap<VertexId, f64>,
}

impl EdgeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, u: VertexId, v: VertexId, weight: f64) {
        self.weights.insert((u, v), weight);
    }

    /// Set the weight of both (u, v) and (v, u).
    pub fn set_symmetric(&mut self, u: VertexId, v: VertexId, weight: f64) {
        self.set(u, v, weight);
        self.set(v, u, weight);
    }

    pub fn set_estimate(&mut self, v: VertexId, estimate: f64) {
        self.estimates.insert(v, estimate);
    }
}

impl CostModel for EdgeWeights {
    fn edge_cost(&self, u: VertexId, v: VertexId) -> f64 {
        self.weights.get(&(u, v)).copied().unwrap_or(f64::INFINITY)
    }

    fn heuristic(&self, v: VertexId) -> f64 {
        self.estimates.get(&v).copied().unwrap_or(0.0)
    }
}

/// Best-known costs and predecessor links, indexed by vertex id.
#[derive(Debug, Clone)]
struct PathTable {
    distance: Vec<f64>,
    back: Vec<VertexId>,
}

impl PathTable {
    fn new(max_vertex: VertexId) -> Self {
        let len = max_vertex as usize + 1;
        Self {
            distance: vec![f64::INFINITY; len],
            back: vec![0; len],
        }
    }

    fn ensure(&mut self, v: VertexId) {
        let len = v as usize + 1;
        if self.distance.len() < len {
            self.distance.resize(len, f64::INFINITY);
            self.back.resize(len, 0);
        }
    }

    fn cost(&self, v: VertexId) -> f64 {
        self.distance.get(v as usize).copied().unwrap_or(f64::INFINITY)
    }

    fn set_cost(&mut self, v: VertexId, w: f64) {
        self.ensure(v);
        self.distance[v as usize] = w;
    }

    fn predecessor(&self, v: VertexId) -> VertexId {
        self.back.get(v as usize).copied().unwrap_or(0)
    }

    fn set_predecessor(&mut self, v: VertexId, u: VertexId) {
        self.ensure(v);
        self.back[v as usize] = u;
    }
}

/// Best-first expansion with relaxation, driven by a [`Traversal`] over a
/// [`PriorityFringe`] keyed by `heuristic(v) + cost(v)`.
struct AStar<'s, C: ?Sized> {
    table: &'s mut PathTable,
    costs: &'s C,
    dest: VertexId,
}

impl<C: CostModel + ?Sized> TraversalStrategy<PriorityFringe> for AStar<'_, C> {
    fn visit(&mut self, v: VertexId) -> bool {
        v != self.dest
    }

    fn should_post_visit(&mut self, _v: VertexId) -> bool {
        false
    }

    fn reverse_successors(&mut self, _v: VertexId) -> bool {
        false
    }

    fn process_successor(
        &mut self,
        marks: &MarkSet,
        fringe: &mut PriorityFringe,
        u: VertexId,
        v: VertexId,
    ) -> bool {
        if marks.is_marked(v) {
            return false;
        }
        let candidate = self.table.cost(u) + self.costs.edge_cost(u, v);
        if candidate < self.table.cost(v) {
            fringe.remove(v);
            self.table.set_cost(v, candidate);
            self.table.set_predecessor(v, u);
            fringe.set_priority(v, self.costs.heuristic(v) + candidate);
            trace!(from = u, to = v, cost = candidate, "relaxed");
            true
        } else {
            false
        }
    }
}

/// A*/Dijkstra shortest paths from one source over a [`Graph`].
///
/// Construct, call [`set_paths`](ShortestPaths::set_paths), then query
/// [`vertex_cost`](ShortestPaths::vertex_cost),
/// [`predecessor`](ShortestPaths::predecessor) and
/// [`path_to`](ShortestPaths::path_to). A vertex that was never reached keeps
/// an infinite cost; check [`is_reachable`](ShortestPaths::is_reachable)
/// before trusting its path.
///
/// With a destination the search stops as soon as the destination is
/// settled, so costs of other vertices may be left non-final.
pub struct ShortestPaths<'g, G: ?Sized, C> {
    graph: &'g G,
    costs: C,
    source: VertexId,
    dest: VertexId,
    table: PathTable,
}

impl<'g, G, C> ShortestPaths<'g, G, C>
where
    G: Graph + ?Sized,
    C: CostModel,
{
    /// Single-source search exploring everything reachable from `source`.
    pub fn new(graph: &'g G, source: VertexId, costs: C) -> Self {
        Self::with_dest(graph, source, 0, costs)
    }

    /// Search from `source` that stops once `dest` is settled. A `dest` of 0
    /// means no destination.
    pub fn with_dest(graph: &'g G, source: VertexId, dest: VertexId, costs: C) -> Self {
        let mut paths = Self {
            graph,
            costs,
            source,
            dest,
            table: PathTable::new(graph.max_vertex_id()),
        };
        paths.reset();
        paths
    }

    fn reset(&mut self) {
        self.table = PathTable::new(self.graph.max_vertex_id());
        self.table.set_cost(self.source, 0.0);
    }

    /// Run the search. Must be called before querying costs or paths;
    /// calling it again repeats the search from scratch.
    pub fn set_paths(&mut self) -> TraversalSummary {
        self.reset();

        let mut fringe = PriorityFringe::new();
        fringe.set_priority(self.source, self.costs.heuristic(self.source));
        let mut traversal = Traversal::new(fringe);
        let mut astar = AStar {
            table: &mut self.table,
            costs: &self.costs,
            dest: self.dest,
        };
        let summary = traversal.traverse_from(self.graph, &mut astar, self.source);

        debug!(
            source = self.source,
            dest = self.dest,
            settled = summary.visited,
            reached_dest = summary.halted,
            "shortest paths computed"
        );
        summary
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    /// The destination, or 0 if the search explores everything.
    pub fn dest(&self) -> VertexId {
        self.dest
    }

    pub fn costs(&self) -> &C {
        &self.costs
    }

    /// Best known cost from the source to `v`; infinite if unreached or
    /// not in the graph.
    pub fn vertex_cost(&self, v: VertexId) -> f64 {
        self.table.cost(v)
    }

    pub fn set_vertex_cost(&mut self, v: VertexId, w: f64) {
        self.table.set_cost(v, w);
    }

    /// Predecessor of `v` on its best known path, or 0 if none.
    pub fn predecessor(&self, v: VertexId) -> VertexId {
        self.table.predecessor(v)
    }

    pub fn set_predecessor(&mut self, v: VertexId, u: VertexId) {
        self.table.set_predecessor(v, u);
    }

    /// Weight of edge (u, v) under this search's cost model.
    pub fn edge_cost(&self, u: VertexId, v: VertexId) -> f64 {
        self.costs.edge_cost(u, v)
    }

    pub fn heuristic(&self, v: VertexId) -> f64 {
        self.costs.heuristic(v)
    }

    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.vertex_cost(v).is_finite()
    }

    /// Vertices from the source to `v` along predecessor links. For an
    /// unreached `v` this is just `[v]`.
    pub fn path_to(&self, v: VertexId) -> Vec<VertexId> {
        let mut path = Vec::new();
        let mut current = v;
        while current != 0 {
            path.push(current);
            current = self.predecessor(current);
        }
        path.reverse();
        path
    }

    /// [`path_to`](ShortestPaths::path_to) the destination. Empty when no
    /// destination is set.
    pub fn path_to_dest(&self) -> Vec<VertexId> {
        self.path_to(self.dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    /// Simple LCG for deterministic pseudo-random graphs.
    struct FastRng(u64);

    impl FastRng {
        fn next(&mut self, max: u64) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
            (self.0 >> 33) % max
        }
    }

    fn make_weighted(n: usize, edges: &[(VertexId, VertexId, f64)]) -> (DirectedGraph, EdgeWeights) {
        let mut g = DirectedGraph::new();
        let mut w = EdgeWeights::new();
        g.add_vertices(n);
        for &(u, v, weight) in edges {
            g.add_edge(u, v).unwrap();
            w.set(u, v, weight);
        }
        (g, w)
    }

    fn path_cost(w: &EdgeWeights, path: &[VertexId]) -> f64 {
        path.windows(2).map(|p| w.edge_cost(p[0], p[1])).sum()
    }

    /// Minimum cost over every simple path from `u` to each vertex.
    fn brute_force(g: &DirectedGraph, w: &EdgeWeights, source: VertexId) -> HashMap<VertexId, f64> {
        fn walk(
            g: &DirectedGraph,
            w: &EdgeWeights,
            u: VertexId,
            cost: f64,
            on_path: &mut Vec<VertexId>,
            best: &mut HashMap<VertexId, f64>,
        ) {
            let entry = best.entry(u).or_insert(f64::INFINITY);
            if cost < *entry {
                *entry = cost;
            }
            for v in g.successors(u) {
                if !on_path.contains(&v) {
                    on_path.push(v);
                    walk(g, w, v, cost + w.edge_cost(u, v), on_path, best);
                    on_path.pop();
                }
            }
        }

        let mut best = HashMap::new();
        walk(g, w, source, 0.0, &mut vec![source], &mut best);
        best
    }

    fn scenario_a() -> (DirectedGraph, EdgeWeights) {
        make_weighted(4, &[(1, 2, 1.0), (1, 3, 4.0), (2, 3, 1.0), (3, 4, 1.0)])
    }

    #[test]
    fn test_scenario_prefers_cheaper_longer_path() {
        let (g, w) = scenario_a();
        let mut sp = ShortestPaths::with_dest(&g, 1, 4, w);
        sp.set_paths();
        assert_eq!(sp.path_to(4), vec![1, 2, 3, 4]);
        assert_eq!(sp.vertex_cost(4), 3.0);
        assert_eq!(sp.path_to_dest(), vec![1, 2, 3, 4]);
        assert_eq!(sp.source(), 1);
        assert_eq!(sp.dest(), 4);
    }

    #[test]
    fn test_path_to_source() {
        let (g, w) = scenario_a();
        let mut sp = ShortestPaths::new(&g, 1, w);
        sp.set_paths();
        assert_eq!(sp.path_to(1), vec![1]);
        assert_eq!(sp.vertex_cost(1), 0.0);
        assert_eq!(sp.predecessor(1), 0);
    }

    #[test]
    fn test_unreachable_vertex() {
        let (g, w) = make_weighted(3, &[(1, 2, 1.0)]);
        let mut sp = ShortestPaths::new(&g, 1, w);
        let summary = sp.set_paths();
        assert_eq!(summary.visited, 2);
        assert!(!summary.halted);
        assert!(!sp.is_reachable(3));
        assert_eq!(sp.vertex_cost(3), f64::INFINITY);
        assert_eq!(sp.path_to(3), vec![3]);
        assert!(!sp.is_reachable(42));
    }

    #[test]
    fn test_no_dest_path_is_empty() {
        let (g, w) = scenario_a();
        let mut sp = ShortestPaths::new(&g, 1, w);
        sp.set_paths();
        assert_eq!(sp.dest(), 0);
        assert!(sp.path_to_dest().is_empty());
    }

    #[test]
    fn test_relaxation_replaces_first_estimate() {
        // 1 -> 4 directly costs 10; 1 -> 2 -> 3 -> 4 costs 3
        let (g, w) = make_weighted(4, &[(1, 4, 10.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]);
        let mut sp = ShortestPaths::new(&g, 1, w);
        sp.set_paths();
        assert_eq!(sp.vertex_cost(4), 3.0);
        assert_eq!(sp.predecessor(4), 3);
    }

    #[test]
    fn test_equal_cost_ties_by_vertex_id() {
        let (g, w) = make_weighted(4, &[(1, 3, 1.0), (1, 2, 1.0), (3, 4, 1.0), (2, 4, 1.0)]);
        let mut sp = ShortestPaths::new(&g, 1, w);
        sp.set_paths();
        assert_eq!(sp.path_to(4), vec![1, 2, 4]);
    }

    #[test]
    fn test_dest_halts_search_early() {
        // Far branch 1 -> 5 -> 6 is never settled once 2 is reached.
        let (g, w) = make_weighted(6, &[(1, 2, 1.0), (1, 5, 5.0), (5, 6, 1.0)]);
        let mut sp = ShortestPaths::with_dest(&g, 1, 2, w);
        let summary = sp.set_paths();
        assert!(summary.halted);
        assert_eq!(summary.visited, 2);
        assert_eq!(sp.vertex_cost(5), 5.0);
        assert!(!sp.is_reachable(6));
    }

    #[test]
    fn test_set_paths_is_repeatable() {
        let (g, w) = scenario_a();
        let mut sp = ShortestPaths::new(&g, 1, w);
        sp.set_paths();
        sp.set_vertex_cost(4, 0.5);
        sp.set_predecessor(4, 1);
        sp.set_paths();
        assert_eq!(sp.vertex_cost(4), 3.0);
        assert_eq!(sp.predecessor(4), 3);
    }

    #[test]
    fn test_closure_cost_model() {
        let mut g = DirectedGraph::new();
        g.add_vertices(5);
        for v in 1..5 {
            g.add_edge(v, v + 1).unwrap();
        }
        g.add_edge(1, 5).unwrap();
        let cost = |u: VertexId, v: VertexId| if (u, v) == (1, 5) { 10.0 } else { 2.0 };
        let mut sp = ShortestPaths::new(&g, 1, cost);
        sp.set_paths();
        assert_eq!(sp.vertex_cost(5), 8.0);
        assert_eq!(sp.path_to(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(sp.edge_cost(1, 5), 10.0);
        assert_eq!(sp.heuristic(3), 0.0);
    }

    #[test]
    fn test_undirected_symmetric_weights() {
        let mut g = UndirectedGraph::new();
        let mut w = EdgeWeights::new();
        g.add_vertices(4);
        for (u, v, weight) in [(1, 2, 2.0), (2, 3, 2.0), (3, 4, 2.0), (4, 1, 7.0)] {
            g.add_edge(u, v).unwrap();
            w.set_symmetric(u, v, weight);
        }
        let mut sp = ShortestPaths::with_dest(&g, 4, 1, w);
        sp.set_paths();
        assert_eq!(sp.vertex_cost(1), 6.0);
        assert_eq!(sp.path_to(1), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_missing_weight_is_impassable() {
        let mut g = DirectedGraph::new();
        g.add_vertices(2);
        g.add_edge(1, 2).unwrap();
        let mut sp = ShortestPaths::new(&g, 1, EdgeWeights::new());
        sp.set_paths();
        assert!(!sp.is_reachable(2));
    }

    #[test]
    fn test_astar_heuristic_same_cost_fewer_settled() {
        // Line 1..=6 with a dead-end branch 1 -> 7 -> 8 of equal step cost.
        let mut edges: Vec<_> = (1..6).map(|v| (v, v + 1, 1.0)).collect();
        edges.push((1, 7, 1.0));
        edges.push((7, 8, 1.0));
        let (g, mut w) = make_weighted(8, &edges);

        let mut dijkstra = ShortestPaths::with_dest(&g, 1, 6, w.clone());
        let plain = dijkstra.set_paths();

        // Exact remaining distance on the line; the branch is far away.
        for v in 1..=6 {
            w.set_estimate(v, (6 - v) as f64);
        }
        w.set_estimate(7, 100.0);
        w.set_estimate(8, 100.0);
        let mut astar = ShortestPaths::with_dest(&g, 1, 6, w);
        let guided = astar.set_paths();

        assert_eq!(astar.vertex_cost(6), dijkstra.vertex_cost(6));
        assert_eq!(astar.path_to(6), vec![1, 2, 3, 4, 5, 6]);
        assert!(guided.visited < plain.visited);
        assert!(!astar.is_reachable(8));
    }

    #[test]
    fn test_dijkstra_matches_brute_force() {
        let mut rng = FastRng(2024);
        for _ in 0..40 {
            let n = 2 + rng.next(7) as usize;
            let mut g = DirectedGraph::new();
            let mut w = EdgeWeights::new();
            g.add_vertices(n);
            for _ in 0..rng.next(3 * n as u64) + 1 {
                let u = 1 + rng.next(n as u64) as VertexId;
                let v = 1 + rng.next(n as u64) as VertexId;
                if g.add_edge(u, v).unwrap() != 0 {
                    w.set(u, v, rng.next(10) as f64);
                }
            }

            let expected = brute_force(&g, &w, 1);
            let mut sp = ShortestPaths::new(&g, 1, w.clone());
            sp.set_paths();
            for v in g.vertices() {
                match expected.get(&v) {
                    Some(&cost) => {
                        assert_eq!(sp.vertex_cost(v), cost, "vertex {v}");
                        let path = sp.path_to(v);
                        assert_eq!(path[0], 1);
                        assert_eq!(path_cost(&w, &path), cost);
                    }
                    None => assert!(!sp.is_reachable(v), "vertex {v}"),
                }
            }
        }
    }
}
