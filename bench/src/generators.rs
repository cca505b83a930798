//! Synthetic topologies. All O(n) or O(n + edges), single-threaded and
//! deterministic for a given seed. Vertex `i` of the topology is id `i + 1`
//! in the graph, since ids are allocated from 1.

use std::collections::VecDeque;

use graph_search_core::{DirectedGraph, Graph, Result, VertexId};

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

pub type Generator = fn(u32, u64) -> Result<DirectedGraph>;

fn id(i: u64) -> VertexId {
    i as VertexId + 1
}

fn with_vertices(n: u32) -> DirectedGraph {
    let mut graph = DirectedGraph::with_capacity(n as usize);
    graph.add_vertices(n as usize);
    graph
}

/// L-system fractal tree: each vertex spawns three children.
///
/// Deep paths (log depth) with exponential width.
pub fn lsystem(n: u32, seed: u64) -> Result<DirectedGraph> {
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(seed);
    let n = n as u64;

    let mut next: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * 3);
        for &parent in &frontier {
            // 1 in 8 parents is a dead end, so the tree is not perfectly regular
            let branching = if rng.next(8) == 0 { 1 } else { 3 };
            for _ in 0..branching {
                if next >= n {
                    break;
                }
                graph.add_edge(id(parent), id(next))?;
                next_frontier.push(next);
                next += 1;
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// vertices with more edges are more likely to be picked.
pub fn scale_free(n: u32, seed: u64) -> Result<DirectedGraph> {
    let edges_per_vertex = 10u64;
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(seed.wrapping_add(12345));
    let n = n as u64;

    let mut endpoints: Vec<u64> = Vec::with_capacity((n * edges_per_vertex * 2) as usize);

    // seed clique
    let clique = 5u64;
    for i in 0..clique {
        for j in (i + 1)..clique {
            graph.add_edge(id(i), id(j))?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new in clique..n {
        for _ in 0..edges_per_vertex.min(new) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new {
                graph.add_edge(id(new), id(target))?;
                endpoints.push(new);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice plus random rewiring.
///
/// High clustering with short path lengths.
pub fn small_world(n: u32, seed: u64) -> Result<DirectedGraph> {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(seed.wrapping_add(67890));
    let n = n as u64;

    for i in 0..n {
        for j in 1..=k {
            let mut target = (i + j) % n;
            if rng.next_f64() < p {
                let rewired = rng.next(n);
                if rewired != i {
                    target = rewired;
                }
            }
            graph.add_edge(id(i), id(target))?;
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: about ten uniform random edges per vertex. No structure.
pub fn random(n: u32, seed: u64) -> Result<DirectedGraph> {
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(seed.wrapping_add(54321));
    let n = n as u64;

    for _ in 0..n * 10 {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            graph.add_edge(id(from), id(to))?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense cliques joined by a ten-vertex bridge chain.
///
/// Every path between the halves crosses the bottleneck.
pub fn barbell(n: u32, seed: u64) -> Result<DirectedGraph> {
    let bridge_len = 10u64;
    let n = n as u64;
    let clique = (n - bridge_len) / 2;
    let mut graph = with_vertices((clique * 2 + bridge_len) as u32);
    let mut rng = FastRng::new(seed.wrapping_add(99999));

    let b_start = clique + bridge_len;
    for offset in [0, b_start] {
        for i in 0..clique {
            for _ in 0..20u64.min(clique - 1) {
                let target = rng.next(clique);
                if target != i {
                    graph.add_edge(id(offset + i), id(offset + target))?;
                }
            }
        }
    }

    // last of A -> bridge -> first of B
    for i in clique..=b_start {
        graph.add_edge(id(i - 1), id(i))?;
    }

    Ok(graph)
}

/// Diffusion-limited aggregation, simplified: each new vertex attaches to a
/// random recent "surface" vertex, with an occasional long-range second edge.
///
/// Organic, tree-like topology with winding paths.
pub fn dla(n: u32, seed: u64) -> Result<DirectedGraph> {
    let surface_max = 10_000usize;
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(seed.wrapping_add(77777));
    let n = n as u64;

    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new in 1..n {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.add_edge(id(attach_to), id(new))?;

        // 10% chance of a shortcut back from older structure
        if rng.next(10) == 0 && new > 1 {
            let other = rng.next(new);
            if other != attach_to {
                graph.add_edge(id(other), id(new))?;
            }
        }

        surface.push_back(new);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        let generators: [Generator; 6] = [lsystem, scale_free, small_world, random, barbell, dla];
        for generator in generators {
            let a = generator(500, 7).unwrap();
            let b = generator(500, 7).unwrap();
            assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_lsystem_is_a_tree() {
        let g = lsystem(1000, 42).unwrap();
        assert_eq!(g.vertex_count(), 1000);
        assert_eq!(g.edge_count(), 999);
        assert_eq!(g.in_degree(1).unwrap(), 0);
        assert!(g.vertices().skip(1).all(|v| g.in_degree(v).unwrap() == 1));
    }

    #[test]
    fn test_dla_reaches_every_vertex() {
        let g = dla(2000, 42).unwrap();
        assert_eq!(graph_search_core::neighborhood(&g, 1, u32::MAX).len(), 1999);
    }

    #[test]
    fn test_barbell_bridge() {
        let g = barbell(100, 42).unwrap();
        assert_eq!(g.vertex_count(), 100);
        // first bridge vertex has the last of clique A as its only predecessor
        let bridge_head = id(45);
        assert_eq!(g.predecessors(bridge_head).collect::<Vec<_>>(), vec![id(44)]);
    }

    #[test]
    fn test_rng_range() {
        let mut rng = FastRng::new(1);
        for _ in 0..1000 {
            assert!(rng.next(10) < 10);
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }
}
