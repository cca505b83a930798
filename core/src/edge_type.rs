//! Directed and undirected adjacency semantics.
//!
//! [`GraphCore`] stores records the same way for both variants; the
//! [`EdgeType`] marker decides what a record's lists mean, how an edge is
//! linked and unlinked, and how its [`EdgeId`] is computed.

use crate::error::Result;
use crate::graph::{AdjacencyRecord, EdgeId, GraphCore, VertexId};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Directed {}
    impl Sealed for super::Undirected {}
}

/// Marker selecting the adjacency semantics of a [`GraphCore`].
pub trait EdgeType: sealed::Sealed + Sized {
    const DIRECTED: bool;

    /// Whether `record` (the source's) already holds an edge to `v`.
    #[doc(hidden)]
    fn has_edge(record: &AdjacencyRecord, v: VertexId) -> bool;

    /// The list that plays the predecessor role.
    #[doc(hidden)]
    fn predecessor_list(record: &AdjacencyRecord) -> &[VertexId];

    /// Record (u, v) in both endpoints' adjacency lists.
    #[doc(hidden)]
    fn link(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()>;

    /// Erase (u, v) from both endpoints' adjacency lists.
    #[doc(hidden)]
    fn unlink(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()>;

    /// Pairing function giving the edge id of (u, v).
    fn pair(u: VertexId, v: VertexId) -> EdgeId;
}

/// Independent successor and predecessor lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directed {}

/// One neighbor list serving as both successors and predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undirected {}

/// Cantor pairing of (a, b) with `b` as the second coordinate.
fn cantor(a: VertexId, b: VertexId) -> EdgeId {
    let s = EdgeId::from(a) + EdgeId::from(b);
    s * (s + 1) / 2 + EdgeId::from(b)
}

fn erase(list: &mut Vec<VertexId>, v: VertexId) {
    if let Some(pos) = list.iter().position(|&w| w == v) {
        list.remove(pos);
    }
}

impl EdgeType for Directed {
    const DIRECTED: bool = true;

    fn has_edge(record: &AdjacencyRecord, v: VertexId) -> bool {
        record.successors.contains(&v)
    }

    fn predecessor_list(record: &AdjacencyRecord) -> &[VertexId] {
        &record.predecessors
    }

    fn link(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()> {
        graph.record_mut(u)?.successors.push(v);
        graph.record_mut(v)?.predecessors.push(u);
        Ok(())
    }

    fn unlink(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()> {
        erase(&mut graph.record_mut(u)?.successors, v);
        erase(&mut graph.record_mut(v)?.predecessors, u);
        Ok(())
    }

    fn pair(u: VertexId, v: VertexId) -> EdgeId {
        cantor(u, v)
    }
}

impl EdgeType for Undirected {
    const DIRECTED: bool = false;

    fn has_edge(record: &AdjacencyRecord, v: VertexId) -> bool {
        record.successors.contains(&v)
    }

    fn predecessor_list(record: &AdjacencyRecord) -> &[VertexId] {
        &record.successors
    }

    fn link(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()> {
        graph.record_mut(u)?.successors.push(v);
        if u != v {
            graph.record_mut(v)?.successors.push(u);
        }
        Ok(())
    }

    fn unlink(graph: &mut GraphCore<Self>, u: VertexId, v: VertexId) -> Result<()> {
        erase(&mut graph.record_mut(u)?.successors, v);
        if u != v {
            erase(&mut graph.record_mut(v)?.successors, u);
        }
        Ok(())
    }

    fn pair(u: VertexId, v: VertexId) -> EdgeId {
        cantor(u.max(v), u.min(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_pair_is_ordered() {
        assert_eq!(Directed::pair(1, 2), 8);
        assert_eq!(Directed::pair(2, 1), 7);
        assert_eq!(Directed::pair(1, 1), 4);
    }

    #[test]
    fn test_undirected_pair_is_symmetric() {
        assert_eq!(Undirected::pair(1, 2), Undirected::pair(2, 1));
        assert_eq!(Undirected::pair(1, 2), 7);
        assert_eq!(Undirected::pair(4, 4), 40);
    }

    #[test]
    fn test_directed_pair_injective_small_range() {
        let mut seen = std::collections::HashSet::new();
        for u in 1..=40 {
            for v in 1..=40 {
                assert!(seen.insert(Directed::pair(u, v)), "collision at ({u}, {v})");
            }
        }
    }

    #[test]
    fn test_undirected_pair_injective_over_canonical_pairs() {
        let mut seen = std::collections::HashSet::new();
        for hi in 1..=40 {
            for lo in 1..=hi {
                assert!(seen.insert(Undirected::pair(lo, hi)));
            }
        }
    }

    #[test]
    fn test_pair_large_ids_no_overflow() {
        let big = VertexId::MAX / 2;
        assert!(Directed::pair(big, big) > 0);
    }
}
