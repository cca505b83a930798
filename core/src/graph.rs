use std::collections::BTreeSet;
use std::iter::Copied;
use std::marker::PhantomData;
use std::slice;

use crate::edge_type::{Directed, EdgeType, Undirected};
use crate::error::{GraphError, Result};

/// Vertex identifier. Always positive; 0 is reserved as the "no vertex"
/// sentinel (e.g. an unset predecessor or destination).
pub type VertexId = u32;

/// Pairing-function handle for an edge. 0 means "no edge inserted".
pub type EdgeId = u64;

/// Iterator over an adjacency list, in insertion order.
pub type Neighbors<'a> = Copied<slice::Iter<'a, VertexId>>;

/// Iterator over the ordered edge list.
pub type Edges<'a> = Copied<slice::Iter<'a, (VertexId, VertexId)>>;

/// The polymorphic graph contract shared by the directed and undirected
/// variants.
///
/// Operations that name a vertex which is not live fail with
/// [`GraphError::VertexNotFound`]. Membership and neighbor-iteration queries
/// stay total: they return `false` or an empty iterator instead.
pub trait Graph {
    /// True for [`DirectedGraph`], false for [`UndirectedGraph`].
    fn is_directed(&self) -> bool;

    /// Allocate the smallest positive id not currently in use.
    fn add_vertex(&mut self) -> VertexId;

    /// Insert edge (u, v). Returns its [`EdgeId`], or 0 if the edge was
    /// already present (the graph is left untouched).
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId>;

    /// Remove `v` and every edge incident to it, then free its id.
    fn remove_vertex(&mut self, v: VertexId) -> Result<()>;

    /// Remove edge (u, v).
    fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<()>;

    fn contains(&self, v: VertexId) -> bool;

    fn contains_edge(&self, u: VertexId, v: VertexId) -> bool;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Largest live vertex id, or 0 for an empty graph.
    fn max_vertex_id(&self) -> VertexId;

    /// Live vertices in ascending id order.
    fn vertices(&self) -> Vertices<'_>;

    /// Successors of `v` in insertion order. Empty if `v` is absent.
    fn successors(&self, v: VertexId) -> Neighbors<'_>;

    /// Predecessors of `v` in insertion order. Empty if `v` is absent.
    fn predecessors(&self, v: VertexId) -> Neighbors<'_>;

    /// The `k`-th successor of `v` (0-based).
    fn successor(&self, v: VertexId, k: usize) -> Result<VertexId>;

    /// The `k`-th predecessor of `v` (0-based).
    fn predecessor(&self, v: VertexId, k: usize) -> Result<VertexId>;

    /// Edges as (u, v) pairs in insertion order.
    fn edges(&self) -> Edges<'_>;

    fn in_degree(&self, v: VertexId) -> Result<usize>;

    fn out_degree(&self, v: VertexId) -> Result<usize>;

    /// Id of edge (u, v) if present, otherwise 0.
    fn edge_id(&self, u: VertexId, v: VertexId) -> EdgeId;
}

/// Per-vertex adjacency lists.
///
/// Directed graphs use both lists. Undirected graphs keep every neighbor in
/// `successors` and leave `predecessors` empty.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyRecord {
    pub(crate) successors: Vec<VertexId>,
    pub(crate) predecessors: Vec<VertexId>,
}

/// Vertex and edge storage shared by both graph variants.
///
/// Records live in a dense arena indexed directly by vertex id; slot 0 is
/// never occupied. Freed ids below the arena end sit in `free` so the next
/// [`Graph::add_vertex`] can hand out the smallest one.
#[derive(Debug, Clone)]
pub struct GraphCore<E: EdgeType> {
    pub(crate) slots: Vec<Option<AdjacencyRecord>>,
    free: BTreeSet<VertexId>,
    pub(crate) edges: Vec<(VertexId, VertexId)>,
    live: usize,
    kind: PhantomData<E>,
}

/// Graph whose edges have a direction: (u, v) and (v, u) are distinct.
pub type DirectedGraph = GraphCore<Directed>;

/// Graph whose edges have no direction: (u, v) and (v, u) are the same edge.
pub type UndirectedGraph = GraphCore<Undirected>;

impl<E: EdgeType> GraphCore<E> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        let mut slots = Vec::with_capacity(vertex_count + 1);
        slots.push(None);
        Self {
            slots,
            free: BTreeSet::new(),
            edges: Vec::new(),
            live: 0,
            kind: PhantomData,
        }
    }

    /// Add `n` vertices, returning their ids in allocation order.
    pub fn add_vertices(&mut self, n: usize) -> Vec<VertexId> {
        (0..n).map(|_| self.add_vertex()).collect()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let slots_mem = self.slots.capacity() * size_of::<Option<AdjacencyRecord>>();
        let lists_mem: usize = self
            .slots
            .iter()
            .flatten()
            .map(|r| (r.successors.capacity() + r.predecessors.capacity()) * size_of::<VertexId>())
            .sum();
        let edges_mem = self.edges.capacity() * size_of::<(VertexId, VertexId)>();
        let free_mem = self.free.len() * size_of::<VertexId>() * 2;

        slots_mem + lists_mem + edges_mem + free_mem
    }

    pub(crate) fn record(&self, v: VertexId) -> Option<&AdjacencyRecord> {
        self.slots.get(v as usize).and_then(|s| s.as_ref())
    }

    pub(crate) fn record_mut(&mut self, v: VertexId) -> Result<&mut AdjacencyRecord> {
        self.slots
            .get_mut(v as usize)
            .and_then(|s| s.as_mut())
            .ok_or(GraphError::VertexNotFound(v))
    }

    fn check_vertex(&self, v: VertexId) -> Result<&AdjacencyRecord> {
        self.record(v).ok_or(GraphError::VertexNotFound(v))
    }

    /// Drop the entry for (u, v) from the ordered edge list. For undirected
    /// graphs the entry may have been stored as (v, u).
    pub(crate) fn forget_edge(&mut self, u: VertexId, v: VertexId) {
        let pos = self
            .edges
            .iter()
            .position(|&(a, b)| (a, b) == (u, v) || (!E::DIRECTED && (a, b) == (v, u)));
        if let Some(pos) = pos {
            self.edges.remove(pos);
        }
    }

    /// Release the slot of a vertex whose edges are already gone.
    fn release(&mut self, v: VertexId) {
        self.slots[v as usize] = None;
        self.live -= 1;
        self.free.insert(v);

        // Shrink the arena so max_vertex_id stays the highest live id.
        while self.slots.len() > 1 && self.slots.last().is_some_and(|s| s.is_none()) {
            let top = (self.slots.len() - 1) as VertexId;
            self.slots.pop();
            self.free.remove(&top);
        }
    }
}

impl<E: EdgeType> Default for GraphCore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn nth(list: &[VertexId], vertex: VertexId, index: usize) -> Result<VertexId> {
    list.get(index).copied().ok_or(GraphError::IndexOutOfRange {
        vertex,
        index,
        len: list.len(),
    })
}

impl<E: EdgeType> Graph for GraphCore<E> {
    fn is_directed(&self) -> bool {
        E::DIRECTED
    }

    fn add_vertex(&mut self) -> VertexId {
        let id = match self.free.pop_first() {
            Some(id) => id,
            None => {
                self.slots.push(None);
                (self.slots.len() - 1) as VertexId
            }
        };
        self.slots[id as usize] = Some(AdjacencyRecord::default());
        self.live += 1;
        id
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId> {
        self.check_vertex(v)?;
        if E::has_edge(self.check_vertex(u)?, v) {
            return Ok(0);
        }
        E::link(self, u, v)?;
        self.edges.push((u, v));
        Ok(E::pair(u, v))
    }

    fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        self.check_vertex(v)?;
        loop {
            let Some(w) = self.check_vertex(v)?.successors.first().copied() else {
                break;
            };
            self.remove_edge(v, w)?;
        }
        loop {
            let Some(w) = self.check_vertex(v)?.predecessors.first().copied() else {
                break;
            };
            self.remove_edge(w, v)?;
        }
        self.release(v);
        Ok(())
    }

    fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        self.check_vertex(v)?;
        if !E::has_edge(self.check_vertex(u)?, v) {
            return Err(GraphError::EdgeNotFound(u, v));
        }
        E::unlink(self, u, v)?;
        self.forget_edge(u, v);
        Ok(())
    }

    fn contains(&self, v: VertexId) -> bool {
        self.record(v).is_some()
    }

    fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.contains(v) && self.record(u).is_some_and(|r| E::has_edge(r, v))
    }

    fn vertex_count(&self) -> usize {
        self.live
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn max_vertex_id(&self) -> VertexId {
        (self.slots.len() - 1) as VertexId
    }

    fn vertices(&self) -> Vertices<'_> {
        Vertices {
            slots: self.slots.iter().enumerate(),
        }
    }

    fn successors(&self, v: VertexId) -> Neighbors<'_> {
        match self.record(v) {
            Some(r) => r.successors.iter().copied(),
            None => [].iter().copied(),
        }
    }

    fn predecessors(&self, v: VertexId) -> Neighbors<'_> {
        match self.record(v) {
            Some(r) => E::predecessor_list(r).iter().copied(),
            None => [].iter().copied(),
        }
    }

    fn successor(&self, v: VertexId, k: usize) -> Result<VertexId> {
        nth(&self.check_vertex(v)?.successors, v, k)
    }

    fn predecessor(&self, v: VertexId, k: usize) -> Result<VertexId> {
        nth(E::predecessor_list(self.check_vertex(v)?), v, k)
    }

    fn edges(&self) -> Edges<'_> {
        self.edges.iter().copied()
    }

    fn in_degree(&self, v: VertexId) -> Result<usize> {
        Ok(E::predecessor_list(self.check_vertex(v)?).len())
    }

    fn out_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.check_vertex(v)?.successors.len())
    }

    fn edge_id(&self, u: VertexId, v: VertexId) -> EdgeId {
        if self.contains_edge(u, v) {
            E::pair(u, v)
        } else {
            0
        }
    }
}

/// Ascending iterator over live vertex ids.
#[derive(Debug, Clone)]
pub struct Vertices<'a> {
    slots: std::iter::Enumerate<slice::Iter<'a, Option<AdjacencyRecord>>>,
}

impl Iterator for Vertices<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        self.slots
            .by_ref()
            .find(|(_, slot)| slot.is_some())
            .map(|(id, _)| id as VertexId)
    }
}
