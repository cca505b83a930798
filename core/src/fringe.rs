//! Fringe disciplines for [`crate::Traversal`].
//!
//! The fringe decides which untraversed vertex is expanded next: FIFO gives
//! breadth-first order, LIFO depth-first, and [`PriorityFringe`] best-first.

use std::collections::{BTreeSet, HashMap, VecDeque};

use ordered_float::OrderedFloat;

use crate::graph::VertexId;

/// The frontier collection driving a traversal.
pub trait Fringe {
    fn push(&mut self, v: VertexId);

    fn pop(&mut self) -> Option<VertexId>;

    /// Remove one pending occurrence of `v`. Returns whether it was present.
    fn remove(&mut self, v: VertexId) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Debug, Clone, Default)]
pub struct FifoFringe {
    queue: VecDeque<VertexId>,
}

impl FifoFringe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fringe for FifoFringe {
    fn push(&mut self, v: VertexId) {
        self.queue.push_back(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.queue.pop_front()
    }

    fn remove(&mut self, v: VertexId) -> bool {
        match self.queue.iter().position(|&w| w == v) {
            Some(pos) => self.queue.remove(pos).is_some(),
            None => false,
        }
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Debug, Clone, Default)]
pub struct LifoFringe {
    stack: Vec<VertexId>,
}

impl LifoFringe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fringe for LifoFringe {
    fn push(&mut self, v: VertexId) {
        self.stack.push(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.stack.pop()
    }

    fn remove(&mut self, v: VertexId) -> bool {
        match self.stack.iter().rposition(|&w| w == v) {
            Some(pos) => {
                self.stack.remove(pos);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.stack.clear();
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

type Key = (OrderedFloat<f64>, VertexId);

/// Best-first fringe: pops the vertex with the lowest priority, ties broken
/// by ascending vertex id.
///
/// Priorities are assigned with [`PriorityFringe::set_priority`] and are
/// remembered after a vertex leaves the fringe; a vertex with no assigned
/// priority counts as 0. A vertex is queued at most once, so pushing it again
/// only moves it to its current priority.
#[derive(Debug, Clone, Default)]
pub struct PriorityFringe {
    order: BTreeSet<Key>,
    queued: HashMap<VertexId, OrderedFloat<f64>>,
    priorities: HashMap<VertexId, f64>,
}

impl PriorityFringe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `v`'s priority. A queued `v` is repositioned immediately.
    pub fn set_priority(&mut self, v: VertexId, priority: f64) {
        self.priorities.insert(v, priority);
        if self.remove(v) {
            self.push(v);
        }
    }

    pub fn priority(&self, v: VertexId) -> f64 {
        self.priorities.get(&v).copied().unwrap_or(0.0)
    }

    /// Whether `v` is currently queued.
    pub fn contains(&self, v: VertexId) -> bool {
        self.queued.contains_key(&v)
    }

    /// Lowest-priority vertex without removing it.
    pub fn peek(&self) -> Option<VertexId> {
        self.order.first().map(|&(_, v)| v)
    }

    /// Forget all priorities as well as the queued vertices.
    pub fn reset(&mut self) {
        self.clear();
        self.priorities.clear();
    }
}

impl Fringe for PriorityFringe {
    fn push(&mut self, v: VertexId) {
        let key = OrderedFloat(self.priority(v));
        if let Some(old) = self.queued.insert(v, key) {
            self.order.remove(&(old, v));
        }
        self.order.insert((key, v));
    }

    fn pop(&mut self) -> Option<VertexId> {
        let (_, v) = self.order.pop_first()?;
        self.queued.remove(&v);
        Some(v)
    }

    fn remove(&mut self, v: VertexId) -> bool {
        match self.queued.remove(&v) {
            Some(key) => self.order.remove(&(key, v)),
            None => false,
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.queued.clear();
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}
