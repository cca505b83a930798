use std::collections::HashSet;

use tracing::debug;

use crate::fringe::{FifoFringe, Fringe, LifoFringe};
use crate::graph::{Graph, VertexId};

/// Vertices already visited by a [`Traversal`].
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
    marked: HashSet<VertexId>,
}

impl MarkSet {
    pub fn is_marked(&self, v: VertexId) -> bool {
        self.marked.contains(&v)
    }

    /// Mark `v`. Returns false if it was already marked.
    fn mark(&mut self, v: VertexId) -> bool {
        self.marked.insert(v)
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    fn clear(&mut self) {
        self.marked.clear();
    }
}

/// The five behaviors that specialize a [`Traversal`].
///
/// Every hook has a default, so a strategy only overrides what it needs:
/// breadth-first and depth-first walks usually override just [`visit`],
/// post-order walks add [`should_post_visit`] and [`post_visit`], and
/// best-first search overrides [`process_successor`] to relax costs.
///
/// [`visit`]: TraversalStrategy::visit
/// [`should_post_visit`]: TraversalStrategy::should_post_visit
/// [`post_visit`]: TraversalStrategy::post_visit
/// [`process_successor`]: TraversalStrategy::process_successor
pub trait TraversalStrategy<F: Fringe> {
    /// Called on the first dequeue of an unmarked vertex. Returning false
    /// halts the whole traversal.
    fn visit(&mut self, _v: VertexId) -> bool {
        true
    }

    /// Whether `v` should be dequeued a second time, after its successors.
    fn should_post_visit(&mut self, _v: VertexId) -> bool {
        false
    }

    /// Called on the second dequeue of a vertex scheduled for post-visit.
    fn post_visit(&mut self, _v: VertexId) {}

    /// Whether `v`'s successors are scheduled ahead of the fringe's current
    /// contents instead of behind them.
    fn reverse_successors(&mut self, _v: VertexId) -> bool {
        false
    }

    /// Decide whether successor `v` of the just-visited `u` enters the
    /// fringe. The strategy may reorganize the fringe first (e.g. to
    /// re-prioritize `v`).
    fn process_successor(&mut self, marks: &MarkSet, _fringe: &mut F, _u: VertexId, v: VertexId) -> bool {
        !marks.is_marked(v)
    }
}

/// Counts from one [`Traversal::traverse`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Vertices marked and visited during this call.
    pub visited: usize,
    pub post_visited: usize,
    /// True if a `visit` returned false and stopped the walk early.
    pub halted: bool,
}

/// Generic fringe-driven walk over a [`Graph`].
///
/// Marks persist across [`traverse`](Traversal::traverse) calls, so a second
/// call only reaches vertices the earlier calls did not; this supports
/// resuming after a halt and multi-source exploration. Call
/// [`clear`](Traversal::clear) or build a new engine for a fresh walk. The
/// fringe itself is reset at the start of every call.
#[derive(Debug, Clone, Default)]
pub struct Traversal<F: Fringe> {
    marks: MarkSet,
    // Visited vertices still owed a post-visit.
    scheduled: HashSet<VertexId>,
    fringe: F,
}

impl Traversal<FifoFringe> {
    pub fn breadth_first() -> Self {
        Self::new(FifoFringe::new())
    }
}

impl Traversal<LifoFringe> {
    pub fn depth_first() -> Self {
        Self::new(LifoFringe::new())
    }
}

impl<F: Fringe> Traversal<F> {
    pub fn new(fringe: F) -> Self {
        Self {
            marks: MarkSet::default(),
            scheduled: HashSet::new(),
            fringe,
        }
    }

    pub fn is_marked(&self, v: VertexId) -> bool {
        self.marks.is_marked(v)
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn fringe(&self) -> &F {
        &self.fringe
    }

    pub fn fringe_mut(&mut self) -> &mut F {
        &mut self.fringe
    }

    /// Forget every mark and pending post-visit.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.scheduled.clear();
        self.fringe.clear();
    }

    /// Seed the fringe with `seeds` and walk until it empties or the
    /// strategy halts.
    pub fn traverse<G, S, I>(&mut self, graph: &G, strategy: &mut S, seeds: I) -> TraversalSummary
    where
        G: Graph + ?Sized,
        S: TraversalStrategy<F> + ?Sized,
        I: IntoIterator<Item = VertexId>,
    {
        self.fringe.clear();
        for v in seeds {
            self.fringe.push(v);
        }
        debug!(seeds = self.fringe.len(), marked = self.marks.len(), "traversal started");

        let mut summary = TraversalSummary::default();
        while let Some(v) = self.fringe.pop() {
            if self.marks.mark(v) {
                summary.visited += 1;
                if !strategy.visit(v) {
                    summary.halted = true;
                    debug!(vertex = v, "traversal halted by visit");
                    break;
                }

                let post = strategy.should_post_visit(v);
                if post {
                    self.scheduled.insert(v);
                }

                if strategy.reverse_successors(v) {
                    let mut held = Vec::with_capacity(self.fringe.len());
                    while let Some(w) = self.fringe.pop() {
                        held.push(w);
                    }
                    self.push_successors(graph, strategy, v);
                    if post {
                        self.fringe.push(v);
                    }
                    for w in held {
                        self.fringe.push(w);
                    }
                } else {
                    // The marker goes in ahead of the successors so a LIFO
                    // fringe pops it only once they are all done.
                    if post {
                        self.fringe.push(v);
                    }
                    self.push_successors(graph, strategy, v);
                }
            } else if self.scheduled.remove(&v) {
                strategy.post_visit(v);
                summary.post_visited += 1;
            }
        }

        debug!(
            visited = summary.visited,
            post_visited = summary.post_visited,
            halted = summary.halted,
            "traversal finished"
        );
        summary
    }

    /// [`traverse`](Traversal::traverse) from a single vertex.
    pub fn traverse_from<G, S>(&mut self, graph: &G, strategy: &mut S, v: VertexId) -> TraversalSummary
    where
        G: Graph + ?Sized,
        S: TraversalStrategy<F> + ?Sized,
    {
        self.traverse(graph, strategy, [v])
    }

    fn push_successors<G, S>(&mut self, graph: &G, strategy: &mut S, u: VertexId)
    where
        G: Graph + ?Sized,
        S: TraversalStrategy<F> + ?Sized,
    {
        for v in graph.successors(u) {
            if strategy.process_successor(&self.marks, &mut self.fringe, u, v) {
                self.fringe.push(v);
            }
        }
    }
}

/// Strategy that only supplies a `visit` closure.
pub struct Preorder<V>(V);

impl<V> Preorder<V>
where
    V: FnMut(VertexId) -> bool,
{
    pub fn new(visit: V) -> Self {
        Self(visit)
    }
}

impl<F, V> TraversalStrategy<F> for Preorder<V>
where
    F: Fringe,
    V: FnMut(VertexId) -> bool,
{
    fn visit(&mut self, v: VertexId) -> bool {
        (self.0)(v)
    }
}

/// Strategy that post-visits every vertex once its successors are done.
///
/// With [`Traversal::depth_first`] this yields the classic post-order used
/// to process dependencies before the things that depend on them.
pub struct Postorder<V, P> {
    visit: V,
    post_visit: P,
    reverse: bool,
}

impl<V, P> Postorder<V, P>
where
    V: FnMut(VertexId) -> bool,
    P: FnMut(VertexId),
{
    pub fn new(visit: V, post_visit: P) -> Self {
        Self {
            visit,
            post_visit,
            reverse: false,
        }
    }

    /// Schedule successors ahead of the fringe. Turns a FIFO fringe into a
    /// recursive-descent depth-first walk.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

impl<F, V, P> TraversalStrategy<F> for Postorder<V, P>
where
    F: Fringe,
    V: FnMut(VertexId) -> bool,
    P: FnMut(VertexId),
{
    fn visit(&mut self, v: VertexId) -> bool {
        (self.visit)(v)
    }

    fn should_post_visit(&mut self, _v: VertexId) -> bool {
        true
    }

    fn post_visit(&mut self, v: VertexId) {
        (self.post_visit)(v)
    }

    fn reverse_successors(&mut self, _v: VertexId) -> bool {
        self.reverse
    }
}
