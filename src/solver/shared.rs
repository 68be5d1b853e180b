use crate::{
    maze::Maze,
    solver::SearchStats,
    sync::{AtomicBool, AtomicUsize, ConcurrentMap, ConcurrentSet, Ordering},
    types::IndexSet,
};
use std::sync::Arc;

/// State shared by every task of one top-level search.
///
/// A fresh instance is created per search, so independent searches (also
/// concurrent ones over the same maze) never observe each other.
pub(crate) struct SharedState<M: Maze> {
    maze: Arc<M>,
    /// Anchor of path reconstruction.
    pub(super) origin: M::Node,
    /// Nodes claimed by some task. Only ever grows.
    pub(super) visited: ConcurrentSet<M::Node>,
    /// Node -> node it was first reached from. Written once per node, always
    /// before the node is pushed or handed to a child task.
    pub(super) predecessors: ConcurrentMap<M::Node, M::Node>,
    /// Advisory stop signal: raised when a goal is reached or a lookup fails.
    /// Tasks racing past it only do redundant work, so `Relaxed` suffices.
    found: AtomicBool,
    claimed: AtomicUsize,
    forked: AtomicUsize,
}

impl<M: Maze> SharedState<M> {
    pub(crate) fn new(maze: Arc<M>, origin: M::Node) -> Self {
        Self {
            maze,
            origin,
            visited: ConcurrentSet::new(),
            predecessors: ConcurrentMap::new(),
            found: AtomicBool::new(false),
            claimed: AtomicUsize::new(0),
            forked: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn maze(&self) -> &M {
        &self.maze
    }

    #[inline]
    pub(crate) fn is_halted(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn halt(&self) {
        self.found.store(true, Ordering::Relaxed);
    }

    /// Atomically claim `node` for the calling task.
    ///
    /// Exactly one caller per node ever gets `true`.
    pub(crate) fn claim(&self, node: M::Node) -> bool {
        let claimed = self.visited.insert(node);
        if claimed {
            self.claimed.fetch_add(1, Ordering::Relaxed);
        }
        claimed
    }

    #[inline]
    pub(crate) fn is_visited(&self, node: &M::Node) -> bool {
        self.visited.contains(node)
    }

    pub(crate) fn count_unvisited(&self, nodes: &IndexSet<M::Node>) -> usize {
        nodes.iter().filter(|node| !self.is_visited(node)).count()
    }

    pub(crate) fn record_predecessor(&self, node: M::Node, predecessor: M::Node) {
        self.predecessors.insert_if_absent(node, predecessor);
    }

    pub(crate) fn note_fork(&self) {
        self.forked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stats(&self) -> SearchStats {
        SearchStats {
            claimed_nodes: self.claimed.load(Ordering::Relaxed),
            forked_tasks: self.forked.load(Ordering::Relaxed),
        }
    }
}
