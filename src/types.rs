use crate::{maze::Maze, solver::SolveError};
use derive_more::{Debug, Deref};
use indexmap::{IndexMap as _IndexMap, IndexSet as _IndexSet};
use rustc_hash::FxBuildHasher;
use std::collections::HashSet as _HashSet;

/// Ordered sequence of nodes from the search origin to a goal, both inclusive.
///
/// Every consecutive pair is an adjacency edge of the maze the path was found
/// in. A path is never empty: when the origin itself is a goal, the path holds
/// exactly that node.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
#[debug("{_0:?}")]
pub struct MazePath<N>(Vec<N>);

impl<N> MazePath<N> {
    pub(crate) fn new(nodes: Vec<N>) -> Self {
        assert!(!nodes.is_empty(), "MazePath::new: [1]");
        Self(nodes)
    }

    /// First node of the path: the origin of the search.
    pub fn origin(&self) -> &N {
        self.0.first().expect("MazePath::origin: [1]")
    }

    /// Last node of the path: the goal that was reached.
    pub fn goal(&self) -> &N {
        self.0.last().expect("MazePath::goal: [1]")
    }

    /// Number of moves along the path (one less than the number of nodes).
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    /// Consume the path, returning the underlying nodes.
    #[must_use]
    pub fn into_vec(self) -> Vec<N> {
        self.0
    }
}

impl<N> IntoIterator for MazePath<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Node identifier type of a maze.
pub type MazeNode<M> = <M as Maze>::Node;
/// Error returned by a search over maze `M`.
pub type MazeSolveError<M> = SolveError<<M as Maze>::Node, <M as Maze>::Error>;

pub(crate) type HashSet<T> = _HashSet<T, FxBuildHasher>;
/// `IndexMap` type with fast hasher.
pub type IndexMap<K, V> = _IndexMap<K, V, FxBuildHasher>;
/// `IndexSet` type with fast hasher.
///
/// Neighbor lookups return this type so that iteration order is stable for a
/// given maze.
pub type IndexSet<T> = _IndexSet<T, FxBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accessors() {
        let path = MazePath::new(vec![1, 2, 4]);
        assert_eq!(*path.origin(), 1);
        assert_eq!(*path.goal(), 4);
        assert_eq!(path.steps(), 2);
        assert_eq!(path.len(), 3);
        assert_eq!(format!("{path:?}"), "[1, 2, 4]");
        assert_eq!(path.into_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn single_node_path() {
        let path = MazePath::new(vec![7]);
        assert_eq!(path.origin(), path.goal());
        assert_eq!(path.steps(), 0);
    }

    #[test]
    #[should_panic(expected = "MazePath::new: [1]")]
    fn empty_path_is_rejected() {
        let _ = MazePath::<u32>::new(vec![]);
    }
}
