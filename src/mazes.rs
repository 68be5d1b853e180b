//! Reference implementations of the [`Maze`](crate::maze::Maze) collaborator.
//!
//! - [`GraphMaze`]: an undirected adjacency-list maze over `u32` nodes.
//! - [`GridMaze`]: a rectangular maze parsed from text.

mod graph;
mod grid;

pub use graph::GraphMaze;
pub use grid::{GridMaze, ParseMazeError};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Neighbor lookup failure of the reference mazes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MazeError {
    /// The node is not a traversable position of the maze.
    #[error("node {0} is not part of the maze")]
    UnknownNode(u32),
}

/// Traversal marker handed out by the reference mazes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PlayerId(usize);

/// Positions of every registered player, indexed by [`PlayerId`].
#[derive(Debug, Default)]
struct Players(Mutex<Vec<u32>>);

impl Players {
    fn register(&self, node: u32) -> PlayerId {
        let mut positions = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        positions.push(node);
        PlayerId(positions.len() - 1)
    }

    fn place(&self, PlayerId(idx): PlayerId, node: u32) {
        let mut positions = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = positions.get_mut(idx).expect("Players::place: [1]");
        *slot = node;
    }

    fn positions(&self) -> Vec<u32> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
