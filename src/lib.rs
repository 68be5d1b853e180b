//! Fork/join parallel depth-first maze search.
//!
//! This crate finds a path from a maze's start node to any goal node with a
//! tree of concurrently running search tasks. It:
//! - Walks the maze depth-first on each task, over a private stack.
//! - Lets tasks fork siblings onto a work-stealing pool at a configurable
//!   cadence, but only from nodes that actually branch.
//! - Coordinates all tasks of one search through a shared visited set (whose
//!   atomic "add if absent" decides which task expands a node) and a shared
//!   write-once predecessor map used to reconstruct the path.
//! - Stops cooperatively once any task reaches a goal, while still joining
//!   every spawned task before returning.
//!
//! Key modules:
//! - `maze`: the `Maze` trait the solver consumes (neighbors, goal test,
//!   player bookkeeping).
//! - `solver`: the `ForkJoinSolver`, its builder, outcome and errors.
//! - `config`: runtime configuration (`SolverConfig`, `ForkAfter`).
//! - `mazes`: reference `Maze` implementations (`GraphMaze`, `GridMaze`).
//! - `types`: `MazePath` and common aliases.
//!
//! Quick start:
//! ```
//! use fjmaze::{mazes::GraphMaze, solver::ForkJoinSolver};
//!
//! let maze = GraphMaze::from_edges(1, [(1, 2), (2, 3), (2, 4)], [4]);
//! let solver = ForkJoinSolver::with_fork_after(maze, 1);
//! let path = solver.compute().unwrap().expect("goal is reachable");
//! assert_eq!(path.into_vec(), vec![1, 2, 4]);
//! ```
//!
//! A non-positive fork threshold turns the solver into a plain sequential
//! depth-first search. Whether a path is found never depends on the threshold
//! or on scheduling; which path is found may.

/// Runtime configuration of the solver.
///
/// Exposes `SolverConfig` and the normalized fork threshold `ForkAfter`.
pub mod config;
/// The maze collaborator interface.
pub mod maze;
/// Reference maze implementations used by the bundled binary and tests.
pub mod mazes;
/// The fork/join solver.
///
/// Contains the per-task depth-first walk, the fork policies, the state shared
/// by all tasks of a search and path reconstruction.
pub mod solver;
mod sync;
/// Result path type and common aliases (hash-map flavors, error aliases).
pub mod types;
