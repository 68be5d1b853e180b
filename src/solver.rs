mod path;
mod policy;
mod search;
mod shared;

use crate::{
    config::{ForkAfter, SolverConfig},
    maze::Maze,
    solver::{
        policy::{ForkEvery, Sequential},
        search::{Searcher, TaskResult},
        shared::SharedState,
    },
    sync,
    types::{MazeNode, MazePath, MazeSolveError},
};
use core::num::NonZeroUsize;
use derive_more::Debug;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Error returned by a search when the maze collaborator fails.
///
/// Not finding a path is not an error; see [`SearchOutcome::path`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SolveError<N, E> {
    /// Looking up the neighbors of a claimed node failed.
    #[error("neighbor lookup failed at node {node:?}")]
    Neighbors {
        /// Node whose neighbors were requested.
        node: N,
        /// Failure reported by the maze.
        #[source]
        source: E,
    },
}

/// Error returned by [`SolverBuilder::build`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Counters collected over one top-level search.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes claimed (and expanded) by any task. Each node is claimed at most
    /// once.
    pub claimed_nodes: usize,
    /// Tasks spawned in addition to the root task.
    pub forked_tasks: usize,
}

/// Result of [`ForkJoinSolver::solve`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<N> {
    /// Path from the maze's start to a goal, or `None` if no goal is
    /// reachable. When several goals or routes exist, which one is returned
    /// depends on scheduling.
    pub path: Option<MazePath<N>>,
    /// Counters of the search that produced `path`.
    pub stats: SearchStats,
}

/// Fork/join depth-first maze solver.
///
/// Every call to [`solve`](Self::solve) starts a fresh search from
/// [`Maze::start`] with its own visited set, predecessor map and stop flag.
/// Tasks fork into a work-stealing pool according to the configured
/// [`ForkAfter`] threshold and are always joined before `solve` returns.
#[must_use]
#[derive(Debug)]
pub struct ForkJoinSolver<M: Maze> {
    #[debug(skip)]
    maze: Arc<M>,
    fork_after: ForkAfter,
    #[debug(skip)]
    pool: Option<rayon::ThreadPool>,
}

impl<M: Maze> ForkJoinSolver<M> {
    /// Sequential solver: a single task, no forking.
    pub fn new(maze: M) -> Self {
        Self::from_arc(Arc::new(maze))
    }

    /// Sequential solver over a maze that is shared with other owners.
    pub fn from_arc(maze: Arc<M>) -> Self {
        Self {
            maze,
            fork_after: ForkAfter::Never,
            pool: None,
        }
    }

    /// Solver that may fork after every `fork_after` claimed nodes. A
    /// non-positive value yields the sequential solver.
    pub fn with_fork_after(maze: M, fork_after: i64) -> Self {
        Self {
            fork_after: ForkAfter::from(fork_after),
            ..Self::new(maze)
        }
    }

    /// Start configuring a solver.
    pub fn builder(maze: M) -> SolverBuilder<M> {
        SolverBuilder::from_arc(Arc::new(maze))
    }

    /// The maze being searched.
    #[must_use]
    pub fn maze(&self) -> &Arc<M> {
        &self.maze
    }

    /// Effective fork threshold.
    #[must_use]
    pub fn fork_after(&self) -> ForkAfter {
        self.fork_after
    }

    /// Search for a path from the maze's start node to any goal.
    ///
    /// # Errors
    /// If the maze fails a neighbor lookup.
    ///
    /// # Panics
    /// If a search task panics; the panic is propagated to the caller.
    pub fn solve(&self) -> Result<SearchOutcome<MazeNode<M>>, MazeSolveError<M>> {
        let origin = self.maze.start();
        let shared = sync::Arc::new(SharedState::new(Arc::clone(&self.maze), origin));
        let path = self.install(|| match self.fork_after {
            ForkAfter::Never => {
                Searcher::new(sync::Arc::clone(&shared), origin, Sequential).search()
            }
            ForkAfter::Every(every) => {
                Searcher::new(sync::Arc::clone(&shared), origin, ForkEvery::new(every)).search()
            }
        })?;
        let stats = shared.stats();
        debug!(
            found = path.is_some(),
            claimed = stats.claimed_nodes,
            forked = stats.forked_tasks,
            "search finished"
        );
        Ok(SearchOutcome { path, stats })
    }

    /// Like [`solve`](Self::solve), but only returns the path.
    ///
    /// # Errors
    /// If the maze fails a neighbor lookup.
    pub fn compute(&self) -> Result<Option<MazePath<MazeNode<M>>>, MazeSolveError<M>> {
        self.solve().map(|outcome| outcome.path)
    }

    fn install(&self, op: impl FnOnce() -> TaskResult<M> + Send) -> TaskResult<M> {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Builder for [`ForkJoinSolver`].
#[must_use]
#[derive(Debug)]
pub struct SolverBuilder<M: Maze> {
    #[debug(skip)]
    maze: Arc<M>,
    config: SolverConfig,
}

impl<M: Maze> SolverBuilder<M> {
    /// Builder for a sequential solver on the global pool.
    pub fn new(maze: M) -> Self {
        Self::from_arc(Arc::new(maze))
    }

    /// Like [`new`](Self::new), for a maze that is shared with other owners.
    pub fn from_arc(maze: Arc<M>) -> Self {
        Self {
            maze,
            config: SolverConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Fork threshold; non-positive values disable forking.
    pub fn fork_after(mut self, fork_after: i64) -> Self {
        self.config.fork_after = fork_after;
        self
    }

    /// Run searches on a dedicated pool of `num_threads` workers. Zero keeps
    /// rayon's global pool.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = NonZeroUsize::new(num_threads);
        self
    }

    /// Finish configuration.
    ///
    /// # Errors
    /// If a dedicated worker pool was requested and could not be started.
    pub fn build(self) -> Result<ForkJoinSolver<M>, BuildError> {
        let Self { maze, config } = self;
        let pool = config
            .num_threads
            .map(|num_threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads.get())
                    .thread_name(|idx| format!("fjmaze-worker-{idx}"))
                    .build()
            })
            .transpose()?;
        Ok(ForkJoinSolver {
            maze,
            fork_after: config.fork_after(),
            pool,
        })
    }
}
