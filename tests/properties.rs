#![allow(missing_docs)]
#![cfg(not(feature = "loom"))]

mod common;

use common::{CountingMaze, assert_valid_path, goal_reachable};
use fjmaze::{mazes::GraphMaze, solver::ForkJoinSolver};
use proptest::prelude::*;

type Parts = (u32, Vec<(u32, u32)>, Vec<u32>);

fn arb_parts() -> impl Strategy<Value = Parts> {
    (2_u32..40).prop_flat_map(|nodes| {
        (
            0..nodes,
            prop::collection::vec((0..nodes, 0..nodes), 0..80),
            prop::collection::vec(0..nodes, 0..3),
        )
    })
}

fn build((start, edges, goals): &Parts) -> GraphMaze {
    GraphMaze::from_edges(*start, edges.iter().copied(), goals.iter().copied())
}

fn arb_maze() -> impl Strategy<Value = GraphMaze> {
    arb_parts().prop_map(|parts| build(&parts))
}

proptest! {
    #[test]
    fn reachability_matches_bfs(maze in arb_maze(), threshold in -2_i64..6) {
        let reachable = goal_reachable(&maze);
        let solver = ForkJoinSolver::with_fork_after(maze, threshold);
        let outcome = solver.solve().unwrap();
        prop_assert_eq!(outcome.path.is_some(), reachable);
        if let Some(path) = &outcome.path {
            assert_valid_path(solver.maze(), path);
        }
        if threshold <= 0 {
            prop_assert_eq!(outcome.stats.forked_tasks, 0);
        }
    }

    #[test]
    fn sequential_and_forking_agree(parts in arb_parts(), threshold in 1_i64..4) {
        let sequential = ForkJoinSolver::new(build(&parts)).compute().unwrap();
        let forking = ForkJoinSolver::with_fork_after(build(&parts), threshold)
            .compute()
            .unwrap();
        prop_assert_eq!(sequential.is_some(), forking.is_some());
    }

    #[test]
    fn claims_are_exclusive(maze in arb_maze(), threshold in 1_i64..4) {
        let solver = ForkJoinSolver::with_fork_after(CountingMaze::new(maze), threshold);
        let outcome = solver.solve().unwrap();
        let claims = solver.maze().claims();
        prop_assert!(claims.values().all(|&count| count == 1));
        prop_assert_eq!(claims.len(), outcome.stats.claimed_nodes);
    }
}
