#![allow(dead_code)]

use fjmaze::{
    maze::Maze,
    mazes::{GraphMaze, MazeError, PlayerId},
    types::{IndexSet, MazePath},
};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Mutex,
    thread::{self, ThreadId},
};

pub const THRESHOLDS: [i64; 6] = [-3, 0, 1, 2, 3, 7];

/// Path starts at the maze start, ends at a goal and only follows edges.
pub fn assert_valid_path(maze: &GraphMaze, path: &MazePath<u32>) {
    assert_eq!(*path.origin(), maze.start(), "path {path:?}");
    assert!(maze.has_goal(*path.goal()), "path {path:?}");
    for pair in path.windows(2) {
        assert!(maze.has_edge(pair[0], pair[1]), "path {path:?}");
    }
}

/// Breadth-first oracle: is any goal reachable from the start?
pub fn goal_reachable(maze: &GraphMaze) -> bool {
    let mut seen = HashSet::from([maze.start()]);
    let mut queue = VecDeque::from([maze.start()]);
    while let Some(node) = queue.pop_front() {
        if maze.has_goal(node) {
            return true;
        }
        for next in maze.neighbors(node).unwrap() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// Number of nodes reachable from the start, goals excluded.
pub fn reachable_non_goals(maze: &GraphMaze) -> usize {
    let mut seen = HashSet::from([maze.start()]);
    let mut queue = VecDeque::from([maze.start()]);
    let mut count = 0;
    while let Some(node) = queue.pop_front() {
        if maze.has_goal(node) {
            continue;
        }
        count += 1;
        for next in maze.neighbors(node).unwrap() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    count
}

/// Wraps a `GraphMaze` and counts, per node, the moves made onto non-goal
/// nodes. The solver moves a player exactly when it claims a node. Also
/// records the thread every player was registered on.
#[derive(Debug)]
pub struct CountingMaze {
    pub inner: GraphMaze,
    claims: Mutex<HashMap<u32, usize>>,
    player_threads: Mutex<Vec<ThreadId>>,
}

impl CountingMaze {
    pub fn new(inner: GraphMaze) -> Self {
        Self {
            inner,
            claims: Mutex::new(HashMap::new()),
            player_threads: Mutex::new(Vec::new()),
        }
    }

    pub fn claims(&self) -> HashMap<u32, usize> {
        self.claims.lock().unwrap().clone()
    }

    pub fn player_threads(&self) -> Vec<ThreadId> {
        self.player_threads.lock().unwrap().clone()
    }
}

impl Maze for CountingMaze {
    type Node = u32;
    type Player = PlayerId;
    type Error = MazeError;

    fn start(&self) -> u32 {
        self.inner.start()
    }

    fn neighbors(&self, node: u32) -> Result<IndexSet<u32>, MazeError> {
        self.inner.neighbors(node)
    }

    fn has_goal(&self, node: u32) -> bool {
        self.inner.has_goal(node)
    }

    fn new_player(&self, node: u32) -> PlayerId {
        self.player_threads
            .lock()
            .unwrap()
            .push(thread::current().id());
        self.inner.new_player(node)
    }

    fn move_player(&self, player: &PlayerId, node: u32) {
        if !self.inner.has_goal(node) {
            *self.claims.lock().unwrap().entry(node).or_default() += 1;
        }
        self.inner.move_player(player, node);
    }
}

/// Binary tree of `levels` levels rooted at node 1 (children of `n` are
/// `2n` and `2n + 1`).
pub fn binary_tree(levels: u32) -> GraphMaze {
    let last = (1_u32 << levels) - 1;
    let edges = (2..=last).map(|child| (child / 2, child));
    GraphMaze::from_edges(1, edges, [])
}

/// `width` x `height` open lattice; node of (row, col) is `row * width + col`.
pub fn lattice(width: u32, height: u32) -> GraphMaze {
    let mut maze = GraphMaze::new(0);
    for row in 0..height {
        for col in 0..width {
            let node = row * width + col;
            if col + 1 < width {
                maze.add_edge(node, node + 1);
            }
            if row + 1 < height {
                maze.add_edge(node, node + width);
            }
        }
    }
    maze
}

/// Comb: a path `0 - 1 - ... - (spine - 1)` with one tooth `spine + i` hanging
/// off every spine node `i`. Start is 0.
pub fn comb(spine: u32) -> GraphMaze {
    let mut maze = GraphMaze::new(0);
    for node in 0..spine {
        maze.add_edge(node, spine + node);
        if node + 1 < spine {
            maze.add_edge(node, node + 1);
        }
    }
    maze
}
