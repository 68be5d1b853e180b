use crate::{
    maze::Maze,
    mazes::{MazeError, PlayerId, Players},
    types::{HashSet, IndexMap, IndexSet},
};
use core::sync::atomic::{AtomicUsize, Ordering};

/// Undirected maze given by its edges.
///
/// Neighbors are reported in edge insertion order.
#[derive(Debug)]
pub struct GraphMaze {
    start: u32,
    adjacency: IndexMap<u32, IndexSet<u32>>,
    goals: HashSet<u32>,
    players: Players,
    moves: AtomicUsize,
}

impl GraphMaze {
    /// A maze consisting of the lone `start` node.
    #[must_use]
    pub fn new(start: u32) -> Self {
        let mut adjacency = IndexMap::default();
        adjacency.insert(start, IndexSet::default());
        Self {
            start,
            adjacency,
            goals: HashSet::default(),
            players: Players::default(),
            moves: AtomicUsize::new(0),
        }
    }

    /// Build a maze from undirected `edges` and `goals`.
    #[must_use]
    pub fn from_edges(
        start: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
        goals: impl IntoIterator<Item = u32>,
    ) -> Self {
        let mut maze = Self::new(start);
        for (a, b) in edges {
            maze.add_edge(a, b);
        }
        for goal in goals {
            maze.add_goal(goal);
        }
        maze
    }

    /// Connect `a` and `b`, adding either node if missing.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Mark `node` as a goal, adding it if missing.
    pub fn add_goal(&mut self, node: u32) {
        self.adjacency.entry(node).or_default();
        self.goals.insert(node);
    }

    /// Builder-style [`add_edge`](Self::add_edge).
    #[must_use]
    pub fn with_edge(mut self, a: u32, b: u32) -> Self {
        self.add_edge(a, b);
        self
    }

    /// Builder-style [`add_goal`](Self::add_goal).
    #[must_use]
    pub fn with_goal(mut self, node: u32) -> Self {
        self.add_goal(node);
        self
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Always `false`: the start node is part of every maze.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Whether `a` and `b` are connected by an edge.
    #[must_use]
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Current position of every player registered so far.
    #[must_use]
    pub fn player_positions(&self) -> Vec<u32> {
        self.players.positions()
    }

    /// Number of player moves recorded so far.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves.load(Ordering::Relaxed)
    }
}

impl Maze for GraphMaze {
    type Node = u32;
    type Player = PlayerId;
    type Error = MazeError;

    fn start(&self) -> u32 {
        self.start
    }

    fn neighbors(&self, node: u32) -> Result<IndexSet<u32>, MazeError> {
        self.adjacency
            .get(&node)
            .cloned()
            .ok_or(MazeError::UnknownNode(node))
    }

    fn has_goal(&self, node: u32) -> bool {
        self.goals.contains(&node)
    }

    fn new_player(&self, node: u32) -> PlayerId {
        self.players.register(node)
    }

    fn move_player(&self, player: &PlayerId, node: u32) {
        self.players.place(*player, node);
        self.moves.fetch_add(1, Ordering::Relaxed);
    }
}
