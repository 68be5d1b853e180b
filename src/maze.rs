use crate::types::IndexSet;
use core::{fmt::Debug, hash::Hash};

/// The maze collaborator explored by the solver.
///
/// A maze is a static graph: `neighbors` must return the same set for a node
/// for the whole duration of a search. All methods may be called concurrently
/// from many search tasks, so implementations serialize their own side
/// effects (player bookkeeping) internally if needed.
pub trait Maze: Send + Sync + 'static {
    /// Opaque identifier of a maze position.
    type Node: Copy + Eq + Hash + Debug + Send + Sync + 'static;
    /// Traversal marker registered by every search task.
    type Player: Send;
    /// Failure of a neighbor lookup, e.g. a node missing from the maze data.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The canonical start node. Paths are always reconstructed back to it.
    fn start(&self) -> Self::Node;

    /// Nodes adjacent to `node`.
    ///
    /// # Errors
    /// If the maze data is inconsistent for `node`. The solver treats this as
    /// fatal and propagates it unchanged.
    fn neighbors(&self, node: Self::Node) -> Result<IndexSet<Self::Node>, Self::Error>;

    /// Whether `node` is a goal.
    fn has_goal(&self, node: Self::Node) -> bool;

    /// Register a new traversal marker at `node`.
    fn new_player(&self, node: Self::Node) -> Self::Player;

    /// Record that `player` is now at `node`.
    fn move_player(&self, player: &Self::Player, node: Self::Node);
}
