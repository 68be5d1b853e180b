use crate::{maze::Maze, solver::shared::SharedState, types::MazePath};

impl<M: Maze> SharedState<M> {
    /// Walk the predecessor chain from `goal` back to the search origin.
    ///
    /// # Panics
    /// If a node on the chain has no recorded predecessor, or if the chain is
    /// longer than the number of claimed nodes allows. Both mean the
    /// predecessor bookkeeping is broken.
    pub(crate) fn reconstruct_path(&self, goal: M::Node) -> MazePath<M::Node> {
        // Every node on the chain except `goal` has been claimed.
        let mut bound = self.visited.len() + 1;
        let mut nodes = vec![goal];
        let mut current = goal;
        while current != self.origin {
            current = self.predecessors.get(&current).unwrap_or_else(|| {
                panic!("SharedState::reconstruct_path: [1] no predecessor for {current:?}")
            });
            nodes.push(current);
            if nodes.len() > bound {
                bound = self.visited.len() + 1;
                assert!(
                    nodes.len() <= bound,
                    "SharedState::reconstruct_path: [2] chain from {goal:?} does not reach {:?}",
                    self.origin
                );
            }
        }
        nodes.reverse();
        MazePath::new(nodes)
    }
}
