use crate::{
    maze::Maze,
    solver::{SolveError, policy::ForkPolicy, shared::SharedState},
    sync::{self, Arc, Handle, Scope},
    types::{MazeNode, MazePath, MazeSolveError},
};
use tracing::{debug, debug_span, trace};

pub(crate) type TaskResult<M> = Result<Option<MazePath<MazeNode<M>>>, MazeSolveError<M>>;

/// What a finished task leaves behind: its own result and the result slots of
/// the tasks it forked, in spawn order.
pub(crate) struct TaskReport<M: Maze> {
    local: TaskResult<M>,
    children: Vec<Handle<TaskReport<M>>>,
}

/// One search task: a depth-first walk from `start` over a private stack.
///
/// All tasks of a search are jobs of a single scope opened by the root. A
/// task never waits for the tasks it forks; their results are collected by
/// [`gather`] once the scope has drained.
pub(crate) struct Searcher<M: Maze, P> {
    shared: Arc<SharedState<M>>,
    start: M::Node,
    policy: P,
}

impl<M: Maze, P: ForkPolicy> Searcher<M, P> {
    pub(crate) fn new(shared: Arc<SharedState<M>>, start: M::Node, policy: P) -> Self {
        Self {
            shared,
            start,
            policy,
        }
    }

    /// Run the whole task tree rooted at this task and fold its results.
    pub(crate) fn search(self) -> TaskResult<M> {
        let root = if P::FORKS {
            sync::scope(|scope| self.run(Some(scope)))
        } else {
            self.run(None)
        };
        gather(root)
    }

    fn run(self, scope: Option<&Scope<'_, '_>>) -> TaskReport<M> {
        debug_span!("search_task", start = ?self.start).in_scope(|| self.walk(scope))
    }

    /// Explore from `start` until a goal is reached, a lookup fails, the flag
    /// is raised, or the region not owned by other tasks is exhausted.
    fn walk(&self, scope: Option<&Scope<'_, '_>>) -> TaskReport<M> {
        let Self {
            shared,
            start,
            policy,
        } = self;
        let maze = shared.maze();
        let player = maze.new_player(*start);
        let mut stack = vec![*start];
        let mut steps = 0_usize;
        let mut children = Vec::new();

        while let Some(node) = stack.pop() {
            if shared.is_halted() {
                // Someone else settled the search. Stop walking but keep the
                // children in the report: one of them may hold the path.
                trace!(pending = stack.len() + 1, "search settled elsewhere");
                break;
            }
            if maze.has_goal(node) {
                maze.move_player(&player, node);
                shared.halt();
                let path = shared.reconstruct_path(node);
                debug!(goal = ?node, steps = path.steps(), "goal reached");
                return TaskReport {
                    local: Ok(Some(path)),
                    children,
                };
            }
            if !shared.claim(node) {
                continue;
            }
            maze.move_player(&player, node);
            steps += 1;
            trace!(?node, steps, "claimed");

            let neighbors = match maze.neighbors(node) {
                Ok(neighbors) => neighbors,
                Err(source) => {
                    shared.halt();
                    return TaskReport {
                        local: Err(SolveError::Neighbors { node, source }),
                        children,
                    };
                }
            };
            for &neighbor in &neighbors {
                if shared.is_visited(&neighbor) {
                    continue;
                }
                // Must precede the push/fork: whoever pops `neighbor` may
                // reconstruct a path through it.
                shared.record_predecessor(neighbor, node);
                let fork = scope.filter(|_| {
                    policy.should_fork(steps, || shared.count_unvisited(&neighbors))
                });
                if let Some(scope) = fork {
                    shared.note_fork();
                    debug!(from = ?node, to = ?neighbor, "forking search task");
                    let child = Self::new(Arc::clone(shared), neighbor, *policy);
                    children.push(scope.spawn(move |scope| child.run(Some(scope))));
                } else {
                    stack.push(neighbor);
                }
            }
        }
        TaskReport {
            local: Ok(None),
            children,
        }
    }
}

/// Fold a finished task tree into one result.
///
/// Tasks are visited in pre-order: a task's own result comes before its
/// children's, earlier children before later ones. The first lookup failure
/// takes precedence over any path. Fork chains can be as long as the maze, so
/// neither the walk nor the teardown of the tree may recurse.
pub(crate) fn gather<M: Maze>(root: TaskReport<M>) -> TaskResult<M> {
    let mut path = None;
    let mut failure = None;
    let mut pending = vec![root];
    while let Some(TaskReport { local, children }) = pending.pop() {
        match local {
            Err(err) => {
                failure.get_or_insert(err);
            }
            Ok(Some(found)) => {
                path.get_or_insert(found);
            }
            Ok(None) => {}
        }
        pending.extend(children.into_iter().rev().map(Handle::join));
    }
    failure.map_or(Ok(path), Err)
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use crate::mazes::{GraphMaze, MazeError};

    type Report = TaskReport<GraphMaze>;

    fn leaf(local: TaskResult<GraphMaze>) -> Report {
        TaskReport {
            local,
            children: Vec::new(),
        }
    }

    fn path(nodes: &[u32]) -> TaskResult<GraphMaze> {
        Ok(Some(MazePath::new(nodes.to_vec())))
    }

    fn failure(node: u32) -> TaskResult<GraphMaze> {
        Err(SolveError::Neighbors {
            node,
            source: MazeError::UnknownNode(node),
        })
    }

    #[test]
    fn settled_task_forwards_child_path() {
        let root = sync::scope(|s| {
            let child = s.spawn(|_| leaf(path(&[1, 2, 4])));
            TaskReport {
                local: Ok(None),
                children: vec![child],
            }
        });
        assert_eq!(gather(root), path(&[1, 2, 4]));
    }

    #[test]
    fn own_path_precedes_children() {
        let root = sync::scope(|s| {
            let child = s.spawn(|_| leaf(path(&[1, 3])));
            TaskReport {
                local: path(&[1, 2]),
                children: vec![child],
            }
        });
        assert_eq!(gather(root), path(&[1, 2]));
    }

    #[test]
    fn earlier_subtree_precedes_later_child() {
        let root = sync::scope(|s| {
            let first = s.spawn(|s| {
                let grandchild = s.spawn(|_| leaf(path(&[1, 2, 5])));
                TaskReport {
                    local: Ok(None),
                    children: vec![grandchild],
                }
            });
            let second = s.spawn(|_| leaf(path(&[1, 3])));
            TaskReport {
                local: Ok(None),
                children: vec![first, second],
            }
        });
        assert_eq!(gather(root), path(&[1, 2, 5]));
    }

    #[test]
    fn failure_beats_any_path() {
        let root = sync::scope(|s| {
            let found = s.spawn(|_| leaf(path(&[1, 2])));
            let failed = s.spawn(|_| leaf(failure(9)));
            TaskReport {
                local: path(&[1]),
                children: vec![found, failed],
            }
        });
        assert_eq!(gather(root), failure(9));
    }

    #[test]
    fn deep_report_chains_are_gathered() {
        let mut report = leaf(path(&[1, 2]));
        for _ in 0..50_000 {
            let inner = report;
            report = sync::scope(|s| TaskReport {
                local: Ok(None),
                children: vec![s.spawn(move |_| inner)],
            });
        }
        assert_eq!(gather(report), path(&[1, 2]));
    }
}
