use core::num::NonZeroUsize;

/// Decides, for every unvisited neighbor of a freshly claimed node, whether it
/// is handed to a new concurrent task or pushed on the local stack.
///
/// The same stack walk serves every policy; policies are resolved statically.
pub(crate) trait ForkPolicy: Copy + Send + Sync + 'static {
    /// Whether the policy can fork at all. Searches under a non-forking
    /// policy run on the calling thread, without a task scope.
    const FORKS: bool = true;

    /// `steps` is the number of nodes claimed so far by the calling task.
    /// `fan_out` counts the claimed node's currently unvisited neighbors. It
    /// is a racy snapshot and only evaluated when the cadence matches.
    fn should_fork(&self, steps: usize, fan_out: impl FnOnce() -> usize) -> bool;
}

/// Plain depth-first search on a single task.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Sequential;

impl ForkPolicy for Sequential {
    const FORKS: bool = false;

    #[inline]
    fn should_fork(&self, _steps: usize, _fan_out: impl FnOnce() -> usize) -> bool {
        false
    }
}

/// Fork on every `n`-th claimed node, provided the node actually branches.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ForkEvery(NonZeroUsize);

impl ForkEvery {
    pub(crate) fn new(every: NonZeroUsize) -> Self {
        Self(every)
    }
}

impl ForkPolicy for ForkEvery {
    #[inline]
    fn should_fork(&self, steps: usize, fan_out: impl FnOnce() -> usize) -> bool {
        let Self(every) = self;
        steps != 0 && steps % every.get() == 0 && fan_out() > 1
    }
}
