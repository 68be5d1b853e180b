use core::num::NonZeroUsize;

/// Runtime configuration of a [`ForkJoinSolver`](crate::solver::ForkJoinSolver).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of newly claimed nodes between fork opportunities of a task.
    ///
    /// A non-positive value disables forking entirely, which makes the search
    /// a plain sequential depth-first search.
    pub fork_after: i64,
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool.
    pub num_threads: Option<NonZeroUsize>,
}

impl SolverConfig {
    /// Normalized fork threshold.
    #[must_use]
    pub fn fork_after(&self) -> ForkAfter {
        ForkAfter::from(self.fork_after)
    }
}

/// Normalized fork threshold.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ForkAfter {
    /// Never fork; the search stays on a single task.
    #[default]
    Never,
    /// A task may fork whenever its claimed-node count is a multiple of the
    /// value.
    Every(NonZeroUsize),
}

impl From<i64> for ForkAfter {
    fn from(value: i64) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::Never, Self::Every)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_threshold_never_forks() {
        assert_eq!(ForkAfter::from(0), ForkAfter::Never);
        assert_eq!(ForkAfter::from(-1), ForkAfter::Never);
        assert_eq!(ForkAfter::from(i64::MIN), ForkAfter::Never);
        assert_eq!(SolverConfig::default().fork_after(), ForkAfter::Never);
    }

    #[test]
    fn positive_threshold_is_kept() {
        assert_eq!(
            ForkAfter::from(3),
            ForkAfter::Every(NonZeroUsize::new(3).unwrap())
        );
        assert_eq!(ForkAfter::from(1), ForkAfter::Every(NonZeroUsize::MIN));
        assert_eq!(
            SolverConfig {
                fork_after: 4,
                num_threads: None,
            }
            .fork_after(),
            ForkAfter::Every(NonZeroUsize::new(4).unwrap())
        );
    }
}
