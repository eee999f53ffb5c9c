use crate::{
    accumulator::NanPolicy,
    runner::{StepSplit, Strategy},
    Error, Result,
};

/// Thread counts tried by a default run, in order.
pub const DEFAULT_THREAD_COUNTS: [usize; 6] = [1, 2, 4, 8, 16, 32];

/// Inputs of a full run: integrate over `[0, boundary]` once per thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub boundary: f64,
    /// Total midpoint cells, shared between the workers of a trial.
    pub steps: u64,
    pub thread_counts: Vec<usize>,
    pub strategy: Strategy,
    pub split: StepSplit,
    pub nan_policy: NanPolicy,
}

impl RunConfig {
    pub fn new(boundary: f64, steps: u64) -> Self {
        Self {
            boundary,
            steps,
            thread_counts: DEFAULT_THREAD_COUNTS.to_vec(),
            strategy: Strategy::default(),
            split: StepSplit::default(),
            nan_policy: NanPolicy::default(),
        }
    }

    pub fn with_thread_counts(mut self, thread_counts: impl Into<Vec<usize>>) -> Self {
        self.thread_counts = thread_counts.into();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_split(mut self, split: StepSplit) -> Self {
        self.split = split;
        self
    }

    pub fn with_nan_policy(mut self, nan_policy: NanPolicy) -> Self {
        self.nan_policy = nan_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.boundary.is_finite() {
            return Err(Error::NonFiniteBoundary(self.boundary));
        }
        if self.thread_counts.is_empty() {
            return Err(Error::NoThreadCounts);
        }
        if self.thread_counts.contains(&0) {
            return Err(Error::ZeroThreads);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::new(1.0, 1000);
        assert_eq!(config.thread_counts, [1, 2, 4, 8, 16, 32]);
        assert_eq!(config.split, StepSplit::Truncate);
        assert_eq!(config.nan_policy, NanPolicy::Drop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_configs() {
        assert!(matches!(
            RunConfig::new(f64::INFINITY, 10).validate(),
            Err(Error::NonFiniteBoundary(_))
        ));
        assert!(matches!(
            RunConfig::new(1.0, 10).with_thread_counts(vec![]).validate(),
            Err(Error::NoThreadCounts)
        ));
        assert!(matches!(
            RunConfig::new(1.0, 10).with_thread_counts([2, 0]).validate(),
            Err(Error::ZeroThreads)
        ));
    }
}
