//! Midpoint-rule integration of `(cos(x) - 1) / x`, split across threads.
//!
//! [`integrate`] sums one interval on the calling thread. [`ParallelRunner`]
//! cuts `[0, boundary]` into contiguous slices, integrates each slice on its
//! own thread and merges the partial sums into a per-trial aggregator.

pub mod accumulator;
#[cfg(feature = "channel")]
pub mod channel;
pub mod config;
pub mod error;
pub mod integrand;
pub mod prelude;
pub mod report;
pub mod runner;

pub use accumulator::{NanPolicy, SharedAccumulator};
pub use config::{RunConfig, DEFAULT_THREAD_COUNTS};
pub use error::{Error, Result};
pub use integrand::{CosMinusOneOverX, Integrand, Unguarded};
pub use runner::{ParallelRunner, StepSplit, Strategy, Trial, TrialOutcome};

/// A closed range `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Cuts the interval into `parts` contiguous slices of equal width.
    ///
    /// Slice `i` ends exactly where slice `i + 1` starts, and the last slice
    /// ends exactly at `self.end`.
    pub fn partition(self, parts: usize) -> impl ExactSizeIterator<Item = Interval> {
        let bound = move |i: usize| {
            if i == parts {
                self.end
            } else {
                self.start + i as f64 * self.width() / parts as f64
            }
        };
        (0..parts).map(move |i| Interval::new(bound(i), bound(i + 1)))
    }
}

/// Midpoint-rule sum of `(cos(x) - 1) / x` over `[start, end]` with `steps` cells.
///
/// `steps == 0` gives `0.0`.
pub fn integrate(start: f64, end: f64, steps: u64) -> f64 {
    integrate_with(&CosMinusOneOverX, start, end, steps)
}

pub fn integrate_with<F: Integrand + ?Sized>(f: &F, start: f64, end: f64, steps: u64) -> f64 {
    if steps == 0 {
        return 0.0;
    }
    let step_size = (end - start) / steps as f64;
    let mut sum = 0.0;
    for i in 0..steps {
        let x = start + (i as f64 + 0.5) * step_size;
        sum += f.eval(x);
    }
    sum * step_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_is_zero() {
        assert_eq!(integrate(0.0, 1.0, 0), 0.0);
        assert_eq!(integrate(2.0, 2.0, 0), 0.0);
    }

    #[test]
    fn zero_width_is_zero() {
        assert_eq!(integrate(1.5, 1.5, 1000), 0.0);
    }

    #[test]
    fn single_cell_uses_midpoint() {
        let expected = (0.5f64.cos() - 1.0) / 0.5;
        assert_eq!(integrate(0.0, 1.0, 1), expected);
    }

    #[test]
    fn linear_function_is_exact() {
        let area = integrate_with(&|x: f64| 2.0 * x, 0.0, 3.0, 7);
        assert!((area - 9.0).abs() < 1e-12, "{}", area);
    }

    #[test]
    fn partition_of_zero_parts_is_empty() {
        assert_eq!(Interval::new(0.0, 1.0).partition(0).len(), 0);
    }

    #[test]
    fn partition_follows_i_x_over_t() {
        let slices: Vec<_> = Interval::new(0.0, 3.0).partition(4).collect();
        assert_eq!(slices[1], Interval::new(3.0 / 4.0, 2.0 * 3.0 / 4.0));
        assert_eq!(slices[3].end, 3.0);
    }
}
