//! Common re-exports for the crate.

#[cfg(feature = "channel")]
pub use crate::channel::{partial_channel, Collector};

pub use crate::accumulator::{NanPolicy, SharedAccumulator};
pub use crate::config::{RunConfig, DEFAULT_THREAD_COUNTS};
pub use crate::integrand::{CosMinusOneOverX, Integrand, Unguarded};
pub use crate::report::Report;
pub use crate::runner::{ParallelRunner, StepSplit, Strategy, Trial, TrialOutcome};
pub use crate::{integrate, integrate_with, Interval};
