use std::{fmt, str::FromStr, thread, time::Duration, time::Instant};

use crate::{
    accumulator::{NanPolicy, SharedAccumulator},
    integrand::{CosMinusOneOverX, Integrand},
    integrate_with, Error, Interval, Result, RunConfig,
};

/// How partial sums get from the workers into the trial total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Workers add into a [`SharedAccumulator`] under its lock.
    #[default]
    Mutex,
    /// Workers send partials over a channel to a single collector.
    #[cfg(feature = "channel")]
    Channel,
}

/// How the total step count is divided between workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepSplit {
    /// Every worker gets `steps / threads`; the remainder is lost.
    #[default]
    Truncate,
    /// The first `steps % threads` workers get one extra step.
    Redistribute,
}

impl StepSplit {
    pub fn steps_for(self, total: u64, workers: usize, index: usize) -> u64 {
        let workers = workers as u64;
        let base = total / workers;
        match self {
            StepSplit::Truncate => base,
            StepSplit::Redistribute => base + u64::from((index as u64) < total % workers),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialOutcome {
    Value(f64),
    ContainsNaN,
}

impl TrialOutcome {
    pub fn from_total(total: f64) -> Self {
        if total.is_nan() {
            TrialOutcome::ContainsNaN
        } else {
            TrialOutcome::Value(total)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            TrialOutcome::Value(v) => Some(*v),
            TrialOutcome::ContainsNaN => None,
        }
    }
}

/// Result of one thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub threads: usize,
    pub outcome: TrialOutcome,
    /// Time since the runner's clock started, not since this trial started.
    pub elapsed: Duration,
    /// Steps actually evaluated across all workers.
    pub steps: u64,
    pub merged: usize,
    pub dropped: usize,
}

struct Slice {
    index: usize,
    interval: Interval,
    steps: u64,
}

struct Aggregate {
    total: f64,
    merged: usize,
    dropped: usize,
}

/// Splits `[0, boundary]` between threads and integrates the slices concurrently.
pub struct ParallelRunner<F = CosMinusOneOverX> {
    integrand: F,
    strategy: Strategy,
    split: StepSplit,
    nan_policy: NanPolicy,
}

impl Default for ParallelRunner {
    fn default() -> Self {
        Self::new(CosMinusOneOverX)
    }
}

impl ParallelRunner {
    pub fn from_config(config: &RunConfig) -> Self {
        Self::default()
            .with_strategy(config.strategy)
            .with_split(config.split)
            .with_nan_policy(config.nan_policy)
    }
}

impl<F: Integrand> ParallelRunner<F> {
    pub fn new(integrand: F) -> Self {
        Self {
            integrand,
            strategy: Strategy::default(),
            split: StepSplit::default(),
            nan_policy: NanPolicy::default(),
        }
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

    /// Runs one trial per entry of `config.thread_counts`, in order.
    ///
    /// The clock starts once before the first trial, so each reported
    /// elapsed time is cumulative. `on_trial` sees every trial as soon as it
    /// finishes.
    pub fn run(&self, config: &RunConfig, mut on_trial: impl FnMut(&Trial)) -> Result<Vec<Trial>> {
        config.validate()?;
        let domain = Interval::new(0.0, config.boundary);
        let mut acc = SharedAccumulator::new(self.nan_policy);
        let clock = Instant::now();
        let mut trials = Vec::with_capacity(config.thread_counts.len());
        for &threads in &config.thread_counts {
            let trial = self.trial(&mut acc, clock, domain, config.steps, threads)?;
            on_trial(&trial);
            trials.push(trial);
        }
        Ok(trials)
    }

    /// Partition, spawn, join and report for a single thread count.
    ///
    /// `acc` is reset before any worker starts.
    pub fn trial(
        &self,
        acc: &mut SharedAccumulator,
        clock: Instant,
        domain: Interval,
        steps: u64,
        threads: usize,
    ) -> Result<Trial> {
        if threads == 0 {
            return Err(Error::ZeroThreads);
        }
        let slices: Vec<Slice> = domain
            .partition(threads)
            .enumerate()
            .map(|(index, interval)| Slice {
                index,
                interval,
                steps: self.split.steps_for(steps, threads, index),
            })
            .collect();

        acc.reset();
        let aggregate = match self.strategy {
            Strategy::Mutex => self.sum_locked(acc, &slices)?,
            #[cfg(feature = "channel")]
            Strategy::Channel => self.sum_channel(&slices)?,
        };

        let trial = Trial {
            threads,
            outcome: TrialOutcome::from_total(aggregate.total),
            elapsed: clock.elapsed(),
            steps: slices.iter().map(|s| s.steps).sum(),
            merged: aggregate.merged,
            dropped: aggregate.dropped,
        };
        log::info!(
            "{} threads: {:?} after {:?} ({} merged, {} dropped)",
            trial.threads,
            trial.outcome,
            trial.elapsed,
            trial.merged,
            trial.dropped
        );
        Ok(trial)
    }

    fn partial(&self, slice: &Slice) -> f64 {
        let Interval { start, end } = slice.interval;
        let partial = integrate_with(&self.integrand, start, end, slice.steps);
        log::debug!(
            "worker {}: [{}, {}) x {} steps = {}",
            slice.index,
            start,
            end,
            slice.steps,
            partial
        );
        partial
    }

    fn sum_locked(&self, acc: &SharedAccumulator, slices: &[Slice]) -> Result<Aggregate> {
        thread::scope(|s| -> Result<()> {
            let mut handles = Vec::with_capacity(slices.len());
            let spawned = slices.iter().try_for_each(|slice| -> Result<()> {
                let handle = worker(slice.index)
                    .spawn_scoped(s, move || {
                        acc.merge(self.partial(slice));
                    })
                    .map_err(|source| Error::Spawn {
                        index: slice.index,
                        source,
                    })?;
                handles.push((slice.index, handle));
                Ok(())
            });
            let joined = join_all(handles);
            spawned.and(joined)
        })?;
        // Every worker has been joined, so the reads below see all merges.
        Ok(Aggregate {
            total: acc.total(),
            merged: acc.merged(),
            dropped: acc.dropped(),
        })
    }

    #[cfg(feature = "channel")]
    fn sum_channel(&self, slices: &[Slice]) -> Result<Aggregate> {
        let (sender, collector) = crate::channel::partial_channel(self.nan_policy);
        thread::scope(|s| -> Result<Aggregate> {
            let mut handles = Vec::with_capacity(slices.len());
            let spawned = slices.iter().try_for_each(|slice| -> Result<()> {
                let sender = sender.clone();
                let handle = worker(slice.index)
                    .spawn_scoped(s, move || {
                        // The collector outlives every worker.
                        let _ = sender.send(self.partial(slice));
                    })
                    .map_err(|source| Error::Spawn {
                        index: slice.index,
                        source,
                    })?;
                handles.push((slice.index, handle));
                Ok(())
            });
            drop(sender);
            // A panicking worker drops its sender while unwinding, so this
            // still returns.
            let acc = collector.collect();
            let joined = join_all(handles);
            spawned.and(joined)?;
            Ok(Aggregate {
                total: acc.total(),
                merged: acc.merged(),
                dropped: acc.dropped(),
            })
        })
    }
}

/// Joins every worker, reporting the first one that panicked.
///
/// Leaving a panicked handle unjoined would make `thread::scope` panic.
fn join_all(handles: Vec<(usize, thread::ScopedJoinHandle<'_, ()>)>) -> Result<()> {
    let mut first_failure = Ok(());
    for (index, handle) in handles {
        if handle.join().is_err() && first_failure.is_ok() {
            first_failure = Err(Error::WorkerPanicked(index));
        }
    }
    first_failure
}

fn worker(index: usize) -> thread::Builder {
    thread::Builder::new().name(format!("integral-worker-{}", index))
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Mutex => f.write_str("mutex"),
            #[cfg(feature = "channel")]
            Strategy::Channel => f.write_str("channel"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mutex" => Ok(Strategy::Mutex),
            #[cfg(feature = "channel")]
            "channel" => Ok(Strategy::Channel),
            _ => Err(Error::InvalidInput {
                what: "strategy",
                input: s.to_owned(),
            }),
        }
    }
}

impl FromStr for StepSplit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "truncate" => Ok(StepSplit::Truncate),
            "redistribute" => Ok(StepSplit::Redistribute),
            _ => Err(Error::InvalidInput {
                what: "step split",
                input: s.to_owned(),
            }),
        }
    }
}

impl FromStr for NanPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "drop" => Ok(NanPolicy::Drop),
            "propagate" => Ok(NanPolicy::Propagate),
            _ => Err(Error::InvalidInput {
                what: "NaN policy",
                input: s.to_owned(),
            }),
        }
    }
}
