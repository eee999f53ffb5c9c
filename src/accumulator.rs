use std::sync::{Mutex, MutexGuard, PoisonError};

/// What to do with a partial sum that came back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanPolicy {
    /// Discard the partial; the total is the sum of the valid ones.
    #[default]
    Drop,
    /// Add it anyway, so the whole trial reports NaN.
    Propagate,
}

#[derive(Debug, Default)]
struct State {
    total: f64,
    merged: usize,
    dropped: usize,
}

impl State {
    fn merge(&mut self, partial: f64, policy: NanPolicy) -> bool {
        if partial.is_nan() && policy == NanPolicy::Drop {
            self.dropped += 1;
            return false;
        }
        self.total += partial;
        self.merged += 1;
        true
    }
}

/// Running total for one trial, shared by reference between its workers.
///
/// Every merge happens under one internal lock. Reading the total after the
/// workers have been joined sees every merge.
#[derive(Debug, Default)]
pub struct SharedAccumulator {
    state: Mutex<State>,
    policy: NanPolicy,
}

impl SharedAccumulator {
    pub fn new(policy: NanPolicy) -> Self {
        Self {
            state: Mutex::default(),
            policy,
        }
    }

    pub fn policy(&self) -> NanPolicy {
        self.policy
    }

    // A worker that panicked cannot leave `State` half-updated, so a
    // poisoned lock is still safe to read.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `partial` to the total. Returns `false` if it was dropped as NaN.
    pub fn merge(&self, partial: f64) -> bool {
        let merged = self.lock().merge(partial, self.policy);
        if !merged {
            log::warn!("dropping NaN partial sum");
        }
        merged
    }

    pub fn total(&self) -> f64 {
        self.lock().total
    }

    /// Number of partials added to the total.
    pub fn merged(&self) -> usize {
        self.lock().merged
    }

    /// Number of NaN partials discarded.
    pub fn dropped(&self) -> usize {
        self.lock().dropped
    }

    pub fn reset(&mut self) {
        *self.state.get_mut().unwrap_or_else(PoisonError::into_inner) = State::default();
    }

    pub fn into_total(self) -> f64 {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .total
    }
}

/// Folds partials the same way [`SharedAccumulator`] does, without a lock.
///
/// Used where a single thread sees every partial.
#[derive(Debug, Default)]
pub struct LocalAccumulator {
    state: State,
    policy: NanPolicy,
}

impl LocalAccumulator {
    pub fn new(policy: NanPolicy) -> Self {
        Self {
            state: State::default(),
            policy,
        }
    }

    pub fn merge(&mut self, partial: f64) -> bool {
        let merged = self.state.merge(partial, self.policy);
        if !merged {
            log::warn!("dropping NaN partial sum");
        }
        merged
    }

    pub fn total(&self) -> f64 {
        self.state.total
    }

    pub fn merged(&self) -> usize {
        self.state.merged
    }

    pub fn dropped(&self) -> usize {
        self.state.dropped
    }
}
