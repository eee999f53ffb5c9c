//! Lock-free aggregation: workers send partial sums, one collector adds them.

use crate::accumulator::{LocalAccumulator, NanPolicy};

pub type PartialSender = flume::Sender<f64>;

pub struct Collector {
    receiver: flume::Receiver<f64>,
    policy: NanPolicy,
}

/// Opens a channel for one trial.
pub fn partial_channel(policy: NanPolicy) -> (PartialSender, Collector) {
    let (sender, receiver) = flume::unbounded();
    (sender, Collector { receiver, policy })
}

impl Collector {
    /// Receives partials until every sender is gone.
    pub fn collect(self) -> LocalAccumulator {
        let mut acc = LocalAccumulator::new(self.policy);
        for partial in self.receiver.iter() {
            acc.merge(partial);
        }
        acc
    }
}
