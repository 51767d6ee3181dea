use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::{Outcome, RequestResult, Snapshot};

/// Status codes counted as successful responses.
const SUCCESS_STATUS: Range<u16> = 200..300;

/// Running aggregate owned by the collector while results are drained.
#[derive(Debug, Default)]
pub(crate) struct AggregateState {
    pub(crate) latencies: Vec<Duration>,
    pub(crate) latency_total: Duration,
    pub(crate) status_code_counts: BTreeMap<u16, u64>,
    pub(crate) error_counts: BTreeMap<String, u64>,
    pub(crate) total_bytes: u64,
    pub(crate) success_count: u64,
}

/// Single consumer folding request results into an aggregate.
///
/// The collector is fed from the receiving half of the result channel. Once
/// every producer has dropped its sender, [`Collector::drain`] consumes the
/// remaining buffer and returns; [`Collector::finish`] then freezes the
/// aggregate into a [`Snapshot`] for reporting.
#[derive(Debug, Default)]
pub struct Collector {
    state: AggregateState,
    processed: u64,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one result into the aggregate.
    pub fn record(&mut self, result: RequestResult) {
        self.processed = self.processed.saturating_add(1);
        let state = &mut self.state;
        match result.outcome {
            Outcome::Error(description) => {
                let count = state.error_counts.entry(description).or_insert(0);
                *count = count.saturating_add(1);
            }
            Outcome::Response {
                status_code,
                content_length,
            } => {
                state.latencies.push(result.duration);
                state.latency_total = state.latency_total.saturating_add(result.duration);
                let count = state.status_code_counts.entry(status_code).or_insert(0);
                *count = count.saturating_add(1);
                if let Some(length) = content_length.filter(|length| *length > 0) {
                    state.total_bytes = state.total_bytes.saturating_add(length);
                }
                if SUCCESS_STATUS.contains(&status_code) {
                    state.success_count = state.success_count.saturating_add(1);
                }
            }
        }
    }

    /// Folds every result currently buffered in the channel without waiting
    /// for more. Returns the number of results consumed.
    pub fn drain_pending(&mut self, results_rx: &mut mpsc::Receiver<RequestResult>) -> usize {
        let mut drained: usize = 0;
        loop {
            match results_rx.try_recv() {
                Ok(result) => {
                    self.record(result);
                    drained = drained.saturating_add(1);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        drained
    }

    /// Drains the channel until every sender is gone and the buffer is empty.
    ///
    /// The caller must not hold a sender of its own, otherwise this never
    /// returns. Returns the number of results consumed.
    pub async fn drain(&mut self, mut results_rx: mpsc::Receiver<RequestResult>) -> usize {
        let mut drained = self.drain_pending(&mut results_rx);
        while let Some(result) = results_rx.recv().await {
            self.record(result);
            drained = drained.saturating_add(1);
        }
        tracing::debug!(
            drained,
            processed = self.processed,
            "Result channel closed, drain complete"
        );
        drained
    }

    /// Number of results folded so far.
    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    /// Freezes the aggregate with the externally measured run duration.
    #[must_use]
    pub fn finish(self, wall_clock_total: Duration) -> Snapshot {
        Snapshot::freeze(self.state, wall_clock_total)
    }
}
