use std::collections::BTreeMap;
use std::time::Duration;

use super::collector::AggregateState;

/// Fixed-point scale of rate values (four decimal places).
pub const RATE_SCALE: u128 = 10_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Frozen aggregate of a finished run.
///
/// Latencies are sorted ascending once, when the snapshot is created, and the
/// snapshot exposes no way to mutate them afterwards.
#[derive(Debug, Clone)]
pub struct Snapshot {
    latencies: Vec<Duration>,
    latency_total: Duration,
    status_code_counts: BTreeMap<u16, u64>,
    error_counts: BTreeMap<String, u64>,
    total_bytes: u64,
    success_count: u64,
    wall_clock_total: Duration,
}

impl Snapshot {
    pub(crate) fn freeze(state: AggregateState, wall_clock_total: Duration) -> Self {
        let AggregateState {
            mut latencies,
            latency_total,
            status_code_counts,
            error_counts,
            total_bytes,
            success_count,
        } = state;
        latencies.sort_unstable();
        Self {
            latencies,
            latency_total,
            status_code_counts,
            error_counts,
            total_bytes,
            success_count,
            wall_clock_total,
        }
    }

    /// Latencies of non-error results, ascending.
    #[must_use]
    pub fn latencies(&self) -> &[Duration] {
        &self.latencies
    }

    #[must_use]
    pub const fn status_code_counts(&self) -> &BTreeMap<u16, u64> {
        &self.status_code_counts
    }

    #[must_use]
    pub const fn error_counts(&self) -> &BTreeMap<String, u64> {
        &self.error_counts
    }

    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.success_count
    }

    #[must_use]
    pub const fn wall_clock_total(&self) -> Duration {
        self.wall_clock_total
    }

    /// Number of results that produced a response.
    #[must_use]
    pub fn response_count(&self) -> u64 {
        u64::try_from(self.latencies.len()).unwrap_or(u64::MAX)
    }

    /// Number of results that failed without a response.
    #[must_use]
    pub fn error_count(&self) -> u64 {
        self.error_counts
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    #[must_use]
    pub fn fastest(&self) -> Option<Duration> {
        self.latencies.first().copied()
    }

    #[must_use]
    pub fn slowest(&self) -> Option<Duration> {
        self.latencies.last().copied()
    }

    /// Mean response latency, zero when there were no responses.
    #[must_use]
    pub fn average(&self) -> Duration {
        let count = u128::from(self.response_count());
        let average = self
            .latency_total
            .as_nanos()
            .checked_div(count)
            .unwrap_or(0);
        duration_from_nanos(average)
    }

    /// Responses per second scaled by [`RATE_SCALE`].
    #[must_use]
    pub fn rps_x10000(&self) -> u128 {
        scaled_rate(self.response_count(), self.wall_clock_total)
    }

    /// Successful (2xx) responses per second scaled by [`RATE_SCALE`].
    #[must_use]
    pub fn success_rps_x10000(&self) -> u128 {
        scaled_rate(self.success_count, self.wall_clock_total)
    }

    /// Average response size in bytes, truncated. Zero without responses.
    #[must_use]
    pub fn bytes_per_response(&self) -> u64 {
        self.total_bytes
            .checked_div(self.response_count())
            .unwrap_or(0)
    }
}

/// Rate of `count` events over `elapsed`, rounded to [`RATE_SCALE`].
///
/// A zero elapsed time yields a zero rate.
pub(crate) fn scaled_rate(count: u64, elapsed: Duration) -> u128 {
    let elapsed_ns = elapsed.as_nanos();
    if elapsed_ns == 0 {
        return 0;
    }
    let numerator = u128::from(count)
        .saturating_mul(RATE_SCALE)
        .saturating_mul(NANOS_PER_SEC)
        .saturating_add(elapsed_ns / 2);
    numerator.checked_div(elapsed_ns).unwrap_or(0)
}

pub(crate) fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
