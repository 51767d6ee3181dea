use std::time::Duration;

const PERCENT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileValue {
    pub percentile: u8,
    pub latency: Duration,
}

/// Nearest-rank percentiles over ascending `sorted` latencies.
///
/// Walks the samples once. At index `i` the rank is `i * 100 / len`; the
/// first sample whose rank reaches the next pending target is recorded for
/// it and the walk moves on to the following target. At most one target is
/// satisfied per sample, so targets still pending when the samples run out
/// are left out of the result. `targets` must be ascending.
pub(crate) fn nearest_rank(sorted: &[Duration], targets: &[u8]) -> Vec<PercentileValue> {
    let len = sorted.len();
    let mut values = Vec::with_capacity(targets.len());
    let mut pending = targets.iter().copied().peekable();

    for (index, latency) in sorted.iter().enumerate() {
        let Some(&target) = pending.peek() else {
            break;
        };
        let rank = index
            .saturating_mul(PERCENT)
            .checked_div(len)
            .unwrap_or(0);
        if rank >= usize::from(target) {
            values.push(PercentileValue {
                percentile: target,
                latency: *latency,
            });
            pending.next();
        }
    }

    values
}
