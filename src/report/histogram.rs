use std::num::NonZeroUsize;
use std::time::Duration;

use crate::metrics::duration_from_nanos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Upper edge of the bucket (inclusive).
    pub edge: Duration,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyHistogram {
    pub buckets: Vec<Bucket>,
    pub max_count: u64,
}

impl LatencyHistogram {
    /// Buckets ascending `sorted` latencies between the fastest and slowest
    /// sample.
    ///
    /// Produces `bucket_count + 1` edges evenly spaced from the fastest sample;
    /// the last edge is pinned to the slowest sample. Each latency lands in
    /// the first edge it does not exceed. Empty input yields no buckets.
    pub(crate) fn build(sorted: &[Duration], bucket_count: NonZeroUsize) -> Self {
        let (Some(&fastest), Some(&slowest)) = (sorted.first(), sorted.last()) else {
            return Self {
                buckets: Vec::new(),
                max_count: 0,
            };
        };

        let edges = bucket_edges(fastest, slowest, bucket_count);
        let mut counts = vec![0u64; edges.len()];
        let last = edges.len().saturating_sub(1);
        let mut cursor: usize = 0;
        for latency in sorted {
            while cursor < last && edges.get(cursor).is_some_and(|edge| latency > edge) {
                cursor = cursor.saturating_add(1);
            }
            if let Some(count) = counts.get_mut(cursor) {
                *count = count.saturating_add(1);
            }
        }

        let max_count = counts.iter().copied().max().unwrap_or(0);
        let buckets = edges
            .into_iter()
            .zip(counts)
            .map(|(edge, count)| Bucket { edge, count })
            .collect();
        Self { buckets, max_count }
    }

    /// Bar length for a bucket, scaled so the fullest bucket spans `bar_width`.
    #[must_use]
    pub fn bar_len(&self, count: u64, bar_width: usize) -> usize {
        let width = u64::try_from(bar_width).unwrap_or(u64::MAX);
        let len = count
            .saturating_mul(width)
            .checked_div(self.max_count)
            .unwrap_or(0);
        usize::try_from(len).unwrap_or(bar_width)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |total, bucket| total.saturating_add(bucket.count))
    }
}

fn bucket_edges(fastest: Duration, slowest: Duration, bucket_count: NonZeroUsize) -> Vec<Duration> {
    let span_ns = slowest.saturating_sub(fastest).as_nanos();
    let divisor = u128::try_from(bucket_count.get()).unwrap_or(u128::MAX);
    let mut edges = Vec::with_capacity(bucket_count.get().saturating_add(1));
    for index in 0..bucket_count.get() {
        let step = u128::try_from(index).unwrap_or(u128::MAX);
        let offset = span_ns
            .saturating_mul(step)
            .checked_div(divisor)
            .unwrap_or(0);
        edges.push(fastest.saturating_add(duration_from_nanos(offset)));
    }
    edges.push(slowest);
    edges
}
