use std::num::NonZeroUsize;

/// Glyph repeated to draw histogram bars.
pub const BAR_GLYPH: &str = "∎";
/// Interior histogram buckets; one closing edge is added on top.
pub const HISTOGRAM_BUCKETS: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};
/// Length of the bar drawn for the fullest bucket.
pub const BAR_WIDTH: usize = 40;
/// Percentiles reported in the latency distribution.
pub const PERCENTILES: [u8; 7] = [10, 25, 50, 75, 90, 95, 99];

/// Formatting knobs owned by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    bar_glyph: String,
    bucket_count: NonZeroUsize,
    bar_width: usize,
    percentiles: Vec<u8>,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            bar_glyph: BAR_GLYPH.to_owned(),
            bucket_count: HISTOGRAM_BUCKETS,
            bar_width: BAR_WIDTH,
            percentiles: PERCENTILES.to_vec(),
        }
    }
}

impl ReportStyle {
    #[must_use]
    pub fn with_bar_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.bar_glyph = glyph.into();
        self
    }

    #[must_use]
    pub const fn with_bucket_count(mut self, bucket_count: NonZeroUsize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    #[must_use]
    pub const fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// Replaces the reported percentiles. They are kept sorted and unique,
    /// since the nearest-rank pass walks them in ascending order.
    #[must_use]
    pub fn with_percentiles(mut self, percentiles: &[u8]) -> Self {
        let mut percentiles = percentiles.to_vec();
        percentiles.sort_unstable();
        percentiles.dedup();
        self.percentiles = percentiles;
        self
    }

    #[must_use]
    pub fn bar_glyph(&self) -> &str {
        &self.bar_glyph
    }

    #[must_use]
    pub const fn bucket_count(&self) -> NonZeroUsize {
        self.bucket_count
    }

    #[must_use]
    pub const fn bar_width(&self) -> usize {
        self.bar_width
    }

    #[must_use]
    pub fn percentiles(&self) -> &[u8] {
        &self.percentiles
    }
}
