//! Rendering of a finished run.
//!
//! The [`Reporter`] reads a frozen [`Snapshot`] and renders it as text lines
//! in the selected [`OutputMode`]. Percentiles and histogram buckets are
//! derived from the snapshot's sorted latencies on every render; nothing is
//! cached, so rendering the same snapshot twice yields identical output.
mod format;
mod histogram;
mod json;
mod lines;
mod percentiles;
mod style;


use std::io::Write;

use crate::args::OutputMode;
use crate::metrics::Snapshot;

pub use histogram::{Bucket, LatencyHistogram};
pub use percentiles::PercentileValue;
pub use style::{BAR_GLYPH, BAR_WIDTH, HISTOGRAM_BUCKETS, PERCENTILES, ReportStyle};

#[derive(Debug, Clone, Default)]
pub struct Reporter {
    mode: OutputMode,
    style: ReportStyle,
}

impl Reporter {
    #[must_use]
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            style: ReportStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Renders the snapshot as output lines (without trailing newlines).
    #[must_use]
    pub fn render_lines(&self, snapshot: &Snapshot) -> Vec<String> {
        match self.mode {
            OutputMode::Csv => lines::csv_lines(snapshot),
            OutputMode::Json => vec![format!("{:#}", json::json_document(snapshot, &self.style))],
            OutputMode::Quiet => lines::error_lines(snapshot),
            OutputMode::Text => {
                let mut rendered = lines::detail_lines(snapshot, &self.style);
                rendered.extend(lines::error_lines(snapshot));
                rendered
            }
        }
    }

    /// Renders the snapshot as a single string, one newline per line.
    #[must_use]
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut rendered = self.render_lines(snapshot).join("\n");
        if !rendered.is_empty() {
            rendered.push('\n');
        }
        rendered
    }

    /// Writes the rendered report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn print<W: Write>(&self, snapshot: &Snapshot, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.render(snapshot).as_bytes())?;
        out.flush()
    }

    /// Bucketed latency distribution for the snapshot.
    #[must_use]
    pub fn histogram(&self, snapshot: &Snapshot) -> LatencyHistogram {
        LatencyHistogram::build(snapshot.latencies(), self.style.bucket_count())
    }

    /// Nearest-rank percentiles for the snapshot.
    #[must_use]
    pub fn percentiles(&self, snapshot: &Snapshot) -> Vec<PercentileValue> {
        percentiles::nearest_rank(snapshot.latencies(), self.style.percentiles())
    }
}
