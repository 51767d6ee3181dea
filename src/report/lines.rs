use crate::metrics::Snapshot;

use super::format::{format_scaled, format_secs};
use super::histogram::LatencyHistogram;
use super::percentiles::nearest_rank;
use super::style::ReportStyle;

/// Fractional digits of summary durations and rates (matches `RATE_SCALE`).
const SUMMARY_DECIMALS: u32 = 4;
/// Fractional digits of histogram edges.
const EDGE_DECIMALS: u32 = 3;

pub(crate) fn csv_lines(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .latencies()
        .iter()
        .enumerate()
        .map(|(index, latency)| {
            format!(
                "{},{}",
                index.saturating_add(1),
                format_secs(*latency, SUMMARY_DECIMALS)
            )
        })
        .collect()
}

/// Summary block, then status codes, histogram and percentiles. Empty when
/// no request produced a response.
pub(crate) fn detail_lines(snapshot: &Snapshot, style: &ReportStyle) -> Vec<String> {
    let (Some(fastest), Some(slowest)) = (snapshot.fastest(), snapshot.slowest()) else {
        return Vec::new();
    };

    let mut lines = vec![
        String::new(),
        "Summary:".to_owned(),
        format!(
            "  Total:\t{} secs.",
            format_secs(snapshot.wall_clock_total(), SUMMARY_DECIMALS)
        ),
        format!("  Slowest:\t{} secs.", format_secs(slowest, SUMMARY_DECIMALS)),
        format!("  Fastest:\t{} secs.", format_secs(fastest, SUMMARY_DECIMALS)),
        format!(
            "  Average:\t{} secs.",
            format_secs(snapshot.average(), SUMMARY_DECIMALS)
        ),
        format!(
            "  Requests/sec:\t{}",
            format_scaled(snapshot.rps_x10000(), SUMMARY_DECIMALS)
        ),
    ];
    if snapshot.total_bytes() > 0 {
        lines.push(format!(
            "  Total Data Received:\t{} bytes.",
            snapshot.total_bytes()
        ));
        lines.push(format!(
            "  Response Size per Request:\t{} bytes.",
            snapshot.bytes_per_response()
        ));
    }

    lines.extend(status_code_lines(snapshot));
    lines.extend(histogram_lines(snapshot, style));
    lines.extend(percentile_lines(snapshot, style));
    lines
}

pub(crate) fn status_code_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = vec![String::new(), "Status code distribution:".to_owned()];
    lines.extend(
        snapshot
            .status_code_counts()
            .iter()
            .map(|(code, count)| format!("  [{}]\t{} responses", code, count)),
    );
    lines
}

pub(crate) fn histogram_lines(snapshot: &Snapshot, style: &ReportStyle) -> Vec<String> {
    let histogram = LatencyHistogram::build(snapshot.latencies(), style.bucket_count());
    let mut lines = vec![String::new(), "Response time histogram:".to_owned()];
    lines.extend(histogram.buckets.iter().map(|bucket| {
        let bar = style
            .bar_glyph()
            .repeat(histogram.bar_len(bucket.count, style.bar_width()));
        format!(
            "  {} [{}]\t|{}",
            format_secs(bucket.edge, EDGE_DECIMALS),
            bucket.count,
            bar
        )
    }));
    lines
}

pub(crate) fn percentile_lines(snapshot: &Snapshot, style: &ReportStyle) -> Vec<String> {
    let mut lines = vec![String::new(), "Latency distribution:".to_owned()];
    lines.extend(
        nearest_rank(snapshot.latencies(), style.percentiles())
            .into_iter()
            .map(|value| {
                format!(
                    "  {}% in {} secs.",
                    value.percentile,
                    format_secs(value.latency, SUMMARY_DECIMALS)
                )
            }),
    );
    lines
}

/// Error distribution, or nothing when every request got a response.
pub(crate) fn error_lines(snapshot: &Snapshot) -> Vec<String> {
    if snapshot.error_count() == 0 {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Error distribution:".to_owned()];
    lines.extend(
        snapshot
            .error_counts()
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(description, count)| format!("  [{}]\t{}", count, description)),
    );
    lines
}
