use serde_json::{Map, Value, json};

use crate::metrics::{RATE_SCALE, Snapshot};

use super::histogram::LatencyHistogram;
use super::percentiles::nearest_rank;
use super::style::ReportStyle;

/// Machine-readable report document. Durations are seconds.
pub(crate) fn json_document(snapshot: &Snapshot, style: &ReportStyle) -> Value {
    let status_codes: Map<String, Value> = snapshot
        .status_code_counts()
        .iter()
        .map(|(code, count)| (code.to_string(), json!(count)))
        .collect();
    let errors: Map<String, Value> = snapshot
        .error_counts()
        .iter()
        .map(|(description, count)| (description.clone(), json!(count)))
        .collect();
    let percentiles: Vec<Value> = nearest_rank(snapshot.latencies(), style.percentiles())
        .into_iter()
        .map(|value| {
            json!({
                "percentile": value.percentile,
                "secs": value.latency.as_secs_f64(),
            })
        })
        .collect();
    let histogram: Vec<Value> = LatencyHistogram::build(snapshot.latencies(), style.bucket_count())
        .buckets
        .into_iter()
        .map(|bucket| {
            json!({
                "edge_secs": bucket.edge.as_secs_f64(),
                "count": bucket.count,
            })
        })
        .collect();

    json!({
        "total_secs": snapshot.wall_clock_total().as_secs_f64(),
        "slowest_secs": snapshot.slowest().map(|value| value.as_secs_f64()),
        "fastest_secs": snapshot.fastest().map(|value| value.as_secs_f64()),
        "average_secs": snapshot.average().as_secs_f64(),
        "requests_per_sec": scaled_to_f64(snapshot.rps_x10000()),
        "successful_per_sec": scaled_to_f64(snapshot.success_rps_x10000()),
        "responses": snapshot.response_count(),
        "successful": snapshot.success_count(),
        "errors": snapshot.error_count(),
        "total_bytes": snapshot.total_bytes(),
        "bytes_per_response": snapshot.bytes_per_response(),
        "status_codes": status_codes,
        "error_distribution": errors,
        "percentiles": percentiles,
        "histogram": histogram,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "JSON carries rates as floating-point numbers"
)]
fn scaled_to_f64(value: u128) -> f64 {
    value as f64 / RATE_SCALE as f64
}
