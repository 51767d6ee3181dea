use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::args::BoomArgs;
use crate::error::AppResult;
use crate::http::{self, RequestTemplate, WorkloadPlan};
use crate::metrics::{Collector, RequestResult, Snapshot};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

/// Upper bound on buffered results between workers and the collector.
const RESULTS_CHANNEL_CAPACITY: usize = 10_000;

/// Fires the configured workload and returns the aggregated results.
///
/// The wall clock runs from just before the first worker starts until the
/// collector has folded the last result. Ctrl-C stops the workers early and
/// the snapshot covers whatever completed before that.
///
/// # Errors
///
/// Returns an error when the arguments fail validation, the client or request
/// cannot be built, or the sender task panics.
pub async fn run_load(args: &BoomArgs) -> AppResult<Snapshot> {
    let plan = WorkloadPlan::from_args(args)?;
    let client = http::build_client(plan.concurrency)?;
    let template = RequestTemplate::from_args(&client, args)?;

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let capacity = usize::try_from(plan.requests)
        .unwrap_or(usize::MAX)
        .min(RESULTS_CHANNEL_CAPACITY);
    let (results_tx, results_rx) = mpsc::channel::<RequestResult>(capacity);

    let run_start = Instant::now();
    let sender_handle =
        http::setup_request_sender(plan, client, template, &shutdown_tx, results_tx);

    let mut collector = Collector::new();
    let drained = collector.drain(results_rx).await;
    let sender_result = sender_handle.await;
    let elapsed = run_start.elapsed();

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        error!("Signal handler task failed: {}", err);
    }
    sender_result?;

    debug!(drained, "Collector finished");
    info!(
        "Completed {} of {} requests in {:?}",
        collector.processed(),
        plan.requests,
        elapsed
    );
    Ok(collector.finish(elapsed))
}
