use std::error::Error as _;
use std::sync::Arc;

use reqwest::{Client, Request};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::args::BoomArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::RequestResult;
use crate::shutdown::ShutdownSender;

use super::client::RequestTemplate;
use super::limiter::RequestLimiter;

/// How many requests to fire and how many workers fire them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadPlan {
    pub requests: u64,
    pub concurrency: usize,
}

impl WorkloadPlan {
    /// Validates the request/concurrency pair from the CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when concurrency exceeds the number of requests.
    pub fn from_args(args: &BoomArgs) -> AppResult<Self> {
        let requests = args.requests.get();
        let concurrency = args.concurrency.get();
        if u64::try_from(concurrency).unwrap_or(u64::MAX) > requests {
            return Err(AppError::validation(
                ValidationError::ConcurrencyExceedsRequests {
                    concurrency,
                    requests,
                },
            ));
        }
        Ok(Self {
            requests,
            concurrency,
        })
    }
}

/// Spawns the workers firing the planned requests.
///
/// Every completed request is sent on `results_tx`. Each worker owns a clone
/// of the sender and drops it when it stops, so the channel closes once the
/// returned task has joined all workers. Shutdown receivers are subscribed
/// before this returns, so a signal sent right after is never missed. A
/// shutdown stops the workers early; requests in flight are abandoned and not
/// reported.
#[must_use]
pub fn setup_request_sender(
    plan: WorkloadPlan,
    client: Client,
    template: RequestTemplate,
    shutdown_tx: &ShutdownSender,
    results_tx: mpsc::Sender<RequestResult>,
) -> JoinHandle<()> {
    let shutdown_rxs: Vec<_> = (0..plan.concurrency)
        .map(|_| shutdown_tx.subscribe())
        .collect();

    tokio::spawn(async move {
        let limiter = Arc::new(RequestLimiter::new(plan.requests));
        let template = Arc::new(template);
        info!(
            "Firing {} requests at {} with {} workers",
            plan.requests,
            template.url(),
            plan.concurrency
        );

        let mut workers = Vec::with_capacity(plan.concurrency);
        for mut shutdown_rx in shutdown_rxs {
            let limiter = Arc::clone(&limiter);
            let template = Arc::clone(&template);
            let client = client.clone();
            let results_tx = results_tx.clone();

            workers.push(tokio::spawn(async move {
                while limiter.try_reserve() {
                    let Some(request) = template.try_clone() else {
                        error!("Failed to clone request template; stopping worker.");
                        break;
                    };
                    let result = tokio::select! {
                        _ = shutdown_rx.recv() => break,
                        result = execute_request(&client, request) => result,
                    };
                    if results_tx.send(result).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(results_tx);

        for worker in workers {
            if let Err(err) = worker.await {
                error!("Worker task failed: {}", err);
            }
        }
        debug!("All workers finished after {} requests", limiter.reserved());
    })
}

async fn execute_request(client: &Client, request: Request) -> RequestResult {
    let start = Instant::now();
    match client.execute(request).await {
        Ok(response) => {
            let status_code = response.status().as_u16();
            let declared_length = response.content_length();
            match drain_response_body(response).await {
                Ok(read) => RequestResult::response_since(
                    start,
                    status_code,
                    declared_length.or(Some(read)),
                ),
                Err(err) => {
                    debug!("Failed to read response body: {}", err);
                    RequestResult::error_since(start, describe_error(&err))
                }
            }
        }
        Err(err) => {
            debug!("Request failed: {}", err);
            RequestResult::error_since(start, describe_error(&err))
        }
    }
}

async fn drain_response_body(mut response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        let chunk_len = u64::try_from(chunk.len()).unwrap_or(u64::MAX);
        total_bytes = total_bytes.saturating_add(chunk_len);
    }
    Ok(total_bytes)
}

/// Error description used as the error distribution key: the error and its
/// source chain, joined with `": "`.
pub(super) fn describe_error(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}
