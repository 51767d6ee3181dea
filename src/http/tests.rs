use super::limiter::RequestLimiter;
use super::sender::describe_error;
use super::*;
use crate::args::{BoomArgs, HttpMethod};
use crate::error::{AppError, ValidationError};
use crate::metrics::{Collector, Outcome, RequestResult};
use crate::shutdown::shutdown_channel;
use crate::test_support::{OK_BODY, run_async_test, spawn_http_server, unreachable_url};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;

fn parse_args(args: &[&str]) -> Result<BoomArgs, String> {
    BoomArgs::try_parse_from(std::iter::once("boom").chain(args.iter().copied()))
        .map_err(|err| format!("Failed to parse args: {}", err))
}

async fn fire(args: &BoomArgs) -> Result<Vec<RequestResult>, String> {
    let plan = WorkloadPlan::from_args(args).map_err(|err| err.to_string())?;
    let client = build_client(plan.concurrency).map_err(|err| err.to_string())?;
    let template = RequestTemplate::from_args(&client, args).map_err(|err| err.to_string())?;
    let (shutdown_tx, _) = shutdown_channel();
    let (results_tx, mut results_rx) = mpsc::channel(8);

    let handle = setup_request_sender(plan, client, template, &shutdown_tx, results_tx);
    let mut results = Vec::new();
    while let Some(result) = results_rx.recv().await {
        results.push(result);
    }
    handle
        .await
        .map_err(|err| format!("Sender task failed: {}", err))?;
    Ok(results)
}

#[test]
fn limiter_hands_out_exactly_limit_slots() -> Result<(), String> {
    let limiter = RequestLimiter::new(3);
    let granted = (0..10).filter(|_| limiter.try_reserve()).count();
    if granted != 3 {
        return Err(format!("Expected 3 slots, got {}", granted));
    }
    if limiter.reserved() != 3 {
        return Err(format!("Expected reserved 3, got {}", limiter.reserved()));
    }
    Ok(())
}

#[test]
fn limiter_is_exact_across_threads() -> Result<(), String> {
    let limiter = Arc::new(RequestLimiter::new(1_000));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let limiter = Arc::clone(&limiter);
        handles.push(std::thread::spawn(move || {
            let mut granted: u64 = 0;
            while limiter.try_reserve() {
                granted = granted.saturating_add(1);
            }
            granted
        }));
    }
    let mut total: u64 = 0;
    for handle in handles {
        let granted = handle
            .join()
            .map_err(|_| "Limiter thread panicked".to_owned())?;
        total = total.saturating_add(granted);
    }
    if total != 1_000 {
        return Err(format!("Expected 1000 slots total, got {}", total));
    }
    Ok(())
}

#[test]
fn plan_rejects_concurrency_above_requests() -> Result<(), String> {
    let args = parse_args(&["http://localhost", "-n", "5", "-c", "6"])?;
    match WorkloadPlan::from_args(&args) {
        Err(AppError::Validation(ValidationError::ConcurrencyExceedsRequests {
            concurrency: 6,
            requests: 5,
        })) => Ok(()),
        other => Err(format!("Expected concurrency error, got {:?}", other)),
    }
}

#[test]
fn plan_accepts_concurrency_equal_to_requests() -> Result<(), String> {
    let args = parse_args(&["http://localhost", "-n", "5", "-c", "5"])?;
    let plan = WorkloadPlan::from_args(&args).map_err(|err| err.to_string())?;
    if plan.requests != 5 || plan.concurrency != 5 {
        return Err(format!("Unexpected plan {:?}", plan));
    }
    Ok(())
}

#[test]
fn template_requires_url() -> Result<(), String> {
    let args = parse_args(&["-n", "1", "-c", "1"])?;
    let client = build_client(1).map_err(|err| err.to_string())?;
    match RequestTemplate::from_args(&client, &args) {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        other => Err(format!("Expected missing URL error, got {:?}", other)),
    }
}

#[test]
fn template_rejects_invalid_url() -> Result<(), String> {
    let args = parse_args(&["not a url"])?;
    let client = build_client(1).map_err(|err| err.to_string())?;
    if RequestTemplate::from_args(&client, &args).is_ok() {
        return Err("Expected invalid URL to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn template_carries_method_headers_and_body() -> Result<(), String> {
    let args = parse_args(&[
        "http://localhost:8080/path",
        "-m",
        "POST",
        "-H",
        "X-Test: yes",
        "-d",
        "payload",
    ])?;
    if args.method != HttpMethod::Post {
        return Err(format!("Expected POST, got {:?}", args.method));
    }
    let client = build_client(1).map_err(|err| err.to_string())?;
    let template = RequestTemplate::from_args(&client, &args).map_err(|err| err.to_string())?;
    let request = template
        .try_clone()
        .ok_or_else(|| "Expected clonable request".to_owned())?;

    if request.method() != reqwest::Method::POST {
        return Err(format!("Unexpected method {}", request.method()));
    }
    if template.url() != "http://localhost:8080/path" {
        return Err(format!("Unexpected url {}", template.url()));
    }
    let header = request
        .headers()
        .get("X-Test")
        .and_then(|value| value.to_str().ok());
    if header != Some("yes") {
        return Err(format!("Unexpected header {:?}", header));
    }
    let body = request.body().and_then(reqwest::Body::as_bytes);
    if body != Some(b"payload".as_slice()) {
        return Err(format!("Unexpected body {:?}", body));
    }
    Ok(())
}

#[test]
fn sender_fires_exactly_the_requested_count() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server()? else {
        return Ok(());
    };
    run_async_test(async move {
        let args = parse_args(&[url.as_str(), "-n", "10", "-c", "3"])?;
        let results = fire(&args).await?;
        if results.len() != 10 {
            return Err(format!("Expected 10 results, got {}", results.len()));
        }
        let expected_length = u64::try_from(OK_BODY.len()).map_err(|err| err.to_string())?;
        for result in &results {
            let expected = Outcome::Response {
                status_code: 200,
                content_length: Some(expected_length),
            };
            if result.outcome != expected {
                return Err(format!("Unexpected outcome {:?}", result.outcome));
            }
        }
        Ok(())
    })
}

#[test]
fn sender_records_non_success_status_as_response() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server()? else {
        return Ok(());
    };
    run_async_test(async move {
        let missing = format!("{}/missing", url);
        let args = parse_args(&[missing.as_str(), "-n", "4", "-c", "2"])?;
        let mut collector = Collector::new();
        for result in fire(&args).await? {
            collector.record(result);
        }
        let snapshot = collector.finish(std::time::Duration::from_secs(1));
        if snapshot.status_code_counts().get(&404) != Some(&4) {
            return Err(format!(
                "Expected four 404s, got {:?}",
                snapshot.status_code_counts()
            ));
        }
        if snapshot.success_count() != 0 || snapshot.error_count() != 0 {
            return Err("404 responses must be neither successes nor errors".to_owned());
        }
        Ok(())
    })
}

#[test]
fn sender_records_transport_failures_as_errors() -> Result<(), String> {
    let url = unreachable_url()?;
    run_async_test(async move {
        let args = parse_args(&[url.as_str(), "-n", "3", "-c", "1"])?;
        let results = fire(&args).await?;
        if results.len() != 3 {
            return Err(format!("Expected 3 results, got {}", results.len()));
        }
        if !results.iter().all(RequestResult::is_error) {
            return Err(format!("Expected only errors, got {:?}", results));
        }
        Ok(())
    })
}

#[test]
fn sender_stops_on_shutdown() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server()? else {
        return Ok(());
    };
    run_async_test(async move {
        let args = parse_args(&[url.as_str(), "-n", "1000000", "-c", "2"])?;
        let plan = WorkloadPlan::from_args(&args).map_err(|err| err.to_string())?;
        let client = build_client(plan.concurrency).map_err(|err| err.to_string())?;
        let template =
            RequestTemplate::from_args(&client, &args).map_err(|err| err.to_string())?;
        let (shutdown_tx, _) = shutdown_channel();
        let (results_tx, results_rx) = mpsc::channel(8);

        let handle = setup_request_sender(plan, client, template, &shutdown_tx, results_tx);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        if shutdown_tx.send(()).is_err() {
            return Err("Failed to send shutdown".to_owned());
        }

        let mut collector = Collector::new();
        let drained = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            collector.drain(results_rx),
        )
        .await
        .map_err(|err| format!("Workers did not stop: {}", err))?;
        handle
            .await
            .map_err(|err| format!("Sender task failed: {}", err))?;
        if u64::try_from(drained).unwrap_or(u64::MAX) >= 1_000_000 {
            return Err("Expected shutdown to cut the run short".to_owned());
        }
        Ok(())
    })
}

#[test]
fn error_description_includes_source_chain() -> Result<(), String> {
    let url = unreachable_url()?;
    run_async_test(async move {
        let client = build_client(1).map_err(|err| err.to_string())?;
        let Err(err) = client.get(&url).send().await else {
            return Err("Expected connection failure".to_owned());
        };
        let description = describe_error(&err);
        if !description.starts_with(&err.to_string()) {
            return Err(format!("Unexpected description {}", description));
        }
        if description.matches(": ").count() == 0 {
            return Err(format!("Expected a source chain in {}", description));
        }
        Ok(())
    })
}
