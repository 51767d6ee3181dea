//! Core library for the `boom` CLI.
//!
//! `boom` fires a fixed number of HTTP requests through a bounded pool of
//! concurrent workers, aggregates every outcome, and prints a summary with
//! throughput, latency extremes, a latency histogram, percentiles, and the
//! status code and error distributions. The binary wires these modules
//! together; library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod test_support;
