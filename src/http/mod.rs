//! HTTP request firing workload.
mod client;
mod limiter;
mod sender;

#[cfg(test)]
mod tests;

pub use client::{RequestTemplate, build_client};
pub use sender::{WorkloadPlan, setup_request_sender};
