use std::time::Duration;

use tokio::time::Instant;

/// Outcome of a single fired request: either a response or a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Response {
        status_code: u16,
        content_length: Option<u64>,
    },
    Error(String),
}

/// One completed request as produced by a workload worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub duration: Duration,
    pub outcome: Outcome,
}

impl RequestResult {
    #[must_use]
    pub const fn response(duration: Duration, status_code: u16, content_length: Option<u64>) -> Self {
        Self {
            duration,
            outcome: Outcome::Response {
                status_code,
                content_length,
            },
        }
    }

    #[must_use]
    pub fn error(duration: Duration, description: impl Into<String>) -> Self {
        Self {
            duration,
            outcome: Outcome::Error(description.into()),
        }
    }

    /// Builds a response result timed from `start` until now.
    #[must_use]
    pub fn response_since(start: Instant, status_code: u16, content_length: Option<u64>) -> Self {
        Self::response(start.elapsed(), status_code, content_length)
    }

    /// Builds an error result timed from `start` until now.
    #[must_use]
    pub fn error_since(start: Instant, description: impl Into<String>) -> Self {
        Self::error(start.elapsed(), description)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}
