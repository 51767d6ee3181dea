use reqwest::{Client, Request};

use crate::args::{BoomArgs, DEFAULT_USER_AGENT};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Builds the client shared by every worker.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(concurrency: usize) -> AppResult<Client> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(concurrency)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Fully built request cloned once per send.
#[derive(Debug)]
pub struct RequestTemplate {
    request: Request,
}

impl RequestTemplate {
    /// Builds the request described by the CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, a header cannot be
    /// encoded, or the request body cannot be replayed.
    pub fn from_args(client: &Client, args: &BoomArgs) -> AppResult<Self> {
        let url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;

        let mut builder = client.request(args.method.as_reqwest(), url);
        for (key, value) in &args.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if !args.body.is_empty() {
            builder = builder.body(args.body.clone());
        }
        let request = builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;

        let template = Self { request };
        if template.try_clone().is_none() {
            return Err(AppError::http(HttpError::CloneRequestFailed));
        }
        Ok(template)
    }

    /// Returns a fresh copy of the request. `None` only for streaming bodies,
    /// which [`RequestTemplate::from_args`] rejects.
    #[must_use]
    pub fn try_clone(&self) -> Option<Request> {
        self.request.try_clone()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.request.url().as_str()
    }
}
