use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Missing URL (pass it as an argument or set 'url' in the config file).")]
    MissingUrl,
    #[error("Concurrency ({concurrency}) cannot exceed the number of requests ({requests}).")]
    ConcurrencyExceedsRequests { concurrency: usize, requests: u64 },
}
