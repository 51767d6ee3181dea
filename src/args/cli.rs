use clap::Parser;

use super::parsers::{parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, OutputMode, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "HTTP load generator: fires a fixed batch of requests and reports throughput, latency percentiles, a latency histogram, and status/error distributions."
)]
pub struct BoomArgs {
    /// Target URL
    pub url: Option<String>,

    /// Total number of requests to fire
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "200",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Number of workers firing requests concurrently (must not exceed --requests)
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "50",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// HTTP method to use
    #[arg(long, short = 'm', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long = "body", short = 'd', default_value = "")]
    pub body: String,

    /// Report output: text, quiet (errors only), csv (per-request latencies), or json
    #[arg(long = "output", short = 'o', default_value = "text", ignore_case = true)]
    pub output: OutputMode,

    /// Path to a TOML or JSON config file (defaults to ./boom.toml or ./boom.json)
    #[arg(long = "config", env = "BOOM_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
