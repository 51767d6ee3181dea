//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::BoomArgs;
pub use types::{HttpMethod, OutputMode, PositiveU64, PositiveUsize};

pub use defaults::DEFAULT_CONFIG_FILES;
pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::parse_header;
