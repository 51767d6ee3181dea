//! Result collection and aggregation.
mod collector;
mod snapshot;
mod types;


pub use collector::Collector;
pub use snapshot::{RATE_SCALE, Snapshot};
pub use types::{Outcome, RequestResult};

pub(crate) use snapshot::duration_from_nanos;
