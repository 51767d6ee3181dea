//! Drives one load run from validated arguments to a frozen snapshot.
mod runner;


pub use runner::run_load;
