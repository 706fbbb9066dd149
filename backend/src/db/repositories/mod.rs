//! Repository implementations module.
//!
//! - `local`: in-memory store loaded once from the CSV data file
pub mod local;

pub use local::LocalRepository;
