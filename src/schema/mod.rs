//! Schema module - Configuration types for analysis and for the runner.

mod config;
mod runner;

pub use config::*;
pub use runner::*;
