//! EA run-log analysis.
//!
//! This crate turns the text run-logs of an evolutionary-algorithm runner into
//! windowed fitness distributions and all-time-best curves, and renders them
//! as plots. It also builds the runner's positional argument line from a JSON
//! experiment configuration.
//!
//! # Architecture
//!
//! - `schema`: Configuration types (analysis settings, runner configuration)
//! - `analysis`: Log parsing, evaluation windows and step curves
//! - `plot`: Bitmap rendering of prepared payloads
//! - `report`: Per-file pipeline tying the above together
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ea_runlog::{report::analyze_file, schema::AnalysisConfig};
//!
//! let config = AnalysisConfig {
//!     window_size: 500,
//!     fit_name: "Length".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = analyze_file(Path::new("logs/default.txt"), &config)?;
//! println!("{} buckets, final best {:?}", report.bucket_count(), report.final_best());
//! # Ok::<(), ea_runlog::report::ReportError>(())
//! ```

pub mod analysis;
pub mod plot;
pub mod report;
pub mod schema;

// Re-export commonly used types
pub use analysis::{AnalysisError, Observation, ObservationSet, PlotPayloads};
pub use report::{AnalysisReport, analyze_file, analyze_files};
pub use schema::{AnalysisConfig, LogLayout, OptimizationDirection, RunnerConfig};
