//! Analysis module - Run-log parsing, windowing and step curves.
//!
//! # Overview
//!
//! - **Parser** (`parser`): run-log text to an [`ObservationSet`]
//! - **Windowing** (`window`): observations to fixed-width evaluation buckets
//! - **Stepify** (`stepify`): per-bucket bests to a monotone all-time-best curve
//! - **Payloads** (`payload`): the arrays handed to plot emission
//!
//! # Example
//!
//! ```rust
//! use ea_runlog::analysis::{Metric, condense_metric, parse_log, stepify};
//! use ea_runlog::schema::{LogLayout, OptimizationDirection};
//!
//! let set = parse_log("[Run 0]\n0 1.0 2.0\n250 1.5 3.0\n\n", LogLayout::SingleObjective)?;
//! let best = condense_metric(&set, 250, Metric::BestFitness)?;
//! assert_eq!(best, vec![vec![2.0], vec![3.0]]);
//!
//! let steps = stepify(&best, OptimizationDirection::Maximize)?;
//! assert_eq!(steps, vec![2.0, 3.0]);
//! # Ok::<(), ea_runlog::analysis::AnalysisError>(())
//! ```

mod error;
mod observation;
mod parser;
mod payload;
mod stepify;
mod window;

pub use error::AnalysisError;
pub use observation::{DEFAULT_ADAPTATION, Observation, ObservationSet};
pub use parser::{LogParser, RUN_MARKER, parse_log};
pub use payload::{DistributionPayload, OverlayPayload, PlotPayloads};
pub use stepify::stepify;
pub use window::{Bucket, MAX_BUCKETS, Metric, condense, condense_metric};
