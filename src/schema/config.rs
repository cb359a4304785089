//! Configuration types for run-log analysis.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default bucket width in evaluations.
fn default_window_size() -> u64 {
    250
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_fit_name() -> String {
    "Fitness".to_string()
}

/// Column layout of the data lines inside a run section.
///
/// The layout is chosen by the caller; the parser never guesses it from the
/// field count of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "column")]
pub enum LogLayout {
    /// `evals avg best`
    #[default]
    SingleObjective,
    /// `evals avg best adaptation`
    SingleObjectiveAdaptive,
    /// `evals (avg best)+`, selecting one `(avg, best)` pair by index.
    MultiObjectiveColumn(usize),
}

impl LogLayout {
    /// Pick a layout from command line style switches.
    pub fn from_switches(column: Option<usize>, adaptive: bool) -> Self {
        match (column, adaptive) {
            (_, true) => LogLayout::SingleObjectiveAdaptive,
            (Some(column), false) => LogLayout::MultiObjectiveColumn(column),
            (None, false) => LogLayout::SingleObjective,
        }
    }
}

impl fmt::Display for LogLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLayout::SingleObjective => write!(f, "single-objective"),
            LogLayout::SingleObjectiveAdaptive => write!(f, "single-objective (adaptive)"),
            LogLayout::MultiObjectiveColumn(column) => {
                write!(f, "multi-objective (column {})", column)
            }
        }
    }
}

/// Whether higher or lower fitness is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationDirection {
    #[default]
    Maximize,
    Minimize,
}

impl OptimizationDirection {
    /// Returns the better of two fitness values.
    #[inline]
    pub fn best(self, a: f64, b: f64) -> f64 {
        match self {
            OptimizationDirection::Maximize => a.max(b),
            OptimizationDirection::Minimize => a.min(b),
        }
    }

    /// Value that loses every comparison in this direction.
    #[inline]
    pub fn worst_value(self) -> f64 {
        match self {
            OptimizationDirection::Maximize => f64::NEG_INFINITY,
            OptimizationDirection::Minimize => f64::INFINITY,
        }
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bucket width in evaluations.
    #[serde(default = "default_window_size")]
    pub window_size: u64,
    /// Column layout of the run sections.
    #[serde(default)]
    pub layout: LogLayout,
    /// Optimization direction used for the all-time-best curve.
    #[serde(default)]
    pub direction: OptimizationDirection,
    /// Label of the plotted fitness objective.
    #[serde(default = "default_fit_name")]
    pub fit_name: String,
    /// Directory receiving rendered plots.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Also write the prepared payloads as JSON next to the plots.
    #[serde(default)]
    pub export_json: bool,
    /// Skip rendering, only compute payloads.
    #[serde(default)]
    pub skip_render: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            layout: LogLayout::default(),
            direction: OptimizationDirection::default(),
            fit_name: default_fit_name(),
            output_dir: default_output_dir(),
            export_json: false,
            skip_render: false,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::InvalidWindowSize);
        }
        if self.fit_name.trim().is_empty() {
            return Err(ConfigError::EmptyFitName);
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Window size must be positive")]
    InvalidWindowSize,
    #[error("Fitness name must not be empty")]
    EmptyFitName,
    #[error("Output directory must not be empty")]
    EmptyOutputDir,
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a JSON document from disk into `T`.
pub fn load_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref().to_path_buf();
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json { path, source })
}
