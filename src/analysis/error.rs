//! Errors raised while parsing and aggregating run-logs.

use std::path::PathBuf;

use crate::schema::LogLayout;

/// Failure while turning a run-log into plot payloads.
///
/// Every variant is fatal for the file being processed.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{source_name}:{line_number}: cannot parse field `{field}` in line `{line}`")]
    Parse {
        source_name: String,
        line_number: usize,
        line: String,
        field: String,
    },
    #[error(
        "{source_name}:{line_number}: {metric_fields} metric fields do not fit {layout} layout in line `{line}`"
    )]
    SchemaMismatch {
        source_name: String,
        line_number: usize,
        line: String,
        layout: LogLayout,
        metric_fields: usize,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Line number of the offending log line, if the error came from one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            AnalysisError::Parse { line_number, .. }
            | AnalysisError::SchemaMismatch { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}
