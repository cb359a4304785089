//! Run-log parser.
//!
//! A run-log holds a free-form preamble followed by one section per run:
//!
//! ```text
//! [Config Log]
//! { ... }
//!
//! [Results Log]
//!
//! [Run 0]
//! 100	12.5	20
//! 200	14.25	23
//!
//! [Run 1]
//! 100	11.0	19
//! ```
//!
//! A `[Run ` marker opens a section, the following non-blank lines are data
//! lines and the next blank line closes it. Everything outside a section is
//! ignored.

use std::fs;
use std::path::Path;

use log::debug;

use super::error::AnalysisError;
use super::observation::{Observation, ObservationSet};
use crate::schema::LogLayout;

/// Prefix of the line that opens a run section.
pub const RUN_MARKER: &str = "[Run ";

/// Source name used for logs that did not come from a file.
const IN_MEMORY_SOURCE: &str = "<memory>";

/// Parses run-log text into an [`ObservationSet`].
#[derive(Debug, Clone)]
pub struct LogParser {
    layout: LogLayout,
    source_name: String,
}

impl LogParser {
    pub fn new(layout: LogLayout) -> Self {
        Self {
            layout,
            source_name: IN_MEMORY_SOURCE.to_string(),
        }
    }

    /// Name reported in errors, usually the log file path.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn layout(&self) -> LogLayout {
        self.layout
    }

    /// Parse a complete log in one pass.
    pub fn parse(&self, text: &str) -> Result<ObservationSet, AnalysisError> {
        let mut set = ObservationSet::new();
        let mut capturing = false;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                capturing = false;
            } else if line.starts_with(RUN_MARKER) {
                capturing = true;
                set.begin_run();
            } else if capturing {
                set.insert(self.parse_line(line, index + 1)?);
            }
        }

        debug!(
            "{}: {} observations from {} runs",
            self.source_name,
            set.len(),
            set.runs()
        );
        Ok(set)
    }

    /// Read and parse a log file. Errors are tagged with the file path.
    pub fn parse_file(&self, path: &Path) -> Result<ObservationSet, AnalysisError> {
        let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.clone()
            .with_source_name(path.display().to_string())
            .parse(&text)
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<Observation, AnalysisError> {
        let parse_error = |field: &str| AnalysisError::Parse {
            source_name: self.source_name.clone(),
            line_number,
            line: line.to_string(),
            field: field.to_string(),
        };

        let mut fields = line.split_whitespace();
        // the caller never hands over a blank line
        let evals_field = fields.next().unwrap_or_default();
        let evaluation_count =
            parse_evaluation_count(evals_field).ok_or_else(|| parse_error(evals_field))?;

        let metrics = fields
            .map(|field| field.parse::<f64>().map_err(|_| parse_error(field)))
            .collect::<Result<Vec<_>, _>>()?;

        let schema_mismatch = || AnalysisError::SchemaMismatch {
            source_name: self.source_name.clone(),
            line_number,
            line: line.to_string(),
            layout: self.layout,
            metric_fields: metrics.len(),
        };

        let observation = match (self.layout, metrics.as_slice()) {
            (LogLayout::SingleObjective, &[avg, best]) => {
                Observation::new(evaluation_count, avg, best)
            }
            (LogLayout::SingleObjectiveAdaptive, &[avg, best, adaptation]) => {
                Observation::new(evaluation_count, avg, best).with_adaptation(adaptation)
            }
            (LogLayout::MultiObjectiveColumn(column), pairs) if pairs.len() % 2 == 0 => {
                match pairs.chunks_exact(2).nth(column) {
                    Some(&[avg, best]) => Observation::new(evaluation_count, avg, best),
                    _ => return Err(schema_mismatch()),
                }
            }
            _ => return Err(schema_mismatch()),
        };

        Ok(observation)
    }
}

/// Accepts `250` as well as float-formatted integers such as `250.0`.
fn parse_evaluation_count(field: &str) -> Option<u64> {
    if let Ok(value) = field.parse::<u64>() {
        return Some(value);
    }
    let value = field.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64)
        .then_some(value as u64)
}

/// Parse `text` with the given layout.
pub fn parse_log(text: &str, layout: LogLayout) -> Result<ObservationSet, AnalysisError> {
    LogParser::new(layout).parse(text)
}
