//! End-to-end processing of run-log files.
//!
//! Each file is read, parsed, aggregated and rendered independently. Several
//! files are processed in parallel with no shared state.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{
    AnalysisError, DistributionPayload, LogParser, OverlayPayload, PlotPayloads,
};
use crate::plot::{
    ArtifactPaths, PlotError, PlotLabels, artifact_stem, render_distribution, render_overlay,
};
use crate::schema::AnalysisConfig;

/// Outcome of analyzing one run-log.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The analyzed log.
    pub source: PathBuf,
    /// Run sections found in the log.
    pub runs: usize,
    /// Parsed data lines.
    pub observations: usize,
    /// Prepared plot payloads.
    pub payloads: PlotPayloads,
    /// Files written for this log.
    pub artifacts: Vec<PathBuf>,
}

impl AnalysisReport {
    pub fn bucket_count(&self) -> usize {
        self.payloads.bucket_count()
    }

    /// Final value of the all-time-best curve.
    pub fn final_best(&self) -> Option<f64> {
        self.payloads.overlay.all_time_best.last().copied()
    }
}

/// Failure while processing one file.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode payloads for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parse, aggregate and render one run-log.
///
/// The box plot is drawn before the step curve is prepared, so a log with an
/// empty window still gets its distribution plot before the error is returned.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisReport, ReportError> {
    let set = LogParser::new(config.layout).parse_file(path)?;
    let distribution = DistributionPayload::prepare(&set, config.window_size)?;

    let render = !config.skip_render && !set.is_empty();
    let paths = ArtifactPaths::for_log(path, &config.output_dir);
    let labels = PlotLabels {
        title: artifact_stem(path),
        fit_name: config.fit_name.clone(),
        window_size: config.window_size,
    };
    let mut artifacts = Vec::new();

    if render {
        create_output_dir(config)?;
        render_distribution(&distribution, &labels, &paths.box_plot)?;
        debug!("wrote {}", paths.box_plot.display());
        artifacts.push(paths.box_plot.clone());
    }

    let overlay = OverlayPayload::prepare(&set, config.window_size, config.direction)
        .inspect_err(|err| {
            warn!("{}: step plot not drawn: {}", path.display(), err);
        })?;

    let mut report = AnalysisReport {
        source: path.to_path_buf(),
        runs: set.runs(),
        observations: set.len(),
        payloads: PlotPayloads {
            distribution,
            overlay,
        },
        artifacts,
    };

    if set.is_empty() {
        warn!("{}: no data lines found, nothing to plot", path.display());
        return Ok(report);
    }

    if render {
        render_overlay(&report.payloads.overlay, &labels, &paths.step_plot)?;
        debug!("wrote {}", paths.step_plot.display());
        report.artifacts.push(paths.step_plot);
    }

    if config.export_json {
        create_output_dir(config)?;
        write_payloads(&report.payloads, &paths.payload_json)?;
        report.artifacts.push(paths.payload_json);
    }

    info!(
        "{}: {} runs, {} observations, {} buckets",
        path.display(),
        report.runs,
        report.observations,
        report.bucket_count()
    );
    Ok(report)
}

/// Process every file, returning one result per input in input order.
pub fn analyze_files(
    paths: &[PathBuf],
    config: &AnalysisConfig,
) -> Vec<(PathBuf, Result<AnalysisReport, ReportError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), analyze_file(path, config)))
        .collect()
}

fn create_output_dir(config: &AnalysisConfig) -> Result<(), ReportError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| ReportError::Write {
        path: config.output_dir.clone(),
        source,
    })
}

fn write_payloads(payloads: &PlotPayloads, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(payloads).map_err(|source| ReportError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
