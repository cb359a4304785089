//! Plot emission for prepared payloads.
//!
//! Each artifact is drawn by one self-contained call on an owned bitmap
//! backend, so rendering holds no state between files.

use std::path::{Path, PathBuf};

mod drawing;

pub use drawing::{render_distribution, render_overlay};

/// Type alias for the result of a drawing function.
pub(crate) type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Bitmap size of every rendered plot.
pub const PLOT_SIZE: (u32, u32) = (1024, 768);

/// Suffix replaced when deriving artifact names.
pub const RESULT_SUFFIX: &str = ".txt";

/// Labels shared by both plots of one log.
#[derive(Debug, Clone)]
pub struct PlotLabels {
    /// Short name of the run-log, used in titles.
    pub title: String,
    /// Name of the plotted fitness objective.
    pub fit_name: String,
    /// Bucket width, shown on the x axis.
    pub window_size: u64,
}

impl PlotLabels {
    pub fn x_desc(&self) -> String {
        format!(
            "Evaluation Bucket (bucket size = {} evals)",
            self.window_size
        )
    }

    pub fn y_desc(&self) -> String {
        format!("Fitness {}", self.fit_name)
    }
}

/// Output locations derived from one run-log path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub box_plot: PathBuf,
    pub step_plot: PathBuf,
    pub payload_json: PathBuf,
}

impl ArtifactPaths {
    /// `results/foo.txt` becomes `<out>/foo_box.png`, `<out>/foo_step.png`
    /// and `<out>/foo_payload.json`.
    pub fn for_log(log_path: &Path, output_dir: &Path) -> Self {
        let stem = artifact_stem(log_path);
        Self {
            box_plot: output_dir.join(format!("{stem}_box.png")),
            step_plot: output_dir.join(format!("{stem}_step.png")),
            payload_json: output_dir.join(format!("{stem}_payload.json")),
        }
    }
}

/// File name of `log_path` with [`RESULT_SUFFIX`] removed.
pub fn artifact_stem(log_path: &Path) -> String {
    let name = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    match name.strip_suffix(RESULT_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

/// Plot rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("Nothing to draw for {path}")]
    NoData { path: PathBuf },
    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::for_log(Path::new("logs/run_a.txt"), Path::new("plots"));
        assert_eq!(paths.box_plot, PathBuf::from("plots/run_a_box.png"));
        assert_eq!(paths.step_plot, PathBuf::from("plots/run_a_step.png"));
        assert_eq!(paths.payload_json, PathBuf::from("plots/run_a_payload.json"));
    }

    #[test]
    fn test_artifact_stem_without_suffix() {
        assert_eq!(artifact_stem(Path::new("results.log")), "results.log");
        assert_eq!(artifact_stem(Path::new(".txt")), ".txt");
        assert_eq!(artifact_stem(Path::new("a/b/c.txt")), "c");
    }

    #[test]
    fn test_labels() {
        let labels = PlotLabels {
            title: "run_a".to_string(),
            fit_name: "Length".to_string(),
            window_size: 250,
        };
        assert_eq!(labels.x_desc(), "Evaluation Bucket (bucket size = 250 evals)");
        assert_eq!(labels.y_desc(), "Fitness Length");
    }

    #[test]
    fn test_empty_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_box.png");
        let payload = crate::analysis::DistributionPayload {
            window_size: 250,
            buckets: Vec::new(),
        };
        let labels = PlotLabels {
            title: "empty".to_string(),
            fit_name: "Fitness".to_string(),
            window_size: 250,
        };

        let err = render_distribution(&payload, &labels, &path).unwrap_err();
        assert!(matches!(err, PlotError::NoData { .. }));
        assert!(!path.exists());
    }
}
