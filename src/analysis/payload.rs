//! Numeric payloads handed to plot emission.

use serde::Serialize;

use super::error::AnalysisError;
use super::observation::ObservationSet;
use super::stepify::stepify;
use super::window::{Bucket, Metric, condense_metric};
use crate::schema::OptimizationDirection;

/// Raw best-fitness samples per window, drawn as a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPayload {
    pub window_size: u64,
    pub buckets: Vec<Bucket>,
}

/// All-time-best step curve over average-fitness distributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPayload {
    pub window_size: u64,
    pub direction: OptimizationDirection,
    pub all_time_best: Vec<f64>,
    pub average_buckets: Vec<Bucket>,
}

/// Both payloads derived from one run-log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPayloads {
    pub distribution: DistributionPayload,
    pub overlay: OverlayPayload,
}

impl DistributionPayload {
    pub fn prepare(set: &ObservationSet, window_size: u64) -> Result<Self, AnalysisError> {
        Ok(Self {
            window_size,
            buckets: condense_metric(set, window_size, Metric::BestFitness)?,
        })
    }
}

impl OverlayPayload {
    /// Fails when a window between the first and last observation is empty,
    /// naming its evaluation range.
    pub fn prepare(
        set: &ObservationSet,
        window_size: u64,
        direction: OptimizationDirection,
    ) -> Result<Self, AnalysisError> {
        let best = condense_metric(set, window_size, Metric::BestFitness)?;
        if let Some(index) = best.iter().position(Vec::is_empty) {
            let start = index as u64 * window_size;
            return Err(AnalysisError::InvalidArgument(format!(
                "no observations between {} and {} evaluations (bucket {}), \
                 the all-time-best curve needs a larger window size",
                start,
                start.saturating_add(window_size),
                index
            )));
        }

        Ok(Self {
            window_size,
            direction,
            all_time_best: stepify(&best, direction)?,
            average_buckets: condense_metric(set, window_size, Metric::AverageFitness)?,
        })
    }
}

impl PlotPayloads {
    /// Aggregate `set` into the distribution and overlay payloads.
    pub fn prepare(
        set: &ObservationSet,
        window_size: u64,
        direction: OptimizationDirection,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            distribution: DistributionPayload::prepare(set, window_size)?,
            overlay: OverlayPayload::prepare(set, window_size, direction)?,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.distribution.buckets.len()
    }
}
