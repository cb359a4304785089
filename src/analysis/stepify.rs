//! All-time-best step curve.

use super::error::AnalysisError;
use super::window::Bucket;
use crate::schema::OptimizationDirection;

/// Best value per bucket, carried forward so the curve never gets worse.
///
/// For [`OptimizationDirection::Maximize`] the result is non-decreasing, for
/// [`OptimizationDirection::Minimize`] non-increasing. Every bucket must hold
/// at least one value.
pub fn stepify(
    buckets: &[Bucket],
    direction: OptimizationDirection,
) -> Result<Vec<f64>, AnalysisError> {
    let mut steps = Vec::with_capacity(buckets.len());
    let mut best_so_far = direction.worst_value();

    for (index, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            return Err(AnalysisError::InvalidArgument(format!(
                "bucket {} is empty, its best value is undefined",
                index
            )));
        }

        let bucket_best = bucket
            .iter()
            .copied()
            .fold(direction.worst_value(), |a, b| direction.best(a, b));
        best_so_far = direction.best(best_so_far, bucket_best);
        steps.push(best_so_far);
    }

    Ok(steps)
}
