//! Windowed aggregation of observations into evaluation buckets.

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use super::observation::{Observation, ObservationSet};

/// Selected metric values of every observation in one evaluation window.
pub type Bucket = Vec<f64>;

/// Most windows a single log may span.
pub const MAX_BUCKETS: usize = 1 << 20;

/// Named metric selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BestFitness,
    AverageFitness,
    AverageAdaptation,
}

impl Metric {
    #[inline]
    pub fn value(self, observation: &Observation) -> f64 {
        match self {
            Metric::BestFitness => observation.best_fitness,
            Metric::AverageFitness => observation.average_fitness,
            Metric::AverageAdaptation => observation.average_adaptation,
        }
    }
}

/// Groups observations into buckets of `window_size` evaluations.
///
/// Bucket `i` covers `[i * window_size, (i + 1) * window_size)`. Buckets are
/// contiguous from 0 to the bucket of the largest evaluation count; windows
/// without observations are emitted empty. A log spanning more than
/// [`MAX_BUCKETS`] windows is rejected.
pub fn condense<F>(
    set: &ObservationSet,
    window_size: u64,
    select: F,
) -> Result<Vec<Bucket>, AnalysisError>
where
    F: Fn(&Observation) -> f64,
{
    if window_size == 0 {
        return Err(AnalysisError::InvalidArgument(
            "window size must be positive".to_string(),
        ));
    }

    let mut buckets: Vec<Bucket> = Vec::new();
    for (evals, observations) in set.iter() {
        let index = bucket_index(evals, window_size)?;
        if buckets.len() <= index {
            buckets.resize_with(index + 1, Vec::new);
        }
        buckets[index].extend(observations.iter().map(&select));
    }

    Ok(buckets)
}

fn bucket_index(evals: u64, window_size: u64) -> Result<usize, AnalysisError> {
    let index = evals / window_size;
    usize::try_from(index)
        .ok()
        .filter(|&index| index < MAX_BUCKETS)
        .ok_or_else(|| {
            AnalysisError::InvalidArgument(format!(
                "evaluation count {} needs {} windows of {} evaluations, the limit is {}",
                evals,
                index.saturating_add(1),
                window_size,
                MAX_BUCKETS
            ))
        })
}

/// [`condense`] with a named metric.
pub fn condense_metric(
    set: &ObservationSet,
    window_size: u64,
    metric: Metric,
) -> Result<Vec<Bucket>, AnalysisError> {
    condense(set, window_size, |observation| metric.value(observation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_log;
    use crate::schema::LogLayout;
    use proptest::prelude::*;

    fn set_of(rows: &[(u64, f64)]) -> ObservationSet {
        rows.iter()
            .map(|&(evals, best)| Observation::new(evals, best / 2.0, best))
            .collect()
    }

    #[test]
    fn test_condense_example_log() {
        let set = parse_log("[Run 0]\n0 1.0 2.0\n250 1.5 3.0\n\n", LogLayout::SingleObjective)
            .unwrap();

        let best = condense_metric(&set, 250, Metric::BestFitness).unwrap();
        assert_eq!(best, vec![vec![2.0], vec![3.0]]);

        let avg = condense_metric(&set, 250, Metric::AverageFitness).unwrap();
        assert_eq!(avg, vec![vec![1.0], vec![1.5]]);
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let set = set_of(&[(10, 1.0)]);
        let err = condense_metric(&set, 0, Metric::BestFitness).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_set_gives_no_buckets() {
        let buckets = condense_metric(&ObservationSet::new(), 250, Metric::BestFitness).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_shared_count_lands_in_one_bucket() {
        let set = parse_log(
            "[Run 0]\n500 1.0 2.0\n\n[Run 1]\n500 1.0 4.0\n\n",
            LogLayout::SingleObjective,
        )
        .unwrap();

        let buckets = condense_metric(&set, 250, Metric::BestFitness).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2], vec![2.0, 4.0]);
    }

    #[test]
    fn test_sparse_counts_insert_empty_buckets() {
        let set = set_of(&[(10, 1.0), (1_010, 2.0)]);
        let buckets = condense_metric(&set, 250, Metric::BestFitness).unwrap();

        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0], vec![1.0]);
        assert!(buckets[1..4].iter().all(Vec::is_empty));
        assert_eq!(buckets[4], vec![2.0]);
    }

    #[test]
    fn test_custom_selector() {
        let set = set_of(&[(10, 4.0), (20, 6.0)]);
        let buckets = condense(&set, 100, |o| o.best_fitness - o.average_fitness).unwrap();
        assert_eq!(buckets, vec![vec![2.0, 3.0]]);
    }

    #[test]
    fn test_huge_evaluation_count_is_rejected() {
        let set = parse_log(
            "[Run 0]\n0 1.0 2.0\n18446744073709551615 1.0 2.0\n",
            LogLayout::SingleObjective,
        )
        .unwrap();

        let err = condense_metric(&set, 250, Metric::BestFitness).unwrap_err();
        match err {
            AnalysisError::InvalidArgument(message) => {
                assert!(message.contains("18446744073709551615"));
                assert!(message.contains("250 evaluations"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_window_within_limit() {
        let last = (MAX_BUCKETS as u64 - 1) * 10;
        let set = set_of(&[(0, 1.0), (last, 2.0)]);

        let buckets = condense_metric(&set, 10, Metric::BestFitness).unwrap();
        assert_eq!(buckets.len(), MAX_BUCKETS);

        let set = set_of(&[(last + 10, 2.0)]);
        assert!(condense_metric(&set, 10, Metric::BestFitness).is_err());
    }

    fn sorted(mut bucket: Vec<f64>) -> Vec<f64> {
        bucket.sort_by(f64::total_cmp);
        bucket
    }

    proptest! {
        #[test]
        fn prop_bucket_count(
            rows in prop::collection::vec((0u64..1_000_000, -100.0f64..100.0), 0..60),
            window in 1u64..5_000,
        ) {
            let set = set_of(&rows);
            let buckets = condense_metric(&set, window, Metric::BestFitness).unwrap();

            let expected = set.max_evaluations().map_or(0, |max| (max / window) as usize + 1);
            prop_assert_eq!(buckets.len(), expected);
            prop_assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), rows.len());
        }

        #[test]
        fn prop_values_stay_in_their_window(
            rows in prop::collection::vec((0u64..1_000_000, -100.0f64..100.0), 1..60),
            window in 1u64..5_000,
        ) {
            let set = set_of(&rows);
            let buckets = condense(&set, window, |o| o.evaluation_count as f64).unwrap();

            for (index, bucket) in buckets.iter().enumerate() {
                for &evals in bucket {
                    prop_assert_eq!(evals as u64 / window, index as u64);
                }
            }
        }

        #[test]
        fn prop_recondense_is_idempotent(
            rows in prop::collection::vec((0u64..100_000, -100.0f64..100.0), 0..60),
            window in 1u64..2_000,
        ) {
            let set = set_of(&rows);
            let first = condense_metric(&set, window, Metric::BestFitness).unwrap();

            let flattened: ObservationSet = set.observations().copied().collect();
            let second = condense_metric(&flattened, window, Metric::BestFitness).unwrap();

            prop_assert_eq!(first.len(), second.len());
            for (a, b) in first.into_iter().zip(second) {
                prop_assert_eq!(sorted(a), sorted(b));
            }
        }
    }
}
