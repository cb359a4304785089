//! Observation types produced by the log parser.

use std::collections::BTreeMap;

use serde::Serialize;

/// Adaptation value substituted when a layout does not report one.
pub const DEFAULT_ADAPTATION: f64 = 1.0;

/// One generation's metrics from one run at one evaluation count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Evaluations consumed so far (not the generation index).
    pub evaluation_count: u64,
    /// Best fitness seen by the run up to this generation.
    pub best_fitness: f64,
    /// Mean fitness of the population.
    pub average_fitness: f64,
    /// Mean of the adaptive parameter, or [`DEFAULT_ADAPTATION`].
    pub average_adaptation: f64,
}

impl Observation {
    pub fn new(evaluation_count: u64, average_fitness: f64, best_fitness: f64) -> Self {
        Self {
            evaluation_count,
            best_fitness,
            average_fitness,
            average_adaptation: DEFAULT_ADAPTATION,
        }
    }

    pub fn with_adaptation(mut self, average_adaptation: f64) -> Self {
        self.average_adaptation = average_adaptation;
        self
    }
}

/// Observations grouped by their exact evaluation count.
///
/// Keys iterate in ascending order; observations sharing a key keep their
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    by_evaluations: BTreeMap<u64, Vec<Observation>>,
    runs: usize,
    len: usize,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an observation under its own evaluation count.
    pub fn insert(&mut self, observation: Observation) {
        self.by_evaluations
            .entry(observation.evaluation_count)
            .or_default()
            .push(observation);
        self.len += 1;
    }

    /// Record that another run section was opened.
    pub fn begin_run(&mut self) {
        self.runs += 1;
    }

    /// Number of run sections seen while parsing.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Total number of observations.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Observations recorded at exactly `evaluations`.
    pub fn get(&self, evaluations: u64) -> &[Observation] {
        self.by_evaluations
            .get(&evaluations)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Largest evaluation count present.
    pub fn max_evaluations(&self) -> Option<u64> {
        self.by_evaluations.keys().next_back().copied()
    }

    /// `(evaluations, observations)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[Observation])> {
        self.by_evaluations
            .iter()
            .map(|(&evals, observations)| (evals, observations.as_slice()))
    }

    /// All observations in ascending key order.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.by_evaluations.values().flatten()
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut set = ObservationSet::new();
        for observation in iter {
            set.insert(observation);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_shared_keys() {
        let mut set = ObservationSet::new();
        set.insert(Observation::new(500, 1.0, 2.0));
        set.insert(Observation::new(500, 1.5, 3.0));
        set.insert(Observation::new(0, 0.5, 1.0));

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(500).len(), 2);
        assert_eq!(set.get(500)[1].best_fitness, 3.0);
        assert!(set.get(250).is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let set: ObservationSet = [750, 0, 250]
            .into_iter()
            .map(|evals| Observation::new(evals, 0.0, 0.0))
            .collect();

        let keys: Vec<u64> = set.iter().map(|(evals, _)| evals).collect();
        assert_eq!(keys, vec![0, 250, 750]);
        assert_eq!(set.max_evaluations(), Some(750));
        assert!(
            set.iter()
                .all(|(evals, obs)| obs.iter().all(|o| o.evaluation_count == evals))
        );
    }

    #[test]
    fn test_default_adaptation() {
        let observation = Observation::new(10, 1.0, 2.0);
        assert_eq!(observation.average_adaptation, DEFAULT_ADAPTATION);
        assert_eq!(observation.with_adaptation(0.3).average_adaptation, 0.3);
    }
}
