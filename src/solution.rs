//! Solution values and run diagnostics.

use std::fmt;
use std::time::Duration;

use crate::instance::{CompletionTimes, JobId};

/// A point at which the incumbent improved during a run.
///
/// Diagnostic only; search control never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityTrace {
    /// Best weighted tardiness found so far.
    pub tardiness: i64,
    /// Iteration index at which it was found.
    pub iteration: usize,
    /// Milliseconds since the run started.
    pub elapsed_ms: u128,
}

impl QualityTrace {
    pub fn new(tardiness: i64, iteration: usize, elapsed: Duration) -> Self {
        Self {
            tardiness,
            iteration,
            elapsed_ms: elapsed.as_millis(),
        }
    }
}

impl fmt::Display for QualityTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.tardiness, self.iteration, self.elapsed_ms)
    }
}

/// An evaluated job permutation.
///
/// A `Solution` is a value: search steps return new solutions rather than
/// mutating one in place, so an accepted best can never be changed through
/// an alias held by the current search state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    jobs_order: Vec<JobId>,
    completion_times: CompletionTimes,
    weighted_tardiness: i64,
    iterations: usize,
    runtime: Duration,
    quality_trace: Vec<QualityTrace>,
}

impl Solution {
    /// Wraps an already evaluated permutation.
    ///
    /// Use [`Instance::evaluate`](crate::instance::Instance::evaluate) to
    /// build one from a bare permutation.
    pub fn new(
        jobs_order: Vec<JobId>,
        completion_times: CompletionTimes,
        weighted_tardiness: i64,
    ) -> Self {
        debug_assert_eq!(jobs_order.len(), completion_times.len());
        Self {
            jobs_order,
            completion_times,
            weighted_tardiness,
            iterations: 0,
            runtime: Duration::ZERO,
            quality_trace: Vec::new(),
        }
    }

    /// Returns a copy carrying the statistics of the run that produced it.
    pub fn with_run_stats(
        mut self,
        iterations: usize,
        runtime: Duration,
        quality_trace: Vec<QualityTrace>,
    ) -> Self {
        self.iterations = iterations;
        self.runtime = runtime;
        self.quality_trace = quality_trace;
        self
    }

    pub fn jobs_order(&self) -> &[JobId] {
        &self.jobs_order
    }

    pub fn completion_times(&self) -> &CompletionTimes {
        &self.completion_times
    }

    pub fn weighted_tardiness(&self) -> i64 {
        self.weighted_tardiness
    }

    /// Iterations of the run that produced this solution (0 if none).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Wall-clock time of the run that produced this solution.
    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Improvements of the incumbent, ordered by iteration.
    pub fn quality_trace(&self) -> &[QualityTrace] {
        &self.quality_trace
    }

    pub fn len(&self) -> usize {
        self.jobs_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs_order.is_empty()
    }

    /// Consumes the solution, yielding its permutation.
    pub fn into_jobs_order(self) -> Vec<JobId> {
        self.jobs_order
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total WT = {}", self.weighted_tardiness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn small() -> Instance {
        Instance::new(
            vec![vec![2, 3], vec![4, 1], vec![1, 5]],
            vec![5, 4, 9],
            vec![1, 2, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_evaluate_and_display() {
        let solution = small().evaluate(vec![1, 2, 3]);
        assert_eq!(solution.weighted_tardiness(), 9);
        assert_eq!(solution.len(), 3);
        assert_eq!(solution.to_string(), "Total WT = 9");
        assert_eq!(solution.iterations(), 0);
        assert!(solution.quality_trace().is_empty());
    }

    #[test]
    fn test_with_run_stats() {
        let trace = vec![QualityTrace::new(9, 1, Duration::from_millis(3))];
        let solution = small()
            .evaluate(vec![1, 2, 3])
            .with_run_stats(17, Duration::from_millis(40), trace.clone());
        assert_eq!(solution.iterations(), 17);
        assert_eq!(solution.runtime(), Duration::from_millis(40));
        assert_eq!(solution.quality_trace(), trace.as_slice());
    }

    #[test]
    fn test_trace_display() {
        let entry = QualityTrace::new(120, 42, Duration::from_millis(1500));
        assert_eq!(entry.to_string(), "120,42,1500");
    }
}
