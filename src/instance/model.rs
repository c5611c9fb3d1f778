//! Instance data, initial solutions and the completion-time recurrence.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use super::completion::CompletionTimes;
use crate::error::{PfspError, Result};
use crate::solution::Solution;

/// Job identifier. Jobs are numbered contiguously `1..=N`.
pub type JobId = usize;

/// How the starting permutation of a search is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationMethod {
    /// A uniformly random permutation of `1..=N`.
    RandomPermutation,
    /// Greedy construction that appends, at each step, the remaining job
    /// minimizing `priority * (due_date - partial_makespan)`.
    SlackHeuristic,
}

impl fmt::Display for InitializationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomPermutation => write!(f, "random"),
            Self::SlackHeuristic => write!(f, "slack"),
        }
    }
}

impl FromStr for InitializationMethod {
    type Err = PfspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "random-permutation" => Ok(Self::RandomPermutation),
            "slack" | "slack-heuristic" => Ok(Self::SlackHeuristic),
            _ => Err(PfspError::UnknownEnumValue {
                kind: "initialization method",
                value: s.to_string(),
            }),
        }
    }
}

/// A permutation flow-shop instance with due dates and tardiness weights.
///
/// Immutable after construction. Internally every table is indexed from 1
/// with row/column 0 reserved, so job ids and machine numbers can be used
/// directly as indices.
///
/// # Examples
///
/// ```
/// use u_flowshop::instance::Instance;
///
/// let instance = Instance::new(
///     vec![vec![2, 3], vec![4, 1], vec![1, 5]],
///     vec![5, 4, 9],
///     vec![1, 2, 1],
/// ).unwrap();
///
/// let ct = instance.full_completion_times(&[1, 2, 3]);
/// assert_eq!(instance.weighted_tardiness(&ct), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    name: Option<String>,
    jobs: usize,
    machines: usize,
    /// `(jobs + 1) x (machines + 1)`, row-major.
    processing_times: Vec<i64>,
    due_dates: Vec<i64>,
    priorities: Vec<i64>,
}

impl Instance {
    /// Builds an instance from 0-based per-job data.
    ///
    /// `processing_times[j][m]` is the time job `j + 1` spends on machine
    /// `m + 1`. `due_dates` and `priorities` are indexed the same way.
    ///
    /// # Errors
    ///
    /// [`PfspError::InvalidInstance`] if there are no jobs or machines,
    /// rows are ragged, lengths disagree, a processing time or priority is
    /// negative, or the values are large enough that a completion time or
    /// weighted tardiness could overflow `i64`.
    pub fn new(
        processing_times: Vec<Vec<i64>>,
        due_dates: Vec<i64>,
        priorities: Vec<i64>,
    ) -> Result<Self> {
        let jobs = processing_times.len();
        if jobs == 0 {
            return Err(PfspError::InvalidInstance(
                "instance must contain at least one job".into(),
            ));
        }
        let machines = processing_times[0].len();
        if machines == 0 {
            return Err(PfspError::InvalidInstance(
                "instance must contain at least one machine".into(),
            ));
        }
        if due_dates.len() != jobs || priorities.len() != jobs {
            return Err(PfspError::InvalidInstance(format!(
                "expected {jobs} due dates and priorities, got {} and {}",
                due_dates.len(),
                priorities.len()
            )));
        }

        let stride = machines + 1;
        let mut table = vec![0; (jobs + 1) * stride];
        for (j, row) in processing_times.iter().enumerate() {
            if row.len() != machines {
                return Err(PfspError::InvalidInstance(format!(
                    "job {} has {} processing times, expected {machines}",
                    j + 1,
                    row.len()
                )));
            }
            for (m, &p) in row.iter().enumerate() {
                if p < 0 {
                    return Err(PfspError::InvalidInstance(format!(
                        "job {} has negative processing time {p} on machine {}",
                        j + 1,
                        m + 1
                    )));
                }
                table[(j + 1) * stride + m + 1] = p;
            }
        }
        if let Some(j) = priorities.iter().position(|&w| w < 0) {
            return Err(PfspError::InvalidInstance(format!(
                "job {} has negative priority {}",
                j + 1,
                priorities[j]
            )));
        }

        check_magnitudes(&table, &due_dates, &priorities)?;

        let mut due = Vec::with_capacity(jobs + 1);
        due.push(0);
        due.extend(due_dates);
        let mut weights = Vec::with_capacity(jobs + 1);
        weights.push(0);
        weights.extend(priorities);

        Ok(Self {
            name: None,
            jobs,
            machines,
            processing_times: table,
            due_dates: due,
            priorities: weights,
        })
    }

    /// Attaches a human-readable name (typically the source file name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn number_of_jobs(&self) -> usize {
        self.jobs
    }

    pub fn number_of_machines(&self) -> usize {
        self.machines
    }

    /// Processing time of `job` on `machine` (both 1-based).
    pub fn processing_time(&self, job: JobId, machine: usize) -> i64 {
        debug_assert!((1..=self.jobs).contains(&job));
        debug_assert!((1..=self.machines).contains(&machine));
        self.processing_times[job * (self.machines + 1) + machine]
    }

    pub fn due_date(&self, job: JobId) -> i64 {
        self.due_dates[job]
    }

    pub fn priority(&self, job: JobId) -> i64 {
        self.priorities[job]
    }

    /// Sum of all processing times over every job and machine.
    pub fn total_processing_time(&self) -> i64 {
        self.processing_times.iter().sum()
    }

    /// Base temperature for exponential acceptance criteria.
    ///
    /// `t * total_processing_time / (N * M * 10)`.
    ///
    /// # Errors
    ///
    /// [`PfspError::InvalidInstance`] if the result is zero or not finite,
    /// since an acceptance probability cannot be derived from it.
    ///
    /// # Reference
    ///
    /// Ruiz & Stützle (2005), "An Iterated Greedy Algorithm for the
    /// Flowshop Problem with Sequence Dependent Setup Times"
    pub fn reference_temperature(&self, t: f64) -> Result<f64> {
        let temperature = t * self.total_processing_time() as f64
            / (self.jobs * self.machines * 10) as f64;
        if temperature == 0.0 || !temperature.is_finite() {
            return Err(PfspError::InvalidInstance(format!(
                "reference temperature for t = {t} is {temperature}"
            )));
        }
        Ok(temperature)
    }

    /// Builds a starting permutation with the given method.
    pub fn initial_order<R: Rng>(&self, method: InitializationMethod, rng: &mut R) -> Vec<JobId> {
        match method {
            InitializationMethod::RandomPermutation => self.random_order(rng),
            InitializationMethod::SlackHeuristic => self.slack_order(),
        }
    }

    /// A uniformly random permutation of `1..=N`.
    pub fn random_order<R: Rng>(&self, rng: &mut R) -> Vec<JobId> {
        let mut order: Vec<JobId> = (1..=self.jobs).collect();
        order.shuffle(rng);
        order
    }

    /// Greedy slack construction.
    ///
    /// At each step every remaining job is tentatively appended, only the
    /// new row of the completion matrix is computed, and the job with the
    /// smallest signed `priority * (due_date - partial_makespan)` is kept.
    /// Ties go to the job met first in the remaining list.
    pub fn slack_order(&self) -> Vec<JobId> {
        let stride = self.machines + 1;
        let mut cells = vec![0; self.jobs * stride];
        let mut remaining: Vec<JobId> = (1..=self.jobs).collect();
        let mut order = Vec::with_capacity(self.jobs);

        for position in 0..self.jobs {
            let mut best_idx = 0;
            let mut best_earliness = i64::MAX;
            for (idx, &job) in remaining.iter().enumerate() {
                self.fill_row(&mut cells, position, job);
                let makespan = cells[position * stride + self.machines];
                let earliness = self.priority(job) * (self.due_date(job) - makespan);
                if earliness < best_earliness {
                    best_idx = idx;
                    best_earliness = earliness;
                }
            }
            let job = remaining.remove(best_idx);
            self.fill_row(&mut cells, position, job);
            order.push(job);
        }
        order
    }

    /// Completion times of `jobs_order` computed from scratch. O(N·M).
    pub fn full_completion_times(&self, jobs_order: &[JobId]) -> CompletionTimes {
        let stride = self.machines + 1;
        let mut cells = vec![0; jobs_order.len() * stride];
        for (position, &job) in jobs_order.iter().enumerate() {
            self.fill_row(&mut cells, position, job);
        }
        CompletionTimes::from_cells(self.machines, cells)
    }

    /// Completion times of `jobs_order`, reusing rows `[0, from)` of
    /// `previous`.
    ///
    /// The caller guarantees that `jobs_order` agrees with the sequence
    /// behind `previous` on every position below `from`; neighborhood
    /// generators report that index as their last changed index. The
    /// result is identical to [`full_completion_times`](Self::full_completion_times).
    ///
    /// # Panics
    ///
    /// Panics if `from` exceeds either sequence length or the matrix was
    /// built for a different machine count.
    pub fn incremental_completion_times(
        &self,
        jobs_order: &[JobId],
        previous: &CompletionTimes,
        from: usize,
    ) -> CompletionTimes {
        assert_eq!(
            previous.number_of_machines(),
            self.machines,
            "completion matrix belongs to a different instance"
        );
        assert!(
            from <= jobs_order.len() && from <= previous.len(),
            "split index {from} out of range (order {}, matrix {})",
            jobs_order.len(),
            previous.len()
        );
        debug_assert!(
            (0..from).all(|pos| previous.job_at(pos) == jobs_order[pos]),
            "prefix before split index differs"
        );

        let stride = self.machines + 1;
        let mut cells = Vec::with_capacity(jobs_order.len() * stride);
        cells.extend_from_slice(&previous.cells()[..from * stride]);
        cells.resize(jobs_order.len() * stride, 0);
        for (position, &job) in jobs_order.iter().enumerate().skip(from) {
            self.fill_row(&mut cells, position, job);
        }
        CompletionTimes::from_cells(self.machines, cells)
    }

    /// Total weighted tardiness: `Σ priority[j] * max(C_j - d_j, 0)`. O(N).
    pub fn weighted_tardiness(&self, completion_times: &CompletionTimes) -> i64 {
        (0..completion_times.len())
            .map(|position| {
                let job = completion_times.job_at(position);
                let tardiness =
                    (completion_times.last_completion(position) - self.due_dates[job]).max(0);
                tardiness * self.priorities[job]
            })
            .sum()
    }

    /// Completion time of the last job on the last machine (0 if empty).
    pub fn makespan(&self, completion_times: &CompletionTimes) -> i64 {
        match completion_times.len() {
            0 => 0,
            n => completion_times.last_completion(n - 1),
        }
    }

    /// Evaluates a permutation from scratch into a [`Solution`].
    pub fn evaluate(&self, jobs_order: Vec<JobId>) -> Solution {
        let completion_times = self.full_completion_times(&jobs_order);
        let tardiness = self.weighted_tardiness(&completion_times);
        Solution::new(jobs_order, completion_times, tardiness)
    }

    /// Writes row `position` for `job`, reading row `position - 1`.
    ///
    /// `C[i][m] = p[job][m] + max(C[i][m-1], C[i-1][m])`.
    fn fill_row(&self, cells: &mut [i64], position: usize, job: JobId) {
        let stride = self.machines + 1;
        let (head, tail) = cells.split_at_mut(position * stride);
        let row = &mut tail[..stride];
        let previous = if position == 0 {
            None
        } else {
            Some(&head[(position - 1) * stride..])
        };

        row[0] = job as i64;
        let mut machine_end = 0;
        for machine in 1..=self.machines {
            let previous_job_end = previous.map_or(0, |p| p[machine]);
            machine_end = machine_end.max(previous_job_end) + self.processing_time(job, machine);
            row[machine] = machine_end;
        }
    }
}

/// Rejects values whose objective arithmetic could overflow `i64`.
///
/// Every completion time is at most the sum of all processing times, so
/// bounding that sum, the total weighted lateness and the weighted slack
/// bounds every later evaluation.
fn check_magnitudes(processing_times: &[i64], due_dates: &[i64], priorities: &[i64]) -> Result<()> {
    let limit = i64::MAX as i128;
    let total: i128 = processing_times.iter().map(|&p| p as i128).sum();
    let min_due = due_dates.iter().copied().min().unwrap_or(0) as i128;
    let max_due = due_dates.iter().copied().max().unwrap_or(0) as i128;
    let weight_sum: i128 = priorities.iter().map(|&w| w as i128).sum();
    let max_weight = priorities.iter().copied().max().unwrap_or(0) as i128;

    let lateness = (total - min_due).max(0);
    let slack = (min_due - total).abs().max(max_due.abs());
    let within = |bound: Option<i128>| bound.is_some_and(|b| b <= limit);

    if total > limit {
        return Err(PfspError::InvalidInstance(format!(
            "sum of processing times {total} overflows i64"
        )));
    }
    if !within(weight_sum.checked_mul(lateness)) || !within(max_weight.checked_mul(slack)) {
        return Err(PfspError::InvalidInstance(
            "priorities times possible lateness overflow i64".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn small() -> Instance {
        Instance::new(
            vec![vec![2, 3], vec![4, 1], vec![1, 5]],
            vec![5, 4, 9],
            vec![1, 2, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_small_completion_times() {
        let instance = small();
        let ct = instance.full_completion_times(&[1, 2, 3]);

        let m1: Vec<i64> = (0..3).map(|p| ct.completion(p, 1)).collect();
        let m2: Vec<i64> = (0..3).map(|p| ct.completion(p, 2)).collect();
        assert_eq!(m1, vec![2, 6, 7]);
        assert_eq!(m2, vec![5, 7, 12]);
        assert_eq!(ct.jobs(), vec![1, 2, 3]);
        assert_eq!(instance.weighted_tardiness(&ct), 9);
        assert_eq!(instance.makespan(&ct), 12);
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(matches!(
            Instance::new(vec![], vec![], vec![]),
            Err(PfspError::InvalidInstance(_))
        ));
        assert!(matches!(
            Instance::new(vec![vec![]], vec![1], vec![1]),
            Err(PfspError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_rejects_ragged_and_mismatched() {
        let ragged = Instance::new(vec![vec![1, 2], vec![3]], vec![1, 1], vec![1, 1]);
        assert!(matches!(ragged, Err(PfspError::InvalidInstance(_))));

        let short_due = Instance::new(vec![vec![1], vec![3]], vec![1], vec![1, 1]);
        assert!(matches!(short_due, Err(PfspError::InvalidInstance(_))));

        let negative = Instance::new(vec![vec![-1]], vec![1], vec![1]);
        assert!(matches!(negative, Err(PfspError::InvalidInstance(_))));

        let negative_weight = Instance::new(vec![vec![1]], vec![1], vec![-2]);
        assert!(matches!(negative_weight, Err(PfspError::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_overflowing_magnitudes() {
        let huge = i64::MAX / 2 + 1;
        assert!(matches!(
            Instance::new(vec![vec![huge]; 2], vec![0, 0], vec![1, 1]),
            Err(PfspError::InvalidInstance(_))
        ));
        assert!(matches!(
            Instance::new(vec![vec![10]], vec![0], vec![i64::MAX]),
            Err(PfspError::InvalidInstance(_))
        ));
        assert!(matches!(
            Instance::new(vec![vec![1]], vec![i64::MIN], vec![2]),
            Err(PfspError::InvalidInstance(_))
        ));

        let big = Instance::new(
            vec![vec![1_000_000_000; 3]; 3],
            vec![0, 5, -7],
            vec![1_000_000; 3],
        )
        .unwrap();
        let ct = big.full_completion_times(&[3, 1, 2]);
        assert_eq!(big.makespan(&ct), 5_000_000_000);
        assert!(big.weighted_tardiness(&ct) > 0);
    }

    #[test]
    fn test_reference_temperature() {
        let instance = small();
        // total = 16, N*M*10 = 60
        let t = instance.reference_temperature(1.5).unwrap();
        assert!((t - 1.5 * 16.0 / 60.0).abs() < 1e-12);
        assert!(matches!(
            instance.reference_temperature(0.0),
            Err(PfspError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_slack_order_small() {
        // step 0: job1 1*(5-5)=0, job2 2*(4-5)=-2, job3 1*(9-6)=3 -> job 2
        // step 1 after [2]: job1 C=9 -> -4, job3 C=10 -> -1 -> job 1
        let instance = small();
        assert_eq!(instance.slack_order(), vec![2, 1, 3]);
    }

    #[test]
    fn test_slack_tie_goes_to_first_remaining() {
        let instance = Instance::new(vec![vec![1], vec![1]], vec![0, 0], vec![0, 0]).unwrap();
        assert_eq!(instance.slack_order(), vec![1, 2]);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let instance = small();
        let mut rng = create_rng(3);
        let mut order = instance.initial_order(InitializationMethod::RandomPermutation, &mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_incremental_matches_full_after_swap() {
        let instance = small();
        let base = instance.full_completion_times(&[1, 2, 3]);
        let ct = instance.incremental_completion_times(&[1, 3, 2], &base, 1);
        assert_eq!(ct, instance.full_completion_times(&[1, 3, 2]));
    }

    #[test]
    fn test_incremental_on_longer_sequence() {
        // insertion into a partial sequence grows the matrix by one row
        let instance = small();
        let partial = instance.full_completion_times(&[1, 3]);
        let ct = instance.incremental_completion_times(&[1, 2, 3], &partial, 1);
        assert_eq!(ct, instance.full_completion_times(&[1, 2, 3]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_incremental_split_out_of_range() {
        let instance = small();
        let base = instance.full_completion_times(&[1, 2]);
        instance.incremental_completion_times(&[1, 2, 3], &base, 3);
    }

    #[test]
    fn test_initialization_method_from_str() {
        assert_eq!(
            "slack".parse::<InitializationMethod>().unwrap(),
            InitializationMethod::SlackHeuristic
        );
        assert_eq!(
            "RANDOM".parse::<InitializationMethod>().unwrap(),
            InitializationMethod::RandomPermutation
        );
        assert!(matches!(
            "neh".parse::<InitializationMethod>(),
            Err(PfspError::UnknownEnumValue { .. })
        ));
    }

    fn arb_instance() -> impl Strategy<Value = Instance> {
        (1usize..9, 1usize..6).prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(prop::collection::vec(0i64..50, m), n),
                prop::collection::vec(0i64..300, n),
                prop::collection::vec(0i64..10, n),
            )
                .prop_map(|(p, d, w)| Instance::new(p, d, w).unwrap())
        })
    }

    fn arb_case() -> impl Strategy<Value = (Instance, Vec<JobId>, usize)> {
        (arb_instance(), any::<u64>(), any::<prop::sample::Index>()).prop_map(
            |(instance, seed, split)| {
                let order = instance.random_order(&mut create_rng(seed));
                let k = split.index(order.len() + 1);
                (instance, order, k)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_incremental_equals_full((instance, order, k) in arb_case()) {
            let full = instance.full_completion_times(&order);
            let incremental = instance.incremental_completion_times(&order, &full, k);
            prop_assert_eq!(incremental, full);
        }

        #[test]
        fn prop_incremental_from_stale_suffix((instance, order, k) in arb_case()) {
            // rows at and after k come from a different sequence
            let mut other = order.clone();
            other[k.min(order.len() - 1)..].reverse();
            let stale = instance.full_completion_times(&other);
            let from = k.min(order.len() - 1);
            let incremental = instance.incremental_completion_times(&order, &stale, from);
            prop_assert_eq!(incremental, instance.full_completion_times(&order));
        }

        #[test]
        fn prop_tardiness_matches_formula((instance, order, _k) in arb_case()) {
            let ct = instance.full_completion_times(&order);
            let expected: i64 = order
                .iter()
                .enumerate()
                .map(|(pos, &job)| {
                    instance.priority(job) * (ct.last_completion(pos) - instance.due_date(job)).max(0)
                })
                .sum();
            let wt = instance.weighted_tardiness(&ct);
            prop_assert!(wt >= 0);
            prop_assert_eq!(wt, expected);
        }
    }
}
