//! IG execution loop with destroy and greedy rebuild.

use std::time::Instant;

use rand::Rng;

use super::config::IgConfig;
use crate::acceptance::ExpCache;
use crate::error::{PfspError, Result};
use crate::instance::{Instance, JobId};
use crate::local_search::IiRunner;
use crate::neighborhood::NeighborhoodMethod;
use crate::random::rng_from_seed;
use crate::solution::{QualityTrace, Solution};

/// Executes Iterated Greedy.
pub struct IgRunner;

impl IgRunner {
    /// Runs IG with a generator seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// [`PfspError::InvalidConfig`] for a bad configuration or a
    /// destruction size above the job count,
    /// [`PfspError::InvalidInstance`] if the reference temperature is zero.
    pub fn run(instance: &Instance, config: &IgConfig) -> Result<Solution> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs IG drawing every random number from `rng`.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &IgConfig,
        rng: &mut R,
    ) -> Result<Solution> {
        config.validate()?;
        let d = config.destruction_size;
        if d > instance.number_of_jobs() {
            return Err(PfspError::InvalidConfig(format!(
                "destruction_size {d} exceeds job count {}",
                instance.number_of_jobs()
            )));
        }
        let start = Instant::now();

        let temperature = instance.reference_temperature(config.temperature_multiplier)?;
        let mut current = IiRunner::first_improvement(
            instance,
            instance.evaluate(instance.slack_order()),
            NeighborhoodMethod::Insert,
        );
        let mut best = current.clone();
        let mut cache = ExpCache::for_tardiness(temperature, current.weighted_tardiness())?;

        log::info!(
            "ig: start tardiness {}, d = {d}, T = {temperature:.4}",
            current.weighted_tardiness()
        );

        let mut trace = Vec::new();
        let mut accepted_moves = 0usize;
        let mut iteration = 0usize;

        while start.elapsed() < config.time_budget
            && (config.max_iterations == 0 || iteration < config.max_iterations)
        {
            let (partial, removed) = Self::destroy(current.jobs_order(), d, rng);
            let mut rebuilt = instance.evaluate(partial);
            for job in removed {
                rebuilt = Self::insert_optimally(instance, &rebuilt, job);
            }
            let searched =
                IiRunner::first_improvement(instance, rebuilt, NeighborhoodMethod::Insert);

            let delta = searched.weighted_tardiness() - current.weighted_tardiness();
            if delta < 0 {
                current = searched;
                accepted_moves += 1;
                if current.weighted_tardiness() < best.weighted_tardiness() {
                    best = current.clone();
                    trace.push(QualityTrace::new(
                        best.weighted_tardiness(),
                        iteration,
                        start.elapsed(),
                    ));
                    log::debug!(
                        "ig: new best {} at iteration {iteration}",
                        best.weighted_tardiness()
                    );
                }
            } else if rng.random::<f64>() <= cache.probability(delta) {
                current = searched;
                accepted_moves += 1;
            }

            iteration += 1;
        }

        log::info!(
            "ig: best {} after {iteration} iterations ({accepted_moves} accepted)",
            best.weighted_tardiness()
        );
        Ok(best.with_run_stats(iteration, start.elapsed(), trace))
    }

    /// Removes `d` jobs at uniformly random positions of `jobs_order`.
    ///
    /// Each draw indexes the sequence left by the previous removals.
    /// Returns the shortened order and the removed jobs in removal order.
    ///
    /// # Panics
    ///
    /// Panics if `d` exceeds the number of jobs.
    pub fn destroy<R: Rng>(
        jobs_order: &[JobId],
        d: usize,
        rng: &mut R,
    ) -> (Vec<JobId>, Vec<JobId>) {
        assert!(d <= jobs_order.len(), "cannot remove {d} of {} jobs", jobs_order.len());
        let mut partial = jobs_order.to_vec();
        let removed = (0..d)
            .map(|_| {
                let index = rng.random_range(0..partial.len());
                partial.remove(index)
            })
            .collect();
        (partial, removed)
    }

    /// Inserts `job` at the position of `partial` that minimizes weighted
    /// tardiness.
    ///
    /// Positions `0..=len` are tried in order, each evaluated incrementally
    /// from the insertion point; the first strictly best position wins.
    pub fn insert_optimally(instance: &Instance, partial: &Solution, job: JobId) -> Solution {
        let mut trial = Vec::with_capacity(partial.len() + 1);
        trial.extend_from_slice(partial.jobs_order());

        let mut evaluate_at = |position: usize| {
            trial.insert(position, job);
            let completion_times =
                instance.incremental_completion_times(&trial, partial.completion_times(), position);
            let tardiness = instance.weighted_tardiness(&completion_times);
            let candidate = Solution::new(trial.clone(), completion_times, tardiness);
            trial.remove(position);
            candidate
        };

        let mut best = evaluate_at(0);
        for position in 1..=partial.len() {
            let candidate = evaluate_at(position);
            if candidate.weighted_tardiness() < best.weighted_tardiness() {
                best = candidate;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::time::Duration;

    // ---- Helpers ----

    fn small() -> Instance {
        Instance::new(
            vec![vec![2, 3], vec![4, 1], vec![1, 5]],
            vec![5, 4, 9],
            vec![1, 2, 1],
        )
        .unwrap()
    }

    fn synthetic(jobs: usize, machines: usize, seed: u64) -> Instance {
        let mut rng = create_rng(seed);
        let processing: Vec<Vec<i64>> = (0..jobs)
            .map(|_| (0..machines).map(|_| rng.random_range(1..25)).collect())
            .collect();
        let horizon = (jobs * machines * 13 / 4) as i64;
        let due: Vec<i64> = (0..jobs).map(|_| rng.random_range(0..horizon)).collect();
        let weights: Vec<i64> = (0..jobs).map(|_| rng.random_range(1..10)).collect();
        Instance::new(processing, due, weights).unwrap()
    }

    fn capped(seed: u64, iterations: usize) -> IgConfig {
        IgConfig::default()
            .with_time_budget(Duration::from_secs(60))
            .with_max_iterations(iterations)
            .with_seed(seed)
    }

    // ---- Destroy / rebuild ----

    #[test]
    fn test_destroy_partitions_jobs() {
        let order: Vec<JobId> = (1..=10).collect();
        let mut rng = create_rng(4);
        let (partial, removed) = IgRunner::destroy(&order, 4, &mut rng);
        assert_eq!(partial.len(), 6);
        assert_eq!(removed.len(), 4);

        let mut all: Vec<JobId> = partial.iter().chain(removed.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, order);

        // survivors keep their relative order
        let positions: Vec<usize> = partial
            .iter()
            .map(|job| order.iter().position(|j| j == job).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_destroy_everything() {
        let (partial, removed) = IgRunner::destroy(&[3, 1, 2], 3, &mut create_rng(0));
        assert!(partial.is_empty());
        assert_eq!(removed.len(), 3);
    }

    #[test]
    fn test_insert_optimally_small() {
        // job 2 into [1, 3] at positions 0, 1 and 2
        let instance = small();
        let partial = instance.evaluate(vec![1, 3]);
        let inserted = IgRunner::insert_optimally(&instance, &partial, 2);

        let best_full = (0..=2)
            .map(|p| {
                let mut order = vec![1, 3];
                order.insert(p, 2);
                instance.evaluate(order).weighted_tardiness()
            })
            .min()
            .unwrap();
        assert_eq!(inserted.weighted_tardiness(), best_full);
        assert_eq!(inserted, instance.evaluate(inserted.jobs_order().to_vec()));
    }

    #[test]
    fn test_insert_into_empty() {
        let instance = small();
        let empty = instance.evaluate(Vec::new());
        let inserted = IgRunner::insert_optimally(&instance, &empty, 3);
        assert_eq!(inserted.jobs_order(), &[3]);
        assert_eq!(inserted.weighted_tardiness(), 0);
    }

    #[test]
    fn test_insert_optimally_keeps_first_tie() {
        // all jobs identical, no tardiness anywhere: every position ties
        let instance =
            Instance::new(vec![vec![1, 1]; 4], vec![100; 4], vec![1; 4]).unwrap();
        let partial = instance.evaluate(vec![1, 2, 3]);
        let inserted = IgRunner::insert_optimally(&instance, &partial, 4);
        assert_eq!(inserted.jobs_order(), &[4, 1, 2, 3]);
    }

    // ---- Driver ----

    #[test]
    fn test_ig_not_worse_than_initial_descent() {
        let instance = synthetic(14, 4, 21);
        let descent = IiRunner::first_improvement(
            &instance,
            instance.evaluate(instance.slack_order()),
            NeighborhoodMethod::Insert,
        );
        let result = IgRunner::run(&instance, &capped(5, 30)).unwrap();
        assert!(result.weighted_tardiness() <= descent.weighted_tardiness());
        assert_eq!(result.iterations(), 30);
        assert_eq!(
            instance.evaluate(result.jobs_order().to_vec()).weighted_tardiness(),
            result.weighted_tardiness()
        );
    }

    #[test]
    fn test_ig_deterministic_with_seed() {
        let instance = synthetic(12, 3, 2);
        let a = IgRunner::run(&instance, &capped(8, 25)).unwrap();
        let b = IgRunner::run(&instance, &capped(8, 25)).unwrap();
        assert_eq!(a.jobs_order(), b.jobs_order());
        assert_eq!(a.quality_trace().len(), b.quality_trace().len());
    }

    #[test]
    fn test_ig_trace_iterations_are_zero_based() {
        let instance = synthetic(16, 4, 13);
        let result = IgRunner::run(&instance, &capped(3, 40)).unwrap();
        for entry in result.quality_trace() {
            assert!(entry.iteration < 40);
        }
        for pair in result.quality_trace().windows(2) {
            assert!(pair[1].tardiness < pair[0].tardiness);
        }
    }

    #[test]
    fn test_ig_rejects_oversized_destruction() {
        let instance = small();
        let config = capped(0, 1).with_destruction_size(4);
        assert!(matches!(
            IgRunner::run(&instance, &config),
            Err(PfspError::InvalidConfig(_))
        ));
        assert!(IgRunner::run(&instance, &capped(0, 3).with_destruction_size(3)).is_ok());
    }
}
