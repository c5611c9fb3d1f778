//! SA execution loop.

use std::time::Instant;

use rand::Rng;

use super::config::SaConfig;
use crate::acceptance::ExpCache;
use crate::error::Result;
use crate::instance::Instance;
use crate::local_search::IiRunner;
use crate::neighborhood::{NeighborhoodExplorer, NeighborhoodMethod, Permuter};
use crate::random::rng_from_seed;
use crate::solution::{QualityTrace, Solution};

/// Executes Simulated Annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a generator seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// [`PfspError::InvalidConfig`](crate::PfspError::InvalidConfig) for a
    /// bad configuration, [`PfspError::InvalidInstance`](crate::PfspError::InvalidInstance)
    /// if the reference temperature is zero.
    pub fn run(instance: &Instance, config: &SaConfig) -> Result<Solution> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs SA drawing every random number from `rng`.
    ///
    /// Returns the best solution seen, carrying the number of sampled
    /// moves, the elapsed time, and one trace entry per new best.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<Solution> {
        config.validate()?;
        let start = Instant::now();

        let initial_temperature = instance.reference_temperature(config.temperature_multiplier)?;
        let mut temperature = initial_temperature;

        let initial = instance.evaluate(instance.initial_order(config.initialization, rng));
        let mut current = IiRunner::first_improvement(instance, initial, NeighborhoodMethod::Insert);
        let mut best = current.clone();

        let mut explorer =
            NeighborhoodExplorer::new(current.jobs_order().to_vec(), NeighborhoodMethod::Insert);
        if explorer.size() == 0 {
            log::info!("sa: single job, nothing to anneal");
            return Ok(best.with_run_stats(0, start.elapsed(), Vec::new()));
        }
        let steps = steps_per_temperature(
            explorer.size(),
            instance.number_of_jobs(),
            config.steps_multiplier,
        );
        let mut cache = ExpCache::for_tardiness(temperature, current.weighted_tardiness())?;

        log::info!(
            "sa: start tardiness {}, T0 = {initial_temperature:.4}, {steps} steps per temperature",
            current.weighted_tardiness()
        );

        let mut trace = Vec::new();
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        // Counts from 1 so the first cooling happens after a full block.
        let mut counter = 1usize;

        while start.elapsed() < config.time_budget
            && (config.max_iterations == 0 || counter <= config.max_iterations)
        {
            let candidate = explorer.sample_uniform(rng)?;
            let completion_times = instance.incremental_completion_times(
                &candidate,
                current.completion_times(),
                explorer.last_changed_index(),
            );
            let tardiness = instance.weighted_tardiness(&completion_times);
            let proposal = Solution::new(candidate, completion_times, tardiness);

            if tardiness < best.weighted_tardiness() {
                best = proposal.clone();
                trace.push(QualityTrace::new(tardiness, counter, start.elapsed()));
                log::debug!("sa: new best {tardiness} at iteration {counter}");
            }

            let delta = tardiness - current.weighted_tardiness();
            let accept = if delta < 0 {
                improving_moves += 1;
                true
            } else {
                rng.random::<f64>() <= cache.probability(delta)
            };
            if accept {
                explorer.set_base(proposal.jobs_order().to_vec());
                current = proposal;
                accepted_moves += 1;
            }

            if counter % steps == 0 {
                temperature = cool(temperature, initial_temperature, config.cooling_modifier);
                cache.set_temperature(temperature)?;
                log::trace!("sa: temperature {temperature:.6} after {counter} iterations");
            }

            counter += 1;
        }

        let iterations = counter - 1;
        log::info!(
            "sa: best {} after {iterations} iterations ({accepted_moves} accepted, \
             {improving_moves} improving), final T = {temperature:.6}",
            best.weighted_tardiness()
        );
        Ok(best.with_run_stats(iterations, start.elapsed(), trace))
    }
}

/// `round(neighborhood_size * jobs * multiplier)`, at least one.
fn steps_per_temperature(neighborhood_size: usize, jobs: usize, multiplier: f64) -> usize {
    let steps = (neighborhood_size as f64 * jobs as f64 * multiplier).round();
    (steps as usize).max(1)
}

/// `T / (1 + T / T0 * c)`: Lundy-Mees with `beta = c / T0`.
fn cool(temperature: f64, initial_temperature: f64, cooling_modifier: f64) -> f64 {
    temperature / (1.0 + temperature / initial_temperature * cooling_modifier)
}
