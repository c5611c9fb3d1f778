//! Iterative improvement and variable neighborhood descent.
//!
//! # Algorithm (first improvement)
//!
//! 1. Scan the neighborhood of the current permutation in enumeration order
//! 2. On the first strictly improving neighbor, move to it, re-base the
//!    generator and restart the scan
//! 3. Stop when a full scan finds nothing better
//!
//! Best improvement scans the whole neighborhood each round and moves to
//! the strictly best neighbor. VND applies one first-improving move from
//! neighborhood `k`; on success it returns to `k = 0`, otherwise it moves
//! to `k + 1`, stopping after the last neighborhood fails.
//!
//! Every neighbor is evaluated with incremental completion-time
//! recomputation seeded from the current solution's matrix. Nothing here
//! is random once the initial solution exists.
//!
//! # Reference
//!
//! Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//! Principles and applications", *EJOR* 130(3), 449-467.

use std::time::Instant;

use rand::Rng;

use super::config::{IiConfig, NeighborhoodOrder, Pivot, VndConfig};
use crate::instance::Instance;
use crate::neighborhood::{NeighborhoodExplorer, NeighborhoodMethod, Permuter};
use crate::random::rng_from_seed;
use crate::solution::Solution;

/// Evaluates the generator's next neighbors until one beats `current`.
///
/// Scanning starts at the generator's cursor.
fn first_improving(
    instance: &Instance,
    current: &Solution,
    explorer: &mut NeighborhoodExplorer,
) -> Option<Solution> {
    while let Some(candidate) = explorer.next_neighbor() {
        let completion_times = instance.incremental_completion_times(
            &candidate,
            current.completion_times(),
            explorer.last_changed_index(),
        );
        let tardiness = instance.weighted_tardiness(&completion_times);
        if tardiness < current.weighted_tardiness() {
            return Some(Solution::new(candidate, completion_times, tardiness));
        }
    }
    None
}

/// Evaluates the whole neighborhood of `current` and returns its strictly
/// best improving neighbor, if any.
fn best_improving(
    instance: &Instance,
    current: &Solution,
    method: NeighborhoodMethod,
) -> Option<Solution> {
    let mut explorer = NeighborhoodExplorer::new(current.jobs_order().to_vec(), method);
    let mut best: Option<Solution> = None;
    let mut best_tardiness = current.weighted_tardiness();

    while let Some(candidate) = explorer.next_neighbor() {
        let completion_times = instance.incremental_completion_times(
            &candidate,
            current.completion_times(),
            explorer.last_changed_index(),
        );
        let tardiness = instance.weighted_tardiness(&completion_times);
        if tardiness < best_tardiness {
            best_tardiness = tardiness;
            best = Some(Solution::new(candidate, completion_times, tardiness));
        }
    }
    best
}

/// Iterative improvement runner.
pub struct IiRunner;

impl IiRunner {
    /// Builds an initial solution per `config` and improves it to a local
    /// optimum.
    pub fn run(instance: &Instance, config: &IiConfig) -> Solution {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Like [`run`](Self::run), drawing randomness from `rng`.
    pub fn run_with_rng<R: Rng>(instance: &Instance, config: &IiConfig, rng: &mut R) -> Solution {
        let initial = instance.evaluate(instance.initial_order(config.initialization, rng));
        Self::improve(instance, initial, config.pivot, config.neighborhood)
    }

    /// Improves `initial` with the given pivot rule and neighborhood.
    ///
    /// The result carries the number of moves applied and the search time.
    pub fn improve(
        instance: &Instance,
        initial: Solution,
        pivot: Pivot,
        method: NeighborhoodMethod,
    ) -> Solution {
        match pivot {
            Pivot::FirstImprovement => Self::first_improvement(instance, initial, method),
            Pivot::BestImprovement => Self::best_improvement(instance, initial, method),
        }
    }

    /// First-improvement descent; restarts the scan after every move.
    pub fn first_improvement(
        instance: &Instance,
        initial: Solution,
        method: NeighborhoodMethod,
    ) -> Solution {
        let start = Instant::now();
        let initial_tardiness = initial.weighted_tardiness();
        let mut explorer = NeighborhoodExplorer::new(initial.jobs_order().to_vec(), method);
        let mut current = initial;
        let mut moves = 0usize;

        while let Some(better) = first_improving(instance, &current, &mut explorer) {
            explorer.set_base(better.jobs_order().to_vec());
            explorer.reset_cursor();
            current = better;
            moves += 1;
        }

        log::debug!(
            "ii first-improvement/{method}: {initial_tardiness} -> {} in {moves} moves",
            current.weighted_tardiness()
        );
        current.with_run_stats(moves, start.elapsed(), Vec::new())
    }

    /// Best-improvement descent.
    pub fn best_improvement(
        instance: &Instance,
        initial: Solution,
        method: NeighborhoodMethod,
    ) -> Solution {
        let start = Instant::now();
        let initial_tardiness = initial.weighted_tardiness();
        let mut current = initial;
        let mut moves = 0usize;

        while let Some(better) = best_improving(instance, &current, method) {
            current = better;
            moves += 1;
        }

        log::debug!(
            "ii best-improvement/{method}: {initial_tardiness} -> {} in {moves} moves",
            current.weighted_tardiness()
        );
        current.with_run_stats(moves, start.elapsed(), Vec::new())
    }
}

/// Variable neighborhood descent runner.
pub struct VndRunner;

impl VndRunner {
    /// Builds an initial solution per `config` and descends to a solution
    /// that is locally optimal in all three neighborhoods.
    pub fn run(instance: &Instance, config: &VndConfig) -> Solution {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Like [`run`](Self::run), drawing randomness from `rng`.
    pub fn run_with_rng<R: Rng>(instance: &Instance, config: &VndConfig, rng: &mut R) -> Solution {
        let initial = instance.evaluate(instance.initial_order(config.initialization, rng));
        Self::descend(instance, initial, config.order)
    }

    /// Runs VND from `initial`.
    pub fn descend(instance: &Instance, initial: Solution, order: NeighborhoodOrder) -> Solution {
        let start = Instant::now();
        let methods = order.methods();
        let initial_tardiness = initial.weighted_tardiness();
        let mut current = initial;
        let mut moves = 0usize;
        let mut k = 0;

        while k < methods.len() {
            let mut explorer = NeighborhoodExplorer::new(current.jobs_order().to_vec(), methods[k]);
            match first_improving(instance, &current, &mut explorer) {
                Some(better) => {
                    current = better;
                    moves += 1;
                    k = 0;
                }
                None => {
                    log::trace!("vnd: no improving {} move, switching", methods[k]);
                    k += 1;
                }
            }
        }

        log::debug!(
            "vnd {order}: {initial_tardiness} -> {} in {moves} moves",
            current.weighted_tardiness()
        );
        current.with_run_stats(moves, start.elapsed(), Vec::new())
    }
}
