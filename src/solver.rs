//! Instance-bound entry points for harnesses and command-line front ends.
//!
//! [`Solver`] borrows one [`Instance`] and exposes every search method with
//! its configuration object. Each call owns its own search state, so one
//! solver may serve many runs.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::Result;
use crate::ig::{IgConfig, IgRunner};
use crate::instance::{InitializationMethod, Instance};
use crate::local_search::{IiConfig, IiRunner, NeighborhoodOrder, VndConfig, VndRunner};
use crate::sa::{SaConfig, SaRunner};
use crate::solution::Solution;

/// Default factor applied by [`Solver::estimate_budget`].
pub const DEFAULT_BUDGET_MULTIPLIER: u32 = 100;

/// Runs searches on a borrowed instance.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_flowshop::{Instance, Solver};
/// use u_flowshop::sa::SaConfig;
///
/// let instance = Instance::new(
///     vec![vec![2, 3], vec![4, 1], vec![1, 5]],
///     vec![5, 4, 9],
///     vec![1, 2, 1],
/// )
/// .unwrap();
/// let solver = Solver::new(&instance);
///
/// let config = SaConfig::default()
///     .with_time_budget(Duration::from_millis(20))
///     .with_seed(3);
/// let best = solver.run_simulated_annealing(&config).unwrap();
/// assert_eq!(best.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    instance: &'a Instance,
}

impl<'a> Solver<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Iterative improvement with one pivot rule and neighborhood.
    pub fn run_local_search(&self, config: &IiConfig) -> Solution {
        IiRunner::run(self.instance, config)
    }

    /// Variable neighborhood descent.
    pub fn run_vnd(&self, config: &VndConfig) -> Solution {
        VndRunner::run(self.instance, config)
    }

    /// Simulated Annealing seeded from `config.seed`.
    pub fn run_simulated_annealing(&self, config: &SaConfig) -> Result<Solution> {
        SaRunner::run(self.instance, config)
    }

    /// Simulated Annealing on a caller-owned generator.
    ///
    /// Passing generators in the same state to this method and to
    /// [`run_iterated_greedy_with_rng`](Self::run_iterated_greedy_with_rng)
    /// gives paired runs.
    pub fn run_simulated_annealing_with_rng<R: Rng>(
        &self,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<Solution> {
        SaRunner::run_with_rng(self.instance, config, rng)
    }

    /// Iterated Greedy seeded from `config.seed`.
    pub fn run_iterated_greedy(&self, config: &IgConfig) -> Result<Solution> {
        IgRunner::run(self.instance, config)
    }

    /// Iterated Greedy on a caller-owned generator.
    pub fn run_iterated_greedy_with_rng<R: Rng>(
        &self,
        config: &IgConfig,
        rng: &mut R,
    ) -> Result<Solution> {
        IgRunner::run_with_rng(self.instance, config, rng)
    }

    /// Time budget for the metaheuristics on this instance.
    ///
    /// Times one VND run (transpose, exchange, insert from the slack
    /// heuristic) and scales it by `multiplier`. The timed run draws no
    /// random numbers.
    pub fn estimate_budget(&self, multiplier: u32) -> Duration {
        let start = Instant::now();
        let initial = self.instance.evaluate(self.instance.slack_order());
        let optimum =
            VndRunner::descend(self.instance, initial, NeighborhoodOrder::TransposeExchangeInsert);
        let elapsed = start.elapsed();
        let budget = elapsed.saturating_mul(multiplier);

        log::info!(
            "budget: vnd reached {} in {elapsed:?}, x{multiplier} = {budget:?}",
            optimum.weighted_tardiness()
        );
        budget
    }

    /// Configuration for a VND run from the slack heuristic, the same
    /// search [`estimate_budget`](Self::estimate_budget) times.
    pub fn budget_reference_config() -> VndConfig {
        VndConfig::default()
            .with_order(NeighborhoodOrder::TransposeExchangeInsert)
            .with_initialization(InitializationMethod::SlackHeuristic)
    }
}
