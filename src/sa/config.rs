//! SA configuration.

use std::time::Duration;

use crate::error::{PfspError, Result};
use crate::instance::InitializationMethod;

/// Configuration for the Simulated Annealing driver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_flowshop::instance::InitializationMethod;
/// use u_flowshop::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initialization(InitializationMethod::SlackHeuristic)
///     .with_temperature_multiplier(120.0)
///     .with_cooling_modifier(2.0)
///     .with_time_budget(Duration::from_millis(250))
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// How the starting permutation is built before the initial descent.
    pub initialization: InitializationMethod,

    /// `t` in the reference temperature `t * Σp / (N * M * 10)`.
    pub temperature_multiplier: f64,

    /// Steps per temperature as a fraction of `|insert neighborhood| * N`.
    pub steps_multiplier: f64,

    /// Cooling speed: `T <- T / (1 + T / T0 * cooling_modifier)`.
    ///
    /// Zero keeps the temperature fixed.
    pub cooling_modifier: f64,

    /// Wall-clock budget, measured from the start of the run.
    pub time_budget: Duration,

    /// Maximum sampled moves (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initialization: InitializationMethod::RandomPermutation,
            temperature_multiplier: 150.0,
            steps_multiplier: 0.20,
            cooling_modifier: 1.45,
            time_budget: Duration::from_secs(1),
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initialization(mut self, method: InitializationMethod) -> Self {
        self.initialization = method;
        self
    }

    pub fn with_temperature_multiplier(mut self, t: f64) -> Self {
        self.temperature_multiplier = t;
        self
    }

    pub fn with_steps_multiplier(mut self, m: f64) -> Self {
        self.steps_multiplier = m;
        self
    }

    pub fn with_cooling_modifier(mut self, c: f64) -> Self {
        self.cooling_modifier = c;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.temperature_multiplier > 0.0 && self.temperature_multiplier.is_finite()) {
            return Err(PfspError::InvalidConfig(format!(
                "temperature_multiplier must be positive, got {}",
                self.temperature_multiplier
            )));
        }
        if !(self.steps_multiplier > 0.0 && self.steps_multiplier.is_finite()) {
            return Err(PfspError::InvalidConfig(format!(
                "steps_multiplier must be positive, got {}",
                self.steps_multiplier
            )));
        }
        if !(self.cooling_modifier >= 0.0 && self.cooling_modifier.is_finite()) {
            return Err(PfspError::InvalidConfig(format!(
                "cooling_modifier must be non-negative, got {}",
                self.cooling_modifier
            )));
        }
        Ok(())
    }
}
