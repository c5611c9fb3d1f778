//! IG configuration.

use std::time::Duration;

use crate::error::{PfspError, Result};

/// Configuration for the Iterated Greedy driver.
///
/// The initial solution is always the slack heuristic followed by a
/// first-improvement insert descent.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_flowshop::ig::IgConfig;
///
/// let config = IgConfig::default()
///     .with_destruction_size(3)
///     .with_time_budget(Duration::from_millis(500));
/// assert_eq!(config.destruction_size, 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgConfig {
    /// Jobs removed and reinserted per iteration (`d`).
    pub destruction_size: usize,

    /// `t` in the reference temperature `t * Σp / (N * M * 10)`.
    pub temperature_multiplier: f64,

    /// Wall-clock budget, measured from the start of the run.
    pub time_budget: Duration,

    /// Maximum destroy/rebuild iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for IgConfig {
    fn default() -> Self {
        Self {
            destruction_size: 4,
            temperature_multiplier: 0.4,
            time_budget: Duration::from_secs(1),
            max_iterations: 0,
            seed: None,
        }
    }
}

impl IgConfig {
    pub fn with_destruction_size(mut self, d: usize) -> Self {
        self.destruction_size = d;
        self
    }

    pub fn with_temperature_multiplier(mut self, t: f64) -> Self {
        self.temperature_multiplier = t;
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
    ///
    /// The destruction size is checked against the job count at run time.
    pub fn validate(&self) -> Result<()> {
        if self.destruction_size == 0 {
            return Err(PfspError::InvalidConfig(
                "destruction_size must be at least 1".into(),
            ));
        }
        if !(self.temperature_multiplier > 0.0 && self.temperature_multiplier.is_finite()) {
            return Err(PfspError::InvalidConfig(format!(
                "temperature_multiplier must be positive, got {}",
                self.temperature_multiplier
            )));
        }
        Ok(())
    }
}
