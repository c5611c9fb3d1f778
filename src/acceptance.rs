//! Memoized Metropolis acceptance probabilities.
//!
//! Tardiness deltas are integers and repeat often, so `exp(-delta / T)` is
//! cached per delta for the current temperature. Changing the temperature
//! drops every cached entry.
//!
//! # Reference
//!
//! Metropolis et al. (1953), "Equation of State Calculations by Fast
//! Computing Machines"

use std::collections::HashMap;

use crate::error::{PfspError, Result};

/// Cache of `exp(-delta / temperature)` keyed by `delta`.
///
/// # Examples
///
/// ```
/// use u_flowshop::acceptance::ExpCache;
///
/// let mut cache = ExpCache::new(10.0).unwrap();
/// assert_eq!(cache.probability(0), 1.0);
/// assert!((cache.probability(10) - (-1.0f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ExpCache {
    table: HashMap<i64, f64>,
    temperature: f64,
}

impl ExpCache {
    /// Creates an empty cache for `temperature`.
    ///
    /// # Errors
    ///
    /// [`PfspError::InvalidConfig`] if the temperature is zero or not finite.
    pub fn new(temperature: f64) -> Result<Self> {
        Self::with_capacity(temperature, 100)
    }

    /// Creates an empty cache with room for `capacity` deltas.
    pub fn with_capacity(temperature: f64, capacity: usize) -> Result<Self> {
        check_temperature(temperature)?;
        Ok(Self {
            table: HashMap::with_capacity(capacity.max(1)),
            temperature,
        })
    }

    /// Creates a cache sized for a search starting at `tardiness`:
    /// one slot per hundred units, rounded up.
    pub fn for_tardiness(temperature: f64, tardiness: i64) -> Result<Self> {
        let capacity = (tardiness.max(0) as f64 * 0.01).ceil() as usize;
        Self::with_capacity(temperature, capacity)
    }

    /// `exp(-delta / temperature)`, computed once per distinct delta.
    ///
    /// No clamping: non-positive deltas yield values `>= 1`.
    pub fn probability(&mut self, delta: i64) -> f64 {
        let temperature = self.temperature;
        *self
            .table
            .entry(delta)
            .or_insert_with(|| (-(delta as f64) / temperature).exp())
    }

    /// Switches to a new temperature and clears every cached value.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        check_temperature(temperature)?;
        self.table.clear();
        self.temperature = temperature;
        Ok(())
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of cached deltas.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn check_temperature(temperature: f64) -> Result<()> {
    if temperature == 0.0 || !temperature.is_finite() {
        return Err(PfspError::InvalidConfig(format!(
            "acceptance temperature must be non-zero and finite, got {temperature}"
        )));
    }
    Ok(())
}
