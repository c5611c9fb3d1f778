//! Simulated Annealing (SA) over the insert neighborhood.
//!
//! Starts from a first-improvement insert local optimum, then repeatedly
//! samples one uniformly random insert move from the current permutation.
//! Improving moves are always taken; worsening moves are taken with the
//! Metropolis probability `exp(-delta / T)`. The temperature follows a
//! Lundy-Mees style schedule anchored at the instance's reference
//! temperature and drops after a fixed number of steps.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::SaRunner;
