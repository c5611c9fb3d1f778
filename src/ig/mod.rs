//! Iterated Greedy (IG).
//!
//! Each iteration removes `d` random jobs from the current permutation,
//! reinserts them one by one at their best position, descends with
//! first-improvement insert moves, and accepts the result with a
//! fixed-temperature Metropolis test. There is no cooling schedule.
//!
//! # References
//!
//! - Ruiz & Stützle (2007), "A simple and effective iterated greedy
//!   algorithm for the permutation flowshop scheduling problem", *EJOR*
//!   177(3), 2033-2049
//! - Nawaz, Enscore & Ham (1983), "A heuristic algorithm for the
//!   m-machine, n-job flow-shop sequencing problem" (best-position insertion)

mod config;
mod runner;

pub use config::IgConfig;
pub use runner::IgRunner;
