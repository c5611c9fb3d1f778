//! Stochastic local search for the permutation flow-shop problem with
//! total weighted tardiness.
//!
//! `N` jobs pass through `M` machines in the same order on every machine;
//! the goal is the job permutation minimizing `Σ w_j * max(C_j - d_j, 0)`.
//!
//! - **Instance**: processing times, due dates and priorities, with full
//!   and incremental completion-time evaluation.
//! - **Neighborhoods**: transpose, exchange and insert generators with a
//!   fixed enumeration order and uniform sampling.
//! - **Local search**: iterative improvement (first/best improvement) and
//!   variable neighborhood descent.
//! - **Simulated Annealing (SA)**: random insert moves under a cooling
//!   temperature.
//! - **Iterated Greedy (IG)**: destroy, greedy rebuild and descent under a
//!   fixed temperature.
//!
//! # Quick start
//!
//! ```
//! use std::time::Duration;
//! use u_flowshop::ig::IgConfig;
//! use u_flowshop::{Instance, Solver};
//!
//! let instance: Instance = "3 2\n\
//!     0 2 1 3\n\
//!     0 4 1 1\n\
//!     0 1 1 5\n\
//!     Reldue\n\
//!     -1 5 -1 1\n\
//!     -1 4 -1 2\n\
//!     -1 9 -1 1\n"
//!     .parse()
//!     .unwrap();
//!
//! let solver = Solver::new(&instance);
//! let config = IgConfig::default()
//!     .with_destruction_size(2)
//!     .with_time_budget(Duration::from_millis(10))
//!     .with_seed(42);
//! let best = solver.run_iterated_greedy(&config).unwrap();
//! assert!(best.weighted_tardiness() <= 9);
//! ```

pub mod acceptance;
pub mod error;
pub mod ig;
pub mod instance;
pub mod local_search;
pub mod neighborhood;
pub mod random;
pub mod sa;
pub mod solution;
pub mod solver;

pub use error::{PfspError, Result};
pub use instance::{InitializationMethod, Instance, JobId};
pub use solution::{QualityTrace, Solution};
pub use solver::Solver;
