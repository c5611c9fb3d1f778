//! Problem data and objective evaluation for the permutation flow shop.
//!
//! An [`Instance`] holds N jobs that visit M machines in the same order.
//! The decision variable is a job permutation; its quality is the total
//! weighted tardiness derived from a [`CompletionTimes`] matrix.
//!
//! The matrix can be rebuilt incrementally: when a neighborhood move
//! leaves positions `[0, k)` untouched, only rows `[k, N)` are recomputed.
//! This is what keeps neighborhood exploration cheap.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 6
//! - Taillard (1993), "Benchmarks for basic scheduling problems"

mod completion;
mod loading;
mod model;

pub use completion::CompletionTimes;
pub use model::{InitializationMethod, Instance, JobId};
