//! Local search: iterative improvement (II) and variable neighborhood
//! descent (VND).
//!
//! | Runner | Stops when |
//! |--------|------------|
//! | [`IiRunner`] | no strictly improving neighbor in one neighborhood |
//! | [`VndRunner`] | no strictly improving neighbor in any of three neighborhoods |
//!
//! Both are deterministic given their starting solution and serve as the
//! descent step inside [`sa`](crate::sa) and [`ig`](crate::ig).

mod config;
mod runner;

pub use config::{IiConfig, NeighborhoodOrder, Pivot, VndConfig};
pub use runner::{IiRunner, VndRunner};
