//! Neighborhood generators over job permutations.
//!
//! Three move types are provided, each as a cursor-driven enumerator that
//! also supports uniform sampling:
//!
//! | Move      | Effect                           | Moves       |
//! |-----------|----------------------------------|-------------|
//! | Transpose | swap positions `i`, `i + 1`      | `N - 1`     |
//! | Exchange  | swap positions `i < j`           | `N(N-1)/2`  |
//! | Insert    | move the job at `i` to `j`       | `(N-1)^2`   |
//!
//! Enumeration is lexicographic in `(i, j)` and therefore reproducible.
//! After each move the generator reports the lowest position that differs
//! from its base permutation, which is where incremental completion-time
//! recomputation must start.
//!
//! # References
//!
//! - Taillard (1990), "Some efficient heuristic methods for the flow shop
//!   sequencing problem"
//! - Hansen & Mladenović (2001), "Variable neighborhood search: Principles
//!   and applications"

mod exchange;
mod explorer;
mod insert;
mod transpose;
mod types;

pub use exchange::Exchange;
pub use explorer::NeighborhoodExplorer;
pub use insert::Insert;
pub use transpose::Transpose;
pub use types::{NeighborhoodMethod, Permuter};
