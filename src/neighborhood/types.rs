//! Core trait and method tag for neighborhood generators.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{PfspError, Result};
use crate::instance::JobId;

/// The move type of a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborhoodMethod {
    /// Swap two adjacent jobs.
    Transpose,
    /// Swap any two jobs.
    Exchange,
    /// Remove one job and reinsert it elsewhere.
    Insert,
}

impl fmt::Display for NeighborhoodMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transpose => write!(f, "transpose"),
            Self::Exchange => write!(f, "exchange"),
            Self::Insert => write!(f, "insert"),
        }
    }
}

impl FromStr for NeighborhoodMethod {
    type Err = PfspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "transpose" => Ok(Self::Transpose),
            "exchange" => Ok(Self::Exchange),
            "insert" => Ok(Self::Insert),
            _ => Err(PfspError::UnknownEnumValue {
                kind: "neighborhood method",
                value: s.to_string(),
            }),
        }
    }
}

/// A cursor over the neighbors of a base permutation.
///
/// The generator owns its base and cursor. Changing the base with
/// [`set_base`](Permuter::set_base) keeps the cursor where it is; call
/// [`reset_cursor`](Permuter::reset_cursor) to restart the enumeration.
pub trait Permuter {
    /// Replaces the permutation that moves are applied to.
    fn set_base(&mut self, base: Vec<JobId>);

    /// The permutation that moves are applied to.
    fn base(&self) -> &[JobId];

    /// Returns `true` while the enumeration has moves left.
    fn has_next(&self) -> bool;

    /// Applies the next move to a copy of the base and advances the cursor.
    ///
    /// Returns `None` once the enumeration is exhausted.
    fn next_neighbor(&mut self) -> Option<Vec<JobId>>;

    /// Lowest position at which the last produced neighbor differs from
    /// the base.
    fn last_changed_index(&self) -> usize;

    /// Restarts the enumeration from the first move.
    fn reset_cursor(&mut self);

    /// Number of neighbors a full enumeration yields.
    fn count_possible_moves(&self) -> usize;

    /// Draws one neighbor uniformly at random without moving the cursor.
    ///
    /// # Errors
    ///
    /// [`PfspError::UnsupportedOperation`] if the base admits no move.
    fn sample_uniform<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<JobId>>;
}

/// Error for sampling from a base too short to have any neighbor.
pub(super) fn no_moves(method: NeighborhoodMethod, len: usize) -> PfspError {
    PfspError::UnsupportedOperation(format!(
        "{method} neighborhood of a {len}-job permutation has no move to sample"
    ))
}
