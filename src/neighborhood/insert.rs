//! Remove-and-reinsert neighborhood.

use rand::Rng;

use super::types::{no_moves, NeighborhoodMethod, Permuter};
use crate::error::Result;
use crate::instance::JobId;

/// Moves the job at position `i` to position `j`.
///
/// Both indices run over `0..N`, `i` outer. Pairs with `j == i` (identity)
/// and `j == i + 1` (same result as moving `i + 1` to `i`) are skipped,
/// leaving exactly `(N - 1)^2` neighbors.
#[derive(Debug, Clone)]
pub struct Insert {
    base: Vec<JobId>,
    i: usize,
    j: usize,
    last_changed: usize,
}

impl Insert {
    pub fn new(base: Vec<JobId>) -> Self {
        Self {
            base,
            i: 0,
            j: 0,
            last_changed: 0,
        }
    }

    fn is_move(i: usize, j: usize) -> bool {
        i != j && i + 1 != j
    }

    fn apply(&self, i: usize, j: usize) -> Vec<JobId> {
        let mut neighbor = self.base.clone();
        let job = neighbor.remove(i);
        neighbor.insert(j, job);
        neighbor
    }
}

impl Permuter for Insert {
    fn set_base(&mut self, base: Vec<JobId>) {
        self.base = base;
    }

    fn base(&self) -> &[JobId] {
        &self.base
    }

    fn has_next(&self) -> bool {
        let n = self.base.len();
        if self.i + 1 == n && self.j + 1 == n {
            return false;
        }
        self.i < n && self.j < n
    }

    fn next_neighbor(&mut self) -> Option<Vec<JobId>> {
        let n = self.base.len();
        let mut neighbor = None;
        while neighbor.is_none() && self.has_next() {
            let (i, j) = (self.i, self.j);
            if Self::is_move(i, j) {
                neighbor = Some(self.apply(i, j));
            }
            self.last_changed = i.min(j);

            self.j += 1;
            if self.j == n {
                self.i += 1;
                self.j = 0;
            }
        }
        neighbor
    }

    fn last_changed_index(&self) -> usize {
        self.last_changed
    }

    fn reset_cursor(&mut self) {
        self.i = 0;
        self.j = 0;
    }

    fn count_possible_moves(&self) -> usize {
        let m = self.base.len().saturating_sub(1);
        m * m
    }

    /// Rejection-samples `(i, j)` until it is a real move.
    fn sample_uniform<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<JobId>> {
        let n = self.base.len();
        if n < 2 {
            return Err(no_moves(NeighborhoodMethod::Insert, n));
        }
        let (i, j) = loop {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            if Self::is_move(i, j) {
                break (i, j);
            }
        };
        self.last_changed = i.min(j);
        Ok(self.apply(i, j))
    }
}
