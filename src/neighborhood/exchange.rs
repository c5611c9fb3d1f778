//! Pairwise-swap neighborhood.

use rand::Rng;

use super::types::{no_moves, NeighborhoodMethod, Permuter};
use crate::error::Result;
use crate::instance::JobId;

/// Swaps positions `i < j`, with `i` as the outer loop.
#[derive(Debug, Clone)]
pub struct Exchange {
    base: Vec<JobId>,
    i: usize,
    j: usize,
    last_changed: usize,
}

impl Exchange {
    pub fn new(base: Vec<JobId>) -> Self {
        Self {
            base,
            i: 0,
            j: 1,
            last_changed: 0,
        }
    }
}

impl Permuter for Exchange {
    fn set_base(&mut self, base: Vec<JobId>) {
        self.base = base;
    }

    fn base(&self) -> &[JobId] {
        &self.base
    }

    fn has_next(&self) -> bool {
        self.i < self.base.len() && self.j < self.base.len()
    }

    fn next_neighbor(&mut self) -> Option<Vec<JobId>> {
        if !self.has_next() {
            return None;
        }
        let mut neighbor = self.base.clone();
        neighbor.swap(self.i, self.j);
        self.last_changed = self.i;

        self.j += 1;
        if self.j == self.base.len() {
            self.i += 1;
            self.j = self.i + 1;
        }
        Some(neighbor)
    }

    fn last_changed_index(&self) -> usize {
        self.last_changed
    }

    fn reset_cursor(&mut self) {
        self.i = 0;
        self.j = 1;
    }

    fn count_possible_moves(&self) -> usize {
        let n = self.base.len();
        n * n.saturating_sub(1) / 2
    }

    /// Picks an unordered pair of distinct positions uniformly.
    fn sample_uniform<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<JobId>> {
        let n = self.base.len();
        if n < 2 {
            return Err(no_moves(NeighborhoodMethod::Exchange, n));
        }
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        let mut neighbor = self.base.clone();
        neighbor.swap(a, b);
        self.last_changed = a.min(b);
        Ok(neighbor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_enumeration_order() {
        let mut e = Exchange::new(vec![1, 2, 3]);
        let mut seen = Vec::new();
        while let Some(neighbor) = e.next_neighbor() {
            seen.push((neighbor, e.last_changed_index()));
        }
        assert_eq!(
            seen,
            vec![
                (vec![2, 1, 3], 0),
                (vec![3, 2, 1], 0),
                (vec![1, 3, 2], 1),
            ]
        );
    }

    #[test]
    fn test_count() {
        assert_eq!(Exchange::new(vec![1, 2, 3, 4, 5]).count_possible_moves(), 10);
        assert_eq!(Exchange::new(vec![1]).count_possible_moves(), 0);
        assert!(!Exchange::new(vec![1]).has_next());
    }

    #[test]
    fn test_sample_covers_all_pairs() {
        let base = vec![1, 2, 3, 4];
        let mut e = Exchange::new(base.clone());
        let mut rng = create_rng(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            let neighbor = e.sample_uniform(&mut rng).unwrap();
            let diff: Vec<usize> = (0..4).filter(|&k| neighbor[k] != base[k]).collect();
            assert_eq!(diff.len(), 2);
            assert_eq!(e.last_changed_index(), diff[0]);
            seen.insert((diff[0], diff[1]));
        }
        assert_eq!(seen.len(), 6);
    }
}
