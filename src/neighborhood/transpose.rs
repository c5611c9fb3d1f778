//! Adjacent-swap neighborhood.

use rand::Rng;

use super::types::{no_moves, NeighborhoodMethod, Permuter};
use crate::error::Result;
use crate::instance::JobId;

/// Swaps positions `i` and `i + 1` for `i = 0..N-1`.
#[derive(Debug, Clone)]
pub struct Transpose {
    base: Vec<JobId>,
    i: usize,
    last_changed: usize,
}

impl Transpose {
    pub fn new(base: Vec<JobId>) -> Self {
        Self {
            base,
            i: 0,
            last_changed: 0,
        }
    }
}

impl Permuter for Transpose {
    fn set_base(&mut self, base: Vec<JobId>) {
        self.base = base;
    }

    fn base(&self) -> &[JobId] {
        &self.base
    }

    fn has_next(&self) -> bool {
        self.i + 1 < self.base.len()
    }

    fn next_neighbor(&mut self) -> Option<Vec<JobId>> {
        if !self.has_next() {
            return None;
        }
        let mut neighbor = self.base.clone();
        neighbor.swap(self.i, self.i + 1);
        self.last_changed = self.i;
        self.i += 1;
        Some(neighbor)
    }

    fn last_changed_index(&self) -> usize {
        self.last_changed
    }

    fn reset_cursor(&mut self) {
        self.i = 0;
    }

    fn count_possible_moves(&self) -> usize {
        self.base.len().saturating_sub(1)
    }

    fn sample_uniform<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<JobId>> {
        let n = self.base.len();
        if n < 2 {
            return Err(no_moves(NeighborhoodMethod::Transpose, n));
        }
        let i = rng.random_range(0..n - 1);
        let mut neighbor = self.base.clone();
        neighbor.swap(i, i + 1);
        self.last_changed = i;
        Ok(neighbor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PfspError;
    use crate::random::create_rng;

    #[test]
    fn test_enumeration_order() {
        let mut t = Transpose::new(vec![1, 2, 3]);
        assert_eq!(t.count_possible_moves(), 2);

        assert_eq!(t.next_neighbor(), Some(vec![2, 1, 3]));
        assert_eq!(t.last_changed_index(), 0);
        assert_eq!(t.next_neighbor(), Some(vec![1, 3, 2]));
        assert_eq!(t.last_changed_index(), 1);
        assert!(!t.has_next());
        assert_eq!(t.next_neighbor(), None);
    }

    #[test]
    fn test_single_job_has_no_moves() {
        let mut t = Transpose::new(vec![4]);
        assert!(!t.has_next());
        assert_eq!(t.count_possible_moves(), 0);
        assert!(matches!(
            t.sample_uniform(&mut create_rng(1)),
            Err(PfspError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_sample_is_adjacent_swap() {
        let base = vec![5, 1, 4, 2, 3];
        let mut t = Transpose::new(base.clone());
        let mut rng = create_rng(11);
        for _ in 0..50 {
            let neighbor = t.sample_uniform(&mut rng).unwrap();
            let i = t.last_changed_index();
            let mut expected = base.clone();
            expected.swap(i, i + 1);
            assert_eq!(neighbor, expected);
        }
        // sampling leaves the enumeration untouched
        assert_eq!(t.next_neighbor(), Some(vec![1, 5, 4, 2, 3]));
    }
}
