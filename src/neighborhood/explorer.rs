//! Uniform façade over the three generators.

use rand::Rng;

use super::exchange::Exchange;
use super::insert::Insert;
use super::transpose::Transpose;
use super::types::{NeighborhoodMethod, Permuter};
use crate::error::Result;
use crate::instance::JobId;

/// One neighborhood generator selected by a [`NeighborhoodMethod`] tag.
///
/// # Examples
///
/// ```
/// use u_flowshop::neighborhood::{NeighborhoodExplorer, NeighborhoodMethod, Permuter};
///
/// let mut explorer = NeighborhoodExplorer::new(vec![1, 2, 3], NeighborhoodMethod::Transpose);
/// assert_eq!(explorer.all(), vec![vec![2, 1, 3], vec![1, 3, 2]]);
/// ```
#[derive(Debug, Clone)]
pub enum NeighborhoodExplorer {
    Transpose(Transpose),
    Exchange(Exchange),
    Insert(Insert),
}

impl NeighborhoodExplorer {
    pub fn new(base: Vec<JobId>, method: NeighborhoodMethod) -> Self {
        match method {
            NeighborhoodMethod::Transpose => Self::Transpose(Transpose::new(base)),
            NeighborhoodMethod::Exchange => Self::Exchange(Exchange::new(base)),
            NeighborhoodMethod::Insert => Self::Insert(Insert::new(base)),
        }
    }

    pub fn method(&self) -> NeighborhoodMethod {
        match self {
            Self::Transpose(_) => NeighborhoodMethod::Transpose,
            Self::Exchange(_) => NeighborhoodMethod::Exchange,
            Self::Insert(_) => NeighborhoodMethod::Insert,
        }
    }

    /// Size of a full enumeration from the current base.
    pub fn size(&self) -> usize {
        self.count_possible_moves()
    }

    /// Drains the remaining enumeration into a list.
    pub fn all(&mut self) -> Vec<Vec<JobId>> {
        let mut neighbors = Vec::with_capacity(self.size());
        while self.has_next() {
            if let Some(neighbor) = self.next_neighbor() {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }
}

impl Permuter for NeighborhoodExplorer {
    fn set_base(&mut self, base: Vec<JobId>) {
        match self {
            Self::Transpose(p) => p.set_base(base),
            Self::Exchange(p) => p.set_base(base),
            Self::Insert(p) => p.set_base(base),
        }
    }

    fn base(&self) -> &[JobId] {
        match self {
            Self::Transpose(p) => p.base(),
            Self::Exchange(p) => p.base(),
            Self::Insert(p) => p.base(),
        }
    }

    fn has_next(&self) -> bool {
        match self {
            Self::Transpose(p) => p.has_next(),
            Self::Exchange(p) => p.has_next(),
            Self::Insert(p) => p.has_next(),
        }
    }

    fn next_neighbor(&mut self) -> Option<Vec<JobId>> {
        match self {
            Self::Transpose(p) => p.next_neighbor(),
            Self::Exchange(p) => p.next_neighbor(),
            Self::Insert(p) => p.next_neighbor(),
        }
    }

    fn last_changed_index(&self) -> usize {
        match self {
            Self::Transpose(p) => p.last_changed_index(),
            Self::Exchange(p) => p.last_changed_index(),
            Self::Insert(p) => p.last_changed_index(),
        }
    }

    fn reset_cursor(&mut self) {
        match self {
            Self::Transpose(p) => p.reset_cursor(),
            Self::Exchange(p) => p.reset_cursor(),
            Self::Insert(p) => p.reset_cursor(),
        }
    }

    fn count_possible_moves(&self) -> usize {
        match self {
            Self::Transpose(p) => p.count_possible_moves(),
            Self::Exchange(p) => p.count_possible_moves(),
            Self::Insert(p) => p.count_possible_moves(),
        }
    }

    fn sample_uniform<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<JobId>> {
        match self {
            Self::Transpose(p) => p.sample_uniform(rng),
            Self::Exchange(p) => p.sample_uniform(rng),
            Self::Insert(p) => p.sample_uniform(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use std::collections::HashSet;

    const METHODS: [NeighborhoodMethod; 3] = [
        NeighborhoodMethod::Transpose,
        NeighborhoodMethod::Exchange,
        NeighborhoodMethod::Insert,
    ];

    fn shuffled(n: usize, seed: u64) -> Vec<JobId> {
        let mut base: Vec<JobId> = (1..=n).collect();
        base.shuffle(&mut create_rng(seed));
        base
    }

    #[test]
    fn test_method_tag() {
        for method in METHODS {
            assert_eq!(NeighborhoodExplorer::new(vec![1, 2], method).method(), method);
        }
    }

    #[test]
    fn test_all_drains_enumeration() {
        let mut explorer = NeighborhoodExplorer::new(vec![1, 2, 3, 4], NeighborhoodMethod::Insert);
        assert_eq!(explorer.all().len(), 9);
        assert!(!explorer.has_next());
        assert!(explorer.all().is_empty());
    }

    #[test]
    fn test_set_base_keeps_cursor() {
        let mut explorer = NeighborhoodExplorer::new(vec![1, 2, 3], NeighborhoodMethod::Transpose);
        explorer.next_neighbor();
        explorer.set_base(vec![3, 2, 1]);
        assert_eq!(explorer.base(), &[3, 2, 1]);
        assert_eq!(explorer.next_neighbor(), Some(vec![3, 1, 2]));
    }

    proptest! {
        #[test]
        fn prop_move_counts(n in 1usize..12, seed in any::<u64>()) {
            let base = shuffled(n, seed);
            for method in METHODS {
                let mut explorer = NeighborhoodExplorer::new(base.clone(), method);
                let expected = explorer.size();
                let neighbors = explorer.all();
                prop_assert_eq!(neighbors.len(), expected);

                if method != NeighborhoodMethod::Insert {
                    let distinct: HashSet<_> = neighbors.iter().collect();
                    prop_assert_eq!(distinct.len(), expected);
                }
            }
            prop_assert_eq!(NeighborhoodExplorer::new(base.clone(), NeighborhoodMethod::Transpose).size(), n - 1);
            prop_assert_eq!(NeighborhoodExplorer::new(base.clone(), NeighborhoodMethod::Exchange).size(), n * (n - 1) / 2);
            prop_assert_eq!(NeighborhoodExplorer::new(base, NeighborhoodMethod::Insert).size(), (n - 1) * (n - 1));
        }

        #[test]
        fn prop_last_changed_is_lowest_difference(n in 2usize..10, seed in any::<u64>()) {
            let base = shuffled(n, seed);
            for method in METHODS {
                let mut explorer = NeighborhoodExplorer::new(base.clone(), method);
                while let Some(neighbor) = explorer.next_neighbor() {
                    let k = explorer.last_changed_index();
                    let first_diff = (0..n).find(|&p| neighbor[p] != base[p]);
                    prop_assert_eq!(first_diff, Some(k));
                }
            }
        }

        #[test]
        fn prop_reset_is_idempotent(n in 2usize..10, seed in any::<u64>()) {
            let base = shuffled(n, seed);
            for method in METHODS {
                let mut explorer = NeighborhoodExplorer::new(base.clone(), method);
                explorer.reset_cursor();
                let first = explorer.next_neighbor();
                explorer.reset_cursor();
                explorer.reset_cursor();
                prop_assert_eq!(explorer.next_neighbor(), first);
            }
        }

        #[test]
        fn prop_samples_are_enumerated_neighbors(n in 2usize..8, seed in any::<u64>()) {
            let base = shuffled(n, seed);
            let mut rng = create_rng(seed);
            for method in METHODS {
                let mut explorer = NeighborhoodExplorer::new(base.clone(), method);
                let all: HashSet<Vec<JobId>> = explorer.clone().all().into_iter().collect();
                for _ in 0..10 {
                    let sample = explorer.sample_uniform(&mut rng).unwrap();
                    prop_assert!(all.contains(&sample));
                }
            }
        }
    }
}
