//! Bounded subset enumeration
//!
//! Subsets come out as references in pool order. Sizes ascend, and within one
//! size the subsets follow lexicographic index order, so `[A, B, C]` with sizes
//! `1..=2` yields `A, B, C, AB, AC, BC`. Cost grows as O(n^k); callers bound
//! `k`.

use std::ops::RangeInclusive;

/// Every `size`-element subset of a pool
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(pool: &'a [T], size: usize) -> Self {
        let done = size == 0 || size > pool.len();
        Self { pool, indices: (0..size).collect(), done }
    }

    fn advance(&mut self) {
        let n = self.pool.len();
        let k = self.indices.len();
        // Rightmost index that can still move right
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            self.done = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let subset = self.indices.iter().map(|&i| &self.pool[i]).collect();
        self.advance();
        Some(subset)
    }
}

/// Every subset of a pool whose size falls in a range
#[derive(Debug, Clone)]
pub struct Subsets<'a, T> {
    pool: &'a [T],
    sizes: RangeInclusive<usize>,
    current: Option<Combinations<'a, T>>,
}

impl<'a, T> Subsets<'a, T> {
    pub fn new(pool: &'a [T], sizes: RangeInclusive<usize>) -> Self {
        Self { pool, sizes, current: None }
    }
}

impl<'a, T> Iterator for Subsets<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(subset) = self.current.as_mut().and_then(Iterator::next) {
                return Some(subset);
            }
            let size = self.sizes.next()?;
            self.current = Some(Combinations::new(self.pool, size));
        }
    }
}

/// Restartable description of a subset search
///
/// Each call to [`iter`](Self::iter) starts a fresh pass, so a strategy can stop
/// early on one pass without affecting the next.
#[derive(Debug)]
pub struct SubsetSpace<'a, T> {
    pool: &'a [T],
    min_size: usize,
    max_size: usize,
}

impl<T> Clone for SubsetSpace<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SubsetSpace<'_, T> {}

impl<'a, T> SubsetSpace<'a, T> {
    /// Sizes below 1 are raised to 1
    pub fn new(pool: &'a [T], sizes: RangeInclusive<usize>) -> Self {
        Self { pool, min_size: (*sizes.start()).max(1), max_size: *sizes.end() }
    }

    pub fn iter(&self) -> Subsets<'a, T> {
        Subsets::new(self.pool, self.min_size..=self.max_size)
    }

    /// Number of subsets a full pass yields
    pub fn count(&self) -> u128 {
        let n = self.pool.len();
        (self.min_size..=self.max_size.min(n)).map(|k| binomial(n, k)).sum()
    }
}

impl<'a, T> IntoIterator for SubsetSpace<'a, T> {
    type Item = Vec<&'a T>;
    type IntoIter = Subsets<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// n choose k
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| acc * (n - i) as u128 / (i + 1) as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(subsets: impl Iterator<Item = Vec<&'a &'static str>>) -> Vec<String> {
        subsets.map(|s| s.into_iter().copied().collect::<String>()).collect()
    }

    #[test]
    fn test_subsets_up_to_two() {
        let pool = ["A", "B", "C"];
        let got = names(Subsets::new(&pool, 1..=2));
        assert_eq!(got, vec!["A", "B", "C", "AB", "AC", "BC"]);
    }

    #[test]
    fn test_combinations_exact_size() {
        let pool = ["A", "B", "C", "D"];
        let got = names(Combinations::new(&pool, 3));
        assert_eq!(got, vec!["ABC", "ABD", "ACD", "BCD"]);

        let got = names(Combinations::new(&pool, 4));
        assert_eq!(got, vec!["ABCD"]);
    }

    #[test]
    fn test_degenerate_sizes() {
        let pool = ["A", "B"];
        assert_eq!(Combinations::new(&pool, 0).count(), 0);
        assert_eq!(Combinations::new(&pool, 3).count(), 0);

        let empty: [&str; 0] = [];
        assert_eq!(Subsets::new(&empty, 1..=3).count(), 0);

        // Sizes past the pool contribute nothing
        assert_eq!(names(Subsets::new(&pool, 2..=5)), vec!["AB"]);
    }

    #[test]
    fn test_subset_space_restarts() {
        let pool = ["A", "B", "C"];
        let space = SubsetSpace::new(&pool, 0..=2);

        let mut first = space.iter();
        assert_eq!(first.next().unwrap(), vec![&"A"]);

        let full = names(space.iter());
        assert_eq!(full, vec!["A", "B", "C", "AB", "AC", "BC"]);
        assert_eq!(space.count(), 6);
    }

    #[test]
    fn test_counts_match_binomials() {
        let pool: Vec<u32> = (0..18).collect();
        for k in 1..=3 {
            let space = SubsetSpace::new(&pool, 1..=k);
            assert_eq!(space.iter().count() as u128, space.count());
        }
        assert_eq!(binomial(18, 3), 816);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 4), 0);
    }

    #[test]
    fn test_each_subset_once() {
        let pool: Vec<u32> = (0..7).collect();
        let all: Vec<Vec<u32>> =
            Subsets::new(&pool, 1..=3).map(|s| s.into_iter().copied().collect()).collect();
        let unique: std::collections::HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), unique.len());
        assert!(all.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
    }
}
