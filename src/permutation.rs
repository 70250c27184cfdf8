//! Lazy permutation enumeration.
//!
//! Yields every ordering of a slice one at a time in lexicographic order
//! of positions, starting from the slice's own order. Nothing beyond the
//! current ordering is materialized, so callers can stop after any number
//! of items. `m` items have `m!` orderings.
//!
//! # Reference
//! Knuth (2011), "The Art of Computer Programming", Vol. 4A, 7.2.1.2 (Algorithm L)

/// Iterator over all orderings of a slice.
#[derive(Debug, Clone)]
pub struct Permutations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a, T: Clone> Permutations<'a, T> {
    /// Creates an iterator starting from the identity ordering.
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            indices: (0..items.len()).collect(),
            started: false,
            done: false,
        }
    }

    /// Rewinds to the identity ordering.
    pub fn reset(&mut self) {
        for (i, slot) in self.indices.iter_mut().enumerate() {
            *slot = i;
        }
        self.started = false;
        self.done = false;
    }

    /// Total number of orderings, `None` if it overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        factorial(self.items.len())
    }

    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.items[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for Permutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if next_permutation(&mut self.indices) {
            Some(self.current())
        } else {
            self.done = true;
            None
        }
    }
}

/// Advances `v` to the next lexicographic permutation.
///
/// Returns `false` (leaving `v` untouched) when `v` is the last one.
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

/// `n!`, or `None` on overflow.
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}
