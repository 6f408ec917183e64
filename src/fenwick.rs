use alloc::vec::Vec;
use core::cmp;

/// Binary indexed tree over item sizes.
///
/// `prefix_sum(i)` is the leading edge of item `i`; `lower_bound` maps an offset back to an
/// item. Both are `O(log n)`, as is a single size change through `add`.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<f64>, // 1-indexed
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn from_sizes(sizes: impl IntoIterator<Item = f64>) -> Self {
        let mut tree = alloc::vec![0.0];
        tree.extend(sizes);
        let n = tree.len() - 1;
        for i in 1..=n {
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.tree.truncate(new_len + 1);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Appends one size. `O(log n)`: the new node is seeded from existing prefix sums.
    pub(crate) fn push_value(&mut self, value: f64) {
        let new_len = self.len() + 1;
        let start_exclusive = new_len - lsb(new_len);
        let before = self.prefix_sum(new_len - 1) - self.prefix_sum(start_exclusive);
        self.tree.push(before + value);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: f64) {
        let n = self.len();
        if index >= n {
            return;
        }
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    pub(crate) fn prefix_sum(&self, count: usize) -> f64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    /// Returns the number of items whose prefix sum is <= `target`.
    pub(crate) fn lower_bound(&self, mut target: f64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
