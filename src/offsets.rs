use alloc::vec::Vec;
use core::cmp;

/// Fenwick (binary indexed) tree over per-index item sizes.
///
/// This is the substrate for the range calculator: `prefix_sum` gives an item's start
/// offset and `lower_bound` maps a scroll offset back to an index, both in `O(log n)`.
/// Point updates (`add`) keep measurements incremental; the tree is only rebuilt from
/// scratch on structural changes (length change, invalidation).
#[derive(Clone, Debug, Default)]
pub(crate) struct PrefixSums {
    tree: Vec<u64>, // 1-indexed
    top_bit: usize,
}

impl PrefixSums {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    /// Rebuilds the tree from per-index sizes. `O(n)`.
    pub(crate) fn rebuild(&mut self, sizes: impl ExactSizeIterator<Item = u64>) {
        let n = sizes.len();
        self.tree.clear();
        self.tree.resize(n + 1, 0);
        self.top_bit = top_bit(n);
        for (i, v) in sizes.enumerate() {
            let i = i + 1;
            self.tree[i] = self.tree[i].saturating_add(v);
            let parent = i + lsb(i);
            if parent <= n {
                self.tree[parent] = self.tree[parent].saturating_add(self.tree[i]);
            }
        }
    }

    /// Applies a signed size change at `index`. `O(log n)`.
    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        let mut i = index + 1;
        while i <= n {
            let next = self.tree[i] as i128 + delta as i128;
            debug_assert!(next >= 0, "prefix-sum underflow (i={i}, delta={delta})");
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` sizes. `O(log n)`.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    /// Number of items whose prefix sum is `<= target`.
    ///
    /// Clamped by the caller, this maps a scroll offset to the index of the item that
    /// covers it: the descent accumulates the largest prefix not exceeding `target`.
    pub(crate) fn lower_bound(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.top_bit;
        while bit != 0 {
            let probe = idx + bit;
            if probe <= n && self.tree[probe] <= target {
                target -= self.tree[probe];
                idx = probe;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn top_bit(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}
