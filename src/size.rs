use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Fault;
use crate::offsets::PrefixSums;

/// Estimates the size of an unmeasured item. Must return a positive size.
pub type SizeEstimator = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Per-index size: an optimistic estimate until the host reports the rendered size.
///
/// Keeping the two states as distinct variants (rather than a size plus a dirty bit)
/// makes the estimate-vs-measured invariant explicit in the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeEntry {
    Estimated(u32),
    Measured(u32),
}

impl SizeEntry {
    pub fn get(&self) -> u32 {
        match *self {
            Self::Estimated(size) | Self::Measured(size) => size,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Owns every per-index size and the prefix sums derived from them.
///
/// Mutations go through `report`/`invalidate`/`resize` only; each returns enough
/// information for the extent tracker to stay exactly in sync without rescanning.
#[derive(Clone)]
pub(crate) struct SizeModel {
    entries: Vec<SizeEntry>,
    estimate: SizeEstimator,
    prefix: PrefixSums,
}

impl core::fmt::Debug for SizeModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizeModel")
            .field("len", &self.entries.len())
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl SizeModel {
    pub(crate) fn new(len: usize, estimate: SizeEstimator) -> Self {
        let mut model = Self {
            entries: Vec::new(),
            estimate,
            prefix: PrefixSums::new(),
        };
        model.resize(len);
        model
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn estimate(&self, index: usize) -> u32 {
        (self.estimate)(index)
    }

    pub(crate) fn entry(&self, index: usize) -> Option<SizeEntry> {
        self.entries.get(index).copied()
    }

    /// Measured size if present, else the estimate. Callers keep `index` in bounds.
    pub(crate) fn size_of(&self, index: usize) -> u32 {
        self.entries.get(index).map(SizeEntry::get).unwrap_or(0)
    }

    pub(crate) fn is_measured(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(SizeEntry::is_measured)
    }

    /// Records a measured size, overwriting any prior entry.
    ///
    /// Returns the signed extent delta on success so the caller can update the running
    /// total in `O(1)`. Rejections leave every entry untouched.
    pub(crate) fn report(&mut self, index: usize, size: u32) -> Result<i64, Fault> {
        if index >= self.entries.len() {
            return Err(Fault::OutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        if size == 0 {
            return Err(Fault::InvalidMeasurement { index, size });
        }
        let prev = self.entries[index].get();
        self.entries[index] = SizeEntry::Measured(size);
        let delta = size as i64 - prev as i64;
        self.prefix.add(index, delta);
        Ok(delta)
    }

    /// Drops all measurements at or after `from`, reverting them to estimates.
    ///
    /// Structural: rebuilds the prefix sums. The caller resyncs its extent tracker.
    pub(crate) fn invalidate(&mut self, from: usize) {
        let estimate = Arc::clone(&self.estimate);
        let mut changed = false;
        for (i, entry) in self.entries.iter_mut().enumerate().skip(from) {
            if entry.is_measured() {
                *entry = SizeEntry::Estimated(estimate(i));
                changed = true;
            }
        }
        if changed {
            self.rebuild_prefix();
        }
    }

    /// Grows with estimated entries or truncates. Structural.
    pub(crate) fn resize(&mut self, new_len: usize) {
        if new_len < self.entries.len() {
            self.entries.truncate(new_len);
        } else {
            self.entries.reserve_exact(new_len - self.entries.len());
            for i in self.entries.len()..new_len {
                self.entries.push(SizeEntry::Estimated((self.estimate)(i)));
            }
        }
        self.rebuild_prefix();
    }

    /// Replaces the estimator and re-estimates every unmeasured entry. Structural.
    pub(crate) fn set_estimator(&mut self, estimate: SizeEstimator) {
        self.estimate = Arc::clone(&estimate);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if !entry.is_measured() {
                *entry = SizeEntry::Estimated(estimate(i));
            }
        }
        self.rebuild_prefix();
    }

    /// Reverts every entry to its estimate. Structural.
    pub(crate) fn reset_measurements(&mut self) {
        self.invalidate(0);
    }

    /// Cumulative start offset: `offset(i) = sum(size_of(0..i))`.
    pub(crate) fn offset(&self, index: usize) -> u64 {
        self.prefix.prefix_sum(index)
    }

    /// Maps an offset to the index of the item covering it, clamped to the last item.
    pub(crate) fn index_at(&self, offset: u64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.prefix.lower_bound(offset).min(self.entries.len() - 1))
    }

    /// Exact total under the current entries, via the prefix sums.
    pub(crate) fn extent(&self) -> u64 {
        self.prefix.prefix_sum(self.entries.len())
    }

    pub(crate) fn sizes(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.entries.iter().map(|e| e.get() as u64)
    }

    fn rebuild_prefix(&mut self) {
        let Self {
            entries, prefix, ..
        } = self;
        prefix.rebuild(entries.iter().map(|e| e.get() as u64));
    }
}
