/// Running total of the scrollable extent.
///
/// Steady-state updates are `O(1)` deltas (`total += measured - previous`); a full
/// `resync` is reserved for structural changes (length change, invalidation) and never
/// runs on the per-frame path. The host uses [`ExtentTracker::total`] to size its outer
/// scroll container without materializing every item.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ExtentTracker {
    total: u64,
}

impl ExtentTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Applies the signed change from one size replacing another.
    pub(crate) fn apply(&mut self, delta: i64) {
        if delta >= 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Full resummation. `O(n)`, structural changes only.
    pub(crate) fn resync(&mut self, sizes: impl Iterator<Item = u64>) {
        self.total = sizes.fold(0u64, u64::saturating_add);
    }
}
