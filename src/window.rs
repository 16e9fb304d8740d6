use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::extent::ExtentTracker;
use crate::range;
use crate::size::{SizeEntry, SizeModel};
use crate::{Align, Fault, IndexRange, Viewport, VirtualItem, WindowOptions};

/// A headless windowing engine for one-dimensional virtual scrolling.
///
/// The window is UI-agnostic: the host feeds it the collection length, a viewport, and
/// (optionally) measured item sizes, and renders exactly the [`VirtualItem`]s it
/// returns inside a container sized to [`VirtualWindow::total_size`].
///
/// Every mutator is an `O(1)` state write that flags the cached window stale; the
/// range/offset work happens lazily inside [`VirtualWindow::virtual_items`]. A host
/// that re-renders on a frame cadence therefore coalesces any number of scroll events
/// per frame into one recomputation, with no explicit debouncing.
///
/// Malformed inputs never panic and never corrupt state: they are dropped at the
/// boundary and surfaced as [`Fault`]s through the configured hook.
#[derive(Clone, Debug)]
pub struct VirtualWindow<K = u64> {
    options: WindowOptions<K>,
    model: SizeModel,
    extent: ExtentTracker,
    viewport: Option<Viewport>,
    stale: bool,
    cached_range: IndexRange,
    cached_items: Vec<VirtualItem<K>>,
}

impl<K: Clone> VirtualWindow<K> {
    pub fn new(options: WindowOptions<K>) -> Self {
        wdebug!(
            count = options.count,
            overscan = options.overscan,
            "VirtualWindow::new"
        );
        let model = SizeModel::new(options.count, Arc::clone(&options.estimate_size));
        let mut extent = ExtentTracker::new();
        extent.resync(model.sizes());
        Self {
            viewport: options.initial_viewport,
            options,
            model,
            extent,
            stale: true,
            cached_range: IndexRange::EMPTY,
            cached_items: Vec::new(),
        }
    }

    pub fn options(&self) -> &WindowOptions<K> {
        &self.options
    }

    /// Number of items in the collection.
    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    /// `None` while idle (no viewport seen yet).
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Updates the viewport. Pure `O(1)` state write; recomputation is deferred to the
    /// next [`Self::virtual_items`] call, so only the last write before a read matters.
    pub fn set_viewport(&mut self, offset: u64, size: u32) {
        wtrace!(offset, size, "set_viewport");
        if size == 0 {
            self.emit_fault(Fault::DegenerateViewport);
        }
        let next = Viewport::new(offset, size);
        if self.viewport == Some(next) {
            return;
        }
        self.viewport = Some(next);
        self.stale = true;
    }

    /// Updates the collection length. Shrinking drops measurements for the removed
    /// suffix; growth appends estimated entries.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        wdebug!(from = self.options.count, to = count, "set_count");
        self.options.count = count;
        self.model.resize(count);
        self.extent.resync(self.model.sizes());
        self.stale = true;
    }

    /// Records the rendered size of an item, replacing its estimate.
    ///
    /// Zero sizes and out-of-bounds indices are rejected (state untouched, fault
    /// emitted). The running total updates eagerly in `O(1)`; the cached window goes
    /// stale only when the measurement can shift it — an index at or past the cached
    /// end cannot move earlier offsets.
    pub fn report_measured(&mut self, index: usize, size: u32) {
        wtrace!(index, size, "report_measured");
        match self.model.report(index, size) {
            Ok(delta) => {
                self.extent.apply(delta);
                if delta != 0 && index < self.cached_range.end {
                    self.stale = true;
                }
            }
            Err(fault) => self.emit_fault(fault),
        }
    }

    /// The items to render, ascending by index, visible range padded by overscan.
    ///
    /// Lazily recomputed: repeated calls with no intervening mutation return the same
    /// cached slice.
    pub fn virtual_items(&mut self) -> &[VirtualItem<K>] {
        if self.stale {
            self.recompute();
        }
        &self.cached_items
    }

    /// The index range intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> IndexRange {
        match self.viewport {
            Some(viewport) => range::visible_range(&self.model, viewport),
            None => IndexRange::EMPTY,
        }
    }

    /// The visible range widened by overscan, clamped to the collection.
    pub fn range(&self) -> IndexRange {
        range::apply_overscan(self.visible_range(), self.options.overscan, self.model.len())
    }

    /// Current total scrollable extent, exact under estimates and measurements.
    pub fn total_size(&self) -> u64 {
        debug_assert_eq!(self.extent.total(), self.model.extent(), "extent drift");
        self.extent.total()
    }

    /// Start offset of `index`, or `None` when out of bounds.
    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.model.len()).then(|| self.model.offset(index))
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        self.model.entry(index).map(|e| e.get())
    }

    /// The estimator's answer for `index`, regardless of any measurement.
    pub fn estimated_size(&self, index: usize) -> u32 {
        self.model.estimate(index)
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_start(index)?;
        Some(start.saturating_add(self.item_size(index)? as u64))
    }

    /// The size entry backing `index` (estimated vs. measured).
    pub fn size_entry(&self, index: usize) -> Option<SizeEntry> {
        self.model.entry(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.model.is_measured(index)
    }

    /// Maps a scroll offset to the index covering it (clamped to the last item).
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.model.index_at(offset)
    }

    /// Largest useful scroll offset for the current viewport size.
    pub fn max_scroll_offset(&self) -> u64 {
        let view = self.viewport.map(|v| v.size as u64).unwrap_or(0);
        self.total_size().saturating_sub(view)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Scroll offset that brings `index` into view under `align`, clamped.
    ///
    /// Pure computation; pair with [`Self::scroll_to_index`] to apply it.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.model.is_empty() {
            return 0;
        }
        let index = index.min(self.model.len() - 1);
        let start = self.model.offset(index);
        let size = self.model.size_of(index) as u64;
        let end = start.saturating_add(size);
        let view = self.viewport.map(|v| v.size as u64).unwrap_or(0);

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.viewport.map(|v| v.offset).unwrap_or(0);
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    /// Applies [`Self::scroll_to_index_offset`] to the viewport (no-op while idle).
    /// Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        if let Some(viewport) = self.viewport {
            self.set_viewport(offset, viewport.size);
        }
        offset
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.stale = true;
    }

    /// Replaces the estimator; unmeasured entries are re-estimated.
    pub fn set_estimate_size(&mut self, f: impl Fn(usize) -> u32 + Send + Sync + 'static) {
        let estimate: Arc<dyn Fn(usize) -> u32 + Send + Sync> = Arc::new(f);
        self.options.estimate_size = Arc::clone(&estimate);
        self.model.set_estimator(estimate);
        self.extent.resync(self.model.sizes());
        self.stale = true;
    }

    pub fn set_item_key(&mut self, f: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.options.item_key = Arc::new(f);
        self.stale = true;
    }

    /// Reverts every item to its estimate.
    pub fn reset_measurements(&mut self) {
        wdebug!(count = self.model.len(), "reset_measurements");
        self.model.reset_measurements();
        self.extent.resync(self.model.sizes());
        self.stale = true;
    }

    fn recompute(&mut self) {
        let window = self.range();
        self.cached_items.clear();
        if !window.is_empty() {
            self.cached_items.reserve(window.len());
            let mut start = self.model.offset(window.start);
            for index in window.start..window.end {
                let size = self.model.size_of(index);
                self.cached_items.push(VirtualItem {
                    key: (self.options.item_key)(index),
                    index,
                    start,
                    size,
                });
                start = start.saturating_add(size as u64);
            }
        }
        wtrace!(start = window.start, end = window.end, "recompute");
        self.cached_range = window;
        self.stale = false;
    }

    fn emit_fault(&self, fault: Fault) {
        wwarn!(%fault, "rejected input");
        if let Some(hook) = &self.options.on_fault {
            hook(fault);
        }
    }
}
