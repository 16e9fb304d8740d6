use alloc::sync::Arc;

use crate::size::SizeEstimator;
use crate::{Fault, Viewport};

/// Maps an index to a stable key so the host can reconcile rendered rows across
/// data changes. Defaults to the index itself.
pub type ItemKeyFn<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

/// Called for every rejected input (see [`Fault`]). Optional; rejected calls are
/// no-ops either way.
pub type FaultHook = Arc<dyn Fn(Fault) + Send + Sync>;

/// Configuration for [`crate::VirtualWindow`].
///
/// Cheap to clone: closures live behind `Arc`s so a host can tweak a field and hand
/// the options to a fresh window without reallocating anything heavy.
pub struct WindowOptions<K = u64> {
    /// Number of items in the collection.
    pub count: usize,
    /// Estimated size for unmeasured indices. Must return a positive size; may vary
    /// per index (e.g. different default heights per item type).
    pub estimate_size: SizeEstimator,
    /// Stable key per index, carried on every produced [`crate::VirtualItem`].
    pub item_key: ItemKeyFn<K>,
    /// Extra items materialized beyond each visible edge.
    pub overscan: usize,
    /// Starting viewport, when known at construction time. Until a viewport is set the
    /// window is idle and every query returns empty results.
    pub initial_viewport: Option<Viewport>,
    /// Observer for rejected inputs.
    pub on_fault: Option<FaultHook>,
}

impl WindowOptions<u64> {
    /// Options for a list keyed by index.
    pub fn new(count: usize, estimate_size: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self {
            count,
            estimate_size: Arc::new(estimate_size),
            item_key: Arc::new(|i| i as u64),
            overscan: 1,
            initial_viewport: None,
            on_fault: None,
        }
    }
}

impl<K> WindowOptions<K> {
    /// Options with a custom key mapping.
    pub fn new_with_key(
        count: usize,
        estimate_size: impl Fn(usize) -> u32 + Send + Sync + 'static,
        item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            estimate_size: Arc::new(estimate_size),
            item_key: Arc::new(item_key),
            overscan: 1,
            initial_viewport: None,
            on_fault: None,
        }
    }

    pub fn with_item_key(mut self, item_key: impl Fn(usize) -> K + Send + Sync + 'static) -> Self {
        self.item_key = Arc::new(item_key);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport(mut self, viewport: Viewport) -> Self {
        self.initial_viewport = Some(viewport);
        self
    }

    pub fn with_on_fault(mut self, on_fault: impl Fn(Fault) + Send + Sync + 'static) -> Self {
        self.on_fault = Some(Arc::new(on_fault));
        self
    }
}

impl<K> Clone for WindowOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            estimate_size: Arc::clone(&self.estimate_size),
            item_key: Arc::clone(&self.item_key),
            overscan: self.overscan,
            initial_viewport: self.initial_viewport,
            on_fault: self.on_fault.clone(),
        }
    }
}

impl<K> core::fmt::Debug for WindowOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("count", &self.count)
            .field("overscan", &self.overscan)
            .field("initial_viewport", &self.initial_viewport)
            .finish_non_exhaustive()
    }
}
