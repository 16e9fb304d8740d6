//! A headless one-dimensional windowing engine for virtual scrolling.
//!
//! Given a collection length, a viewport, and per-item size estimates, the engine
//! determines the minimal contiguous slice of items to materialize, their pixel
//! offsets, and the total scrollable extent — cheaply on every scroll/resize event,
//! and correctly even while true item sizes are still unknown.
//!
//! It is UI-agnostic and does no rendering, fetching, or filtering. A host layer is
//! expected to:
//! - supply the collection length and size estimates,
//! - forward scroll/resize events via [`VirtualWindow::set_viewport`],
//! - render the returned [`VirtualItem`]s inside a container sized to
//!   [`VirtualWindow::total_size`],
//! - report measured sizes back via [`VirtualWindow::report_measured`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod extent;
mod offsets;
mod options;
mod range;
mod size;
mod types;
mod window;


pub use options::{FaultHook, ItemKeyFn, WindowOptions};
pub use size::{SizeEntry, SizeEstimator};
pub use types::{Align, Fault, IndexRange, Viewport, VirtualItem};
pub use window::VirtualWindow;
