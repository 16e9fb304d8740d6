/// The visible window over the scrollable axis.
///
/// `offset` is the scroll position measured from the top of the list, `size` is the
/// height of the viewport. A `size` of zero is legal and means "nothing visible".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: u64,
    pub size: u32,
}

impl Viewport {
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }

    /// Exclusive end of the viewport interval `[offset, end)`.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }

    pub fn is_degenerate(&self) -> bool {
        self.size == 0
    }
}

/// A half-open index range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl IndexRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// One renderable row: its index, pixel placement, and stable key.
///
/// Items are ephemeral — they are recomputed on every query and never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem<K = u64> {
    pub key: K,
    pub index: usize,
    /// Start offset in the scroll axis.
    pub start: u64,
    pub size: u32,
}

impl<K> VirtualItem<K> {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// Alignment for scroll-to-index target computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset if the item is fully visible, otherwise scroll the
    /// minimal distance (`Start` when the item is above, `End` when below).
    Auto,
}

/// A rejected input, reported through [`crate::WindowOptions::on_fault`] and the
/// `tracing` layer (with `feature = "tracing"`).
///
/// Faults never panic and never propagate as errors: the offending call is a no-op and
/// the engine keeps its last valid state, so a misbehaving caller inside a render loop
/// cannot corrupt it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fault {
    /// A zero-sized measurement was reported; the prior value is retained.
    InvalidMeasurement { index: usize, size: u32 },
    /// A per-index operation referenced an index outside `[0, len)`.
    OutOfBounds { index: usize, len: usize },
    /// The viewport was set to zero size. Informational: queries return empty
    /// results until a real viewport arrives.
    DegenerateViewport,
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMeasurement { index, size } => {
                write!(f, "invalid measurement {size} for index {index}")
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len {len})")
            }
            Self::DegenerateViewport => f.write_str("degenerate viewport (size 0)"),
        }
    }
}
