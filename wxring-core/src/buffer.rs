//! Fixed-Capacity Ring Buffer with Windowed Statistics
//!
//! ## Overview
//!
//! Every sensor channel stores its samples in a [`RingBuffer`]: a circular store
//! of `f64` samples whose capacity is fixed at construction. Writes never fail;
//! once the buffer is full each write overwrites the logically oldest sample.
//! Readers ask for aggregates over the whole buffer or over the most recent `k`
//! samples, or for the raw samples in chronological order.
//!
//! ## Design Rationale
//!
//! ### Why a Handle?
//!
//! A buffer is written by exactly one producer task and read at any time by the
//! status reporter, the metrics exporter and the rollup links of its children.
//! `RingBuffer` is therefore a cheap clonable handle to shared state. All clones
//! refer to the same buffer.
//!
//! ### One Lock per Buffer
//!
//! Each buffer is a single unit of mutual exclusion. Every operation, read or
//! write, runs under that buffer's lock, so a reader sees the state either
//! before or after a write and never a cursor that disagrees with the fill
//! count or the slots.
//!
//! A write that completes an epoch computes its rollups while holding the lock,
//! releases it, and only then writes into the parents. No operation ever holds
//! two buffer locks at once, so a rollup chain of any depth cannot deadlock.
//!
//! ### Memory Layout
//!
//! ```text
//! RingBuffer with capacity 5 after 7 writes (values 1..=7):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  6  │  7  │  3  │  4  │  5  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!    0     1     2     3     4
//!                ↑
//!                └── write_pos = 2 (also the oldest sample, since len == 5)
//!
//! Logical view (oldest → newest): [3, 4, 5, 6, 7]
//! ```
//!
//! The logical order is always recoverable from `(write_pos, len)`:
//! - `len < capacity`: the data starts at slot 0
//! - `len == capacity`: the oldest sample sits at `write_pos`
//!
//! ### Performance Characteristics
//!
//! - `add_item()`: O(1), plus O(capacity) once per epoch when links are attached
//! - `last()`: O(1)
//! - `summary()` / `summary_last(k)` / `raw_data()`: O(len) / O(k) / O(len)
//!
//! ## Usage Example
//!
//! ```rust
//! use wxring_core::RingBuffer;
//!
//! // One hour of rain-gauge tips, one sample per minute
//! let minutes = RingBuffer::new(60).unwrap();
//! // One day of hourly totals
//! let hours = RingBuffer::new(24).unwrap();
//! minutes.set_auto_sum(&hours).unwrap();
//!
//! for tips in 0..60 {
//!     minutes.add_item(f64::from(tips % 3));
//! }
//!
//! // The 60th write completed an epoch and pushed its sum into `hours`
//! assert_eq!(hours.len(), 1);
//! assert_eq!(hours.last(), minutes.summary().sum);
//!
//! // Tips in the last ten minutes
//! let recent = minutes.summary_last(10).unwrap();
//! assert_eq!(recent.count, 10);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    constants::buffers::MAX_LINKS_PER_BUFFER,
    errors::{BufferError, BufferResult},
    rollup::{AggregateFn, AggregationLink, PendingRollup},
    summary::Summary,
};

/// Held while a link is checked and installed; samples never take it
static WIRING: Mutex<()> = Mutex::new(());

/// Fixed-capacity circular store of samples with windowed aggregate queries
///
/// ## Internal Invariants
///
/// The shared state maintains these invariants under its lock:
/// - `write_pos < capacity` (next write position is always valid)
/// - `len <= capacity` (never claim more samples than slots)
/// - once `len == capacity` it stays there
/// - links fire only on the write that returns `write_pos` to 0
///
/// ## Thread Safety
///
/// `RingBuffer` is `Send + Sync`. Only one producer should call `add_item` on a
/// given buffer; any number of readers may query concurrently.
#[derive(Clone)]
pub struct RingBuffer {
    shared: Arc<Mutex<RingState>>,
}

struct RingState {
    /// Sample storage, length == capacity
    slots: Box<[f64]>,

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid samples, saturates at capacity
    len: usize,

    /// Rollup links in attachment order
    links: heapless::Vec<AggregationLink, MAX_LINKS_PER_BUFFER>,
}

type PendingRollups = heapless::Vec<PendingRollup, MAX_LINKS_PER_BUFFER>;

impl RingState {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes one sample and returns the rollups owed to parents, if this
    /// write completed an epoch.
    fn push(&mut self, value: f64) -> PendingRollups {
        self.slots[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.capacity();

        if self.len < self.capacity() {
            self.len += 1;
        }

        // The cursor returns to 0 exactly once every `capacity` writes, and the
        // buffer is full at that point, so the slots hold exactly the epoch that
        // just completed.
        if self.write_pos != 0 || self.links.is_empty() {
            return PendingRollups::new();
        }

        let epoch = Summary::from_values(self.slots.iter().copied());
        self.links.iter().map(|link| link.evaluate(&epoch)).collect()
    }

    /// Physical slot of a logical index (0 = oldest)
    fn slot(&self, index: usize) -> usize {
        if self.len < self.capacity() {
            index
        } else {
            (self.write_pos + index) % self.capacity()
        }
    }

    /// Samples oldest to newest
    fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.slots[self.slot(i)])
    }

    fn last(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.slots[self.slot(self.len - 1)]
    }
}

impl RingBuffer {
    /// Creates an empty buffer with `capacity` slots
    ///
    /// The capacity is final: buffers are never resized.
    pub fn new(capacity: usize) -> BufferResult<Self> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }

        Ok(Self {
            shared: Arc::new(Mutex::new(RingState {
                slots: vec![0.0; capacity].into_boxed_slice(),
                write_pos: 0,
                len: 0,
                links: heapless::Vec::new(),
            })),
        })
    }

    /// Takes this buffer's lock.
    ///
    /// No operation panics while holding the lock, so a poisoned lock still
    /// guards consistent state and is recovered rather than propagated.
    fn state(&self) -> MutexGuard<'_, RingState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a sample
    ///
    /// When the buffer is full this overwrites the oldest sample. If the write
    /// completes an epoch, every attached link fires once, in attachment order,
    /// each appending one value to its parent.
    pub fn add_item(&self, value: f64) {
        // The guard is a temporary, so the lock is released before any parent
        // is written.
        let rollups = self.state().push(value);

        for rollup in rollups {
            rollup.apply();
        }
    }

    /// Most recently written sample, or `0.0` when the buffer is empty
    pub fn last(&self) -> f64 {
        self.state().last()
    }

    /// All valid samples, oldest first
    pub fn raw_data(&self) -> Vec<f64> {
        self.state().iter().collect()
    }

    /// Average, min, max and sum over all valid samples
    pub fn summary(&self) -> Summary {
        let state = self.state();
        Summary::from_values(state.iter())
    }

    /// Average, min, max and sum over the most recent `k` samples
    ///
    /// Fails with [`BufferError::InvalidWindow`] when `k` exceeds the capacity.
    /// When `k` only exceeds the number of samples written so far, the window
    /// shrinks to the samples available and `count` reports how many were used.
    pub fn summary_last(&self, k: usize) -> BufferResult<Summary> {
        let state = self.state();

        if k > state.capacity() {
            return Err(BufferError::InvalidWindow {
                requested: k,
                capacity: state.capacity(),
            });
        }

        let skip = state.len - k.min(state.len);
        Ok(Summary::from_values(state.iter().skip(skip)))
    }

    /// Installs a rollup link of `func` into `parent`
    ///
    /// May be called repeatedly to attach several links. Links fire in the
    /// order they were attached. Concurrent calls are serialized, so the cycle
    /// check always sees every link installed before it.
    pub fn link(&self, func: AggregateFn, parent: &RingBuffer) -> BufferResult<()> {
        let _wiring = WIRING.lock().unwrap_or_else(PoisonError::into_inner);

        if self.ptr_eq(parent) || parent.feeds(self) {
            return Err(BufferError::CyclicLink);
        }

        self.state()
            .links
            .push(AggregationLink::new(func, parent.clone()))
            .map_err(|_| BufferError::TooManyLinks {
                max: MAX_LINKS_PER_BUFFER,
            })
    }

    /// Rolls the sum of each epoch into `parent`
    pub fn set_auto_sum(&self, parent: &RingBuffer) -> BufferResult<()> {
        self.link(AggregateFn::Sum, parent)
    }

    /// Rolls the minimum of each epoch into `parent`
    pub fn set_auto_min(&self, parent: &RingBuffer) -> BufferResult<()> {
        self.link(AggregateFn::Min, parent)
    }

    /// Rolls the maximum of each epoch into `parent`
    pub fn set_auto_max(&self, parent: &RingBuffer) -> BufferResult<()> {
        self.link(AggregateFn::Max, parent)
    }

    /// Rolls the average of each epoch into `parent`
    pub fn set_auto_average(&self, parent: &RingBuffer) -> BufferResult<()> {
        self.link(AggregateFn::Average, parent)
    }

    /// First parent linked with `func`, if any
    pub fn auto_link(&self, func: AggregateFn) -> Option<RingBuffer> {
        self.state()
            .links
            .iter()
            .find(|link| link.func() == func)
            .map(|link| link.parent().clone())
    }

    /// True when some chain of links leads from this buffer to `target`
    fn feeds(&self, target: &RingBuffer) -> bool {
        let parents: Vec<RingBuffer> = self
            .state()
            .links
            .iter()
            .map(|link| link.parent().clone())
            .collect();

        parents
            .iter()
            .any(|parent| parent.ptr_eq(target) || parent.feeds(target))
    }

    /// Fixed number of slots
    pub fn capacity(&self) -> usize {
        self.state().capacity()
    }

    /// Number of valid samples
    pub fn len(&self) -> usize {
        self.state().len
    }

    /// True before the first write
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once every slot holds a sample
    pub fn is_full(&self) -> bool {
        let state = self.state();
        state.len == state.capacity()
    }

    /// True when both handles refer to the same buffer
    pub fn ptr_eq(&self, other: &RingBuffer) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("RingBuffer")
            .field("capacity", &state.capacity())
            .field("len", &state.len)
            .field("write_pos", &state.write_pos)
            .field("links", &state.links.len())
            .finish()
    }
}
