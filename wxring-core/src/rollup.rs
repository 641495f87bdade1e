//! Rollup Links Between Buffer Resolutions
//!
//! A rollup link wires a child [`RingBuffer`] to a coarser parent. Each time the
//! child completes an epoch (exactly `capacity` writes since the previous one)
//! the link reduces that epoch to one value and appends it to the parent:
//!
//! ```text
//!  minute buffer (60)          hour buffer (24)           day buffer (30)
//! ┌──┬──┬──┬─ ─ ─┬──┐  Sum   ┌──┬──┬─ ─ ─┬──┐   Sum    ┌──┬──┬─ ─ ─┬──┐
//! │  │  │  │     │  │ ─────→ │  │  │     │  │ ───────→ │  │  │     │  │
//! └──┴──┴──┴─ ─ ─┴──┘ every  └──┴──┴─ ─ ─┴──┘  every   └──┴──┴─ ─ ─┴──┘
//!                     60 writes                24 writes
//! ```
//!
//! The reduction costs O(capacity) but runs once per `capacity` writes, so the
//! amortized cost per raw sample is O(1). Because the parent write is an
//! ordinary `add_item`, a parent can carry its own links and the hierarchy can
//! be as deep as needed.

use crate::{buffer::RingBuffer, summary::Summary};

/// Reduction applied to a completed epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AggregateFn {
    /// Sum of the epoch (rain tips, pulse counts)
    Sum,
    /// Smallest sample of the epoch
    Min,
    /// Largest sample of the epoch
    Max,
    /// Arithmetic mean of the epoch's raw samples
    Average,
}

impl AggregateFn {
    /// Picks this function's value out of an epoch summary
    pub fn apply(self, epoch: &Summary) -> f64 {
        match self {
            Self::Sum => epoch.sum,
            Self::Min => epoch.min,
            Self::Max => epoch.max,
            Self::Average => epoch.average,
        }
    }

    /// Short label for logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Average => "avg",
        }
    }
}

/// A (function, parent) pair attached to a child buffer
#[derive(Debug, Clone)]
pub struct AggregationLink {
    func: AggregateFn,
    parent: RingBuffer,
}

impl AggregationLink {
    pub(crate) fn new(func: AggregateFn, parent: RingBuffer) -> Self {
        Self { func, parent }
    }

    /// Reduction applied on each wrap
    pub fn func(&self) -> AggregateFn {
        self.func
    }

    /// Buffer receiving the rolled-up values
    pub fn parent(&self) -> &RingBuffer {
        &self.parent
    }

    /// Reduces a completed epoch into a write that is still to be applied.
    ///
    /// The write is deferred so the child's lock can be released before the
    /// parent's is taken.
    pub(crate) fn evaluate(&self, epoch: &Summary) -> PendingRollup {
        PendingRollup {
            #[cfg(feature = "log")]
            func: self.func,
            value: self.func.apply(epoch),
            parent: self.parent.clone(),
        }
    }
}

/// A rolled-up value waiting to be written into its parent
#[derive(Debug)]
pub(crate) struct PendingRollup {
    #[cfg(feature = "log")]
    pub(crate) func: AggregateFn,
    pub(crate) value: f64,
    pub(crate) parent: RingBuffer,
}

impl PendingRollup {
    /// Appends the value to the parent, which may trigger the parent's own links
    pub(crate) fn apply(self) {
        log_debug!(
            "rollup {} = {} into buffer of {} slots",
            self.func.label(),
            self.value,
            self.parent.capacity()
        );
        self.parent.add_item(self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_picks_field() {
        let epoch = Summary::from_values([1.0, 2.0, 6.0]);
        assert_eq!(AggregateFn::Sum.apply(&epoch), 9.0);
        assert_eq!(AggregateFn::Min.apply(&epoch), 1.0);
        assert_eq!(AggregateFn::Max.apply(&epoch), 6.0);
        assert_eq!(AggregateFn::Average.apply(&epoch), 3.0);
    }

    #[test]
    fn pending_rollup_writes_parent() {
        let parent = RingBuffer::new(4).unwrap();
        let link = AggregationLink::new(AggregateFn::Max, parent.clone());
        let epoch = Summary::from_values([3.0, 8.0]);

        link.evaluate(&epoch).apply();

        assert_eq!(parent.len(), 1);
        assert_eq!(parent.last(), 8.0);
    }
}
