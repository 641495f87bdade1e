//! Buffer Sizes for the Resolution Hierarchy
//!
//! Each quantity owns a tree of buffers of decreasing cadence and increasing
//! span. The slot counts below make each level cover exactly one unit of the
//! next level, so one wrap of a child produces one sample in its parent.

use super::time::{HOURS_PER_DAY, MINUTES_PER_HOUR};

/// Per-minute buffer slots: one hour of one-minute samples.
pub const MINUTE_SLOTS: usize = MINUTES_PER_HOUR as usize;

/// Hourly buffer slots: one day of hourly rollups.
pub const HOUR_SLOTS: usize = HOURS_PER_DAY as usize;

/// Daily buffer slots: thirty days of daily rollups.
pub const DAY_SLOTS: usize = 30;

/// Maximum rollup links attached to one buffer.
///
/// The busiest buffer in the station carries three (average, min and max of the
/// atmospheric minute buffers). Links are stored inline with the buffer, so the
/// bound keeps the per-buffer footprint fixed.
pub const MAX_LINKS_PER_BUFFER: usize = 8;
