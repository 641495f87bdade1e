//! Multi-resolution ring buffers for weather sensor channels
//!
//! Turns fixed-cadence scalar readings into rolling statistics at several time
//! scales at once. Each quantity owns a tree of fixed-capacity ring buffers:
//! one-minute samples roll up into hourly values, hourly values into daily
//! ones. Wind pulse counts additionally feed a gust detector that finds the
//! strongest three second average in a ten minute window.
//!
//! Key constraints:
//! - Buffers never grow; memory is fixed at startup
//! - Writes are infallible and O(1) amortized, rollups included
//! - Readers never see a half-applied write
//!
//! ```no_run
//! use wxring_core::channels::RainChannel;
//!
//! let rain = RainChannel::new()?;
//!
//! // Once a minute, from the rain gauge task
//! rain.record(3);
//!
//! // Any time, from the status reporter
//! let rate = rain.rate_mm_per_hour()?;
//! let today = rain.day_total_mm();
//! # Ok::<(), wxring_core::BufferError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod buffer;
pub mod channels;
pub mod constants;
pub mod errors;
pub mod gust;
pub mod rollup;
pub mod summary;

// Public API
pub use buffer::RingBuffer;
pub use channels::{
    Atmosphere, AtmosphericChannel, AtmosphericReading, Quantity, RainChannel, WindChannel,
    WindConfig,
};
pub use errors::{BufferError, BufferResult};
pub use gust::{GustParams, GustWindow};
pub use rollup::{AggregateFn, AggregationLink};
pub use summary::Summary;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
