//! Error Types for Buffer Construction and Window Queries
//!
//! ## Design Philosophy
//!
//! The buffer engine has very few ways to fail, and none of them happen on the
//! hot path: `add_item` is infallible and every read on an empty buffer returns
//! a zero-valued [`Summary`](crate::Summary) with `count == 0`. Errors are kept
//! small and `Copy` so they can be returned from wiring code and stored freely.
//!
//! ## Error Categories
//!
//! ### Query Errors
//! - `InvalidWindow`: a windowed query asked for more samples than the buffer
//!   can ever hold. Surfaced to the caller and never retried.
//!
//! ### Wiring Errors
//! - `ZeroCapacity`: a buffer must hold at least one sample
//! - `CapacityOverflow`: a sizing computation does not fit in `usize`
//! - `CyclicLink`: a rollup link would feed a buffer back into itself
//! - `TooManyLinks`: a buffer already carries the maximum number of links
//!
//! ## What Is *Not* an Error
//!
//! - An empty buffer. Callers branch on `count` to tell "no data yet" from a
//!   genuine zero reading.
//! - An implausible gust. [`GustWindow`](crate::gust::GustWindow) substitutes the
//!   last accepted value and the only observable effect is that the returned
//!   value does not change.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use wxring_core::{BufferError, RingBuffer};
//!
//! let rain = RingBuffer::new(60).unwrap();
//! match rain.summary_last(90) {
//!     Ok(summary) => println!("{} tips", summary.sum),
//!     Err(BufferError::InvalidWindow { requested, capacity }) => {
//!         println!("cannot look back {} samples in a {} slot buffer", requested, capacity);
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Buffer errors - kept small, all wiring-time except `InvalidWindow`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Requested aggregate window exceeds buffer capacity
    #[error("Window of {requested} samples exceeds buffer capacity {capacity}")]
    InvalidWindow {
        /// Number of samples the caller asked for
        requested: usize,
        /// Fixed capacity of the buffer
        capacity: usize,
    },

    /// Buffer constructed with no slots
    #[error("Buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// Slot count derived from a rate and a window does not fit in `usize`
    #[error("Buffer capacity overflows")]
    CapacityOverflow,

    /// Link would make the buffer its own ancestor
    #[error("Rollup link would create a cycle")]
    CyclicLink,

    /// Buffer already carries the maximum number of rollup links
    #[error("Buffer already has the maximum of {max} rollup links")]
    TooManyLinks {
        /// Maximum links per buffer
        max: usize,
    },
}
