//! Constants for wxring Core
//!
//! This module provides centralized, documented constants used throughout the
//! buffer engine and channel wiring. Every numeric value that shapes a buffer
//! tree or a derived statistic lives here with a note on where it comes from.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Sensors**: Calibration factors and plausibility limits of the instruments
//! - **Time**: Cadences, windows and unit conversions
//! - **Buffers**: Slot counts for each resolution of the buffer trees
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include the unit in the name
//! 3. Reference the instrument datasheet or observing practice where applicable

/// Instrument calibration factors and plausibility limits.
pub mod sensors;

/// Sampling cadences, statistic windows and time unit conversions.
pub mod time;

/// Slot counts for the per-minute, hourly and daily buffers.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use sensors::{MPH_PER_PULSE_PER_SECOND, MM_PER_BUCKET_TIP, GUST_CEILING_MPH};

pub use time::{
    SECONDS_PER_MINUTE, MINUTES_PER_HOUR, HOURS_PER_DAY,
    GUST_DURATION_S, WIND_SAMPLES_PER_SECOND,
};

pub use buffers::{MINUTE_SLOTS, HOUR_SLOTS, DAY_SLOTS, MAX_LINKS_PER_BUFFER};
