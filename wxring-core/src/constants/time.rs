//! Time-Related Constants
//!
//! This module defines sampling cadences, statistic windows and conversion
//! factors. Cadence is defined by call sequence: one tick is one sample, so
//! these values only shape buffer sizes and producer timers.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

// ===== WIND =====

/// Anemometer sampling rate (samples per second).
///
/// Wind varies over very short periods, so the masthead pulse counter is read
/// every 250 ms to capture short-lived peaks.
///
/// Source: Met Office observing practice for gust measurement
pub const WIND_SAMPLES_PER_SECOND: u32 = 4;

/// Gust duration (seconds).
///
/// A gust is the maximum three second average wind speed in the reporting
/// period.
///
/// Source: WMO guide to meteorological instruments (gust duration tg = 3 s)
pub const GUST_DURATION_S: u32 = 3;

/// Window for the rolling mean wind speed and direction (minutes).
pub const WIND_SPEED_WINDOW_MINS: u32 = 2;

/// Window searched for the strongest gust (minutes).
///
/// Source: WMO guide (sample length T = 10 min)
pub const WIND_GUST_WINDOW_MINS: u32 = 10;

/// Longest configurable wind window (minutes).
///
/// At the highest sampling rate this is 3.6 million slots per buffer.
pub const MAX_WIND_WINDOW_MINS: u32 = 60;

// ===== RAIN =====

/// Minutes of rainfall used to extrapolate the hourly rain rate.
pub const RAIN_RATE_WINDOW_MINS: usize = 10;

// ===== PRODUCER CADENCES =====

/// Atmospheric and rain sampling interval (seconds).
pub const ENV_MONITOR_INTERVAL_S: u64 = 60;

/// Atmospheric sampling interval in test mode (seconds).
pub const TEST_MODE_INTERVAL_S: u64 = 5;

/// Interval between status reports (seconds).
pub const REPORT_INTERVAL_S: u64 = 30;

/// Upper bound on a single hardware read (milliseconds).
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2000;
