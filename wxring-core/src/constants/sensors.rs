//! Instrument Calibration and Plausibility Limits
//!
//! These constants convert raw instrument counts into physical units and bound
//! what the instruments can plausibly report.

// ===== ANEMOMETER =====

/// Wind speed for one cup revolution per second (mph).
///
/// The anemometer closes a reed switch once per revolution. One pulse per
/// second corresponds to 1.429 mph.
///
/// Source: Anemometer datasheet (field calibration still pending)
pub const MPH_PER_PULSE_PER_SECOND: f64 = 1.429;

/// Highest gust the station will accept (mph).
///
/// Electromagnetic interference on the masthead cable and reed switch bounce
/// occasionally produce pulse bursts that translate into 500 mph "gusts". No
/// surface gust at the station site comes close to 120 mph, so anything above
/// it is discarded.
pub const GUST_CEILING_MPH: f64 = 120.0;

// ===== RAIN GAUGE =====

/// Rainfall per tip of the bucket (mm).
///
/// Source: Tipping-bucket rain gauge datasheet (0.011 in per tip)
pub const MM_PER_BUCKET_TIP: f64 = 0.2794;

// ===== WIND VANE =====

/// Upper voltage bound and heading for each vane position, in ascending
/// voltage order. Readings above the last bound map to west.
///
/// The vane switches a resistor network into a voltage divider; each bound
/// sits midway between two measured output voltages.
///
/// Source: Measurements of the installed vane at each cardinal point
pub const VANE_THRESHOLDS: [(f64, f64, &str); 7] = [
    (1.19, 135.0, "SE"),
    (1.46, 180.0, "S"),
    (2.09, 90.0, "E"),
    (2.80, 45.0, "NE"),
    (3.56, 225.0, "SW"),
    (4.20, 0.0, "N"),
    (4.59, 315.0, "NW"),
];

/// Heading reported for voltages above every vane threshold.
pub const VANE_DEFAULT_HEADING: (f64, &str) = (270.0, "W");
