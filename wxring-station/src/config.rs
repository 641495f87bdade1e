//! Station Configuration
//!
//! Every field has a default matching the installed station, so a config file
//! only needs the values that differ:
//!
//! ```rust
//! use wxring_station::StationConfig;
//!
//! let config = StationConfig::from_json_str(r#"{ "test_mode": true, "rain_enabled": false }"#)?;
//! assert_eq!(config.atmospheric_interval().as_secs(), 5);
//! assert_eq!(config.wind_samples_per_second, 4);
//! # Ok::<(), wxring_station::StationError>(())
//! ```
//!
//! Builder-style setters cover programmatic setup:
//!
//! ```rust
//! use wxring_station::StationConfig;
//!
//! let config = StationConfig::new()
//!     .wind_enabled(false)
//!     .report_interval_secs(10)
//!     .read_timeout_ms(500);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wxring_core::{
    constants::{
        time::{
            DEFAULT_READ_TIMEOUT_MS, ENV_MONITOR_INTERVAL_S, MAX_WIND_WINDOW_MINS, MS_PER_SECOND,
            REPORT_INTERVAL_S, TEST_MODE_INTERVAL_S, WIND_GUST_WINDOW_MINS,
            WIND_SPEED_WINDOW_MINS,
        },
        GUST_CEILING_MPH, SECONDS_PER_MINUTE, WIND_SAMPLES_PER_SECOND,
    },
    GustParams, WindConfig,
};

use crate::error::{StationError, StationResult};

/// Runtime settings for the producer tasks and the reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Shortens the atmospheric cadence for bench testing
    pub test_mode: bool,
    /// Run the temperature, humidity and pressure producer
    pub atmospheric_enabled: bool,
    /// Run the rain gauge producer
    pub rain_enabled: bool,
    /// Run the wind producer
    pub wind_enabled: bool,
    /// Atmospheric cadence outside test mode (s)
    pub atmospheric_interval_secs: u64,
    /// Rain gauge cadence (s)
    pub rain_interval_secs: u64,
    /// Masthead pulse counter reads per second
    pub wind_samples_per_second: u32,
    /// Mean speed and direction window (min)
    pub wind_speed_window_mins: u32,
    /// Gust search window (min)
    pub wind_gust_window_mins: u32,
    /// Highest plausible gust (mph)
    pub gust_ceiling_mph: f64,
    /// Read the vane on calm ticks too
    pub always_sample_direction: bool,
    /// Log every wind tick at debug level
    pub log_wind_samples: bool,
    /// Status report cadence (s)
    pub report_interval_secs: u64,
    /// Bound on one hardware read (ms)
    pub read_timeout_ms: u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            atmospheric_enabled: true,
            rain_enabled: true,
            wind_enabled: true,
            atmospheric_interval_secs: ENV_MONITOR_INTERVAL_S,
            rain_interval_secs: ENV_MONITOR_INTERVAL_S,
            wind_samples_per_second: WIND_SAMPLES_PER_SECOND,
            wind_speed_window_mins: WIND_SPEED_WINDOW_MINS,
            wind_gust_window_mins: WIND_GUST_WINDOW_MINS,
            gust_ceiling_mph: GUST_CEILING_MPH,
            always_sample_direction: false,
            log_wind_samples: false,
            report_interval_secs: REPORT_INTERVAL_S,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl StationConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates JSON text
    pub fn from_json_str(json: &str) -> StationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> StationResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes to pretty-printed JSON
    pub fn to_json(&self) -> StationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects settings no producer can run with
    pub fn validate(&self) -> StationResult<()> {
        let nonzero = [
            ("atmospheric_interval_secs", self.atmospheric_interval_secs),
            ("rain_interval_secs", self.rain_interval_secs),
            ("wind_samples_per_second", u64::from(self.wind_samples_per_second)),
            ("wind_speed_window_mins", u64::from(self.wind_speed_window_mins)),
            ("wind_gust_window_mins", u64::from(self.wind_gust_window_mins)),
            ("report_interval_secs", self.report_interval_secs),
            ("read_timeout_ms", self.read_timeout_ms),
        ];

        if let Some((name, _)) = nonzero.iter().find(|(_, value)| *value == 0) {
            return Err(StationError::Config(format!("{name} must be greater than zero")));
        }

        if u64::from(self.wind_samples_per_second) > MS_PER_SECOND {
            return Err(StationError::Config(format!(
                "wind_samples_per_second must be at most {MS_PER_SECOND}"
            )));
        }

        let windows = [
            ("wind_speed_window_mins", self.wind_speed_window_mins),
            ("wind_gust_window_mins", self.wind_gust_window_mins),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, mins)| *mins > MAX_WIND_WINDOW_MINS) {
            return Err(StationError::Config(format!(
                "{name} must be at most {MAX_WIND_WINDOW_MINS}"
            )));
        }

        if self.gust_ceiling_mph.is_nan() || self.gust_ceiling_mph <= 0.0 {
            return Err(StationError::Config(
                "gust_ceiling_mph must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Enables or disables test mode
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Enables or disables the atmospheric producer
    pub fn atmospheric_enabled(mut self, enabled: bool) -> Self {
        self.atmospheric_enabled = enabled;
        self
    }

    /// Enables or disables the rain producer
    pub fn rain_enabled(mut self, enabled: bool) -> Self {
        self.rain_enabled = enabled;
        self
    }

    /// Enables or disables the wind producer
    pub fn wind_enabled(mut self, enabled: bool) -> Self {
        self.wind_enabled = enabled;
        self
    }

    /// Sets the atmospheric cadence
    pub fn atmospheric_interval_secs(mut self, secs: u64) -> Self {
        self.atmospheric_interval_secs = secs;
        self
    }

    /// Sets the rain gauge cadence
    pub fn rain_interval_secs(mut self, secs: u64) -> Self {
        self.rain_interval_secs = secs;
        self
    }

    /// Sets the pulse sampling rate
    pub fn wind_samples_per_second(mut self, rate: u32) -> Self {
        self.wind_samples_per_second = rate;
        self
    }

    /// Sets the mean speed and direction window
    pub fn wind_speed_window_mins(mut self, mins: u32) -> Self {
        self.wind_speed_window_mins = mins;
        self
    }

    /// Sets the gust window
    pub fn wind_gust_window_mins(mut self, mins: u32) -> Self {
        self.wind_gust_window_mins = mins;
        self
    }

    /// Sets the gust plausibility ceiling
    pub fn gust_ceiling_mph(mut self, mph: f64) -> Self {
        self.gust_ceiling_mph = mph;
        self
    }

    /// Reads the vane on calm ticks too
    pub fn always_sample_direction(mut self, enabled: bool) -> Self {
        self.always_sample_direction = enabled;
        self
    }

    /// Logs every wind tick
    pub fn log_wind_samples(mut self, enabled: bool) -> Self {
        self.log_wind_samples = enabled;
        self
    }

    /// Sets the report cadence
    pub fn report_interval_secs(mut self, secs: u64) -> Self {
        self.report_interval_secs = secs;
        self
    }

    /// Sets the hardware read bound
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.read_timeout_ms = ms;
        self
    }

    /// Effective atmospheric cadence
    pub fn atmospheric_interval(&self) -> Duration {
        if self.test_mode {
            Duration::from_secs(TEST_MODE_INTERVAL_S)
        } else {
            Duration::from_secs(self.atmospheric_interval_secs)
        }
    }

    /// Rain gauge cadence
    pub fn rain_interval(&self) -> Duration {
        Duration::from_secs(self.rain_interval_secs)
    }

    /// Time between two wind ticks
    pub fn wind_tick(&self) -> Duration {
        Duration::from_millis(MS_PER_SECOND / u64::from(self.wind_samples_per_second.max(1)))
    }

    /// Status report cadence
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    /// Bound on one hardware read
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Wind channel sizing derived from these settings
    pub fn wind_config(&self) -> StationResult<WindConfig> {
        let secs = |name: &str, mins: u32| {
            mins.checked_mul(SECONDS_PER_MINUTE)
                .ok_or_else(|| StationError::Config(format!("{name} is out of range")))
        };

        Ok(WindConfig {
            params: GustParams {
                samples_per_second: self.wind_samples_per_second,
                ceiling: self.gust_ceiling_mph,
                ..GustParams::default()
            },
            speed_window_secs: secs("wind_speed_window_mins", self.wind_speed_window_mins)?,
            gust_window_secs: secs("wind_gust_window_mins", self.wind_gust_window_mins)?,
            always_sample_direction: self.always_sample_direction,
        })
    }
}
