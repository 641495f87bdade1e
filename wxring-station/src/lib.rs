//! Weather Station Runtime
//!
//! ## Overview
//!
//! Wires the `wxring-core` buffer trees to the station's instruments. One
//! periodic task per enabled channel reads its instrument and appends a
//! sample; a reporter task snapshots every channel and hands the report to a
//! [`StatusSink`](sensors::StatusSink) such as a status endpoint or a metrics
//! exporter.
//!
//! ## Instruments
//!
//! | Channel | Instrument trait | Default cadence |
//! |---------|------------------|-----------------|
//! | Atmospheric | `AtmosphericSensor` | 60 s (5 s in test mode) |
//! | Rain | `RainGauge` | 60 s |
//! | Wind | `WindMasthead` + `WindVane` | 250 ms |
//!
//! Hardware access lives behind these traits. Implementations only perform
//! the read; the station bounds it with a timeout and skips the tick when it
//! fails, so a flaky bus costs samples but never corrupts statistics.
//!
//! ## Shutdown
//!
//! All tasks share one cancellation token. [`StationHandle::shutdown`] cancels
//! it and waits for every task; each task stops between ticks.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wxring_station::{Station, StationConfig, StationSensors};
//! # use wxring_station::sensors::{RainGauge, StatusSink};
//! # async fn example(gauge: Arc<dyn RainGauge>, sink: Arc<dyn StatusSink>) -> Result<(), wxring_station::StationError> {
//!
//! let config = StationConfig::from_file("/etc/wxring.json")?
//!     .atmospheric_enabled(false)
//!     .wind_enabled(false);
//!
//! let station = Station::new(config)?;
//! let handle = station.spawn(StationSensors {
//!     rain: Some(gauge),
//!     sink: Some(sink),
//!     ..StationSensors::default()
//! })?;
//!
//! // ... later
//! println!("{}", station.report().to_json()?);
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod sensors;
pub mod station;
pub mod status;
pub mod tasks;

// Re-export common types
pub use config::StationConfig;
pub use error::{SensorError, StationError, StationResult};
pub use station::{Station, StationChannels, StationHandle, StationSensors};
pub use status::StatusReport;
