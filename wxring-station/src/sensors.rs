//! Sensor Collaborator Traits
//!
//! The station never talks to hardware directly. Each instrument is reached
//! through one of these traits, implemented elsewhere over the real bus and in
//! tests by fakes.
//!
//! Every read is async and may fail. The producer bounds each call with the
//! configured read timeout and skips the tick on failure, so implementations
//! do not need their own retry or timeout logic.

use async_trait::async_trait;
use wxring_core::AtmosphericReading;

use crate::{error::SensorError, status::StatusReport};

/// Combined temperature, humidity and pressure sensor
#[async_trait]
pub trait AtmosphericSensor: Send + Sync {
    /// Takes one reading in physical units
    async fn read(&self) -> Result<AtmosphericReading, SensorError>;
}

/// Tipping-bucket rain gauge
#[async_trait]
pub trait RainGauge: Send + Sync {
    /// Bucket tips since the previous call
    async fn take_tips(&self) -> Result<u32, SensorError>;
}

/// Anemometer pulse counter on the masthead
#[async_trait]
pub trait WindMasthead: Send + Sync {
    /// Cup revolutions since the previous call
    async fn pulse_count(&self) -> Result<u32, SensorError>;
}

/// Wind vane
#[async_trait]
pub trait WindVane: Send + Sync {
    /// Current heading in degrees
    async fn heading(&self) -> Result<f64, SensorError>;
}

/// Destination for periodic status reports (status endpoint, metrics exporter)
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Publishes one snapshot
    async fn publish(&self, report: &StatusReport) -> Result<(), SensorError>;
}
