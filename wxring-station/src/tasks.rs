//! Periodic Producer Tasks
//!
//! ## Overview
//!
//! Each enabled channel is fed by one tokio task that wakes on a fixed cadence,
//! reads its instrument and appends one sample. A reporter task snapshots every
//! channel on its own cadence.
//!
//! ```text
//!  AtmosphericSensor ──60 s──→ Atmosphere ─┐
//!  RainGauge ─────────60 s──→ RainChannel ─┼──→ reporter ──30 s──→ StatusSink
//!  WindMasthead/Vane ─250 ms→ WindChannel ─┘
//! ```
//!
//! ## Tick Semantics
//!
//! - The first tick fires one period after start, then every period.
//! - A tick that falls behind is skipped rather than bursted, so a stalled
//!   read never produces a run of back-to-back samples.
//! - Every hardware read is bounded by the read timeout. A failed or timed-out
//!   read skips the tick: nothing is written and the buffers keep serving the
//!   last valid statistics.
//! - Cancellation is checked while waiting for the next tick, so a task stops
//!   between samples and never leaves a tick half-recorded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wxring_core::{channels::Atmosphere, RainChannel, WindChannel};

use crate::{
    error::SensorError,
    sensors::{AtmosphericSensor, RainGauge, StatusSink, WindMasthead, WindVane},
    station::StationChannels,
    status::StatusReport,
};

/// Cadence and read bound shared by every producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    /// Time between ticks
    pub period: Duration,
    /// Bound on one hardware read
    pub read_timeout: Duration,
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Waits for the next tick; false once the task has been cancelled
async fn next_tick(ticker: &mut Interval, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = ticker.tick() => true,
    }
}

/// Runs one read under the timeout, logging failures
async fn bounded_read<T, F>(what: &str, limit: Duration, read: F) -> Option<T>
where
    F: Future<Output = Result<T, SensorError>>,
{
    match time::timeout(limit, read).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            error!("{what} read failed: {err}");
            None
        }
        Err(_) => {
            warn!("{what} read timed out after {limit:?}");
            None
        }
    }
}

/// Feeds the temperature, humidity and pressure channels
pub async fn run_atmospheric(
    sensor: Arc<dyn AtmosphericSensor>,
    atmosphere: Atmosphere,
    timing: TaskTiming,
    cancel: CancellationToken,
) {
    info!("Starting atmospheric sensor, period {:?}", timing.period);
    let mut ticker = ticker(timing.period);

    while next_tick(&mut ticker, &cancel).await {
        let reading = bounded_read("atmospheric", timing.read_timeout, sensor.read()).await;
        if let Some(reading) = reading {
            atmosphere.record(reading);
        }
    }

    info!("Atmospheric sensor stopped");
}

/// Feeds the rain channel with tips per period
pub async fn run_rain(
    gauge: Arc<dyn RainGauge>,
    rain: RainChannel,
    timing: TaskTiming,
    cancel: CancellationToken,
) {
    info!("Starting rain gauge, period {:?}", timing.period);
    let mut ticker = ticker(timing.period);

    while next_tick(&mut ticker, &cancel).await {
        let tips = bounded_read("rain gauge", timing.read_timeout, gauge.take_tips()).await;
        if let Some(tips) = tips {
            rain.record(tips);
            debug!("Rain tips [{tips}] -> {:.2} mm", rain.last_minute_mm());
        }
    }

    info!("Rain gauge stopped");
}

/// Wind task collaborators
#[derive(Clone)]
pub struct WindInstruments {
    /// Pulse counter
    pub masthead: Arc<dyn WindMasthead>,
    /// Heading source
    pub vane: Arc<dyn WindVane>,
}

/// Feeds the wind channel, one pulse count and heading per tick
pub async fn run_wind(
    instruments: WindInstruments,
    wind: Arc<WindChannel>,
    timing: TaskTiming,
    log_samples: bool,
    cancel: CancellationToken,
) {
    info!("Starting wind sensor, period {:?}", timing.period);
    let mut ticker = ticker(timing.period);

    while next_tick(&mut ticker, &cancel).await {
        let Some(pulses) =
            bounded_read("masthead", timing.read_timeout, instruments.masthead.pulse_count()).await
        else {
            continue;
        };

        let heading = if wind.wants_heading(pulses) {
            bounded_read("wind vane", timing.read_timeout, instruments.vane.heading()).await
        } else {
            None
        };

        wind.record(pulses, heading);

        if log_samples {
            debug!(
                "Wind pulses [{pulses}] heading [{heading:?}] speed [{:.2}]",
                wind.speed()
            );
        }
    }

    info!("Wind sensor stopped");
}

/// Snapshots every channel and publishes the report
pub async fn run_reporter(
    channels: Arc<StationChannels>,
    sink: Arc<dyn StatusSink>,
    timing: TaskTiming,
    cancel: CancellationToken,
) {
    info!("Starting status reporter, period {:?}", timing.period);
    let mut ticker = ticker(timing.period);

    while next_tick(&mut ticker, &cancel).await {
        let report = StatusReport::capture(&channels);
        info!("{}", report.summary_line());
        bounded_read("status sink", timing.read_timeout, sink.publish(&report)).await;
    }

    info!("Status reporter stopped");
}
