//! Station assembly: buffer trees, producer tasks and shutdown

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wxring_core::{channels::Atmosphere, RainChannel, WindChannel};

use crate::{
    config::StationConfig,
    error::{StationError, StationResult},
    sensors::{AtmosphericSensor, RainGauge, StatusSink, WindMasthead, WindVane},
    status::StatusReport,
    tasks::{self, TaskTiming, WindInstruments},
};

/// Buffer trees of the enabled channels
#[derive(Debug)]
pub struct StationChannels {
    /// Temperature, humidity and pressure
    pub atmosphere: Option<Atmosphere>,
    /// Rain gauge
    pub rain: Option<RainChannel>,
    /// Wind speed, gust and direction
    pub wind: Option<Arc<WindChannel>>,
}

impl StationChannels {
    /// Builds a buffer tree for every channel enabled in `config`
    pub fn new(config: &StationConfig) -> StationResult<Self> {
        Ok(Self {
            atmosphere: config.atmospheric_enabled.then(Atmosphere::new).transpose()?,
            rain: config.rain_enabled.then(RainChannel::new).transpose()?,
            wind: if config.wind_enabled {
                Some(Arc::new(WindChannel::new(config.wind_config()?)?))
            } else {
                None
            },
        })
    }
}

/// Instruments and report sink handed to [`Station::spawn`]
///
/// Only the instruments of enabled channels are required.
#[derive(Clone, Default)]
pub struct StationSensors {
    /// Temperature, humidity and pressure sensor
    pub atmospheric: Option<Arc<dyn AtmosphericSensor>>,
    /// Rain gauge
    pub rain: Option<Arc<dyn RainGauge>>,
    /// Anemometer pulse counter
    pub masthead: Option<Arc<dyn WindMasthead>>,
    /// Wind vane
    pub vane: Option<Arc<dyn WindVane>>,
    /// Report destination; no reporter runs without one
    pub sink: Option<Arc<dyn StatusSink>>,
}

/// A configured station and its buffer trees
#[derive(Debug)]
pub struct Station {
    config: StationConfig,
    channels: Arc<StationChannels>,
}

impl Station {
    /// Validates `config` and builds the enabled channels
    pub fn new(config: StationConfig) -> StationResult<Self> {
        config.validate()?;
        let channels = Arc::new(StationChannels::new(&config)?);
        Ok(Self { config, channels })
    }

    /// Active configuration
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Buffer trees, readable at any time
    pub fn channels(&self) -> &Arc<StationChannels> {
        &self.channels
    }

    /// Current snapshot of every enabled channel
    pub fn report(&self) -> StatusReport {
        StatusReport::capture(&self.channels)
    }

    /// Starts one producer per enabled channel, plus the reporter when a sink
    /// is given. Must be called inside a tokio runtime.
    pub fn spawn(&self, sensors: StationSensors) -> StationResult<StationHandle> {
        let cancel = CancellationToken::new();
        let read_timeout = self.config.read_timeout();
        let timing = |period: Duration| TaskTiming { period, read_timeout };

        // Check every instrument before starting anything
        let atmospheric = match &self.channels.atmosphere {
            Some(atmosphere) => Some((
                atmosphere.clone(),
                required(&sensors.atmospheric, "atmospheric sensor")?,
            )),
            None => None,
        };
        let rain = match &self.channels.rain {
            Some(rain) => Some((rain.clone(), required(&sensors.rain, "rain gauge")?)),
            None => None,
        };
        let wind = match &self.channels.wind {
            Some(wind) => Some((
                Arc::clone(wind),
                WindInstruments {
                    masthead: required(&sensors.masthead, "wind masthead")?,
                    vane: required(&sensors.vane, "wind vane")?,
                },
            )),
            None => None,
        };

        let mut handles = Vec::new();

        if let Some((atmosphere, sensor)) = atmospheric {
            handles.push(tokio::spawn(tasks::run_atmospheric(
                sensor,
                atmosphere,
                timing(self.config.atmospheric_interval()),
                cancel.child_token(),
            )));
        }

        if let Some((rain, gauge)) = rain {
            handles.push(tokio::spawn(tasks::run_rain(
                gauge,
                rain,
                timing(self.config.rain_interval()),
                cancel.child_token(),
            )));
        }

        if let Some((wind, instruments)) = wind {
            handles.push(tokio::spawn(tasks::run_wind(
                instruments,
                wind,
                timing(self.config.wind_tick()),
                self.config.log_wind_samples,
                cancel.child_token(),
            )));
        }

        if let Some(sink) = sensors.sink {
            handles.push(tokio::spawn(tasks::run_reporter(
                Arc::clone(&self.channels),
                sink,
                timing(self.config.report_interval()),
                cancel.child_token(),
            )));
        }

        info!("Station started with {} tasks", handles.len());
        Ok(StationHandle { cancel, tasks: handles })
    }
}

fn required<T: ?Sized>(sensor: &Option<Arc<T>>, name: &str) -> StationResult<Arc<T>> {
    sensor
        .clone()
        .ok_or_else(|| StationError::Config(format!("{name} required by an enabled channel")))
}

/// Running producer tasks
#[derive(Debug)]
pub struct StationHandle {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl StationHandle {
    /// Number of running tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Token that stops every task when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stops every task and waits for them to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(err) = task.await {
                log::error!("Producer task ended abnormally: {err}");
            }
        }
        info!("Station stopped");
    }
}
