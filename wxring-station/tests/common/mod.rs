//! Fake instruments for station integration tests
//!
//! Each fake returns scripted values, then a fixed fallback, and counts how
//! often it was read.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use wxring_core::AtmosphericReading;
use wxring_station::{
    sensors::{AtmosphericSensor, RainGauge, StatusSink, WindMasthead, WindVane},
    SensorError, StatusReport,
};

/// Scripted results followed by a fallback value
pub struct Script<T> {
    queue: Mutex<VecDeque<Result<T, SensorError>>>,
    fallback: Result<T, SensorError>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(fallback: Result<T, SensorError>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn then(self, result: Result<T, SensorError>) -> Self {
        self.queue.lock().unwrap().push_back(result);
        self
    }

    pub fn next(&self) -> Result<T, SensorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct FakeAtmospheric(pub Script<AtmosphericReading>);

#[async_trait]
impl AtmosphericSensor for FakeAtmospheric {
    async fn read(&self) -> Result<AtmosphericReading, SensorError> {
        self.0.next()
    }
}

pub struct FakeRainGauge(pub Script<u32>);

#[async_trait]
impl RainGauge for FakeRainGauge {
    async fn take_tips(&self) -> Result<u32, SensorError> {
        self.0.next()
    }
}

pub struct FakeMasthead(pub Script<u32>);

#[async_trait]
impl WindMasthead for FakeMasthead {
    async fn pulse_count(&self) -> Result<u32, SensorError> {
        self.0.next()
    }
}

pub struct FakeVane(pub Script<f64>);

#[async_trait]
impl WindVane for FakeVane {
    async fn heading(&self) -> Result<f64, SensorError> {
        self.0.next()
    }
}

/// Rain gauge that never answers within the read timeout
pub struct StalledGauge {
    pub delay: Duration,
    pub calls: AtomicUsize,
}

#[async_trait]
impl RainGauge for StalledGauge {
    async fn take_tips(&self) -> Result<u32, SensorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(1)
    }
}

/// Sink that keeps every published report
#[derive(Default)]
pub struct RecordingSink {
    pub reports: Mutex<Vec<StatusReport>>,
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn publish(&self, report: &StatusReport) -> Result<(), SensorError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

pub fn reading(temperature_c: f64) -> AtmosphericReading {
    AtmosphericReading {
        temperature_c,
        humidity_rh: 55.0,
        pressure_hpa: 1012.0,
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}

/// Sleeps through `ticks` periods plus half a period
pub async fn run_ticks(period: Duration, ticks: u32) {
    tokio::time::sleep(period * ticks + period / 2).await;
}
