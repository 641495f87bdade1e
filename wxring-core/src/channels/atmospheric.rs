//! Temperature, humidity and pressure channels
//!
//! Each quantity keeps an hour of one-minute readings. When the minute buffer
//! wraps, the hour's average, minimum and maximum are appended to three hourly
//! buffers that together cover one day.

use crate::{
    buffer::RingBuffer,
    constants::{HOUR_SLOTS, MINUTE_SLOTS},
    errors::BufferResult,
    summary::Summary,
};

use super::Quantity;

/// One atmospheric sample, already in physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AtmosphericReading {
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Relative humidity (%)
    pub humidity_rh: f64,
    /// Station pressure (hPa)
    pub pressure_hpa: f64,
}

/// Minute buffer of one quantity with its hourly average, min and max
#[derive(Debug, Clone)]
pub struct AtmosphericChannel {
    quantity: Quantity,
    minutes: RingBuffer,
    hourly_average: RingBuffer,
    hourly_min: RingBuffer,
    hourly_max: RingBuffer,
}

impl AtmosphericChannel {
    /// Builds the buffer tree for `quantity`
    pub fn new(quantity: Quantity) -> BufferResult<Self> {
        let minutes = RingBuffer::new(MINUTE_SLOTS)?;
        let hourly_average = RingBuffer::new(HOUR_SLOTS)?;
        let hourly_min = RingBuffer::new(HOUR_SLOTS)?;
        let hourly_max = RingBuffer::new(HOUR_SLOTS)?;

        minutes.set_auto_average(&hourly_average)?;
        minutes.set_auto_min(&hourly_min)?;
        minutes.set_auto_max(&hourly_max)?;

        Ok(Self {
            quantity,
            minutes,
            hourly_average,
            hourly_min,
            hourly_max,
        })
    }

    /// Quantity this channel measures
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Appends one minute's reading
    pub fn record(&self, value: f64) {
        self.minutes.add_item(value);
    }

    /// Latest reading, `0.0` before the first
    pub fn current(&self) -> f64 {
        self.minutes.last()
    }

    /// Statistics over the last hour of readings
    pub fn last_hour(&self) -> Summary {
        self.minutes.summary()
    }

    /// One-minute readings
    pub fn minutes(&self) -> &RingBuffer {
        &self.minutes
    }

    /// Hourly averages
    pub fn hourly_average(&self) -> &RingBuffer {
        &self.hourly_average
    }

    /// Hourly minimums
    pub fn hourly_min(&self) -> &RingBuffer {
        &self.hourly_min
    }

    /// Hourly maximums
    pub fn hourly_max(&self) -> &RingBuffer {
        &self.hourly_max
    }
}

/// The three atmospheric channels, fed together from one sensor read
#[derive(Debug, Clone)]
pub struct Atmosphere {
    /// Air temperature (°C)
    pub temperature: AtmosphericChannel,
    /// Relative humidity (%)
    pub humidity: AtmosphericChannel,
    /// Station pressure (hPa)
    pub pressure: AtmosphericChannel,
}

impl Atmosphere {
    /// Builds all three buffer trees
    pub fn new() -> BufferResult<Self> {
        Ok(Self {
            temperature: AtmosphericChannel::new(Quantity::Temperature)?,
            humidity: AtmosphericChannel::new(Quantity::Humidity)?,
            pressure: AtmosphericChannel::new(Quantity::Pressure)?,
        })
    }

    /// Appends one reading to each channel
    pub fn record(&self, reading: AtmosphericReading) {
        self.temperature.record(reading.temperature_c);
        self.humidity.record(reading.humidity_rh);
        self.pressure.record(reading.pressure_hpa);
    }

    /// Latest reading of every channel
    pub fn current(&self) -> AtmosphericReading {
        AtmosphericReading {
            temperature_c: self.temperature.current(),
            humidity_rh: self.humidity.current(),
            pressure_hpa: self.pressure.current(),
        }
    }
}
