//! Wind speed, gust and direction
//!
//! The masthead pulse counter is sampled several times a second. Each sample
//! goes into a short buffer for the rolling mean speed and a longer one for the
//! gust search. The vane heading is sampled on the same tick into a buffer the
//! length of the speed buffer.
//!
//! A vane has no meaningful heading in still air, so a calm tick records the
//! previous heading again instead of reading the vane. A failed vane read is
//! handled the same way.

use crate::{
    buffer::RingBuffer,
    constants::{
        sensors::{VANE_DEFAULT_HEADING, VANE_THRESHOLDS},
        time::{WIND_GUST_WINDOW_MINS, WIND_SPEED_WINDOW_MINS},
        SECONDS_PER_MINUTE,
    },
    errors::{BufferError, BufferResult},
    gust::{mean_speed, GustParams, GustWindow},
};

/// Wind channel sizing and sampling policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindConfig {
    /// Sampling, gust duration, ceiling and calibration
    pub params: GustParams,
    /// Span of the mean speed and direction buffers (s)
    pub speed_window_secs: u32,
    /// Span searched for the strongest gust (s)
    pub gust_window_secs: u32,
    /// Read the vane even when the cups are still
    pub always_sample_direction: bool,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            params: GustParams::default(),
            speed_window_secs: WIND_SPEED_WINDOW_MINS * SECONDS_PER_MINUTE,
            gust_window_secs: WIND_GUST_WINDOW_MINS * SECONDS_PER_MINUTE,
            always_sample_direction: false,
        }
    }
}

/// Speed, gust and direction buffers fed from one wind tick
#[derive(Debug)]
pub struct WindChannel {
    config: WindConfig,
    speed: RingBuffer,
    gust: GustWindow,
    direction: RingBuffer,
}

impl WindChannel {
    /// Builds the three buffers sized for `config`
    pub fn new(config: WindConfig) -> BufferResult<Self> {
        let rate = config.params.samples_per_second as usize;
        let slots = |secs: u32| {
            rate.checked_mul(secs as usize)
                .ok_or(BufferError::CapacityOverflow)
        };
        let speed_slots = slots(config.speed_window_secs)?;
        let gust_slots = slots(config.gust_window_secs)?;

        Ok(Self {
            speed: RingBuffer::new(speed_slots)?,
            gust: GustWindow::new(RingBuffer::new(gust_slots)?, config.params),
            direction: RingBuffer::new(speed_slots)?,
            config,
        })
    }

    /// Sizing and sampling policy
    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    /// Whether a tick with `pulses` should read the vane
    pub fn wants_heading(&self, pulses: u32) -> bool {
        pulses > 0 || self.config.always_sample_direction
    }

    /// Appends one tick
    ///
    /// `heading` is the vane reading for this tick, or `None` when the vane was
    /// not read or the read failed. A calm tick or a missing heading repeats the
    /// previous heading.
    pub fn record(&self, pulses: u32, heading: Option<f64>) {
        let count = f64::from(pulses);
        self.speed.add_item(count);
        self.gust.buffer().add_item(count);

        let heading = match heading {
            Some(degrees) if self.wants_heading(pulses) => degrees,
            _ => self.direction.last(),
        };
        self.direction.add_item(heading);
    }

    /// Rolling mean speed over the speed window
    pub fn speed(&self) -> f64 {
        let params = &self.config.params;
        mean_speed(&self.speed, params.samples_per_second, params.calibration)
    }

    /// Strongest plausible gust in the gust window
    pub fn gust(&self) -> f64 {
        self.gust.gust()
    }

    /// Mean heading over the speed window (degrees)
    ///
    /// This is an arithmetic mean, so headings either side of north average
    /// towards south.
    pub fn direction(&self) -> f64 {
        self.direction.summary().average
    }

    /// Pulse counts for the mean speed
    pub fn speed_buffer(&self) -> &RingBuffer {
        &self.speed
    }

    /// Gust detector over the long pulse buffer
    pub fn gust_window(&self) -> &GustWindow {
        &self.gust
    }

    /// Headings for the mean direction
    pub fn direction_buffer(&self) -> &RingBuffer {
        &self.direction
    }
}

/// Maps a vane output voltage to a heading in degrees and its compass label
pub fn vane_heading(volts: f64) -> (f64, &'static str) {
    VANE_THRESHOLDS
        .iter()
        .find(|(bound, _, _)| volts < *bound)
        .map_or(VANE_DEFAULT_HEADING, |&(_, degrees, label)| (degrees, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WindConfig {
        WindConfig {
            speed_window_secs: 10,
            gust_window_secs: 30,
            ..WindConfig::default()
        }
    }

    #[test]
    fn default_sizes() {
        let wind = WindChannel::new(WindConfig::default()).unwrap();
        assert_eq!(wind.speed_buffer().capacity(), 480);
        assert_eq!(wind.gust_window().buffer().capacity(), 2400);
        assert_eq!(wind.direction_buffer().capacity(), 480);
    }

    #[test]
    fn calm_tick_replays_heading() {
        let wind = WindChannel::new(small_config()).unwrap();

        wind.record(3, Some(90.0));
        assert!(!wind.wants_heading(0));
        wind.record(0, None);
        wind.record(0, Some(180.0));

        assert_eq!(wind.direction_buffer().raw_data(), vec![90.0, 90.0, 90.0]);
    }

    #[test]
    fn failed_read_replays_heading() {
        let wind = WindChannel::new(small_config()).unwrap();

        wind.record(2, Some(45.0));
        wind.record(2, None);

        assert_eq!(wind.direction_buffer().raw_data(), vec![45.0, 45.0]);
    }

    #[test]
    fn always_sample_reads_in_calm() {
        let config = WindConfig {
            always_sample_direction: true,
            ..small_config()
        };
        let wind = WindChannel::new(config).unwrap();

        assert!(wind.wants_heading(0));
        wind.record(0, Some(270.0));
        assert_eq!(wind.direction_buffer().last(), 270.0);
    }

    #[test]
    fn calm_before_any_heading_is_zero() {
        let wind = WindChannel::new(small_config()).unwrap();
        wind.record(0, None);
        assert_eq!(wind.direction(), 0.0);
    }

    #[test]
    fn direction_is_linear_mean() {
        let wind = WindChannel::new(small_config()).unwrap();
        wind.record(1, Some(350.0));
        wind.record(1, Some(10.0));

        assert_eq!(wind.direction(), 180.0);
    }

    #[test]
    fn speed_and_gust_share_ticks() {
        let wind = WindChannel::new(small_config()).unwrap();
        // 40 ticks fill the 10 s speed window at 4 Hz
        for _ in 0..40 {
            wind.record(1, Some(0.0));
        }

        let params = GustParams::default();
        let expected = 4.0 * params.calibration;
        assert!((wind.speed() - expected).abs() < 1e-9);
        assert!((wind.gust() - expected).abs() < 1e-9);
    }

    #[test]
    fn vane_thresholds() {
        assert_eq!(vane_heading(0.5), (135.0, "SE"));
        assert_eq!(vane_heading(1.19), (180.0, "S"));
        assert_eq!(vane_heading(2.5), (45.0, "NE"));
        assert_eq!(vane_heading(4.0), (0.0, "N"));
        assert_eq!(vane_heading(4.59), (270.0, "W"));
        assert_eq!(vane_heading(5.0), (270.0, "W"));
    }
}
