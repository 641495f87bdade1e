//! Wind Gust Detection
//!
//! ## Overview
//!
//! A gust is the highest three second average wind speed inside a longer
//! reporting window, ten minutes by default. The anemometer is sampled at a
//! fixed cadence (4 Hz) and every sample is the number of cup revolutions seen
//! since the previous one. [`GustWindow`] wraps the buffer holding those pulse
//! counts and finds the strongest `g`-second stretch in it on demand.
//!
//! ```text
//! pulse counts (f = 4 Hz, g = 3 s, S = 12 samples per gust)
//!
//!  oldest                                               newest
//! ┌──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬── ─ ─ ─┬──┬──┬──┐
//! │ 1│ 2│ 2│ 5│ 7│ 9│ 8│ 8│ 6│ 4│ 3│ 3│ 2│ 1│        │ 1│ 0│ 1│
//! └──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴── ─ ─ ─┴──┴──┴──┘
//!  └──────────── window at offset 0 ──────────┘
//!     └──────────── window at offset 1 ──────────┘
//!                                       ...   windows near the end wrap
//!                                             around to the oldest samples
//! ```
//!
//! ## Plausibility Filter
//!
//! Cable interference and reed switch bounce occasionally produce pulse bursts
//! that no real gust could. A candidate above the ceiling is discarded and the
//! last accepted gust is returned instead. The last accepted value is the only
//! state the window keeps besides its buffer.
//!
//! ## Cost
//!
//! `gust()` is O(len × S). It runs once per reporting tick, never per sample.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    buffer::RingBuffer,
    constants::{
        GUST_CEILING_MPH, GUST_DURATION_S, MPH_PER_PULSE_PER_SECOND, WIND_SAMPLES_PER_SECOND,
    },
};

/// Sampling and calibration parameters shared by the wind statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GustParams {
    /// Pulse-count samples per second
    pub samples_per_second: u32,
    /// Length of one gust in seconds
    pub gust_duration_s: u32,
    /// Highest plausible gust, in calibrated units
    pub ceiling: f64,
    /// Calibrated units per pulse per second
    pub calibration: f64,
}

impl Default for GustParams {
    fn default() -> Self {
        Self {
            samples_per_second: WIND_SAMPLES_PER_SECOND,
            gust_duration_s: GUST_DURATION_S,
            ceiling: GUST_CEILING_MPH,
            calibration: MPH_PER_PULSE_PER_SECOND,
        }
    }
}

impl GustParams {
    /// Samples spanning one gust, saturating at `usize::MAX`
    pub fn samples_per_gust(&self) -> usize {
        (self.samples_per_second as usize).saturating_mul(self.gust_duration_s as usize)
    }
}

/// Mean speed over the whole configured span of a pulse-count buffer.
///
/// The divisor is the buffer's full span in seconds, not the part filled so
/// far, so a partly filled buffer reads low until it has seen a full window.
pub fn mean_speed(buffer: &RingBuffer, samples_per_second: u32, calibration: f64) -> f64 {
    let window_seconds = buffer.capacity() as f64 / f64::from(samples_per_second);
    buffer.summary().sum / window_seconds * calibration
}

/// Moving-maximum gust detector over a buffer of pulse counts
#[derive(Debug)]
pub struct GustWindow {
    buffer: RingBuffer,
    params: GustParams,
    /// Bits of the last accepted gust (`f64::to_bits`)
    last_accepted: AtomicU64,
}

impl GustWindow {
    /// Wraps a pulse-count buffer
    pub fn new(buffer: RingBuffer, params: GustParams) -> Self {
        Self {
            buffer,
            params,
            last_accepted: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Underlying pulse-count buffer
    pub fn buffer(&self) -> &RingBuffer {
        &self.buffer
    }

    /// Sampling and calibration parameters
    pub fn params(&self) -> &GustParams {
        &self.params
    }

    /// Last gust that passed the plausibility filter
    pub fn last_accepted(&self) -> f64 {
        f64::from_bits(self.last_accepted.load(Ordering::Acquire))
    }

    /// Highest `g`-second average speed in the window
    ///
    /// Every start offset is considered, and windows that run past the newest
    /// sample continue from the oldest one. With fewer samples than one gust
    /// spans, the single window covers every sample once.
    pub fn gust(&self) -> f64 {
        let samples = self.buffer.raw_data();
        let candidate = Self::candidate(&samples, &self.params);

        if candidate > self.params.ceiling {
            let kept = self.last_accepted();
            log_debug!(
                "gust {:.2} above ceiling {:.2}, keeping {:.2}",
                candidate,
                self.params.ceiling,
                kept
            );
            return kept;
        }

        self.last_accepted.store(candidate.to_bits(), Ordering::Release);
        candidate
    }

    fn candidate(samples: &[f64], params: &GustParams) -> f64 {
        let n = samples.len();
        if n == 0 {
            return 0.0;
        }

        let span = params.samples_per_gust().min(n);
        let max_sum = (0..n)
            .map(|start| (0..span).map(|j| samples[(start + j) % n]).sum::<f64>())
            .fold(0.0, f64::max);

        max_sum / f64::from(params.gust_duration_s) * params.calibration
    }

    /// Mean speed over the whole gust window
    pub fn speed(&self) -> f64 {
        let params = &self.params;
        mean_speed(&self.buffer, params.samples_per_second, params.calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn window(capacity: usize) -> GustWindow {
        GustWindow::new(RingBuffer::new(capacity).unwrap(), GustParams::default())
    }

    #[test]
    fn empty_window_has_no_gust() {
        let gust = window(2400);
        assert_eq!(gust.gust(), 0.0);
        assert_eq!(gust.speed(), 0.0);
    }

    #[test]
    fn steady_wind() {
        // 2 pulses per sample at 4 Hz = 8 pulses/s
        let gust = window(2400);
        for _ in 0..2400 {
            gust.buffer().add_item(2.0);
        }

        let expected = 8.0 * MPH_PER_PULSE_PER_SECOND;
        assert!((gust.gust() - expected).abs() < EPSILON);
        assert!((gust.speed() - expected).abs() < EPSILON);
    }

    #[test]
    fn short_peak_found() {
        let gust = window(240);
        for _ in 0..100 {
            gust.buffer().add_item(1.0);
        }
        for _ in 0..12 {
            gust.buffer().add_item(5.0);
        }
        for _ in 0..100 {
            gust.buffer().add_item(1.0);
        }

        // 60 pulses in 3 s
        let expected = 20.0 * MPH_PER_PULSE_PER_SECOND;
        assert!((gust.gust() - expected).abs() < EPSILON);
    }

    #[test]
    fn peak_across_the_seam() {
        // Newest six samples and oldest six samples form one gust
        let samples: Vec<f64> = (0..40)
            .map(|i| if i < 6 || i >= 34 { 4.0 } else { 0.0 })
            .collect();

        let expected = 48.0 / 3.0 * MPH_PER_PULSE_PER_SECOND;
        let candidate = GustWindow::candidate(&samples, &GustParams::default());
        assert!((candidate - expected).abs() < EPSILON);
    }

    #[test]
    fn implausible_gust_rejected() {
        let gust = window(240);
        for _ in 0..240 {
            gust.buffer().add_item(1.0);
        }
        let accepted = gust.gust();
        assert!(accepted > 0.0);

        // 100 pulses per sample for 3 s is ~571 mph
        for _ in 0..12 {
            gust.buffer().add_item(100.0);
        }
        assert_eq!(gust.gust(), accepted);
        assert_eq!(gust.last_accepted(), accepted);
    }

    #[test]
    fn partial_window_counts_each_sample_once() {
        let gust = window(240);
        for _ in 0..4 {
            gust.buffer().add_item(3.0);
        }

        // 12 pulses over a 3 s gust
        let expected = 4.0 * MPH_PER_PULSE_PER_SECOND;
        assert!((gust.gust() - expected).abs() < EPSILON);
    }

    #[test]
    fn speed_uses_configured_span() {
        let buffer = RingBuffer::new(480).unwrap();
        for _ in 0..240 {
            buffer.add_item(1.0);
        }

        // 240 pulses over a 120 s window = 2 pulses/s
        let speed = mean_speed(&buffer, 4, 1.0);
        assert!((speed - 2.0).abs() < EPSILON);
    }

    #[test]
    fn extreme_sampling_params() {
        let params = GustParams {
            samples_per_second: u32::MAX,
            gust_duration_s: u32::MAX,
            ..GustParams::default()
        };
        assert!(params.samples_per_gust() >= u32::MAX as usize);

        // The span clamps to the stored samples
        let gusts = GustWindow::new(RingBuffer::new(4).unwrap(), params);
        for pulses in [3.0, 1.0, 2.0] {
            gusts.buffer().add_item(pulses);
        }
        let gust = gusts.gust();
        assert!(gust.is_finite() && gust >= 0.0);
    }
}
