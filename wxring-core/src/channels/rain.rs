//! Rain gauge channel
//!
//! The gauge is read once a minute and every sample is the number of bucket
//! tips in that minute. Sums roll up into an hourly buffer covering a day and
//! from there into a daily buffer covering thirty days.

use crate::{
    buffer::RingBuffer,
    constants::{
        time::RAIN_RATE_WINDOW_MINS, DAY_SLOTS, HOUR_SLOTS, MINUTES_PER_HOUR, MINUTE_SLOTS,
        MM_PER_BUCKET_TIP,
    },
    errors::BufferResult,
    rollup::AggregateFn,
};

/// Tip counts per minute, hour and day
#[derive(Debug, Clone)]
pub struct RainChannel {
    minutes: RingBuffer,
    hours: RingBuffer,
    days: RingBuffer,
}

impl RainChannel {
    /// Builds the minute → hour → day chain
    pub fn new() -> BufferResult<Self> {
        let minutes = RingBuffer::new(MINUTE_SLOTS)?;
        let hours = RingBuffer::new(HOUR_SLOTS)?;
        let days = RingBuffer::new(DAY_SLOTS)?;

        minutes.set_auto_sum(&hours)?;
        hours.set_auto_sum(&days)?;

        Ok(Self { minutes, hours, days })
    }

    /// Appends one minute's tip count
    pub fn record(&self, tips: u32) {
        self.minutes.add_item(f64::from(tips));
    }

    /// Rainfall in the most recent minute (mm)
    pub fn last_minute_mm(&self) -> f64 {
        self.minutes.last() * MM_PER_BUCKET_TIP
    }

    /// Hourly rain rate extrapolated from the last ten minutes (mm/h)
    pub fn rate_mm_per_hour(&self) -> BufferResult<f64> {
        let recent = self.minutes.summary_last(RAIN_RATE_WINDOW_MINS)?;
        let window_mm = recent.sum * MM_PER_BUCKET_TIP;
        Ok(window_mm * f64::from(MINUTES_PER_HOUR) / RAIN_RATE_WINDOW_MINS as f64)
    }

    /// Rainfall over the hourly buffer, the last 24 completed hours (mm)
    pub fn day_total_mm(&self) -> f64 {
        self.minutes
            .auto_link(AggregateFn::Sum)
            .map_or(0.0, |hours| hours.summary().sum * MM_PER_BUCKET_TIP)
    }

    /// Tips per minute
    pub fn minutes(&self) -> &RingBuffer {
        &self.minutes
    }

    /// Tips per completed hour
    pub fn hours(&self) -> &RingBuffer {
        &self.hours
    }

    /// Tips per completed day
    pub fn days(&self) -> &RingBuffer {
        &self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn rate_from_last_ten_minutes() {
        let rain = RainChannel::new().unwrap();
        for _ in 0..30 {
            rain.record(0);
        }
        for _ in 0..10 {
            rain.record(1);
        }

        // 10 tips in 10 min → 60 tips per hour
        let expected = 60.0 * MM_PER_BUCKET_TIP;
        assert!((rain.rate_mm_per_hour().unwrap() - expected).abs() < EPSILON);
        assert!((rain.last_minute_mm() - MM_PER_BUCKET_TIP).abs() < EPSILON);
    }

    #[test]
    fn rate_before_ten_minutes_of_data() {
        let rain = RainChannel::new().unwrap();
        rain.record(2);

        let expected = 2.0 * MM_PER_BUCKET_TIP * 6.0;
        assert!((rain.rate_mm_per_hour().unwrap() - expected).abs() < EPSILON);
    }

    #[test]
    fn day_total_counts_completed_hours() {
        let rain = RainChannel::new().unwrap();
        assert_eq!(rain.day_total_mm(), 0.0);

        for hour in 0..3 {
            for minute in 0..60 {
                rain.record(u32::from(minute % 10 == 0) * (hour + 1));
            }
        }

        // 6, 12 and 18 tips in the three hours
        assert_eq!(rain.hours().raw_data(), vec![6.0, 12.0, 18.0]);
        assert!((rain.day_total_mm() - 36.0 * MM_PER_BUCKET_TIP).abs() < EPSILON);
        assert!(rain.days().is_empty());
    }

    #[test]
    fn full_day_reaches_daily_buffer() {
        let rain = RainChannel::new().unwrap();
        for _ in 0..(60 * 24) {
            rain.record(1);
        }

        assert_eq!(rain.hours().len(), 24);
        assert_eq!(rain.days().raw_data(), vec![1440.0]);
    }
}
