//! Per-Quantity Buffer Trees
//!
//! Every measured quantity owns one tree of [`RingBuffer`](crate::RingBuffer)s,
//! built once at startup with its final capacities and links. One producer task
//! feeds the root of each tree at the quantity's cadence; readers query any node
//! at any time.
//!
//! | Quantity | Root buffer | Rollups |
//! |---|---|---|
//! | Temperature, humidity, pressure | 60 × 1 min | average, min, max → 24 × 1 h |
//! | Rain | 60 × 1 min tips | sum → 24 × 1 h → sum → 30 × 1 day |
//! | Wind speed | f × 120 s pulses | none |
//! | Wind gust | f × 600 s pulses | none, read through a gust window |
//! | Wind direction | f × 120 s headings | none |

pub mod atmospheric;
pub mod rain;
pub mod wind;

pub use atmospheric::{Atmosphere, AtmosphericChannel, AtmosphericReading};
pub use rain::RainChannel;
pub use wind::{vane_heading, WindChannel, WindConfig};

/// A measured quantity with its own buffer tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quantity {
    /// Air temperature (°C)
    Temperature,
    /// Relative humidity (%)
    Humidity,
    /// Station pressure (hPa)
    Pressure,
    /// Rain bucket tips
    Rain,
    /// Anemometer pulses, mean speed
    WindSpeed,
    /// Anemometer pulses, gust
    WindGust,
    /// Vane heading (degrees)
    WindDirection,
}

impl Quantity {
    /// Every quantity, in reporting order
    pub const ALL: [Quantity; 7] = [
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Pressure,
        Quantity::Rain,
        Quantity::WindSpeed,
        Quantity::WindGust,
        Quantity::WindDirection,
    ];

    /// Stable label used in logs and exported metric names
    pub const fn label(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Pressure => "pressure",
            Quantity::Rain => "rain",
            Quantity::WindSpeed => "wind_speed",
            Quantity::WindGust => "wind_gust",
            Quantity::WindDirection => "wind_direction",
        }
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Quantity::ALL.iter().map(|q| q.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Quantity::ALL.len());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Quantity::WindGust.to_string(), "wind_gust");
    }
}
