//! Status snapshot published to the status endpoint and metrics exporter
//!
//! Field names on the wire match the JSON the station has always served.
//! Channels that are switched off are left out of the JSON entirely.

use serde::Serialize;

use crate::station::StationChannels;

/// Point-in-time view of every enabled channel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// Latest air temperature (°C)
    #[serde(rename = "hiResTemp_C", skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Latest relative humidity (%)
    #[serde(rename = "humidity_RH", skip_serializing_if = "Option::is_none")]
    pub humidity_rh: Option<f64>,
    /// Latest station pressure (hPa)
    #[serde(rename = "pressure_hPa", skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<f64>,
    /// Rain in the most recent minute (mm)
    #[serde(rename = "rain_rate", skip_serializing_if = "Option::is_none")]
    pub rain_last_minute_mm: Option<f64>,
    /// Hourly rain rate from the last ten minutes (mm/h)
    #[serde(rename = "rain_mm_hr", skip_serializing_if = "Option::is_none")]
    pub rain_rate_mm_hr: Option<f64>,
    /// Rain over the last 24 completed hours (mm)
    #[serde(rename = "rain_day_mm", skip_serializing_if = "Option::is_none")]
    pub rain_day_mm: Option<f64>,
    /// Mean heading over the speed window (degrees)
    #[serde(rename = "wind_dir", skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<f64>,
    /// Mean speed over the speed window (mph)
    #[serde(rename = "wind_speed", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Mean speed over the gust window (mph)
    #[serde(rename = "wind_speed_avg", skip_serializing_if = "Option::is_none")]
    pub wind_speed_avg: Option<f64>,
    /// Strongest plausible gust in the gust window (mph)
    #[serde(rename = "wind_gust", skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
}

impl StatusReport {
    /// Reads every enabled channel
    pub fn capture(channels: &StationChannels) -> Self {
        let mut report = Self::default();

        if let Some(atmosphere) = &channels.atmosphere {
            let current = atmosphere.current();
            report.temperature_c = Some(current.temperature_c);
            report.humidity_rh = Some(current.humidity_rh);
            report.pressure_hpa = Some(current.pressure_hpa);
        }

        if let Some(rain) = &channels.rain {
            report.rain_last_minute_mm = Some(rain.last_minute_mm());
            report.rain_rate_mm_hr = rain.rate_mm_per_hour().ok();
            report.rain_day_mm = Some(rain.day_total_mm());
        }

        if let Some(wind) = &channels.wind {
            report.wind_dir = Some(wind.direction());
            report.wind_speed = Some(wind.speed());
            report.wind_speed_avg = Some(wind.gust_window().speed());
            report.wind_gust = Some(wind.gust());
        }

        report
    }

    /// Renders the report as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// One-line summary for the log
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();

        if let (Some(t), Some(rh), Some(p)) =
            (self.temperature_c, self.humidity_rh, self.pressure_hpa)
        {
            parts.push(format!("Temp [{t:.2}] Humidity [{rh:.2}] Pressure [{p:.2}]"));
        }
        if let (Some(minute), Some(rate), Some(day)) =
            (self.rain_last_minute_mm, self.rain_rate_mm_hr, self.rain_day_mm)
        {
            parts.push(format!(
                "Rain [{minute:.2}] -> hourly rate [{rate:.2}], 24 hour total [{day:.2}]"
            ));
        }
        if let (Some(speed), Some(gust), Some(dir)) =
            (self.wind_speed, self.wind_gust, self.wind_dir)
        {
            parts.push(format!("Wind Avg [{speed:.2}] Gust [{gust:.2}] Winddir [{dir:.0}]"));
        }

        if parts.is_empty() {
            "no channels enabled".to_string()
        } else {
            parts.join(" | ")
        }
    }
}
