//! Per-day forecast model and display methods

use super::MainReadings;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Representative forecast for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar date key (`YYYY-MM-DD`)
    pub date: String,
    /// Minimum temperature in Kelvin
    pub temp_min: f64,
    /// Maximum temperature in Kelvin
    pub temp_max: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

impl DailyForecast {
    /// Build a daily forecast from the readings of one sample
    #[must_use]
    pub fn from_readings(date: impl Into<String>, readings: &MainReadings) -> Self {
        Self {
            date: date.into(),
            temp_min: readings.temp_min,
            temp_max: readings.temp_max,
            pressure: readings.pressure,
            humidity: readings.humidity,
        }
    }

    /// Day of week for the date key, `None` if it is not a calendar date
    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .map(|date| date.weekday())
    }

    /// Format a temperature with its unit
    #[must_use]
    pub fn format_temperature(kelvin: f64) -> String {
        format!("{kelvin}K")
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{} hPa", self.pressure)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }
}
