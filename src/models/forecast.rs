//! Upstream forecast payload
//!
//! These types are the explicit schema for `GET /forecast`. Fields the
//! screen does not use (`cod`, `city`, `weather`, `wind`, ...) are ignored;
//! a missing or mistyped field fails deserialization as a whole.

use serde::{Deserialize, Serialize};

/// Body of a successful forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// 3-hour samples in chronological order
    pub list: Vec<RawForecastEntry>,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    /// Date and time text, e.g. `2024-05-01 12:00:00`
    #[serde(rename = "dt_txt")]
    pub timestamp_text: String,
    /// Numeric readings for this sample
    pub main: MainReadings,
}

/// Readings forwarded untouched to the display layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Minimum temperature in Kelvin
    pub temp_min: f64,
    /// Maximum temperature in Kelvin
    pub temp_max: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

impl RawForecastEntry {
    /// Create a new sample
    #[must_use]
    pub fn new(timestamp_text: impl Into<String>, main: MainReadings) -> Self {
        Self {
            timestamp_text: timestamp_text.into(),
            main,
        }
    }

    /// Calendar date prefix of the timestamp, if it has one
    #[must_use]
    pub fn date_key(&self) -> Option<&str> {
        match self.timestamp_text.split_once(' ') {
            Some((date, _)) if !date.is_empty() => Some(date),
            _ => None,
        }
    }
}
