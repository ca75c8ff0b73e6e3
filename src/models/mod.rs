//! Data models for the forecast application
//!
//! - Forecast: raw 3-hour samples as delivered by the upstream API
//! - Daily: the per-day representative forecast handed to the display

pub mod daily;
pub mod forecast;

pub use daily::DailyForecast;
pub use forecast::{ForecastResponse, MainReadings, RawForecastEntry};
