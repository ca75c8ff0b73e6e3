//! `city-forecast` - five-day weather forecast for a city
//!
//! Fetches the OpenWeatherMap 3-hourly forecast for a city name and reduces
//! it to one representative entry per calendar day for display.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod session;

// Re-export core types for public API
pub use api::{ForecastSource, WeatherApiClient};
pub use config::ForecastConfig;
pub use error::ForecastError;
pub use models::{DailyForecast, ForecastResponse, RawForecastEntry};
pub use normalizer::{ForecastNormalizer, MAX_DAYS};
pub use session::{SearchOutcome, SearchSession, SearchState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
