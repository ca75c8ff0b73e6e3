//! Forecast API client for OpenWeatherMap
//!
//! Performs one `GET {base_url}/forecast?q=..&appid=..` per search and
//! decodes the body through the explicit schema in [`crate::models`].
//! No retries: every user action is a single attempt.

use crate::config::ForecastConfig;
use crate::models::ForecastResponse;
use crate::{ForecastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Anything that can produce a raw forecast for a city
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse>;
}

/// HTTP client for the OpenWeatherMap 5 day / 3 hour forecast
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a new client from configuration
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("city-forecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForecastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build the request URL for a city
    #[must_use]
    pub fn forecast_url(&self, city: &str) -> String {
        format!(
            "{}/forecast?q={}&appid={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Strip the API key from a URL before it reaches the logs
fn redact(url: &str) -> &str {
    url.split("&appid=").next().unwrap_or(url)
}

#[async_trait]
impl ForecastSource for WeatherApiClient {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse> {
        let url = self.forecast_url(city);
        debug!("Forecast request URL: {}", redact(&url));
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            // The error text would otherwise carry the URL and its appid.
            let e = e.without_url();
            warn!("Network error for '{}': {}", city, e);
            ForecastError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast request for '{}' failed with status {}", city, status);
            return Err(ForecastError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForecastError::network(e.without_url().to_string()))?;

        let forecast: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse forecast response for '{}': {}", city, e);
            ForecastError::schema(e.to_string())
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved {} forecast samples for '{}' in {:.3}s",
            forecast.list.len(),
            city,
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(forecast)
    }
}
