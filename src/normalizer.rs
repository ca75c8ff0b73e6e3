//! Reduce a 3-hourly forecast series to one representative entry per day

use crate::models::{DailyForecast, RawForecastEntry};
use crate::{ForecastError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Maximum number of days handed to the display layer
pub const MAX_DAYS: usize = 5;

/// Groups raw samples by calendar date, keeping the first sample of each day
pub struct ForecastNormalizer;

impl ForecastNormalizer {
    /// Normalize raw samples into at most [`MAX_DAYS`] daily forecasts.
    ///
    /// Days appear in the order their first sample appears in `entries`.
    /// Every entry is checked, so a bad timestamp anywhere in the series
    /// fails the whole call with [`ForecastError::MalformedEntry`].
    pub fn normalize(entries: &[RawForecastEntry]) -> Result<Vec<DailyForecast>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut daily = Vec::new();

        for entry in entries {
            let date = entry
                .date_key()
                .ok_or_else(|| ForecastError::MalformedEntry {
                    timestamp: entry.timestamp_text.clone(),
                })?;

            if seen.insert(date) {
                daily.push(DailyForecast::from_readings(date, &entry.main));
            }
        }

        debug!(
            "Normalized {} samples into {} distinct days",
            entries.len(),
            daily.len()
        );

        daily.truncate(MAX_DAYS);
        Ok(daily)
    }
}
