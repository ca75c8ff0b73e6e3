//! Text rendering of the forecast screen

use crate::models::DailyForecast;
use crate::session::SearchState;

const CELL_WIDTH: usize = 16;

/// Render one day as a small table
#[must_use]
pub fn render_day(day: &DailyForecast) -> String {
    let header = match day.weekday() {
        Some(weekday) => format!("Date: {} ({weekday})", day.date),
        None => format!("Date: {}", day.date),
    };
    let rule = "-".repeat(CELL_WIDTH * 2 + 3);
    let wide = CELL_WIDTH * 2 - 1;
    let w = CELL_WIDTH - 1;

    let rows = [
        rule.clone(),
        format!("| {header:^wide$} |"),
        rule.clone(),
        format!("| {:^wide$} |", "Temperature"),
        format!("| {:^w$}| {:^w$}|", "Min", "Max"),
        format!(
            "| {:^w$}| {:^w$}|",
            DailyForecast::format_temperature(day.temp_min),
            DailyForecast::format_temperature(day.temp_max)
        ),
        format!("| {:<w$}| {:^w$}|", "Pressure", day.format_pressure()),
        format!("| {:<w$}| {:^w$}|", "Humidity", day.format_humidity()),
        rule,
    ];
    rows.join("\n")
}

/// Render the whole screen state
#[must_use]
pub fn render_state(city: &str, state: &SearchState) -> String {
    let mut out = format!("Weather in {city}\n");

    if state.loading {
        out.push_str("Loading...\n");
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {error}\n"));
    }
    for day in &state.forecasts {
        out.push('\n');
        out.push_str(&render_day(day));
        out.push('\n');
    }
    if !state.loading && state.error.is_none() && state.forecasts.is_empty() {
        out.push_str("No forecast data available\n");
    }
    out
}
