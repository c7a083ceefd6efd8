//! Weather-based cost modifier via OpenWeatherMap

use reqwest::Client;
use serde::Deserialize;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Comfortable working temperature; cost adjusts with deviation from it.
const BASELINE_TEMP_F: f64 = 65.0;
const MAX_MODIFIER: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<WeatherMain>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: Option<f64>,
}

/// Fetch a cost modifier in [0, 0.1] from the current temperature at the
/// given coordinates: 1% per degree of deviation from 65°F, capped at 10%.
///
/// `None` without an API key or on any failure; the pipeline treats that as
/// a modifier of exactly 0.0.
pub async fn fetch_weather_modifier(
    client: &Client,
    api_key: Option<&str>,
    lat: f64,
    lon: f64,
) -> Option<f64> {
    let api_key = api_key?;

    let temperature = match query_temperature(client, api_key, lat, lon).await {
        Ok(temp) => temp?,
        Err(error) => {
            tracing::warn!(lat, lon, error = %error, "Weather lookup failed");
            return None;
        }
    };

    let deviation = (temperature - BASELINE_TEMP_F).abs();
    Some((deviation / 100.0).min(MAX_MODIFIER))
}

async fn query_temperature(
    client: &Client,
    api_key: &str,
    lat: f64,
    lon: f64,
) -> anyhow::Result<Option<f64>> {
    let response: WeatherResponse = client
        .get(OPENWEATHER_URL)
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
            ("units", "imperial".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.main.and_then(|main| main.temp))
}
