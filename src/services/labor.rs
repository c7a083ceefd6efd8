//! Labor rate resolution via BLS public datasets
//!
//! Tries the Bureau of Labor Statistics timeseries API for the trade's
//! occupation, then falls back to a hardcoded national-average table. The
//! resolved rate is always usable.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const BLS_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Hourly rate used when a trade has no entry in the fallback table.
const DEFAULT_HOURLY_RATE: f64 = 25.0;

#[derive(Debug, Deserialize)]
struct BlsResponse {
    #[serde(rename = "Results", default)]
    results: Option<BlsResults>,
}

#[derive(Debug, Deserialize)]
struct BlsResults {
    #[serde(default)]
    series: Vec<BlsSeries>,
}

#[derive(Debug, Deserialize)]
struct BlsSeries {
    #[serde(default)]
    data: Vec<BlsDataPoint>,
}

#[derive(Debug, Deserialize)]
struct BlsDataPoint {
    value: Option<String>,
}

/// SOC occupation code for a trade (construction laborers when unknown).
fn occupation_code(trade: &str) -> &'static str {
    match trade.to_lowercase().as_str() {
        "electrical" => "472111",
        "plumbing" => "472152",
        "hvac" => "499021",
        "landscaping" => "372011",
        _ => "472061",
    }
}

/// National average hourly rates, used when the live lookup yields nothing.
fn fallback_rate(trade: &str) -> f64 {
    match trade.to_lowercase().as_str() {
        "concrete" => 24.50,
        "electrical" => 32.25,
        "plumbing" => 30.40,
        "hvac" => 28.10,
        "landscaping" => 20.75,
        _ => DEFAULT_HOURLY_RATE,
    }
}

/// Resolve the hourly labor rate for a trade.
///
/// The BLS lookup uses the national occupation series; `state` is part of
/// the contract and reserved for area-level series.
pub async fn resolve_trade_labor_rate(
    client: &Client,
    api_key: Option<&str>,
    trade: &str,
    _state: Option<&str>,
) -> f64 {
    match fetch_bls_labor_rate(client, api_key, occupation_code(trade)).await {
        Ok(Some(rate)) if rate > 0.0 => rate,
        Ok(_) => {
            tracing::debug!(trade, "No BLS rate available, using national average");
            fallback_rate(trade)
        }
        Err(error) => {
            tracing::warn!(trade, error = %error, "BLS lookup failed, using national average");
            fallback_rate(trade)
        }
    }
}

async fn fetch_bls_labor_rate(
    client: &Client,
    api_key: Option<&str>,
    occupation_code: &str,
) -> anyhow::Result<Option<f64>> {
    let series_id = format!("OEUN0000000000000{occupation_code}");
    let mut payload = json!({ "seriesid": [series_id] });
    if let Some(key) = api_key {
        payload["registrationkey"] = json!(key);
    }

    let response: BlsResponse = client
        .post(BLS_URL)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let rate = response
        .results
        .and_then(|results| results.series.into_iter().next())
        .and_then(|series| series.data.into_iter().next())
        .and_then(|point| point.value)
        .and_then(|value| value.parse::<f64>().ok());

    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_trade_has_a_positive_fallback() {
        for trade in ["concrete", "electrical", "plumbing", "hvac", "landscaping"] {
            assert!(fallback_rate(trade) > 0.0);
        }
        assert_eq!(fallback_rate("masonry"), DEFAULT_HOURLY_RATE);
    }

    #[test]
    fn occupation_codes_are_trade_specific() {
        assert_eq!(occupation_code("electrical"), "472111");
        assert_eq!(occupation_code("ELECTRICAL"), "472111");
        assert_eq!(occupation_code("unknown"), "472061");
    }
}
