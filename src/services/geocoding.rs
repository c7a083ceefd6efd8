//! Geocoding via the public Nominatim API

use reqwest::Client;
use serde::Deserialize;

use crate::domain::LocationDetails;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
}

/// Resolve a free-form location string into coordinates and address parts.
///
/// Any failure (network, non-2xx, parse, no results) degrades to `None`.
pub async fn geocode_location(client: &Client, location: &str) -> Option<LocationDetails> {
    match query_nominatim(client, location).await {
        Ok(Some(details)) => Some(details),
        Ok(None) => {
            tracing::warn!(location, "No geocoding results");
            None
        }
        Err(error) => {
            tracing::warn!(location, error = %error, "Geocoding lookup failed");
            None
        }
    }
}

async fn query_nominatim(
    client: &Client,
    location: &str,
) -> anyhow::Result<Option<LocationDetails>> {
    let results: Vec<NominatimResult> = client
        .get(NOMINATIM_URL)
        .query(&[
            ("q", location),
            ("format", "json"),
            ("limit", "1"),
            ("addressdetails", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(LocationDetails {
        lat: first.lat.parse()?,
        lon: first.lon.parse()?,
        display_name: first.display_name.unwrap_or_else(|| location.to_string()),
        state: first.address.state,
        country: first.address.country,
        postal_code: first.address.postcode,
    }))
}
