//! Material unit-cost resolution
//!
//! Tries a live retail search first, then an offline baseline price table.
//! Every requested material resolves to some price, so downstream line-item
//! math never sees a missing entry. Materials absent from both sources get a
//! unit cost of 0.0; a zero-cost line item is permitted.

use reqwest::Client;
use serde::Deserialize;

const SEARCH_URL: &str = "https://www.build.com/api/search/v1";

/// Offline baseline unit prices (USD) keyed by lowercased material name.
const BASELINE_PRICES: &[(&str, f64)] = &[
    ("concrete mix", 6.50),
    ("rebar", 0.85),
    ("gravel", 0.06),
    ("romex wire", 0.45),
    ("outlet boxes", 1.25),
    ("breakers", 12.00),
    ("pvc pipe", 1.10),
    ("fittings", 2.30),
    ("pipe cement", 7.95),
    ("ductwork", 4.80),
    ("vents", 11.50),
    ("refrigerant line", 3.20),
    ("topsoil", 32.00),
    ("mulch", 3.75),
    ("sod", 0.65),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    price: Option<f64>,
}

/// Baseline price for a material, if the table knows it.
pub fn baseline_price(material: &str) -> Option<f64> {
    let needle = material.trim().to_lowercase();
    BASELINE_PRICES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, price)| *price)
}

/// Offline price for a material: the baseline table entry, or 0.0 when the
/// material is unknown.
pub fn offline_price(material: &str) -> f64 {
    baseline_price(material).unwrap_or(0.0)
}

/// Resolve a unit cost for every requested material, preserving request
/// order. Live search → baseline table → 0.0.
pub async fn resolve_material_costs(client: &Client, materials: &[String]) -> Vec<(String, f64)> {
    let mut costs = Vec::with_capacity(materials.len());
    for material in materials {
        let price = match search_material_price(client, material).await {
            Some(price) => price,
            None => offline_price(material),
        };
        costs.push((material.clone(), price));
    }
    costs
}

async fn search_material_price(client: &Client, query: &str) -> Option<f64> {
    let result: anyhow::Result<SearchResponse> = async {
        Ok(client
            .get(SEARCH_URL)
            .query(&[("q", query), ("sort", "relevance"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    .await;

    match result {
        Ok(response) => response.results.into_iter().next().and_then(|r| r.price),
        Err(error) => {
            tracing::warn!(query, error = %error, "Material price lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_covers_every_profile_default_material() {
        for trade in crate::trades::supported_trades() {
            let profile = crate::trades::get_profile(trade).unwrap();
            for material in profile.default_materials {
                assert!(
                    baseline_price(material).is_some(),
                    "no baseline price for {material}"
                );
            }
        }
    }

    #[test]
    fn baseline_lookup_normalizes_case() {
        assert_eq!(baseline_price("Concrete Mix"), Some(6.50));
        assert_eq!(baseline_price(" REBAR "), Some(0.85));
        assert_eq!(baseline_price("unobtainium"), None);
    }

    #[test]
    fn unknown_material_resolves_to_zero_cost() {
        assert_eq!(offline_price("unobtainium ingot"), 0.0);
        assert_eq!(offline_price("topsoil"), 32.00);
    }
}
