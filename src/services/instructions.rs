//! Instruction step resolution
//!
//! Live lookup against the WikiHow API, with static per-trade fallbacks. The
//! pipeline's instruct stage guarantees a non-empty step list by
//! substituting [`fallback_steps`] whenever the live lookup comes back
//! empty.

use reqwest::Client;
use serde::Deserialize;

const WIKIHOW_URL: &str = "https://www.wikihow.com/api.php";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    pageid: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ParseEnvelope {
    #[serde(default)]
    parse: Option<ParseResult>,
}

#[derive(Debug, Deserialize)]
struct ParseResult {
    #[serde(default)]
    sections: Vec<ParseSection>,
}

#[derive(Debug, Deserialize)]
struct ParseSection {
    line: Option<String>,
}

/// Fetch step headings for a how-to query. Empty on any failure; the caller
/// decides the fallback.
pub async fn fetch_wikihow_steps(client: &Client, query: &str) -> Vec<String> {
    match lookup_steps(client, query).await {
        Ok(steps) => steps,
        Err(error) => {
            tracing::warn!(query, error = %error, "Instruction lookup failed");
            Vec::new()
        }
    }
}

async fn lookup_steps(client: &Client, query: &str) -> anyhow::Result<Vec<String>> {
    let search: SearchEnvelope = client
        .get(WIKIHOW_URL)
        .query(&[
            ("format", "json"),
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(page_id) = search
        .query
        .map(|q| q.search)
        .unwrap_or_default()
        .into_iter()
        .find_map(|hit| hit.pageid)
    else {
        return Ok(Vec::new());
    };

    let parsed: ParseEnvelope = client
        .get(WIKIHOW_URL)
        .query(&[
            ("format", "json"),
            ("action", "parse"),
            ("pageid", page_id.to_string().as_str()),
            ("prop", "sections"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(parsed
        .parse
        .map(|p| p.sections)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|section| section.line)
        .collect())
}

/// Static instruction list for a trade, or a generic checklist for trades
/// without an entry. Never empty.
pub fn fallback_steps(trade: &str) -> Vec<String> {
    let steps: &[&str] = match trade.to_lowercase().as_str() {
        "concrete" => &[
            "Prepare site by grading and leveling the subbase.",
            "Install forms and reinforcement as specified.",
            "Mix concrete to the required slump.",
            "Pour and screed concrete evenly.",
            "Finish surface and allow proper curing time.",
        ],
        "electrical" => &[
            "Review circuit layout and safety codes.",
            "Shut off power and lock out panel.",
            "Install conduit and pull conductors.",
            "Terminate devices and fixtures.",
            "Test circuits and document results.",
        ],
        "plumbing" => &[
            "Map the drain and supply routing.",
            "Dry-fit pipe runs and check slope.",
            "Cement joints and support the runs.",
            "Connect fixtures and valves.",
            "Pressure-test and inspect for leaks.",
        ],
        "hvac" => &[
            "Size ductwork from the room loads.",
            "Fabricate and hang duct sections.",
            "Set the air handler and run the line set.",
            "Seal joints and insulate runs.",
            "Charge, balance and verify airflow.",
        ],
        "landscaping" => &[
            "Clear and grade the work area.",
            "Amend and till the topsoil.",
            "Place plantings, sod and mulch.",
            "Water in and tamp the surface.",
            "Clean edges and haul off debris.",
        ],
        _ => &[
            "Review project scope.",
            "Gather materials and tools.",
            "Complete work following best practices.",
            "Inspect and clean up site.",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_trade_has_fallback_steps() {
        for trade in crate::trades::supported_trades() {
            assert!(!fallback_steps(trade).is_empty());
        }
    }

    #[test]
    fn unknown_trade_gets_the_generic_checklist() {
        let steps = fallback_steps("masonry");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], "Review project scope.");
    }
}
