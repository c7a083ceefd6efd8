//! Trade profile registry
//!
//! Static mapping from trade name to its configuration profile. Profiles are
//! process-wide immutable constants built once on first access; lookup is
//! case-insensitive. An unknown trade is the pipeline's only user-facing
//! rejection.

pub mod profile;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

pub use profile::{CalculationBasis, DefaultDimensions, MaterialHeuristic, Rounding, TradeProfile};

/// Concrete bag yield in cubic feet per 80 lb bag.
const BAG_YIELD_CUFT: f64 = 0.6;

static REGISTRY: OnceLock<HashMap<&'static str, TradeProfile>> = OnceLock::new();

/// Case-insensitive profile lookup.
pub fn get_profile(trade: &str) -> Option<&'static TradeProfile> {
    registry().get(trade.trim().to_lowercase().as_str())
}

/// Names of all registered trades, sorted.
pub fn supported_trades() -> Vec<&'static str> {
    let mut trades: Vec<&'static str> = registry().keys().copied().collect();
    trades.sort_unstable();
    trades
}

/// Summary of one registered trade, as exposed by the catalog endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TradeInfo {
    pub trade: &'static str,
    pub basis: CalculationBasis,
    pub default_materials: Vec<String>,
    pub default_margin: f64,
}

impl From<&TradeProfile> for TradeInfo {
    fn from(profile: &TradeProfile) -> Self {
        Self {
            trade: profile.trade,
            basis: profile.basis,
            default_materials: profile
                .default_materials
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_margin: profile.default_margin,
        }
    }
}

/// Catalog of all registered trades, sorted by name.
pub fn trade_catalog() -> Vec<TradeInfo> {
    supported_trades()
        .into_iter()
        .filter_map(get_profile)
        .map(TradeInfo::from)
        .collect()
}

fn registry() -> &'static HashMap<&'static str, TradeProfile> {
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> HashMap<&'static str, TradeProfile> {
    let profiles = [
        TradeProfile::new(
            "concrete",
            &["concrete mix", "rebar", "gravel"],
            0.15,
            CalculationBasis::Volume,
            "volume_cy",
            6.0,
            4.0,
            0.10,
            "pour concrete slab",
            DefaultDimensions {
                length: 10.0,
                width: 10.0,
                depth: 0.33,
            },
            vec![
                (
                    "concrete mix",
                    MaterialHeuristic::new("volume_cuft", 1.0 / BAG_YIELD_CUFT, "bag")
                        .min(1.0)
                        .round_up()
                        .precision(0),
                ),
                (
                    "rebar",
                    MaterialHeuristic::new("volume_cy", 30.0, "ft").precision(0),
                ),
                (
                    "gravel",
                    MaterialHeuristic::new("volume_cy", 100.0, "lb").precision(0),
                ),
            ],
        ),
        TradeProfile::new(
            "electrical",
            &["romex wire", "outlet boxes", "breakers"],
            0.18,
            CalculationBasis::Area,
            "area_sqft",
            0.05,
            2.0,
            0.12,
            "rough in electrical wiring",
            DefaultDimensions {
                length: 20.0,
                width: 15.0,
                depth: 0.0,
            },
            vec![
                (
                    "romex wire",
                    MaterialHeuristic::new("area_sqft", 1.4, "ft").precision(0),
                ),
                (
                    "outlet boxes",
                    MaterialHeuristic::new("area_sqft", 0.02, "box")
                        .min(2.0)
                        .round_up()
                        .precision(0),
                ),
                (
                    "breakers",
                    MaterialHeuristic::new("area_sqft", 0.004, "unit")
                        .base(1.0)
                        .round_up()
                        .precision(0),
                ),
            ],
        ),
        TradeProfile::new(
            "plumbing",
            &["pvc pipe", "fittings", "pipe cement"],
            0.17,
            CalculationBasis::Linear,
            "linear_ft",
            0.3,
            3.0,
            0.10,
            "install pvc drain line",
            DefaultDimensions {
                length: 15.0,
                width: 10.0,
                depth: 0.0,
            },
            vec![
                (
                    "pvc pipe",
                    MaterialHeuristic::new("linear_ft", 1.1, "ft").precision(0),
                ),
                (
                    "fittings",
                    MaterialHeuristic::new("linear_ft", 0.25, "unit")
                        .min(4.0)
                        .round_up()
                        .precision(0),
                ),
                (
                    "pipe cement",
                    MaterialHeuristic::new("linear_ft", 0.01, "can")
                        .base(1.0)
                        .round_up()
                        .precision(0),
                ),
            ],
        ),
        TradeProfile::new(
            "hvac",
            &["ductwork", "vents", "refrigerant line"],
            0.20,
            CalculationBasis::Area,
            "area_sqft",
            0.08,
            4.0,
            0.15,
            "install hvac ductwork",
            DefaultDimensions {
                length: 25.0,
                width: 20.0,
                depth: 0.0,
            },
            vec![
                (
                    "ductwork",
                    MaterialHeuristic::new("area_sqft", 0.35, "ft").precision(0),
                ),
                (
                    "vents",
                    MaterialHeuristic::new("area_sqft", 0.012, "unit")
                        .min(2.0)
                        .round_up()
                        .precision(0),
                ),
                (
                    "refrigerant line",
                    MaterialHeuristic::new("area_sqft", 0.01, "ft")
                        .base(25.0)
                        .precision(0),
                ),
            ],
        ),
        TradeProfile::new(
            "landscaping",
            &["topsoil", "mulch", "sod"],
            0.12,
            CalculationBasis::Area,
            "area_sqft",
            0.04,
            2.0,
            0.08,
            "landscape a backyard",
            DefaultDimensions {
                length: 30.0,
                width: 20.0,
                depth: 0.25,
            },
            vec![
                (
                    "topsoil",
                    MaterialHeuristic::new("volume_cy", 1.0, "cy")
                        .min(1.0)
                        .precision(1),
                ),
                (
                    "mulch",
                    MaterialHeuristic::new("area_sqft", 0.012, "bag")
                        .round_up()
                        .precision(0),
                ),
                (
                    "sod",
                    MaterialHeuristic::new("area_sqft", 1.05, "sqft").precision(0),
                ),
            ],
        ),
    ];

    profiles
        .into_iter()
        .map(|profile| (profile.trade, profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_profile("concrete").is_some());
        assert!(get_profile("Concrete").is_some());
        assert!(get_profile("  HVAC ").is_some());
    }

    #[test]
    fn unknown_trade_is_none() {
        assert!(get_profile("carpentry").is_none());
        assert!(get_profile("").is_none());
    }

    #[test]
    fn all_trades_registered() {
        assert_eq!(
            supported_trades(),
            vec!["concrete", "electrical", "hvac", "landscaping", "plumbing"]
        );
    }

    #[test]
    fn heuristic_lookup_normalizes_name() {
        let profile = get_profile("concrete").unwrap();
        assert!(profile.heuristic("Concrete Mix").is_some());
        assert!(profile.heuristic(" rebar ").is_some());
        assert!(profile.heuristic("unknown").is_none());
    }

    #[test]
    fn catalog_reports_basis_and_defaults_per_trade() {
        let catalog = trade_catalog();
        assert_eq!(catalog.len(), 5);

        let concrete = catalog.iter().find(|t| t.trade == "concrete").unwrap();
        assert_eq!(concrete.basis, CalculationBasis::Volume);
        assert_eq!(
            concrete.default_materials,
            vec!["concrete mix", "rebar", "gravel"]
        );
        assert_eq!(concrete.default_margin, 0.15);

        let plumbing = catalog.iter().find(|t| t.trade == "plumbing").unwrap();
        assert_eq!(plumbing.basis, CalculationBasis::Linear);
    }

    #[test]
    fn margins_and_rates_are_fractions() {
        for trade in supported_trades() {
            let profile = get_profile(trade).unwrap();
            assert!(profile.default_margin > 0.0 && profile.default_margin < 1.0);
            assert!(profile.overhead_rate > 0.0 && profile.overhead_rate < 1.0);
            assert!(profile.min_labor_hours > 0.0);
            assert!(!profile.default_materials.is_empty());
        }
    }
}
