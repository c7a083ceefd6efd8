//! Trade configuration profiles
//!
//! A `TradeProfile` is an immutable configuration value describing how one
//! construction trade estimates a job: default materials, margin, the metric
//! labor scales with, overhead, and per-material quantity heuristics. All
//! trades share a single generic pipeline implementation that consumes these
//! values; there is no per-trade code.

use std::collections::HashMap;

use serde::Serialize;

/// The dimensional basis a trade estimates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationBasis {
    Volume,
    Area,
    Linear,
}

/// How a derived quantity is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Ceiling: you can't buy four fifths of a bag.
    Up,
    /// Round to the heuristic's decimal precision.
    Nearest,
}

/// Rule deriving a material quantity from a dimensional metric.
///
/// `quantity = base_quantity + metric_value × multiplier`, floored at
/// `min_quantity` when set, then rounded. Precision 0 means whole units.
#[derive(Debug, Clone)]
pub struct MaterialHeuristic {
    pub metric: &'static str,
    pub multiplier: f64,
    pub base_quantity: f64,
    pub min_quantity: Option<f64>,
    pub rounding: Rounding,
    pub precision: u32,
    pub unit: &'static str,
}

impl MaterialHeuristic {
    pub fn new(metric: &'static str, multiplier: f64, unit: &'static str) -> Self {
        Self {
            metric,
            multiplier,
            base_quantity: 0.0,
            min_quantity: None,
            rounding: Rounding::Nearest,
            precision: 2,
            unit,
        }
    }

    pub fn base(mut self, base_quantity: f64) -> Self {
        self.base_quantity = base_quantity;
        self
    }

    pub fn min(mut self, min_quantity: f64) -> Self {
        self.min_quantity = Some(min_quantity);
        self
    }

    pub fn round_up(mut self) -> Self {
        self.rounding = Rounding::Up;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

/// Default length/width/depth in feet, applied field-by-field when the
/// caller's input is missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct DefaultDimensions {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
}

/// Immutable per-trade configuration.
#[derive(Debug, Clone)]
pub struct TradeProfile {
    pub trade: &'static str,
    pub default_materials: &'static [&'static str],
    pub default_margin: f64,
    pub basis: CalculationBasis,
    pub labor_metric: &'static str,
    pub labor_hours_per_unit: f64,
    pub min_labor_hours: f64,
    pub overhead_rate: f64,
    pub instruction_query: &'static str,
    pub default_dimensions: DefaultDimensions,
    heuristics: HashMap<&'static str, MaterialHeuristic>,
}

impl TradeProfile {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        trade: &'static str,
        default_materials: &'static [&'static str],
        default_margin: f64,
        basis: CalculationBasis,
        labor_metric: &'static str,
        labor_hours_per_unit: f64,
        min_labor_hours: f64,
        overhead_rate: f64,
        instruction_query: &'static str,
        default_dimensions: DefaultDimensions,
        heuristics: Vec<(&'static str, MaterialHeuristic)>,
    ) -> Self {
        Self {
            trade,
            default_materials,
            default_margin,
            basis,
            labor_metric,
            labor_hours_per_unit,
            min_labor_hours,
            overhead_rate,
            instruction_query,
            default_dimensions,
            heuristics: heuristics.into_iter().collect(),
        }
    }

    /// Look up the heuristic for a material, by lowercased name.
    pub fn heuristic(&self, material: &str) -> Option<&MaterialHeuristic> {
        self.heuristics.get(material.trim().to_lowercase().as_str())
    }
}
