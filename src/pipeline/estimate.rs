//! Material quantity heuristics and bid aggregation
//!
//! Pure computation: derives per-material quantities and costs from the
//! dimensional metrics and the profile's heuristics, then aggregates
//! materials, labor, overhead, weather and profit into the final total. Each
//! aggregation step rounds its own output to 2 decimals (margin to 4). The
//! ordering is load-bearing: the weather modifier applies before profit.

use crate::domain::{CostBreakdown, LaborBreakdown, MaterialLineItem, ProjectMetrics};
use crate::trades::{MaterialHeuristic, Rounding, TradeProfile};

/// Round half away from zero at the given decimal precision.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Resolve a metric value with the degradation chain named-metric →
/// volume_cy → area_sqft → 1.0. Never returns zero, so quantity and labor
/// derivation are always computable.
pub fn resolve_metric(metrics: &ProjectMetrics, name: &str) -> f64 {
    for candidate in [metrics.metric(name), Some(metrics.volume_cy), Some(metrics.area_sqft)]
        .into_iter()
        .flatten()
    {
        if candidate > 0.0 {
            return candidate;
        }
    }
    1.0
}

/// Implicit heuristic for materials the profile doesn't know about.
fn default_heuristic(profile: &TradeProfile) -> MaterialHeuristic {
    MaterialHeuristic::new(profile.labor_metric, 1.0, "unit")
}

fn derive_quantity(heuristic: &MaterialHeuristic, metrics: &ProjectMetrics) -> f64 {
    let metric_value = resolve_metric(metrics, heuristic.metric);
    let mut quantity = heuristic.base_quantity + metric_value * heuristic.multiplier;
    if let Some(min) = heuristic.min_quantity {
        quantity = quantity.max(min);
    }
    quantity = match heuristic.rounding {
        Rounding::Up => quantity.ceil(),
        Rounding::Nearest => round_to(quantity, heuristic.precision),
    };
    if heuristic.precision == 0 {
        quantity = quantity.trunc();
    }
    quantity
}

/// Build the material line items from resolved unit costs.
///
/// `costs` is ordered; one line item is produced per entry, in order. A unit
/// cost of zero is permitted and simply yields a zero-cost line.
pub fn material_line_items(
    profile: &TradeProfile,
    metrics: &ProjectMetrics,
    costs: &[(String, f64)],
) -> Vec<MaterialLineItem> {
    costs
        .iter()
        .map(|(name, unit_cost)| {
            let fallback = default_heuristic(profile);
            let heuristic = profile.heuristic(name).unwrap_or(&fallback);
            let quantity = derive_quantity(heuristic, metrics);
            MaterialLineItem {
                name: name.clone(),
                quantity,
                unit: heuristic.unit.to_string(),
                unit_cost: round2(*unit_cost),
                total_cost: round2(quantity * unit_cost),
            }
        })
        .collect()
}

/// Aggregated totals produced by [`aggregate_bid`].
#[derive(Debug, Clone)]
pub struct BidTotals {
    pub material_total: f64,
    pub labor: LaborBreakdown,
    pub overhead: f64,
    pub profit_margin: f64,
    pub profit_amount: f64,
    pub total_bid: f64,
    pub cost_breakdown: CostBreakdown,
}

/// Combine material, labor, overhead, weather and profit in fixed order.
pub fn aggregate_bid(
    profile: &TradeProfile,
    metrics: &ProjectMetrics,
    items: &[MaterialLineItem],
    labor_rate: f64,
    weather_modifier: f64,
    margin: f64,
) -> BidTotals {
    let material_total = round2(items.iter().map(|item| item.total_cost).sum());

    let labor_metric = resolve_metric(metrics, profile.labor_metric);
    let labor_hours = round2(
        (labor_metric * profile.labor_hours_per_unit).max(profile.min_labor_hours),
    );
    let labor_total = round2(labor_hours * labor_rate);

    let overhead = round2((material_total + labor_total) * profile.overhead_rate);
    let subtotal = round2(material_total + labor_total + overhead);
    let weather_adjusted = round2(subtotal * (1.0 + weather_modifier));

    let profit_margin = round4(margin);
    let profit_amount = round2(weather_adjusted * profit_margin);
    let total_bid = round2(weather_adjusted + profit_amount);

    BidTotals {
        material_total,
        labor: LaborBreakdown {
            hours: labor_hours,
            rate: round2(labor_rate),
            total: labor_total,
        },
        overhead,
        profit_margin,
        profit_amount,
        total_bid,
        cost_breakdown: CostBreakdown {
            materials: material_total,
            labor: labor_total,
            overhead,
            subtotal,
            weather_modifier,
            weather_adjusted_subtotal: weather_adjusted,
            profit: profit_amount,
            total: total_bid,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trades;

    fn metrics(length: f64, width: f64, depth: f64) -> ProjectMetrics {
        let area = length * width;
        let volume_cuft = area * depth;
        ProjectMetrics {
            length_ft: length,
            width_ft: width,
            depth_ft: depth,
            area_sqft: area,
            linear_ft: 2.0 * (length + width),
            volume_cuft,
            volume_cy: volume_cuft / 27.0,
        }
    }

    #[test]
    fn metric_fallback_chain_never_yields_zero() {
        let zero = metrics(0.0, 0.0, 0.0);
        assert_eq!(resolve_metric(&zero, "volume_cy"), 1.0);
        assert_eq!(resolve_metric(&zero, "no_such_metric"), 1.0);

        let flat = metrics(20.0, 10.0, 0.0);
        // volume is zero, falls through to area
        assert_eq!(resolve_metric(&flat, "volume_cy"), 200.0);
    }

    #[test]
    fn named_metric_wins_when_nonzero() {
        let m = metrics(20.0, 10.0, 0.5);
        assert_eq!(resolve_metric(&m, "linear_ft"), 60.0);
        assert!((resolve_metric(&m, "volume_cy") - 100.0 / 27.0).abs() < 1e-9);
    }

    #[test]
    fn minimum_quantity_floors_the_derived_value() {
        let heuristic = MaterialHeuristic::new("area_sqft", 0.01, "box")
            .min(10.0)
            .precision(0);
        let quantity = derive_quantity(&heuristic, &metrics(20.0, 15.0, 0.0));
        // raw quantity is 3, floor lifts it to exactly 10
        assert_eq!(quantity, 10.0);
    }

    #[test]
    fn round_up_takes_ceiling() {
        let heuristic = MaterialHeuristic::new("area_sqft", 0.021, "box")
            .round_up()
            .precision(0);
        let quantity = derive_quantity(&heuristic, &metrics(20.0, 10.0, 0.0));
        assert_eq!(quantity, 5.0);
    }

    #[test]
    fn precision_zero_yields_integers() {
        let profile = trades::get_profile("concrete").unwrap();
        let m = metrics(20.0, 10.0, 0.5);
        let costs = vec![
            ("concrete mix".to_string(), 6.5),
            ("rebar".to_string(), 0.85),
        ];
        for item in material_line_items(profile, &m, &costs) {
            assert_eq!(item.quantity.fract(), 0.0, "{} not integral", item.name);
        }
    }

    #[test]
    fn unknown_material_uses_implicit_default() {
        let profile = trades::get_profile("concrete").unwrap();
        let m = metrics(20.0, 10.0, 0.5);
        let costs = vec![("mystery sealant".to_string(), 10.0)];
        let items = material_line_items(profile, &m, &costs);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit, "unit");
        // labor metric (volume_cy) × 1.0, at the default 2-decimal precision
        assert!((items[0].quantity - 3.7).abs() < 0.005);
    }

    #[test]
    fn zero_unit_cost_is_not_an_error() {
        let profile = trades::get_profile("concrete").unwrap();
        let items = material_line_items(
            profile,
            &metrics(20.0, 10.0, 0.5),
            &[("gravel".to_string(), 0.0)],
        );
        assert_eq!(items[0].total_cost, 0.0);
        assert!(items[0].quantity > 0.0);
    }

    #[test]
    fn aggregation_follows_the_fixed_order() {
        let profile = trades::get_profile("concrete").unwrap();
        let m = metrics(20.0, 10.0, 0.5);
        let items = vec![MaterialLineItem {
            name: "concrete mix".into(),
            quantity: 167.0,
            unit: "bag".into(),
            unit_cost: 6.5,
            total_cost: 1085.5,
        }];
        let totals = aggregate_bid(profile, &m, &items, 24.5, 0.04, 0.15);

        assert_eq!(totals.material_total, 1085.5);
        // volume_cy ≈ 3.7037 → 22.22 hours, above the 4 hour minimum
        assert!((totals.labor.hours - 22.22).abs() < 0.005);
        let expected_labor = (totals.labor.hours * 24.5 * 100.0).round() / 100.0;
        assert_eq!(totals.labor.total, expected_labor);

        let breakdown = totals.cost_breakdown;
        assert_eq!(
            breakdown.overhead,
            ((breakdown.materials + breakdown.labor) * 0.1 * 100.0).round() / 100.0
        );
        assert!(
            (breakdown.subtotal - (breakdown.materials + breakdown.labor + breakdown.overhead))
                .abs()
                < 0.01
        );
        assert!(
            (breakdown.weather_adjusted_subtotal - breakdown.subtotal * 1.04).abs() < 0.01
        );
        assert!(
            (breakdown.profit - breakdown.weather_adjusted_subtotal * 0.15).abs() < 0.01
        );
        assert!(
            (totals.total_bid - (breakdown.weather_adjusted_subtotal + breakdown.profit)).abs()
                < 0.01
        );
    }

    #[test]
    fn minimum_labor_hours_apply_to_small_jobs() {
        let profile = trades::get_profile("concrete").unwrap();
        // tiny pour: volume_cy ≈ 0.037, raw hours ≈ 0.22
        let totals = aggregate_bid(profile, &metrics(2.0, 1.0, 0.5), &[], 24.5, 0.0, 0.15);
        assert_eq!(totals.labor.hours, 4.0);
    }

    #[test]
    fn no_weather_means_weather_is_exactly_zero() {
        let profile = trades::get_profile("electrical").unwrap();
        let m = metrics(20.0, 15.0, 0.0);
        let totals = aggregate_bid(profile, &m, &[], 32.25, 0.0, 0.18);
        assert_eq!(totals.cost_breakdown.weather_modifier, 0.0);
        assert_eq!(
            totals.cost_breakdown.weather_adjusted_subtotal,
            totals.cost_breakdown.subtotal
        );
    }

    #[test]
    fn margin_rounds_to_four_decimals() {
        let profile = trades::get_profile("concrete").unwrap();
        let totals = aggregate_bid(profile, &metrics(10.0, 10.0, 0.33), &[], 25.0, 0.0, 0.123456);
        assert_eq!(totals.profit_margin, 0.1235);
    }
}
