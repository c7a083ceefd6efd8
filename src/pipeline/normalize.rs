//! Dimensional normalizer
//!
//! Converts raw, possibly partial or malformed user input into canonical
//! derived metrics. Coercion failure is never an error: each field
//! independently falls back to its profile default. Inputs are assumed
//! non-negative; negative values are not rejected and flow through the
//! arithmetic unchanged.

use crate::domain::{MaterialsInput, ProjectMetrics, RawDimensions};
use crate::trades::TradeProfile;

const CUFT_PER_CUBIC_YARD: f64 = 27.0;

/// Coerce a JSON value to f64: numbers pass through, numeric strings parse,
/// everything else is rejected.
fn coerce_f64(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Derive canonical metrics from raw dimensions, with per-field profile
/// fallbacks.
pub fn normalize_dimensions(raw: &RawDimensions, profile: &TradeProfile) -> ProjectMetrics {
    let defaults = profile.default_dimensions;
    let length = coerce_f64(raw.length.as_ref()).unwrap_or(defaults.length);
    let width = coerce_f64(raw.width.as_ref()).unwrap_or(defaults.width);
    let depth = coerce_f64(raw.depth.as_ref()).unwrap_or(defaults.depth);

    let area = length * width;
    let volume_cuft = area * depth;

    ProjectMetrics {
        length_ft: length,
        width_ft: width,
        depth_ft: depth,
        area_sqft: area,
        linear_ft: 2.0 * (length + width),
        volume_cuft,
        volume_cy: volume_cuft / CUFT_PER_CUBIC_YARD,
    }
}

/// Normalize the materials list: accept a comma-separated string or a list,
/// dedupe case-insensitively preserving first-seen order, and fall back to
/// the profile's defaults when nothing usable remains.
pub fn normalize_materials(input: Option<&MaterialsInput>, profile: &TradeProfile) -> Vec<String> {
    let names: Vec<String> = match input {
        Some(MaterialsInput::List(items)) => {
            items.iter().map(|s| s.trim().to_string()).collect()
        }
        Some(MaterialsInput::Csv(csv)) => {
            csv.split(',').map(|s| s.trim().to_string()).collect()
        }
        None => Vec::new(),
    };

    let mut seen = std::collections::HashSet::new();
    let mut materials: Vec<String> = Vec::new();
    for name in names {
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            materials.push(name);
        }
    }

    if materials.is_empty() {
        profile
            .default_materials
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        materials
    }
}

/// Resolve the effective profit margin: caller-supplied when it coerces to a
/// number in [0, 1], else the profile default.
pub fn resolve_margin(raw: Option<&serde_json::Value>, profile: &TradeProfile) -> f64 {
    match coerce_f64(raw) {
        Some(margin) if (0.0..=1.0).contains(&margin) => margin,
        _ => profile.default_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trades;
    use serde_json::json;

    fn concrete() -> &'static TradeProfile {
        trades::get_profile("concrete").unwrap()
    }

    fn dims(length: serde_json::Value, width: serde_json::Value, depth: serde_json::Value) -> RawDimensions {
        RawDimensions {
            length: Some(length),
            width: Some(width),
            depth: Some(depth),
        }
    }

    #[test]
    fn derives_area_perimeter_and_volume() {
        let metrics = normalize_dimensions(&dims(json!(20), json!(10), json!(0.5)), concrete());
        assert_eq!(metrics.area_sqft, 200.0);
        assert_eq!(metrics.linear_ft, 60.0);
        assert_eq!(metrics.volume_cuft, 100.0);
        assert!((metrics.volume_cy - 100.0 / 27.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_strings_coerce() {
        let metrics = normalize_dimensions(&dims(json!("20"), json!(" 10.5 "), json!("0.5")), concrete());
        assert_eq!(metrics.length_ft, 20.0);
        assert_eq!(metrics.width_ft, 10.5);
        assert_eq!(metrics.depth_ft, 0.5);
    }

    #[test]
    fn malformed_fields_fall_back_independently() {
        let metrics = normalize_dimensions(&dims(json!("garbage"), json!(8), json!(null)), concrete());
        assert_eq!(metrics.length_ft, 10.0);
        assert_eq!(metrics.width_ft, 8.0);
        assert_eq!(metrics.depth_ft, 0.33);
    }

    #[test]
    fn missing_dimensions_use_profile_defaults() {
        let metrics = normalize_dimensions(&RawDimensions::default(), concrete());
        assert_eq!(metrics.length_ft, 10.0);
        assert_eq!(metrics.width_ft, 10.0);
        assert_eq!(metrics.depth_ft, 0.33);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = dims(json!(12), json!("9"), json!(0.75));
        let first = normalize_dimensions(&raw, concrete());
        let second = normalize_dimensions(&raw, concrete());
        assert_eq!(first, second);
    }

    #[test]
    fn csv_materials_parse_and_dedupe() {
        let input = MaterialsInput::Csv("rebar, gravel , rebar,, Gravel".into());
        let materials = normalize_materials(Some(&input), concrete());
        assert_eq!(materials, vec!["rebar", "gravel"]);
    }

    #[test]
    fn list_materials_preserve_first_seen_order() {
        let input = MaterialsInput::List(vec![
            "gravel".into(),
            "concrete mix".into(),
            "GRAVEL".into(),
        ]);
        let materials = normalize_materials(Some(&input), concrete());
        assert_eq!(materials, vec!["gravel", "concrete mix"]);
    }

    #[test]
    fn empty_materials_fall_back_to_profile_defaults() {
        let electrical = trades::get_profile("electrical").unwrap();
        let materials = normalize_materials(None, electrical);
        assert_eq!(materials, vec!["romex wire", "outlet boxes", "breakers"]);

        let blank = MaterialsInput::Csv(" , , ".into());
        let materials = normalize_materials(Some(&blank), electrical);
        assert_eq!(materials, vec!["romex wire", "outlet boxes", "breakers"]);
    }

    #[test]
    fn margin_accepts_valid_values_and_rejects_the_rest() {
        let profile = concrete();
        assert_eq!(resolve_margin(Some(&json!(0.25)), profile), 0.25);
        assert_eq!(resolve_margin(Some(&json!("0.3")), profile), 0.3);
        assert_eq!(resolve_margin(Some(&json!(1.5)), profile), 0.15);
        assert_eq!(resolve_margin(Some(&json!(-0.1)), profile), 0.15);
        assert_eq!(resolve_margin(Some(&json!("lots")), profile), 0.15);
        assert_eq!(resolve_margin(None, profile), 0.15);
    }
}
