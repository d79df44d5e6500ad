//! Helpers for reading typed overrides out of a JSON object.
//!
//! Each helper takes the JSON value, a key, and a default. Missing keys and
//! values of the wrong type yield the default, so a partially bogus override
//! object still produces a usable config.

use serde_json::Value;

/// Reads `params[name]` as `f64` (integers included), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer, else `default`.
///
/// Values that do not fit in `usize` on the target fall back as well.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads `params[name]` as `bool`, else `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"speed": 0.3, "line_width": 2});
        assert!((param_f64(&params, "speed", 0.15) - 0.3).abs() < f64::EPSILON);
        assert!((param_f64(&params, "line_width", 1.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_for_missing_null_or_string() {
        let params = json!({"speed": null, "glow_blur": "lots"});
        assert!((param_f64(&params, "speed", 0.15) - 0.15).abs() < f64::EPSILON);
        assert!((param_f64(&params, "glow_blur", 10.0) - 10.0).abs() < f64::EPSILON);
        assert!((param_f64(&params, "absent", 4.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_for_non_object() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "speed", 0.15) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_extracts_integer() {
        assert_eq!(param_usize(&json!({"base_count": 120}), "base_count", 70), 120);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        assert_eq!(param_usize(&json!({"base_count": -5}), "base_count", 70), 70);
        assert_eq!(param_usize(&json!({"base_count": 12.5}), "base_count", 70), 70);
    }

    #[test]
    fn param_usize_keeps_values_that_fit_the_target() {
        let params = json!({"base_count": u64::MAX});
        let expected = usize::try_from(u64::MAX).unwrap_or(70);
        assert_eq!(param_usize(&params, "base_count", 70), expected);
    }

    #[test]
    fn param_bool_extracts_or_falls_back() {
        assert!(param_bool(&json!({"reduced_motion": true}), "reduced_motion", false));
        assert!(!param_bool(&json!({"reduced_motion": 1}), "reduced_motion", false));
        assert!(param_bool(&json!({}), "reduced_motion", true));
    }
}
