//! Typed lookups into a `serde_json::Value` params object.
//!
//! Each helper takes the params object, a key, and a default. Missing keys and
//! values of the wrong JSON type yield the default; lookups never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an `f32` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a two-element numeric array `[a, b]` from `params[name]`.
///
/// Anything other than an array of exactly two numbers yields `default`.
pub fn param_pair(params: &Value, name: &str, default: [f32; 2]) -> [f32; 2] {
    let Some(items) = params.get(name).and_then(Value::as_array) else {
        return default;
    };
    match items.as_slice() {
        [a, b] => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => [a as f32, b as f32],
            _ => default,
        },
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"spawn_interval_ms": 1500.5});
        assert_eq!(param_f64(&params, "spawn_interval_ms", 2000.0), 1500.5);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"spawn_interval_ms": 1000});
        assert_eq!(param_f64(&params, "spawn_interval_ms", 0.0), 1000.0);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        assert_eq!(param_f64(&json!({}), "score_rate", 0.01), 0.01);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        assert_eq!(param_f64(&json!("text"), "score_rate", 0.01), 0.01);
    }

    #[test]
    fn param_f32_narrows_json_numbers() {
        let params = json!({"duck_radius": 0.25});
        assert_eq!(param_f32(&params, "duck_radius", 0.0), 0.25);
    }

    #[test]
    fn param_f32_returns_default_for_wrong_type() {
        let params = json!({"duck_radius": "big"});
        assert_eq!(param_f32(&params, "duck_radius", 0.1), 0.1);
    }

    #[test]
    fn param_pair_extracts_two_numbers() {
        let params = json!({"speed_range": [0.02, 0.04]});
        assert_eq!(param_pair(&params, "speed_range", [0.0, 0.0]), [0.02, 0.04]);
    }

    #[test]
    fn param_pair_rejects_wrong_arity() {
        let params = json!({"speed_range": [0.02]});
        assert_eq!(param_pair(&params, "speed_range", [0.1, 0.2]), [0.1, 0.2]);
    }

    #[test]
    fn param_pair_rejects_non_numeric_items() {
        let params = json!({"speed_range": [0.02, "fast"]});
        assert_eq!(param_pair(&params, "speed_range", [0.1, 0.2]), [0.1, 0.2]);
    }

    #[test]
    fn param_pair_returns_default_for_scalar() {
        let params = json!({"speed_range": 0.5});
        assert_eq!(param_pair(&params, "speed_range", [0.1, 0.2]), [0.1, 0.2]);
    }
}
