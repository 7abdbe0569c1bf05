//! Structural comparison of decoded JSON values.
//!
//! Produces one human-readable line per divergence instead of a bare
//! boolean, so a failing case reports exactly which fields drifted. Values
//! are compared field by field; object key order never matters.

use serde_json::Value;

/// Deep-compare `want` against `got`.
///
/// Returns `None` when the values are structurally equal, otherwise a
/// newline-separated description of every mismatch, keyed by JSON path.
pub fn diff_values(want: &Value, got: &Value) -> Option<String> {
    let mut lines = Vec::new();
    walk("$", want, got, &mut lines);
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn walk(path: &str, want: &Value, got: &Value, lines: &mut Vec<String>) {
    match (want, got) {
        (Value::Object(want_map), Value::Object(got_map)) => {
            for (key, want_value) in want_map {
                let child = format!("{path}.{key}");
                match got_map.get(key) {
                    Some(got_value) => walk(&child, want_value, got_value, lines),
                    None => lines.push(format!("{child}: missing, want {want_value}")),
                }
            }
            for (key, got_value) in got_map {
                if !want_map.contains_key(key) {
                    lines.push(format!("{path}.{key}: unexpected, got {got_value}"));
                }
            }
        }
        (Value::Array(want_items), Value::Array(got_items)) => {
            if want_items.len() != got_items.len() {
                lines.push(format!(
                    "{path}: length mismatch, want {} items, got {}",
                    want_items.len(),
                    got_items.len()
                ));
            }
            for (index, (want_item, got_item)) in
                want_items.iter().zip(got_items.iter()).enumerate()
            {
                let child = format!("{path}[{index}]");
                walk(&child, want_item, got_item, lines);
            }
        }
        _ => {
            if want != got {
                lines.push(format!("{path}: want {want}, got {got}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_values_produce_no_diff() {
        let value = json!({"users": "mock response", "count": 3});
        assert_eq!(diff_values(&value, &value.clone()), None);
    }

    #[test]
    fn scalar_mismatch_reports_both_sides() {
        let diff = diff_values(&json!({"users": "a"}), &json!({"users": "b"}))
            .expect("diff expected");
        assert_eq!(diff, r#"$.users: want "a", got "b""#);
    }

    #[test]
    fn missing_and_unexpected_keys_are_both_reported() {
        let diff = diff_values(&json!({"users": "a"}), &json!({"extra": 1}))
            .expect("diff expected");
        assert!(diff.contains(r#"$.users: missing, want "a""#));
        assert!(diff.contains("$.extra: unexpected, got 1"));
    }

    #[test]
    fn nested_paths_are_spelled_out() {
        let want = json!({"meta": {"page": 1, "items": [1, 2]}});
        let got = json!({"meta": {"page": 2, "items": [1, 3]}});
        let diff = diff_values(&want, &got).expect("diff expected");
        assert!(diff.contains("$.meta.page: want 1, got 2"));
        assert!(diff.contains("$.meta.items[1]: want 2, got 3"));
    }

    #[test]
    fn array_length_mismatch_is_reported_once() {
        let diff = diff_values(&json!([1, 2, 3]), &json!([1])).expect("diff expected");
        assert!(diff.contains("$: length mismatch, want 3 items, got 1"));
    }

    #[test]
    fn type_mismatch_falls_back_to_value_report() {
        let diff = diff_values(&json!({"users": "a"}), &json!("a")).expect("diff expected");
        assert!(diff.contains("want"));
        assert!(diff.contains("got"));
    }
}
