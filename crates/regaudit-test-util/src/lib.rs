//! Shared test utilities for the regaudit workspace.
//!
//! Lives in its own crate so both the CLI integration tests and `xtask` can use it.

use serde_json::Value;

const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Keys whose values are wall-clock derived in a regaudit report.
const TIMESTAMP_KEYS: &[&str] = &[
    "started_at",
    "ended_at",
    "auditDate",
    "checkedAt",
    "deadline",
    "next_audit_date",
];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` becomes `"__VERSION__"`, but only on report envelopes at the root
///   (a single envelope or each element of a root array).
/// - Timestamp keys and `duration_ms` are normalized at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    match &mut value {
        Value::Array(items) => items.iter_mut().for_each(normalize_tool_version),
        other => normalize_tool_version(other),
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_tool_version(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    let is_envelope = ["schema", "tool", "run", "verdict", "data"]
        .iter()
        .all(|k| obj.contains_key(*k));
    if is_envelope
        && let Some(tool) = obj.get_mut("tool")
        && let Some(tool_obj) = tool.as_object_mut()
        && tool_obj.contains_key("version")
    {
        tool_obj.insert(
            "version".to_string(),
            Value::String("__VERSION__".to_string()),
        );
    }
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(v) = map.get_mut(*key)
                    && v.is_string()
                {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
