// Router Dashboard - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Data models for the router's status endpoints.
//!
//! The router's JSON is loosely typed (numbers arrive as strings, booleans as
//! `0`/`1`), so models are built from [`serde_json::Value`] with the lenient
//! field accessors below instead of strict derives.

mod firewall_log;
mod gateway;
mod interface;
mod service;
mod system;

pub use firewall_log::{Action, LogEvent};
pub use gateway::{Gateway, GatewayHealth};
pub use interface::{InterfaceInfo, InterfaceNames};
pub use service::{ServiceAction, ServiceStatus};
pub use system::{CpuGraph, CpuSample, DiskDevice, DiskUsage, MemoryUsage, UsageLevel};

use serde_json::Value;

/// Read a field as a string, coercing numbers and booleans. Missing is empty.
pub(crate) fn field_string(value: &Value, key: &str) -> String {
    field_string_opt(value, key).unwrap_or_default()
}

/// Read a field as a string, `None` when missing or null.
pub(crate) fn field_string_opt(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a field as a boolean; accepts `true`, `1` and `"1"`.
pub(crate) fn field_bool(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "yes"),
        _ => false,
    }
}

/// Read a field as a float; accepts numbers and numeric strings.
pub(crate) fn field_f64(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Iterate the objects of an array field, skipping anything else.
pub(crate) fn field_array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|v| v.is_object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_accessors() {
        let value = json!({
            "name": "unbound",
            "port": 53,
            "running": 1,
            "locked": "0",
            "enabled": true,
            "load": "12.5",
            "rows": [{"a": 1}, "skip", {"b": 2}],
        });

        assert_eq!(field_string(&value, "name"), "unbound");
        assert_eq!(field_string(&value, "port"), "53");
        assert_eq!(field_string(&value, "missing"), "");
        assert_eq!(field_string_opt(&value, "missing"), None);
        assert!(field_bool(&value, "running"));
        assert!(!field_bool(&value, "locked"));
        assert!(field_bool(&value, "enabled"));
        assert!(!field_bool(&value, "missing"));
        assert_eq!(field_f64(&value, "load"), Some(12.5));
        assert_eq!(field_f64(&value, "port"), Some(53.0));
        assert_eq!(field_array(&value, "rows").count(), 2);
        assert_eq!(field_array(&value, "missing").count(), 0);
    }
}
