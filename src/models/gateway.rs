// Router Dashboard - Gateway Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Gateway monitoring status.

use serde_json::Value;

use super::{field_array, field_string};

/// Coarse gateway health, derived from the monitor status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayHealth {
    Online,
    /// Packet loss or high latency.
    Degraded,
    Down,
}

impl GatewayHealth {
    pub fn from_status(status: &str) -> Self {
        match status {
            "force_down" | "down" => GatewayHealth::Down,
            "loss" | "delay" | "delay+loss" => GatewayHealth::Degraded,
            _ => GatewayHealth::Online,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            GatewayHealth::Online => "success",
            GatewayHealth::Degraded => "warning",
            GatewayHealth::Down => "error",
        }
    }
}

/// A gateway from `routes/gateway/status`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gateway {
    pub name: String,
    pub address: String,
    pub status: String,
    /// Localized status text from the router.
    pub status_translated: String,
    pub loss: String,
    pub delay: String,
    pub stddev: String,
}

impl Gateway {
    pub fn from_item(item: &Value) -> Self {
        Self {
            name: field_string(item, "name"),
            address: field_string(item, "address"),
            status: field_string(item, "status"),
            status_translated: field_string(item, "status_translated"),
            loss: field_string(item, "loss"),
            delay: field_string(item, "delay"),
            stddev: field_string(item, "stddev"),
        }
    }

    pub fn list_from_response(value: &Value) -> Vec<Self> {
        field_array(value, "items").map(Self::from_item).collect()
    }

    pub fn health(&self) -> GatewayHealth {
        GatewayHealth::from_status(&self.status)
    }

    /// Whether the monitor produced RTT / loss figures (`~` means no data).
    pub fn has_metrics(&self) -> bool {
        self.delay != "~"
    }

    /// Tooltip text for the status icon.
    pub fn status_text(&self) -> &str {
        if self.status_translated.is_empty() {
            &self.status
        } else {
            &self.status_translated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_mapping() {
        assert_eq!(GatewayHealth::from_status("down"), GatewayHealth::Down);
        assert_eq!(GatewayHealth::from_status("force_down"), GatewayHealth::Down);
        assert_eq!(GatewayHealth::from_status("loss"), GatewayHealth::Degraded);
        assert_eq!(GatewayHealth::from_status("delay+loss"), GatewayHealth::Degraded);
        assert_eq!(GatewayHealth::from_status("none"), GatewayHealth::Online);
        assert_eq!(GatewayHealth::from_status(""), GatewayHealth::Online);
    }

    #[test]
    fn test_gateways_from_response() {
        let response = json!({
            "items": [
                {"name": "WAN_DHCP", "address": "203.0.113.1", "status": "none",
                 "status_translated": "Online", "loss": "0.0 %", "delay": "4.2 ms",
                 "stddev": "0.3 ms"},
                {"name": "WAN_PPPOE", "address": "~", "status": "down",
                 "status_translated": "Offline", "loss": "~", "delay": "~", "stddev": "~"}
            ]
        });
        let gateways = Gateway::list_from_response(&response);
        assert_eq!(gateways.len(), 2);
        assert!(gateways[0].has_metrics());
        assert_eq!(gateways[0].status_text(), "Online");
        assert!(!gateways[1].has_metrics());
        assert_eq!(gateways[1].health().css_class(), "error");
        assert!(Gateway::list_from_response(&json!({"items": []})).is_empty());
    }
}
