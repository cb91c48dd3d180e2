// Router Dashboard - Interface Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Network interface status.

use std::collections::HashMap;

use serde_json::Value;

use super::{field_array, field_bool, field_string};

/// Interface as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceInfo {
    /// Router identifier (`lan`, `wan`, `opt1`).
    pub identifier: String,
    pub description: String,
    pub status: String,
    /// Link media, or the cellular mode for LTE devices.
    pub media: String,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl InterfaceInfo {
    /// Build from one row of `interfacesInfo`.
    ///
    /// Returns `None` for rows that aren't shown: unconfigured, disabled or
    /// virtual interfaces.
    pub fn from_row(row: &Value) -> Option<Self> {
        let config = row.get("config").filter(|c| c.is_object())?;
        if row.get("enabled").is_some() && !field_bool(row, "enabled") {
            return None;
        }
        if field_string(config, "virtual") == "1" {
            return None;
        }

        let media = match row.get("media") {
            Some(_) => field_string(row, "media"),
            None => field_string(row, "cell_mode"),
        };

        Some(Self {
            identifier: field_string(row, "identifier"),
            description: field_string(row, "description"),
            status: field_string(row, "status"),
            media,
            ipv4: first_address(row, "ipv4"),
            ipv6: first_address(row, "ipv6"),
        })
    }

    /// Build the visible interface list from an `interfacesInfo` response.
    pub fn list_from_response(value: &Value) -> Vec<Self> {
        field_array(value, "rows").filter_map(Self::from_row).collect()
    }

    pub fn is_up(&self) -> bool {
        self.status == "up"
    }

    /// Style class for the status icon.
    pub fn status_css_class(&self) -> &'static str {
        if self.is_up() {
            "success"
        } else {
            "error"
        }
    }
}

fn first_address(row: &Value, key: &str) -> Option<String> {
    field_array(row, key)
        .next()
        .map(|addr| field_string(addr, "ipaddr"))
        .filter(|addr| !addr.is_empty())
}

/// Map of interface identifiers to their descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceNames(HashMap<String, String>);

impl InterfaceNames {
    /// Build from a `getInterfaceNames` response (an object of id → name).
    pub fn from_response(value: &Value) -> Self {
        let names = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(id, name)| name.as_str().map(|n| (id.clone(), n.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self(names)
    }

    /// Display name for an interface, falling back to the identifier.
    pub fn display<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.0.get(identifier).map(String::as_str).unwrap_or(identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_hidden_interfaces() {
        let response = json!({
            "rows": [
                {"identifier": "lan", "description": "LAN", "status": "up", "enabled": true,
                 "media": "1000baseT <full-duplex>", "config": {"enable": "1"},
                 "ipv4": [{"ipaddr": "192.168.1.1/24"}], "ipv6": []},
                {"identifier": "opt1", "description": "Disabled", "enabled": false, "config": {}},
                {"identifier": "lo0", "description": "Loopback", "config": {"virtual": "1"}},
                {"identifier": "enc0", "description": "No config"},
                {"identifier": "wwan", "description": "LTE", "status": "down",
                 "cell_mode": "LTE", "config": {}}
            ]
        });
        let interfaces = InterfaceInfo::list_from_response(&response);

        assert_eq!(interfaces.len(), 2);
        assert_eq!(interfaces[0].identifier, "lan");
        assert_eq!(interfaces[0].ipv4.as_deref(), Some("192.168.1.1/24"));
        assert_eq!(interfaces[0].ipv6, None);
        assert_eq!(interfaces[0].status_css_class(), "success");
        assert_eq!(interfaces[1].media, "LTE");
        assert_eq!(interfaces[1].status_css_class(), "error");
    }

    #[test]
    fn test_interface_names() {
        let names = InterfaceNames::from_response(&json!({"igb0": "WAN", "igb1": "LAN"}));
        assert_eq!(names.display("igb0"), "WAN");
        assert_eq!(names.display("igb7"), "igb7");
        assert!(InterfaceNames::from_response(&json!([])).is_empty());
    }
}
