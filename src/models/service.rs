// Router Dashboard - Service Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Router service status and control actions.

use serde_json::Value;

use super::{field_array, field_bool, field_string};

/// A control action for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    /// Path segment of the command endpoint.
    pub fn command(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            ServiceAction::Start => "media-playback-start-symbolic",
            ServiceAction::Stop => "media-playback-stop-symbolic",
            ServiceAction::Restart => "view-refresh-symbolic",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ServiceAction::Start => "Start",
            ServiceAction::Stop => "Stop",
            ServiceAction::Restart => "Restart",
        }
    }

    /// Past tense for feedback messages.
    pub fn done(&self) -> &'static str {
        match self {
            ServiceAction::Start => "Started",
            ServiceAction::Stop => "Stopped",
            ServiceAction::Restart => "Restarted",
        }
    }
}

/// A router service from `core/service/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    pub running: bool,
    /// Locked services can only be restarted.
    pub locked: bool,
}

impl ServiceStatus {
    pub fn from_row(row: &Value) -> Self {
        Self {
            id: field_string(row, "id"),
            name: field_string(row, "name"),
            description: field_string(row, "description"),
            running: field_bool(row, "running"),
            locked: field_bool(row, "locked"),
        }
    }

    /// Build the service list from a search response. Empty when there are none.
    pub fn list_from_response(value: &Value) -> Vec<Self> {
        field_array(value, "rows").map(Self::from_row).collect()
    }

    /// Actions offered for this service, in display order.
    pub fn actions(&self) -> Vec<ServiceAction> {
        if self.locked {
            vec![ServiceAction::Restart]
        } else if self.running {
            vec![ServiceAction::Restart, ServiceAction::Stop]
        } else {
            vec![ServiceAction::Start]
        }
    }

    /// Name shown on the service tile.
    pub fn display_name(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_per_state() {
        let locked = ServiceStatus { locked: true, running: true, ..Default::default() };
        assert_eq!(locked.actions(), vec![ServiceAction::Restart]);

        let running = ServiceStatus { running: true, ..Default::default() };
        assert_eq!(running.actions(), vec![ServiceAction::Restart, ServiceAction::Stop]);

        let stopped = ServiceStatus::default();
        assert_eq!(stopped.actions(), vec![ServiceAction::Start]);
    }

    #[test]
    fn test_list_from_response() {
        let response = json!({
            "rows": [
                {"id": "unbound", "name": "unbound", "description": "Unbound DNS",
                 "running": 1, "locked": 0},
                {"id": "configd", "name": "configd", "description": "",
                 "running": 1, "locked": 1}
            ]
        });
        let services = ServiceStatus::list_from_response(&response);
        assert_eq!(services.len(), 2);
        assert!(services[0].running);
        assert!(!services[0].locked);
        assert_eq!(services[0].display_name(), "Unbound DNS");
        assert_eq!(services[1].display_name(), "configd");
        assert_eq!(services[1].actions(), vec![ServiceAction::Restart]);
    }

    #[test]
    fn test_empty_response() {
        assert!(ServiceStatus::list_from_response(&json!({})).is_empty());
        assert!(ServiceStatus::list_from_response(&json!({"rows": []})).is_empty());
    }
}
