// Router Dashboard - Firewall Log Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Firewall live log events.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde_json::Value;

use super::{field_string, field_string_opt};

/// Action taken by the rule that matched a packet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Pass,
    Block,
    /// Port forward (`rdr`).
    Redirect,
    Nat,
    /// Anything the router sends that we don't recognize.
    Other(String),
}

impl Action {
    /// Map the router's action keyword to an action. Never fails.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "pass" => Action::Pass,
            "block" => Action::Block,
            "rdr" => Action::Redirect,
            "nat" => Action::Nat,
            _ => Action::Other(keyword.to_string()),
        }
    }

    /// Symbolic icon for the action, `None` renders a blank cell.
    pub fn icon_name(&self) -> Option<&'static str> {
        match self {
            Action::Pass => Some("media-playback-start-symbolic"),
            Action::Block => Some("action-unavailable-symbolic"),
            Action::Redirect | Action::Nat => Some("media-playlist-repeat-symbolic"),
            Action::Other(_) => None,
        }
    }

    /// Style class for the action icon.
    pub fn css_class(&self) -> &'static str {
        match self {
            Action::Pass => "success",
            Action::Block => "error",
            Action::Redirect | Action::Nat => "accent",
            Action::Other(_) => "dim-label",
        }
    }

    /// Short human-readable name.
    pub fn label(&self) -> &str {
        match self {
            Action::Pass => "pass",
            Action::Block => "block",
            Action::Redirect => "rdr",
            Action::Nat => "nat",
            Action::Other(other) => other,
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Other(String::new())
    }
}

/// One line of the firewall live log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEvent {
    /// Rule identifier.
    pub rid: String,
    pub action: Action,
    /// Interface identifier (e.g. `igb0`), see [`InterfaceNames`](super::InterfaceNames).
    pub interface: String,
    pub src: String,
    pub dst: String,
    pub dstport: Option<String>,
    /// Rule description, empty when the rule has none.
    pub label: String,
    /// Rule number as shown in the router's rule list.
    pub rulenr: Option<String>,
    /// Raw `__timestamp__` value.
    pub raw_timestamp: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl LogEvent {
    /// Decode a stream message.
    ///
    /// Only non-JSON payloads are rejected; missing or oddly typed fields are
    /// coerced to empty values.
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(data)?;
        Ok(Self::from_value(&value))
    }

    /// Build an event from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        let raw_timestamp = field_string(value, "__timestamp__");
        let timestamp = parse_timestamp(&raw_timestamp);

        Self {
            rid: field_string(value, "rid"),
            action: Action::from_keyword(&field_string(value, "action")),
            interface: field_string(value, "interface"),
            src: field_string(value, "src"),
            dst: field_string(value, "dst"),
            dstport: field_string_opt(value, "dstport"),
            label: field_string(value, "label"),
            rulenr: field_string_opt(value, "rulenr"),
            raw_timestamp,
            timestamp,
        }
    }

    /// Destination port, empty when the protocol has none.
    pub fn dstport_display(&self) -> &str {
        self.dstport.as_deref().unwrap_or("")
    }

    /// Local wall-clock time of the event.
    pub fn time_display(&self, with_seconds: bool) -> String {
        let format = if with_seconds { "%H:%M:%S" } else { "%H:%M" };
        match self.timestamp {
            Some(ts) => ts.with_timezone(&Local).format(format).to_string(),
            None => self.raw_timestamp.clone(),
        }
    }

    /// Popover text describing the matched rule.
    pub fn rule_summary(&self) -> String {
        let mut summary = match &self.rulenr {
            Some(nr) => format!("@{}", nr),
            None => format!("rule {}", self.rid),
        };
        if !self.label.is_empty() {
            summary.push_str(&format!("  Label: {}", self.label));
        }
        summary
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    // Timestamps without an offset are in the router's local time, which we
    // assume matches ours.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| naive.and_local_timezone(Local).single())
        .map(|ts| ts.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping_is_total() {
        assert_eq!(Action::from_keyword("pass"), Action::Pass);
        assert_eq!(Action::from_keyword("BLOCK"), Action::Block);
        assert_eq!(Action::from_keyword("rdr"), Action::Redirect);
        assert_eq!(Action::from_keyword("nat"), Action::Nat);

        let unknown = Action::from_keyword("binat");
        assert_eq!(unknown, Action::Other("binat".to_string()));
        assert_eq!(unknown.icon_name(), None);
        assert_eq!(unknown.label(), "binat");
    }

    #[test]
    fn test_decode_full_event() {
        let event = LogEvent::from_json(
            r#"{"rid":"abc123","action":"block","interface":"igb0","src":"10.0.0.5",
                "dst":"192.168.1.1","dstport":"443","label":"Default deny",
                "rulenr":"12","__timestamp__":"2026-03-01T10:15:30+00:00"}"#,
        )
        .unwrap();

        assert_eq!(event.rid, "abc123");
        assert_eq!(event.action, Action::Block);
        assert_eq!(event.interface, "igb0");
        assert_eq!(event.dstport.as_deref(), Some("443"));
        assert_eq!(event.label, "Default deny");
        assert_eq!(event.rule_summary(), "@12  Label: Default deny");
        assert!(event.timestamp.is_some());
    }

    #[test]
    fn test_decode_coerces_missing_fields() {
        let event = LogEvent::from_json(r#"{"rid":"r1","dstport":8080,"label":null}"#).unwrap();

        assert_eq!(event.rid, "r1");
        assert_eq!(event.src, "");
        assert_eq!(event.label, "");
        assert_eq!(event.dstport.as_deref(), Some("8080"));
        assert_eq!(event.action, Action::Other(String::new()));
        assert_eq!(event.time_display(true), "");
        assert_eq!(event.rule_summary(), "rule r1");
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(LogEvent::from_json("not json").is_err());
    }

    #[test]
    fn test_unparseable_timestamp_is_shown_raw() {
        let event = LogEvent::from_json(r#"{"__timestamp__":"yesterday"}"#).unwrap();
        assert_eq!(event.timestamp, None);
        assert_eq!(event.time_display(false), "yesterday");
    }
}
