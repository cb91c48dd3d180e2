// Router Dashboard - Configuration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Application settings management using a local JSON file.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::CpuGraph;

/// Environment variable overriding the stored router URL.
pub const ENV_URL: &str = "ROUTER_DASHBOARD_URL";
/// Environment variable overriding the stored API key.
pub const ENV_KEY: &str = "ROUTER_DASHBOARD_KEY";
/// Environment variable overriding the stored API secret.
pub const ENV_SECRET: &str = "ROUTER_DASHBOARD_SECRET";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the router web interface.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Accept self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Seconds between polls of the status endpoints.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u32,
    /// Rows of the detailed live log, also the number of rules after which
    /// the rule chart layout is considered stable.
    #[serde(default = "default_rotation")]
    pub rotation: usize,
    /// Rows of the compact live log on the overview.
    #[serde(default = "default_overview_log_size")]
    pub overview_log_size: usize,
    /// CPU graphs shown on the traffic page.
    #[serde(default = "default_cpu_graphs")]
    pub cpu_graphs: Vec<CpuGraph>,
    /// Reopen event streams this many seconds after they end. Off when unset.
    #[serde(default)]
    pub reconnect_delay_secs: Option<u64>,
    /// Window width.
    #[serde(default = "default_width")]
    pub window_width: i32,
    /// Window height.
    #[serde(default = "default_height")]
    pub window_height: i32,
    /// Whether window is maximized.
    #[serde(default)]
    pub is_maximized: bool,
    /// Theme preference: "system", "light", or "dark".
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_api_url() -> String { "https://192.168.1.1".to_string() }
fn default_tick_seconds() -> u32 { 5 }
fn default_rotation() -> usize { 5 }
fn default_overview_log_size() -> usize { 9 }
fn default_cpu_graphs() -> Vec<CpuGraph> { vec![CpuGraph::Total] }
fn default_width() -> i32 { 1280 }
fn default_height() -> i32 { 860 }
fn default_theme() -> String { "system".to_string() }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            api_secret: String::new(),
            accept_invalid_certs: false,
            tick_seconds: default_tick_seconds(),
            rotation: default_rotation(),
            overview_log_size: default_overview_log_size(),
            cpu_graphs: default_cpu_graphs(),
            reconnect_delay_secs: None,
            window_width: default_width(),
            window_height: default_height(),
            is_maximized: false,
            theme: default_theme(),
        }
    }
}

/// Everything needed to talk to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub accept_invalid_certs: bool,
    pub reconnect_delay: Option<Duration>,
}

impl ConnectionSettings {
    /// Whether a URL and credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
            && !self.api_key.is_empty()
            && !self.api_secret.is_empty()
    }
}

/// Settings manager that persists to a JSON file.
#[derive(Debug)]
pub struct Settings {
    settings: AppSettings,
    path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create a new Settings instance, loading from disk.
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("router-dashboard")
            .join("settings.json");
        Self::with_path(path)
    }

    /// Load settings from a specific file.
    pub fn with_path(path: PathBuf) -> Self {
        let settings = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Failed to parse settings: {}", e);
                        AppSettings::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings: {}", e);
                    AppSettings::default()
                }
            }
        } else {
            debug!("No settings at {}, using defaults", path.display());
            AppSettings::default()
        };

        Self { settings, path }
    }

    /// Save settings to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match serde_json::to_string_pretty(&self.settings) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!("Failed to save settings: {}", e);
                }
            }
            Err(e) => {
                warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Get the raw settings.
    pub fn values(&self) -> &AppSettings {
        &self.settings
    }

    /// Connection settings, with environment overrides applied.
    pub fn connection(&self) -> ConnectionSettings {
        self.connection_with_env(|name| env::var(name).ok())
    }

    fn connection_with_env(&self, lookup: impl Fn(&str) -> Option<String>) -> ConnectionSettings {
        let pick = |name: &str, stored: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| stored.to_string())
        };

        ConnectionSettings {
            base_url: pick(ENV_URL, &self.settings.api_url)
                .trim_end_matches('/')
                .to_string(),
            api_key: pick(ENV_KEY, &self.settings.api_key),
            api_secret: pick(ENV_SECRET, &self.settings.api_secret),
            accept_invalid_certs: self.settings.accept_invalid_certs,
            reconnect_delay: self.settings.reconnect_delay_secs.map(Duration::from_secs),
        }
    }

    /// Set the router URL and credentials.
    pub fn set_connection(&mut self, url: &str, key: &str, secret: &str) {
        self.settings.api_url = url.trim().to_string();
        self.settings.api_key = key.trim().to_string();
        self.settings.api_secret = secret.trim().to_string();
        self.save();
    }

    /// Set whether self-signed certificates are accepted.
    pub fn set_accept_invalid_certs(&mut self, accept: bool) {
        self.settings.accept_invalid_certs = accept;
        self.save();
    }

    /// Get the poll interval in seconds.
    pub fn tick_seconds(&self) -> u32 {
        self.settings.tick_seconds.max(1)
    }

    /// Set the poll interval in seconds.
    pub fn set_tick_seconds(&mut self, seconds: u32) {
        self.settings.tick_seconds = seconds.max(1);
        self.save();
    }

    /// Get the detailed log rotation.
    pub fn rotation(&self) -> usize {
        self.settings.rotation.max(1)
    }

    /// Set the detailed log rotation.
    pub fn set_rotation(&mut self, rotation: usize) {
        self.settings.rotation = rotation.max(1);
        self.save();
    }

    /// Get the number of rows in the overview log.
    pub fn overview_log_size(&self) -> usize {
        self.settings.overview_log_size.max(1)
    }

    /// Get the selected CPU graphs.
    pub fn cpu_graphs(&self) -> &[CpuGraph] {
        &self.settings.cpu_graphs
    }

    /// Set the selected CPU graphs, in the canonical order.
    pub fn set_cpu_graphs(&mut self, graphs: &[CpuGraph]) {
        self.settings.cpu_graphs = CpuGraph::ALL
            .into_iter()
            .filter(|g| graphs.contains(g))
            .collect();
        self.save();
    }

    /// Get the window width.
    pub fn window_width(&self) -> i32 {
        self.settings.window_width
    }

    /// Get the window height.
    pub fn window_height(&self) -> i32 {
        self.settings.window_height
    }

    /// Get whether the window is maximized.
    pub fn is_maximized(&self) -> bool {
        self.settings.is_maximized
    }

    /// Remember the window geometry.
    pub fn set_window_state(&mut self, width: i32, height: i32, maximized: bool) {
        self.settings.window_width = width;
        self.settings.window_height = height;
        self.settings.is_maximized = maximized;
        self.save();
    }

    /// Get the theme preference.
    pub fn theme(&self) -> &str {
        &self.settings.theme
    }

    /// Set the theme preference.
    pub fn set_theme(&mut self, theme: &str) {
        self.settings.theme = theme.to_string();
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("router-dashboard-test-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.tick_seconds, 5);
        assert_eq!(settings.rotation, 5);
        assert_eq!(settings.overview_log_size, 9);
        assert_eq!(settings.cpu_graphs, vec![CpuGraph::Total]);
        assert_eq!(settings.reconnect_delay_secs, None);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("reload");
        let mut settings = Settings::with_path(path.clone());
        settings.set_connection(" https://fw.lan/ ", "key", "secret");
        settings.set_cpu_graphs(&[CpuGraph::Sys, CpuGraph::Total]);
        settings.set_rotation(0);

        let reloaded = Settings::with_path(path.clone());
        assert_eq!(reloaded.values(), settings.values());
        assert_eq!(reloaded.cpu_graphs(), &[CpuGraph::Total, CpuGraph::Sys]);
        assert_eq!(reloaded.rotation(), 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_tick_seconds_at_least_one() {
        let path = temp_path("tick");
        let mut settings = Settings::with_path(path.clone());
        assert_eq!(settings.tick_seconds(), 5);

        settings.set_tick_seconds(0);
        assert_eq!(settings.tick_seconds(), 1);
        assert_eq!(settings.values().tick_seconds, 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let settings = Settings::with_path(path.clone());
        assert_eq!(settings.values(), &AppSettings::default());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_environment_overrides_connection() {
        let mut settings = Settings::with_path(temp_path("env"));
        settings.settings.api_url = "https://stored/".to_string();
        settings.settings.api_key = "stored-key".to_string();
        settings.settings.api_secret = "stored-secret".to_string();

        let conn = settings.connection_with_env(|name| match name {
            ENV_URL => Some("https://override/".to_string()),
            ENV_SECRET => Some(String::new()),
            _ => None,
        });
        assert_eq!(conn.base_url, "https://override");
        assert_eq!(conn.api_key, "stored-key");
        assert_eq!(conn.api_secret, "stored-secret");
        assert!(conn.is_configured());

        let unset = Settings::with_path(temp_path("unset")).connection_with_env(|_| None);
        assert!(!unset.is_configured());
    }
}
